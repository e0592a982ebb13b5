//! Rules engine trait.
//!
//! The engine boundary implements `RulesEngine` to define its rules:
//! - What actions are legal
//! - How actions modify state
//! - Win/loss conditions

use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::config::RuleConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner; the other seat lost.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    #[must_use]
    pub fn winner(&self) -> PlayerId {
        match self {
            GameResult::Winner(p) => *p,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `apply_action`: Either fully applies or returns an error with the
///   state untouched
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the rule configuration.
    fn config(&self) -> &RuleConfig;

    /// Every action `player` may submit right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to the game state.
    ///
    /// Deterministic given the state's RNG.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), EngineError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check if a specific action is legal.
    fn is_legal(&self, state: &GameState, player: PlayerId, action: Action) -> bool {
        self.legal_actions(state, player).contains(&action)
    }
}
