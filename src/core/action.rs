//! Action representation.
//!
//! An `Action` is one request a seat can submit to the engine. Both the
//! external boundary (`KittenGame::play_card` and friends) and the opponent
//! heuristic speak in actions, so `RulesEngine::apply_action` is the single
//! entry point that mutates a game.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardKind;

/// A complete game action.
///
/// ```
/// use kitten_rules::cards::CardKind;
/// use kitten_rules::core::Action;
///
/// let steal = Action::Pair(CardKind::TacoCat);
/// let ask = Action::Trio { cat: CardKind::BeardCat, requested: CardKind::Defuse };
/// assert_ne!(steal, ask);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw the top card, ending the turn.
    Draw,
    /// Play a single action card.
    Play(CardKind),
    /// Play two matching cats to steal a card.
    Pair(CardKind),
    /// Play three matching cats to name a card to take.
    Trio { cat: CardKind, requested: CardKind },
    /// Answer a pending interrupt, optionally spending a Nope.
    Interrupt { use_nope: bool },
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
