//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! Everything a rule operation touches lives in one owned `GameState`;
//! `RuleConfig` selects the rule variant and the opponent's behavior.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{AttackRule, NopeConfig, RuleConfig};
pub use error::EngineError;
pub use action::{Action, ActionRecord};
pub use state::{Foreknowledge, GameState, GameStateBuilder, Glimpse, LossCause, Outcome, PendingAction};
