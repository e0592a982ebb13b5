//! Turn control and the rules engine trait.
//!
//! `turn` owns the forced-extra-turns counter and derives who acts next;
//! `engine` defines the `RulesEngine` trait the game boundary implements.

pub mod engine;
pub mod turn;

pub use engine::{GameResult, RulesEngine};
pub use turn::{Handoff, Phase, TurnState};
