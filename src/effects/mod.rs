//! Card effects.
//!
//! ## Key Types
//!
//! - `EffectResolver`: Applies single-card, pair, trio and draw effects
//! - `TurnOutcome`: What a resolved card means for the turn
//! - `DrawOutcome`: What happened when a card was drawn
//! - `StealPolicy`: How a cat pair picks the stolen card

pub mod resolver;

pub use resolver::{DrawOutcome, EffectResolver, StealPolicy, TurnOutcome, FUTURE_COUNT};
