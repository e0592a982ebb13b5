//! The two-seat Exploding Kittens game.
//!
//! ## Key Types
//!
//! - `KittenGame`: Engine boundary (new game, play, draw, interrupts)
//! - `Snapshot`: Per-seat read-only view for presentation
//! - `Stats`: Win/loss counters record

pub mod kittens;
pub mod snapshot;
pub mod stats;

pub use kittens::KittenGame;
pub use snapshot::Snapshot;
pub use stats::Stats;
