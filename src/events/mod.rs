//! Event log for the presentation layer.
//!
//! The engine's only outbound channel besides snapshots: one `GameEvent`
//! per state-changing step, appended in order and never rewritten.

pub mod log;

pub use log::{EventLog, GameEvent};
