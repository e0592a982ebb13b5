//! The automated opponent.
//!
//! ## Key Types
//!
//! - `DecisionTable`: Ordered `(priority, condition, choice)` rules
//! - `OpponentConfig`: Table, hazard sense and steal priority
//! - `OpponentPolicy`: Trait for choosing the automated seat's action
//! - `HeuristicOpponent`: Table-driven default policy

pub mod heuristic;
pub mod table;

pub use heuristic::{HeuristicOpponent, OpponentPolicy, OpponentView};
pub use table::{Choice, Condition, DecisionRule, DecisionTable, HazardSense, OpponentConfig};
