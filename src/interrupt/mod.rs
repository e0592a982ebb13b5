//! Interrupt (Nope) resolution.
//!
//! A single played card opens a Nope window before its effect applies. The
//! automated seat answers immediately with a configured probability; the
//! local seat answers later through `KittenGame::resolve_pending_interrupt`,
//! so the window can be left open as a `PendingAction` on the state.
//!
//! Chains are at most one counter deep: a Nope may be answered by one more
//! Nope, and that answer is final.
//!
//! ## Key Types
//!
//! - `InterruptOutcome`: Result of opening or closing a window
//! - `NopeWindow`: Opens windows and applies answers

mod window;

pub use window::{Closed, NopeWindow};

use serde::{Deserialize, Serialize};

/// Status of a played card after its Nope window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptOutcome {
    /// Nobody cancelled; apply the effect.
    Proceed,
    /// The card was cancelled and stays in the discard pile without effect.
    Cancelled,
    /// Waiting on the local seat's decision.
    Pending,
}
