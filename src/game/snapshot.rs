//! Read-only view of a game for one seat.
//!
//! A `Snapshot` contains only what its viewer may see: the opponent's hand
//! appears as a size plus whatever the viewer's last Peek revealed, and the
//! deck as a size plus the viewer's own foreknowledge.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::state::{GameState, PendingAction};
use crate::core::PlayerId;
use crate::rules::Phase;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub viewer: PlayerId,
    pub deck_size: usize,
    pub discard_size: usize,
    pub discard_top: Option<CardKind>,
    /// Viewer's hand in display order.
    pub hand: Vec<CardKind>,
    pub opponent_hand_size: usize,
    pub opponent_revealed: Vec<CardKind>,
    pub foreknowledge: Option<Vec<CardKind>>,
    pub active: PlayerId,
    pub phase: Phase,
    /// Forced extra turns the active seat still owes.
    pub extra_turns: u32,
    pub pending: Option<PendingAction>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(state: &GameState, viewer: PlayerId) -> Self {
        let opponent = viewer.opponent();
        Self {
            viewer,
            deck_size: state.deck().len(),
            discard_size: state.discard().len(),
            discard_top: state.discard().last(),
            hand: state.hand(viewer).sorted(),
            opponent_hand_size: state.hand(opponent).len(),
            opponent_revealed: state.peeked(viewer).to_vec(),
            foreknowledge: state.foreknowledge_of(viewer).map(<[CardKind]>::to_vec),
            active: state.active_player(),
            phase: state.phase(),
            extra_turns: state.turn().owed(),
            pending: state.pending().copied(),
            game_over: state.is_over(),
            winner: state.winner(),
        }
    }
}

impl GameState {
    /// What `viewer` can see right now.
    #[must_use]
    pub fn snapshot(&self, viewer: PlayerId) -> Snapshot {
        Snapshot::capture(self, viewer)
    }
}
