//! Engine errors.
//!
//! Every variant is locally recoverable: a rejected request leaves the
//! `GameState` untouched and simply awaits a corrected resubmission.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardKind;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("the game is over")]
    GameOver,

    #[error("it is not {player}'s turn")]
    OutOfTurn { player: PlayerId },

    #[error("{card} is not in hand")]
    CardNotInHand { card: CardKind },

    #[error("need {needed} {card}, holding {held}")]
    NotEnoughCards {
        card: CardKind,
        needed: usize,
        held: usize,
    },

    #[error("{card} cannot be played: {reason}")]
    NotPlayable { card: CardKind, reason: &'static str },

    #[error("{card} is not a cat card")]
    NotACat { card: CardKind },

    #[error("an interrupt is waiting to be resolved")]
    InterruptPending,

    #[error("no interrupt is waiting to be resolved")]
    NoPendingInterrupt,

    #[error("no card matches {0:?}")]
    UnknownCard(String),

    #[error("invalid rule configuration: {0}")]
    InvalidConfig(String),

    #[error("checkpoint: {0}")]
    Checkpoint(#[from] bincode::Error),

    #[error("stats record: {0}")]
    Stats(#[from] serde_json::Error),
}

impl EngineError {
    /// Stable machine-readable code for the presentation layer.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::GameOver => "GAME_OVER",
            EngineError::OutOfTurn { .. } => "OUT_OF_TURN",
            EngineError::CardNotInHand { .. } => "CARD_NOT_IN_HAND",
            EngineError::NotEnoughCards { .. } => "NOT_ENOUGH_CARDS",
            EngineError::NotPlayable { .. } => "NOT_PLAYABLE",
            EngineError::NotACat { .. } => "NOT_A_CAT",
            EngineError::InterruptPending => "INTERRUPT_PENDING",
            EngineError::NoPendingInterrupt => "NO_PENDING_INTERRUPT",
            EngineError::UnknownCard(_) => "UNKNOWN_CARD",
            EngineError::InvalidConfig(_) => "INVALID_CONFIG",
            EngineError::Checkpoint(_) => "CHECKPOINT",
            EngineError::Stats(_) => "STATS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_descriptive() {
        let err = EngineError::NotEnoughCards {
            card: CardKind::TacoCat,
            needed: 2,
            held: 1,
        };
        assert_eq!(err.to_string(), "need 2 Taco Cat, holding 1");
        assert_eq!(err.code(), "NOT_ENOUGH_CARDS");

        let err = EngineError::OutOfTurn {
            player: PlayerId::AUTOMATED,
        };
        assert_eq!(err.to_string(), "it is not Player 1's turn");
    }
}
