//! Turn controller.
//!
//! Tracks whose turn it is and how many turns that seat still owes because
//! of an Attack. There is no turn queue: each time a turn concludes, the
//! next actor is derived from the counter.
//!
//! The counter counts the turns the active seat owes, including the current
//! one. Zero and one both mean "this is the last turn".

use serde::{Deserialize, Serialize};

use crate::core::config::AttackRule;
use crate::core::PlayerId;

/// Coarse game phase, as seen from the local seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    OpponentTurn,
    GameOver,
}

/// Result of concluding a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// The same seat plays again; `owed` turns remain.
    SameActor { owed: u32 },
    /// The other seat is now active.
    Passed { to: PlayerId, owed: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    active: PlayerId,
    /// Forced-extra-turns counter for the active seat.
    owed: u32,
    /// Turn number (starts at 1).
    turn_number: u32,
    /// Action sequence within the turn.
    sequence: u32,
}

impl TurnState {
    #[must_use]
    pub fn new(first: PlayerId) -> Self {
        Self {
            active: first,
            owed: 0,
            turn_number: 1,
            sequence: 0,
        }
    }

    /// Start with `owed` forced turns already pending for `first`.
    #[must_use]
    pub fn with_owed(first: PlayerId, owed: u32) -> Self {
        Self {
            owed,
            ..Self::new(first)
        }
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn owed(&self) -> u32 {
        self.owed
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Phase for a game whose outcome is `over`.
    #[must_use]
    pub fn phase(&self, over: bool) -> Phase {
        if over {
            Phase::GameOver
        } else if self.active == PlayerId::HUMAN {
            Phase::PlayerTurn
        } else {
            Phase::OpponentTurn
        }
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.sequence;
        self.sequence += 1;
        seq
    }

    /// The active seat finished one turn (drew, or played Skip).
    pub fn conclude(&mut self) -> Handoff {
        self.turn_number += 1;
        self.sequence = 0;
        self.owed = self.owed.saturating_sub(1);
        if self.owed > 0 {
            Handoff::SameActor { owed: self.owed }
        } else {
            self.active = self.active.opponent();
            Handoff::Passed {
                to: self.active,
                owed: 0,
            }
        }
    }

    /// The active seat played Attack: all its owed turns end and the other
    /// seat owes turns per `rule`.
    pub fn attack(&mut self, rule: AttackRule) -> Handoff {
        self.turn_number += 1;
        self.sequence = 0;
        self.owed = rule.next_counter(self.owed);
        self.active = self.active.opponent();
        Handoff::Passed {
            to: self.active,
            owed: self.owed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_turns_alternate() {
        let mut turn = TurnState::new(PlayerId::HUMAN);

        assert_eq!(
            turn.conclude(),
            Handoff::Passed { to: PlayerId::AUTOMATED, owed: 0 }
        );
        assert_eq!(
            turn.conclude(),
            Handoff::Passed { to: PlayerId::HUMAN, owed: 0 }
        );
        assert_eq!(turn.turn_number(), 3);
    }

    #[test]
    fn test_attacked_seat_takes_two_turns() {
        let mut turn = TurnState::new(PlayerId::HUMAN);

        turn.attack(AttackRule::Reset);
        assert_eq!(turn.active(), PlayerId::AUTOMATED);
        assert_eq!(turn.owed(), 2);

        assert_eq!(turn.conclude(), Handoff::SameActor { owed: 1 });
        assert_eq!(turn.active(), PlayerId::AUTOMATED);

        assert_eq!(
            turn.conclude(),
            Handoff::Passed { to: PlayerId::HUMAN, owed: 0 }
        );
    }

    #[test]
    fn test_counter_attack_by_rule() {
        let mut reset = TurnState::with_owed(PlayerId::AUTOMATED, 2);
        reset.attack(AttackRule::Reset);
        assert_eq!(reset.owed(), 2);

        let mut stack = TurnState::with_owed(PlayerId::AUTOMATED, 2);
        stack.attack(AttackRule::Stack);
        assert_eq!(stack.owed(), 4);

        let mut increment = TurnState::with_owed(PlayerId::AUTOMATED, 2);
        increment.attack(AttackRule::Increment);
        assert_eq!(increment.owed(), 3);
        assert_eq!(increment.active(), PlayerId::HUMAN);
    }

    #[test]
    fn test_phase() {
        let turn = TurnState::new(PlayerId::HUMAN);
        assert_eq!(turn.phase(false), Phase::PlayerTurn);
        assert_eq!(turn.phase(true), Phase::GameOver);

        let turn = TurnState::new(PlayerId::AUTOMATED);
        assert_eq!(turn.phase(false), Phase::OpponentTurn);
    }

    #[test]
    fn test_sequence_resets_each_turn() {
        let mut turn = TurnState::new(PlayerId::HUMAN);
        assert_eq!(turn.next_sequence(), 0);
        assert_eq!(turn.next_sequence(), 1);
        turn.conclude();
        assert_eq!(turn.next_sequence(), 0);
    }
}
