//! Opening and closing Nope windows.

use crate::cards::CardKind;
use crate::core::config::NopeConfig;
use crate::core::state::{GameState, PendingAction};
use crate::core::{EngineError, PlayerId};
use crate::events::GameEvent;

use super::InterruptOutcome;

/// A window closed by the local seat's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Closed {
    /// The play the window was opened for.
    pub action: PendingAction,
    /// `Proceed` or `Cancelled`.
    pub outcome: InterruptOutcome,
}

/// Nope window logic.
pub struct NopeWindow;

impl NopeWindow {
    /// Spend one Nope from `player`'s hand against `card`.
    fn spend_nope(state: &mut GameState, player: PlayerId, card: CardKind) {
        if state.hand_mut(player).remove_one(CardKind::Nope) {
            state.discard_mut().push(CardKind::Nope);
            state.push_event(GameEvent::Noped { by: player, card });
        }
    }

    /// Open a window for `card`, just played by `actor`.
    ///
    /// The played card is already in the discard pile. An automated
    /// defender decides on the spot; a local defender holding a Nope leaves
    /// the window pending.
    pub fn offer(
        state: &mut GameState,
        actor: PlayerId,
        card: CardKind,
        config: &NopeConfig,
    ) -> InterruptOutcome {
        let defender = actor.opponent();
        if !state.hand(defender).contains(CardKind::Nope) {
            return InterruptOutcome::Proceed;
        }

        if !defender.is_automated() {
            state.set_pending(PendingAction {
                actor,
                card,
                cancelled_by: None,
            });
            state.push_event(GameEvent::AwaitingNope { actor, card });
            return InterruptOutcome::Pending;
        }

        let chance = config.chance_for(card);
        if !state.rng.gen_bool(chance) {
            tracing::trace!(%card, chance, "automated seat lets card through");
            return InterruptOutcome::Proceed;
        }
        Self::spend_nope(state, defender, card);

        if state.hand(actor).contains(CardKind::Nope) {
            state.set_pending(PendingAction {
                actor,
                card,
                cancelled_by: Some(defender),
            });
            state.push_event(GameEvent::AwaitingNope {
                actor: defender,
                card: CardKind::Nope,
            });
            InterruptOutcome::Pending
        } else {
            state.push_event(GameEvent::Cancelled { actor, card });
            InterruptOutcome::Cancelled
        }
    }

    /// Close the pending window with the local seat's answer.
    ///
    /// `use_nope` spends one of the decider's Nopes: against an automated
    /// play it cancels the card; against an automated Nope it restores the
    /// local seat's card. Fails without mutating when nothing is pending or
    /// the decider holds no Nope.
    pub fn answer(state: &mut GameState, use_nope: bool) -> Result<Closed, EngineError> {
        let pending = *state.pending().ok_or(EngineError::NoPendingInterrupt)?;
        let decider = pending.decider();
        if use_nope && !state.hand(decider).contains(CardKind::Nope) {
            return Err(EngineError::CardNotInHand {
                card: CardKind::Nope,
            });
        }
        state.take_pending();

        let outcome = match (pending.cancelled_by, use_nope) {
            // Counter-Nope: the original card goes through.
            (Some(_), true) => {
                Self::spend_nope(state, decider, CardKind::Nope);
                InterruptOutcome::Proceed
            }
            (Some(_), false) => InterruptOutcome::Cancelled,
            (None, true) => {
                Self::spend_nope(state, decider, pending.card);
                InterruptOutcome::Cancelled
            }
            (None, false) => InterruptOutcome::Proceed,
        };

        if outcome == InterruptOutcome::Cancelled {
            state.push_event(GameEvent::Cancelled {
                actor: pending.actor,
                card: pending.card,
            });
        }
        tracing::debug!(actor = %pending.actor, card = %pending.card, use_nope, ?outcome, "closed nope window");
        Ok(Closed {
            action: pending,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameStateBuilder;
    use CardKind::*;

    const HUMAN: PlayerId = PlayerId::HUMAN;
    const AI: PlayerId = PlayerId::AUTOMATED;

    fn always() -> NopeConfig {
        NopeConfig {
            strong_chance: 1.0,
            base_chance: 1.0,
            ..NopeConfig::default()
        }
    }

    fn never() -> NopeConfig {
        NopeConfig {
            strong_chance: 0.0,
            base_chance: 0.0,
            ..NopeConfig::default()
        }
    }

    #[test]
    fn test_no_nope_held_proceeds() {
        let mut state = GameStateBuilder::new().hand(AI, [Skip]).build();
        assert_eq!(
            NopeWindow::offer(&mut state, HUMAN, Attack, &always()),
            InterruptOutcome::Proceed
        );
    }

    #[test]
    fn test_automated_declines() {
        let mut state = GameStateBuilder::new().hand(AI, [Nope]).build();

        assert_eq!(
            NopeWindow::offer(&mut state, HUMAN, Attack, &never()),
            InterruptOutcome::Proceed
        );
        assert_eq!(state.hand(AI).count(Nope), 1);
    }

    #[test]
    fn test_automated_cancels_outright() {
        let mut state = GameStateBuilder::new().hand(AI, [Nope]).build();

        let outcome = NopeWindow::offer(&mut state, HUMAN, Attack, &always());

        assert_eq!(outcome, InterruptOutcome::Cancelled);
        assert!(state.hand(AI).is_empty());
        assert_eq!(state.discard().last(), Some(Nope));
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_automated_cancel_can_be_countered() {
        let mut state = GameStateBuilder::new()
            .hand(AI, [Nope])
            .hand(HUMAN, [Nope])
            .build();

        assert_eq!(
            NopeWindow::offer(&mut state, HUMAN, Favor, &always()),
            InterruptOutcome::Pending
        );
        let closed = NopeWindow::answer(&mut state, true).unwrap();

        assert_eq!(closed.outcome, InterruptOutcome::Proceed);
        assert_eq!(closed.action.card, Favor);
        assert_eq!(state.discard().count(Nope), 2);
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_declined_counter_cancels() {
        let mut state = GameStateBuilder::new()
            .hand(AI, [Nope])
            .hand(HUMAN, [Nope])
            .build();

        NopeWindow::offer(&mut state, HUMAN, Favor, &always());
        let closed = NopeWindow::answer(&mut state, false).unwrap();

        assert_eq!(closed.outcome, InterruptOutcome::Cancelled);
        assert_eq!(state.hand(HUMAN).count(Nope), 1);
    }

    #[test]
    fn test_automated_play_awaits_local_seat() {
        let mut state = GameStateBuilder::new().hand(HUMAN, [Nope]).build();

        assert_eq!(
            NopeWindow::offer(&mut state, AI, Skip, &always()),
            InterruptOutcome::Pending
        );
        assert_eq!(state.pending().map(|p| p.decider()), Some(HUMAN));

        let closed = NopeWindow::answer(&mut state, true).unwrap();
        assert_eq!(closed.outcome, InterruptOutcome::Cancelled);
        assert!(state.hand(HUMAN).is_empty());
    }

    #[test]
    fn test_answer_without_pending() {
        let mut state = GameStateBuilder::new().build();
        assert!(matches!(
            NopeWindow::answer(&mut state, false),
            Err(EngineError::NoPendingInterrupt)
        ));
    }

    #[test]
    fn test_answer_without_nope_leaves_window_open() {
        let mut state = GameStateBuilder::new().hand(HUMAN, [Nope]).build();
        NopeWindow::offer(&mut state, AI, Skip, &always());
        state.hand_mut(HUMAN).remove_one(Nope);

        assert!(matches!(
            NopeWindow::answer(&mut state, true),
            Err(EngineError::CardNotInHand { card: Nope })
        ));
        assert!(state.pending().is_some());
    }
}
