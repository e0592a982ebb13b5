//! Effect resolution - applying card effects to game state.
//!
//! The resolver only applies effects. Validation, moving the played card to
//! the discard pile and the Nope window happen before it is called (see
//! `KittenGame`), and turn bookkeeping happens after, driven by the returned
//! `TurnOutcome`.

use crate::cards::CardKind;
use crate::core::config::RuleConfig;
use crate::core::state::{GameState, Glimpse, LossCause};
use crate::core::PlayerId;
use crate::events::GameEvent;
use crate::zones::ZonePosition;

/// Cards shown by See the Future.
pub const FUTURE_COUNT: usize = 3;

/// What the turn controller should do after a card resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The actor keeps playing and must still draw.
    Continue,
    /// The actor's current turn ends without a draw.
    EndTurn,
    /// All of the actor's turns end; the opponent is attacked.
    ExtendAttack,
}

/// Result of drawing one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card went into the drawer's hand.
    Kept(CardKind),
    /// A hazard was drawn and defused; it went back in at `position`.
    Defused { position: usize },
    /// Unlucky was drawn; `lost` went to the discard pile with it.
    Unlucky { lost: Option<CardKind> },
    /// A hazard was drawn with no Defuse. The drawer lost.
    Exploded,
    /// Deck and discard were both empty. The drawer lost.
    Exhausted,
}

impl DrawOutcome {
    #[must_use]
    pub fn ends_game(self) -> bool {
        matches!(self, DrawOutcome::Exploded | DrawOutcome::Exhausted)
    }
}

/// How a pair chooses the card it steals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StealPolicy<'a> {
    /// Uniformly random card.
    Random,
    /// First held card from the list, else the first card in the hand.
    Priority(&'a [CardKind]),
}

/// Applies card effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply the effect of a single played card.
    ///
    /// The card must already be out of the actor's hand and in the discard
    /// pile.
    pub fn resolve(
        state: &mut GameState,
        actor: PlayerId,
        card: CardKind,
        config: &RuleConfig,
    ) -> TurnOutcome {
        let target = actor.opponent();
        let outcome = match card {
            CardKind::Skip => {
                state.push_event(GameEvent::Skipped { player: actor });
                TurnOutcome::EndTurn
            }
            CardKind::Attack => TurnOutcome::ExtendAttack,
            CardKind::SeeTheFuture => {
                let cards: Glimpse = state.deck().iter().take(FUTURE_COUNT).collect();
                state.push_event(GameEvent::SawFuture {
                    player: actor,
                    cards: cards.to_vec(),
                });
                state.set_foreknowledge(actor, cards);
                TurnOutcome::Continue
            }
            CardKind::Shuffle => {
                let (deck, _, rng) = state.piles_and_rng();
                deck.shuffle(rng);
                state.forget_future();
                state.push_event(GameEvent::DeckShuffled { player: actor });
                TurnOutcome::Continue
            }
            CardKind::Favor => {
                let (hand, rng) = state.hand_and_rng(target);
                let given = hand.take_expendable(rng);
                if let Some(card) = given {
                    state.hand_mut(actor).push(card);
                }
                state.push_event(GameEvent::Favored {
                    player: actor,
                    from: target,
                    card: given,
                });
                TurnOutcome::Continue
            }
            CardKind::Peek => {
                let cards: Glimpse = state
                    .hand(target)
                    .cards()
                    .iter()
                    .take(config.peek_count)
                    .copied()
                    .collect();
                state.push_event(GameEvent::Peeked {
                    player: actor,
                    target,
                    cards: cards.to_vec(),
                });
                state.set_peeked(actor, cards);
                TurnOutcome::Continue
            }
            // Everything else has no effect when played on its own; the
            // caller rejects those plays before they get here.
            _ => TurnOutcome::Continue,
        };
        tracing::debug!(%actor, %card, ?outcome, "resolved card");
        outcome
    }

    /// Discard `count` copies of `cat` from the actor's hand.
    ///
    /// Caller has checked that enough copies are held.
    fn discard_cats(state: &mut GameState, actor: PlayerId, cat: CardKind, count: usize) {
        for _ in 0..count {
            if state.hand_mut(actor).remove_one(cat) {
                state.discard_mut().push(cat);
            }
        }
    }

    /// Two matching cats: steal one card from the opponent.
    ///
    /// Returns the stolen card, `None` when the opponent's hand was empty.
    pub fn resolve_pair(
        state: &mut GameState,
        actor: PlayerId,
        cat: CardKind,
        policy: StealPolicy<'_>,
    ) -> Option<CardKind> {
        let target = actor.opponent();
        Self::discard_cats(state, actor, cat, 2);

        let stolen = match policy {
            StealPolicy::Priority(order) => {
                let (from, to) = state.hands_pair_mut(target, actor);
                let stolen = from.take_by_priority(order);
                to.extend(stolen);
                stolen
            }
            StealPolicy::Random => {
                let (hand, rng) = state.hand_and_rng(target);
                let stolen = hand.take_random(rng);
                state.hand_mut(actor).extend(stolen);
                stolen
            }
        };
        state.push_event(GameEvent::PairPlayed {
            player: actor,
            cat,
            stolen,
        });
        tracing::debug!(%actor, %cat, ?stolen, "resolved pair");
        stolen
    }

    /// Three matching cats: take the requested kind if the opponent has one.
    pub fn resolve_trio(
        state: &mut GameState,
        actor: PlayerId,
        cat: CardKind,
        requested: CardKind,
    ) -> Option<CardKind> {
        let target = actor.opponent();
        Self::discard_cats(state, actor, cat, 3);

        let (from, to) = state.hands_pair_mut(target, actor);
        let taken = from.remove_one(requested).then_some(requested);
        to.extend(taken);
        state.push_event(GameEvent::TrioPlayed {
            player: actor,
            cat,
            requested,
            taken,
        });
        tracing::debug!(%actor, %cat, %requested, ?taken, "resolved trio");
        taken
    }

    /// Draw the top card for `player` and apply what it does.
    ///
    /// Refills from the discard pile when the deck is empty. Ends the game
    /// on an undefused hazard or when there is nothing left to draw.
    pub fn resolve_draw(state: &mut GameState, player: PlayerId) -> DrawOutcome {
        if state.deck().is_empty() {
            if state.discard().is_empty() {
                state.finish(player, LossCause::Exhausted);
                state.push_event(GameEvent::Exhausted {
                    player,
                    winner: player.opponent(),
                });
                return DrawOutcome::Exhausted;
            }
            let (deck, discard, rng) = state.piles_and_rng();
            let moved = deck.refill_from(discard, rng);
            state.forget_future();
            state.push_event(GameEvent::Reshuffled { cards: moved });
        }

        let Some(card) = state.deck_mut().draw() else {
            // Unreachable: the deck was refilled above.
            return DrawOutcome::Exhausted;
        };
        state.advance_future();
        state.push_event(GameEvent::Drew { player, card });

        let outcome = match card {
            CardKind::ExplodingKitten if state.hand(player).contains(CardKind::Defuse) => {
                state.hand_mut(player).remove_one(CardKind::Defuse);
                state.discard_mut().push(CardKind::Defuse);
                let max = state.deck().len();
                let index = state.rng.gen_index_inclusive(max);
                let position = state
                    .deck_mut()
                    .insert(CardKind::ExplodingKitten, ZonePosition::Index(index));
                state.forget_future();
                state.push_event(GameEvent::Defused { player });
                DrawOutcome::Defused { position }
            }
            CardKind::ExplodingKitten => {
                state.discard_mut().push(CardKind::ExplodingKitten);
                state.finish(player, LossCause::Exploded);
                state.push_event(GameEvent::Exploded {
                    player,
                    winner: player.opponent(),
                });
                DrawOutcome::Exploded
            }
            CardKind::Unlucky => {
                state.discard_mut().push(CardKind::Unlucky);
                let (hand, rng) = state.hand_and_rng(player);
                let lost = hand.take_expendable(rng);
                if let Some(lost) = lost {
                    state.discard_mut().push(lost);
                }
                state.push_event(GameEvent::UnluckyDrawn { player, lost });
                DrawOutcome::Unlucky { lost }
            }
            card => {
                state.hand_mut(player).push(card);
                DrawOutcome::Kept(card)
            }
        };
        tracing::debug!(%player, ?outcome, "resolved draw");
        outcome
    }
}
