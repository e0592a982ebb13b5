//! Opponent policies.
//!
//! A policy sees an `OpponentView` (only what the automated seat is
//! allowed to know, plus the actual top of the deck when its hazard sense
//! says it may look) and returns one `Action`.

use crate::cards::CardKind;
use crate::core::state::Glimpse;
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::zones::Hand;

use super::table::{Choice, Condition, HazardSense, OpponentConfig};

/// Cards the hazard checks look at.
const LOOKAHEAD: usize = 3;

/// What the automated seat knows when choosing an action.
#[derive(Clone, Debug)]
pub struct OpponentView<'a> {
    pub player: PlayerId,
    pub hand: &'a Hand,
    pub deck_len: usize,
    /// Its own See the Future result, if still valid.
    pub foreknowledge: Option<&'a [CardKind]>,
    /// The real top of the deck.
    pub deck_top: Glimpse,
    /// Exploding Kittens still in the deck.
    pub hazards_in_deck: usize,
}

impl<'a> OpponentView<'a> {
    #[must_use]
    pub fn from_state(state: &'a GameState, player: PlayerId) -> Self {
        let hazards_in_discard = state.discard().count(CardKind::ExplodingKitten);
        Self {
            player,
            hand: state.hand(player),
            deck_len: state.deck().len(),
            foreknowledge: state.foreknowledge_of(player),
            deck_top: state.deck().iter().take(LOOKAHEAD).collect(),
            hazards_in_deck: state.hazard_total().saturating_sub(hazards_in_discard),
        }
    }

    /// Probability that at least one hazard sits in the top three cards.
    #[must_use]
    pub fn hazard_odds(&self) -> f64 {
        let n = self.deck_len;
        let k = self.hazards_in_deck.min(n);
        if k == 0 {
            return 0.0;
        }
        let mut clear = 1.0;
        for i in 0..LOOKAHEAD.min(n) {
            clear *= (n - k).saturating_sub(i) as f64 / (n - i) as f64;
        }
        1.0 - clear
    }

    fn hazard_ahead(&self, sense: HazardSense) -> bool {
        if let Some(known) = self.foreknowledge {
            return known.contains(&CardKind::ExplodingKitten);
        }
        match sense {
            HazardSense::KnownOnly => false,
            HazardSense::PeekDeck => self.deck_top.contains(&CardKind::ExplodingKitten),
            HazardSense::Odds(threshold) => self.hazard_odds() >= threshold,
        }
    }
}

/// Policy for choosing the automated seat's next action.
pub trait OpponentPolicy: Send + Sync {
    /// Pick one action. `Action::Draw` ends the turn.
    fn choose_action(&self, view: &OpponentView<'_>, rng: &mut GameRng) -> Action;
}

/// Plays by the configured decision table.
#[derive(Clone, Debug, Default)]
pub struct HeuristicOpponent {
    config: OpponentConfig,
}

impl HeuristicOpponent {
    #[must_use]
    pub fn new(config: OpponentConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    fn holds(condition: &Condition, view: &OpponentView<'_>, sense: HazardSense, rng: &mut GameRng) -> bool {
        match condition {
            Condition::Always => true,
            Condition::HazardAhead => view.hazard_ahead(sense),
            Condition::NoForeknowledge => view.foreknowledge.is_none(),
            Condition::HandBelow(n) => view.hand.len() < *n,
            Condition::DeckBelow(n) => view.deck_len < *n,
            Condition::Chance(p) => rng.gen_bool(*p),
            Condition::All(cs) => cs.iter().all(|c| Self::holds(c, view, sense, rng)),
            Condition::Any(cs) => cs.iter().any(|c| Self::holds(c, view, sense, rng)),
        }
    }

    /// The action a choice maps to, if the hand allows it.
    fn available(choice: &Choice, hand: &Hand) -> Option<Action> {
        match choice {
            Choice::PlayFirstHeld(cards) => cards
                .iter()
                .find(|&&c| hand.contains(c))
                .map(|&c| Action::Play(c)),
            Choice::Play(card) => hand.contains(*card).then_some(Action::Play(*card)),
            Choice::PairSteal => CardKind::CATS
                .iter()
                .find(|&&cat| hand.count(cat) >= 2)
                .map(|&cat| Action::Pair(cat)),
        }
    }
}

impl OpponentPolicy for HeuristicOpponent {
    fn choose_action(&self, view: &OpponentView<'_>, rng: &mut GameRng) -> Action {
        for rule in self.config.table.rules() {
            // Availability first, so coin flips only happen for held cards.
            let Some(action) = Self::available(&rule.choice, view.hand) else {
                tracing::trace!(priority = rule.priority, "rule skipped: choice unavailable");
                continue;
            };
            if Self::holds(&rule.condition, view, self.config.hazard_sense, rng) {
                tracing::trace!(priority = rule.priority, ?action, "rule matched");
                return action;
            }
            tracing::trace!(priority = rule.priority, "rule skipped: condition false");
        }
        Action::Draw
    }
}
