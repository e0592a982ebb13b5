//! Game state: the single owned aggregate every operation works on.
//!
//! ## GameState
//!
//! - Shared piles (deck, discard) and both hands
//! - Turn state (active seat, forced-extra-turns counter)
//! - Knowledge: foreknowledge of the deck, Peek-revealed opponent cards
//! - Pending interrupt, game outcome
//! - Event log and action history
//! - RNG
//!
//! Piles use `im` persistent structures, so cloning a state for a snapshot
//! or checkpoint is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::CardKind;
use crate::events::{EventLog, GameEvent};
use crate::rules::turn::{Phase, TurnState};
use crate::zones::{Deck, DiscardPile, Hand};

/// Cards a seat has seen, top first. At most three in the default rules.
pub type Glimpse = SmallVec<[CardKind; 3]>;

/// Knowledge of the next few deck cards, from See the Future.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foreknowledge {
    pub holder: PlayerId,
    pub cards: Glimpse,
}

/// A played card waiting on a Nope decision before its effect applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub actor: PlayerId,
    pub card: CardKind,
    /// Set when the play has already been cancelled and the actor may
    /// answer with a counter-Nope.
    pub cancelled_by: Option<PlayerId>,
}

impl PendingAction {
    /// The seat whose decision the game is waiting on.
    #[must_use]
    pub fn decider(&self) -> PlayerId {
        match self.cancelled_by {
            Some(_) => self.actor,
            None => self.actor.opponent(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Drew an Exploding Kitten with no Defuse.
    Exploded,
    /// Had to draw with both deck and discard empty.
    Exhausted,
}

/// Terminal result of a game. Set once, never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub cause: LossCause,
}

/// Full game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    deck: Deck,
    discard: DiscardPile,
    hands: PlayerMap<Hand>,
    turn: TurnState,
    foreknowledge: Option<Foreknowledge>,
    /// What each seat last saw of the other's hand through Peek.
    peeked: PlayerMap<Glimpse>,
    pending: Option<PendingAction>,
    outcome: Option<Outcome>,
    events: EventLog,
    history: Vector<ActionRecord>,
    names: PlayerMap<String>,
    hazard_total: usize,
    initial_total: usize,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a game from dealt piles.
    ///
    /// `names` gives the display name of each seat.
    #[must_use]
    pub fn new(hands: PlayerMap<Hand>, deck: Deck, names: PlayerMap<String>, rng: GameRng) -> Self {
        let player_count = hands.player_count();
        let mut state = Self {
            deck,
            discard: DiscardPile::new(),
            hands,
            turn: TurnState::new(PlayerId::HUMAN),
            foreknowledge: None,
            peeked: PlayerMap::with_default(player_count),
            pending: None,
            outcome: None,
            events: EventLog::new(),
            history: Vector::new(),
            names,
            hazard_total: 0,
            initial_total: 0,
            rng,
        };
        state.hazard_total = state.count_everywhere(CardKind::ExplodingKitten);
        state.initial_total = state.total_cards();
        state.events.push(GameEvent::GameStarted);
        state
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    // === Piles ===

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub(crate) fn discard_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }

    pub(crate) fn hand_mut(&mut self, player: PlayerId) -> &mut Hand {
        &mut self.hands[player]
    }

    /// Both hands, for transfers between seats.
    pub(crate) fn hands_pair_mut(&mut self, from: PlayerId, to: PlayerId) -> (&mut Hand, &mut Hand) {
        self.hands.pair_mut(from, to)
    }

    /// Split borrow of deck, discard and RNG for reshuffles.
    pub(crate) fn piles_and_rng(&mut self) -> (&mut Deck, &mut DiscardPile, &mut GameRng) {
        (&mut self.deck, &mut self.discard, &mut self.rng)
    }

    /// Split borrow of one hand and the RNG.
    pub(crate) fn hand_and_rng(&mut self, player: PlayerId) -> (&mut Hand, &mut GameRng) {
        (&mut self.hands[player], &mut self.rng)
    }

    /// Cards currently in all piles and hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands.values().map(Hand::len).sum::<usize>()
    }

    /// Card count at the start of the game. Never changes.
    #[must_use]
    pub fn initial_total(&self) -> usize {
        self.initial_total
    }

    /// Copies of `kind` across deck, discard and hands.
    #[must_use]
    pub fn count_everywhere(&self, kind: CardKind) -> usize {
        self.deck.count(kind)
            + self.discard.count(kind)
            + self.hands.values().map(|h| h.count(kind)).sum::<usize>()
    }

    /// Exploding Kittens dealt into this game.
    #[must_use]
    pub fn hazard_total(&self) -> usize {
        self.hazard_total
    }

    // === Turn ===

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turn.active()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase(self.is_over())
    }

    // === Knowledge ===

    #[must_use]
    pub fn foreknowledge(&self) -> Option<&Foreknowledge> {
        self.foreknowledge.as_ref()
    }

    /// Foreknowledge held by `player`, if any.
    #[must_use]
    pub fn foreknowledge_of(&self, player: PlayerId) -> Option<&[CardKind]> {
        self.foreknowledge
            .as_ref()
            .filter(|f| f.holder == player)
            .map(|f| f.cards.as_slice())
    }

    pub(crate) fn set_foreknowledge(&mut self, holder: PlayerId, cards: Glimpse) {
        self.foreknowledge = Some(Foreknowledge { holder, cards });
    }

    /// The deck was reordered ahead of the known prefix.
    pub(crate) fn forget_future(&mut self) {
        self.foreknowledge = None;
    }

    /// The top card left the deck; the rest of the known prefix still holds.
    pub(crate) fn advance_future(&mut self) {
        if let Some(f) = self.foreknowledge.as_mut() {
            if !f.cards.is_empty() {
                f.cards.remove(0);
            }
            if f.cards.is_empty() {
                self.foreknowledge = None;
            }
        }
    }

    #[must_use]
    pub fn peeked(&self, player: PlayerId) -> &[CardKind] {
        &self.peeked[player]
    }

    pub(crate) fn set_peeked(&mut self, player: PlayerId, cards: Glimpse) {
        self.peeked[player] = cards;
    }

    pub(crate) fn clear_peeked(&mut self, player: PlayerId) {
        self.peeked[player].clear();
    }

    // === Interrupts ===

    #[must_use]
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending(&mut self, pending: PendingAction) {
        self.pending = Some(pending);
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    // === Outcome ===

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.map(|o| o.winner)
    }

    /// Record the loser. The first outcome wins; later calls are ignored.
    pub(crate) fn finish(&mut self, loser: PlayerId, cause: LossCause) {
        if self.outcome.is_some() {
            return;
        }
        let winner = loser.opponent();
        self.outcome = Some(Outcome {
            winner,
            loser,
            cause,
        });
        self.pending = None;
        tracing::info!(%winner, %loser, ?cause, "game over");
    }

    // === Log and history ===

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        tracing::trace!(?event, "event");
        self.events.push(event);
    }

    /// The event log rendered for the local seat.
    #[must_use]
    pub fn log_lines(&self) -> Vec<String> {
        self.events.render(&self.names, PlayerId::HUMAN)
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    pub(crate) fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.turn.next_sequence();
        let turn = self.turn.turn_number();
        self.history
            .push_back(ActionRecord::new(player, action, turn, sequence));
    }

    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    #[must_use]
    pub fn names(&self) -> &PlayerMap<String> {
        &self.names
    }

    // === Checkpoints ===

    /// Encode the whole state, RNG position included.
    pub fn checkpoint(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::checkpoint`].
    pub fn restore(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Builds a `GameState` with an exact layout, for scenarios and tests.
///
/// ```
/// use kitten_rules::cards::CardKind;
/// use kitten_rules::core::{GameStateBuilder, PlayerId};
///
/// let state = GameStateBuilder::new()
///     .deck([CardKind::Skip, CardKind::ExplodingKitten])
///     .hand(PlayerId::HUMAN, [CardKind::Attack])
///     .build();
///
/// assert_eq!(state.deck().len(), 2);
/// assert_eq!(state.hazard_total(), 1);
/// ```
pub struct GameStateBuilder {
    deck: Vec<CardKind>,
    discard: Vec<CardKind>,
    hands: PlayerMap<Vec<CardKind>>,
    names: PlayerMap<String>,
    active: PlayerId,
    owed: u32,
    foreknowledge: Option<Foreknowledge>,
    seed: u64,
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self {
            deck: Vec::new(),
            discard: Vec::new(),
            hands: PlayerMap::with_default(2),
            names: PlayerMap::from_vec(vec!["Player".to_string(), "AI".to_string()]),
            active: PlayerId::HUMAN,
            owed: 0,
            foreknowledge: None,
            seed: 0,
        }
    }
}

impl GameStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deck contents, top first.
    #[must_use]
    pub fn deck(mut self, cards: impl IntoIterator<Item = CardKind>) -> Self {
        self.deck = cards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn discard(mut self, cards: impl IntoIterator<Item = CardKind>) -> Self {
        self.discard = cards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn hand(mut self, player: PlayerId, cards: impl IntoIterator<Item = CardKind>) -> Self {
        self.hands[player] = cards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn names(mut self, human: impl Into<String>, automated: impl Into<String>) -> Self {
        self.names = PlayerMap::from_vec(vec![human.into(), automated.into()]);
        self
    }

    #[must_use]
    pub fn active(mut self, player: PlayerId) -> Self {
        self.active = player;
        self
    }

    /// Forced turns the active seat owes, including the current one.
    #[must_use]
    pub fn owed(mut self, owed: u32) -> Self {
        self.owed = owed;
        self
    }

    #[must_use]
    pub fn foreknowledge(mut self, holder: PlayerId, cards: impl IntoIterator<Item = CardKind>) -> Self {
        self.foreknowledge = Some(Foreknowledge {
            holder,
            cards: cards.into_iter().collect(),
        });
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn build(self) -> GameState {
        let hands = PlayerMap::new(self.hands.player_count(), |p| {
            self.hands[p].iter().copied().collect::<Hand>()
        });
        let mut state = GameState::new(
            hands,
            self.deck.into_iter().collect(),
            self.names,
            GameRng::new(self.seed),
        );
        state.discard = self.discard.into_iter().collect();
        state.initial_total = state.total_cards();
        state.hazard_total = state.count_everywhere(CardKind::ExplodingKitten);
        state.turn = TurnState::with_owed(self.active, self.owed);
        state.foreknowledge = self.foreknowledge;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CardKind::*;

    fn sample() -> GameState {
        GameStateBuilder::new()
            .deck([Skip, Shuffle, Defuse])
            .discard([Nope])
            .hand(PlayerId::HUMAN, [Attack, TacoCat])
            .hand(PlayerId::AUTOMATED, [Defuse])
            .build()
    }

    #[test]
    fn test_builder_layout() {
        let state = sample();

        assert_eq!(state.deck().peek_top(3), vec![Skip, Shuffle, Defuse]);
        assert_eq!(state.discard().len(), 1);
        assert_eq!(state.hand(PlayerId::HUMAN).len(), 2);
        assert_eq!(state.total_cards(), 7);
        assert_eq!(state.initial_total(), 7);
        assert_eq!(state.hazard_total(), 0);
        assert_eq!(state.phase(), Phase::PlayerTurn);
        assert_eq!(state.events().len(), 1);
    }

    #[test]
    fn test_finish_is_irreversible() {
        let mut state = sample();

        state.finish(PlayerId::HUMAN, LossCause::Exploded);
        state.finish(PlayerId::AUTOMATED, LossCause::Exhausted);

        let outcome = state.outcome().unwrap();
        assert_eq!(outcome.winner, PlayerId::AUTOMATED);
        assert_eq!(outcome.cause, LossCause::Exploded);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_foreknowledge_advances_with_draws() {
        let mut state = GameStateBuilder::new()
            .deck([Skip, Shuffle])
            .foreknowledge(PlayerId::HUMAN, [Skip, Shuffle])
            .build();

        state.advance_future();
        assert_eq!(state.foreknowledge_of(PlayerId::HUMAN), Some(&[Shuffle][..]));
        assert_eq!(state.foreknowledge_of(PlayerId::AUTOMATED), None);

        state.advance_future();
        assert!(state.foreknowledge().is_none());
    }

    #[test]
    fn test_pending_decider() {
        let pending = PendingAction {
            actor: PlayerId::HUMAN,
            card: Favor,
            cancelled_by: None,
        };
        assert_eq!(pending.decider(), PlayerId::AUTOMATED);

        let countered = PendingAction {
            cancelled_by: Some(PlayerId::AUTOMATED),
            ..pending
        };
        assert_eq!(countered.decider(), PlayerId::HUMAN);
    }

    #[test]
    fn test_checkpoint_round_trip() {
        let mut state = sample();
        state.rng.gen_range_usize(0..10);

        let bytes = state.checkpoint().unwrap();
        let mut restored = GameState::restore(&bytes).unwrap();

        assert_eq!(restored.deck(), state.deck());
        assert_eq!(restored.hand(PlayerId::HUMAN), state.hand(PlayerId::HUMAN));
        assert_eq!(restored.events(), state.events());
        assert_eq!(
            restored.rng.gen_range_usize(0..1000),
            state.rng.gen_range_usize(0..1000)
        );
    }

    #[test]
    fn test_restore_rejects_garbage() {
        assert!(matches!(
            GameState::restore(&[1, 2, 3]),
            Err(EngineError::Checkpoint(_))
        ));
    }
}
