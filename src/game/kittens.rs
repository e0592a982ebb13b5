//! The engine boundary.
//!
//! `KittenGame` holds the rule configuration and the opponent policy and
//! exposes one method per request the presentation layer can make. Every
//! request goes through `RulesEngine::apply_action`, which validates
//! before it mutates: a rejected request leaves the state untouched.
//!
//! With `auto_opponent` on, any local-seat request that hands the turn
//! over runs the automated seat until control comes back (or the game
//! ends, or the automated seat's play waits on a Nope decision).

use crate::ai::{HeuristicOpponent, OpponentPolicy, OpponentView};
use crate::cards::{CardKind, DeckBuilder};
use crate::core::config::RuleConfig;
use crate::core::state::GameState;
use crate::core::{Action, EngineError, GameRng, PlayerId, PlayerMap};
use crate::effects::{DrawOutcome, EffectResolver, StealPolicy, TurnOutcome};
use crate::events::GameEvent;
use crate::interrupt::{InterruptOutcome, NopeWindow};
use crate::rules::{GameResult, Handoff, RulesEngine};

const HUMAN: PlayerId = PlayerId::HUMAN;
const AUTOMATED: PlayerId = PlayerId::AUTOMATED;

/// Rules plus opponent for a two-seat game.
pub struct KittenGame {
    config: RuleConfig,
    policy: Box<dyn OpponentPolicy>,
}

impl Default for KittenGame {
    fn default() -> Self {
        let config = RuleConfig::default();
        let policy = HeuristicOpponent::new(config.opponent.clone());
        Self {
            config,
            policy: Box::new(policy),
        }
    }
}

impl std::fmt::Debug for KittenGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KittenGame")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KittenGame {
    /// Validate `config` and use the table-driven opponent it describes.
    pub fn new(config: RuleConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let policy = HeuristicOpponent::new(config.opponent.clone());
        Ok(Self {
            config,
            policy: Box::new(policy),
        })
    }

    /// Replace the automated seat's policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Game setup ===

    /// Deal a new game. The local seat moves first.
    #[must_use]
    pub fn new_game(&self, player_name: &str, seed: u64) -> GameState {
        self.start(player_name, GameRng::new(seed))
    }

    /// Deal a new game seeded from OS entropy.
    #[must_use]
    pub fn new_game_from_entropy(&self, player_name: &str) -> GameState {
        self.start(player_name, GameRng::from_entropy())
    }

    fn start(&self, player_name: &str, mut rng: GameRng) -> GameState {
        let (hands, deck) = DeckBuilder::new(&self.config).build(2, &mut rng);
        let names = PlayerMap::from_vec(vec![
            player_name.to_string(),
            self.config.opponent_name.clone(),
        ]);
        let state = GameState::new(hands, deck, names, rng);
        tracing::info!(
            player = player_name,
            seed = state.rng.seed(),
            deck = state.deck().len(),
            "new game"
        );
        state
    }

    // === Local seat requests ===

    /// Play a single action card.
    pub fn play_card(&self, state: &mut GameState, card: CardKind) -> Result<(), EngineError> {
        self.apply_action(state, HUMAN, Action::Play(card))
    }

    /// Draw the top card, ending the turn.
    pub fn draw(&self, state: &mut GameState) -> Result<(), EngineError> {
        self.apply_action(state, HUMAN, Action::Draw)
    }

    /// Play two matching cats and steal a random card.
    pub fn play_pair(&self, state: &mut GameState, cat: CardKind) -> Result<(), EngineError> {
        self.apply_action(state, HUMAN, Action::Pair(cat))
    }

    /// Play three matching cats and ask for `requested`.
    pub fn play_trio(
        &self,
        state: &mut GameState,
        cat: CardKind,
        requested: CardKind,
    ) -> Result<(), EngineError> {
        self.apply_action(state, HUMAN, Action::Trio { cat, requested })
    }

    /// Like [`KittenGame::play_trio`], naming the requested card in free text.
    ///
    /// The name is matched against the opponent's hand first, so "cat" takes
    /// whichever cat the opponent holds. A name no held card matches still
    /// plays the trio (taking nothing) if it names a real card.
    pub fn play_trio_named(
        &self,
        state: &mut GameState,
        cat: CardKind,
        requested: &str,
    ) -> Result<(), EngineError> {
        let held = state.hand(AUTOMATED).find_match(requested);
        let requested = held
            .or_else(|| CardKind::from_query(requested))
            .filter(|k| !k.is_hazard())
            .ok_or_else(|| reject(EngineError::UnknownCard(requested.to_string())))?;
        self.play_trio(state, cat, requested)
    }

    /// Answer the pending Nope window.
    pub fn resolve_pending_interrupt(
        &self,
        state: &mut GameState,
        use_nope: bool,
    ) -> Result<(), EngineError> {
        self.apply_action(state, HUMAN, Action::Interrupt { use_nope })
    }

    /// Run the automated seat until it hands back control.
    pub fn opponent_turn(&self, state: &mut GameState) -> Result<(), EngineError> {
        self.guard(state, AUTOMATED).map_err(reject)?;
        self.run_opponent(state);
        Ok(())
    }

    // === Internals ===

    /// Common checks for acting seats.
    fn guard(&self, state: &GameState, player: PlayerId) -> Result<(), EngineError> {
        if state.is_over() {
            return Err(EngineError::GameOver);
        }
        if state.pending().is_some() {
            return Err(EngineError::InterruptPending);
        }
        if state.active_player() != player {
            return Err(EngineError::OutOfTurn { player });
        }
        Ok(())
    }

    fn check_playable(card: CardKind) -> Result<(), EngineError> {
        let reason = match card {
            CardKind::ExplodingKitten => "it is never held",
            CardKind::Defuse => "only when drawing an Exploding Kitten",
            CardKind::Nope => "only in answer to another card",
            CardKind::Unlucky => "it only acts when drawn",
            c if c.is_cat() => "cats are played as pairs or trios",
            _ => return Ok(()),
        };
        Err(EngineError::NotPlayable { card, reason })
    }

    fn check_cats(state: &GameState, player: PlayerId, cat: CardKind, needed: usize) -> Result<(), EngineError> {
        if !cat.is_cat() {
            return Err(EngineError::NotACat { card: cat });
        }
        let held = state.hand(player).count(cat);
        if held < needed {
            return Err(EngineError::NotEnoughCards {
                card: cat,
                needed,
                held,
            });
        }
        Ok(())
    }

    /// Validate and apply one action for `player`. No auto-opponent.
    fn dispatch(&self, state: &mut GameState, player: PlayerId, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Interrupt { use_nope } => {
                if state.is_over() {
                    return Err(EngineError::GameOver);
                }
                let pending = state.pending().ok_or(EngineError::NoPendingInterrupt)?;
                if pending.decider() != player {
                    return Err(EngineError::OutOfTurn { player });
                }
                let closed = NopeWindow::answer(state, use_nope)?;
                state.record_action(player, action);
                if closed.outcome == InterruptOutcome::Proceed {
                    self.apply_effect(state, closed.action.actor, closed.action.card);
                }
                Ok(())
            }
            Action::Draw => {
                self.guard(state, player)?;
                state.record_action(player, action);
                self.draw_for(state, player);
                Ok(())
            }
            Action::Play(card) => {
                self.guard(state, player)?;
                Self::check_playable(card)?;
                if !state.hand(player).contains(card) {
                    return Err(EngineError::CardNotInHand { card });
                }
                state.record_action(player, action);
                state.hand_mut(player).remove_one(card);
                state.discard_mut().push(card);
                state.push_event(GameEvent::Played { player, card });

                match NopeWindow::offer(state, player, card, &self.config.nope) {
                    InterruptOutcome::Proceed => self.apply_effect(state, player, card),
                    InterruptOutcome::Cancelled | InterruptOutcome::Pending => {}
                }
                Ok(())
            }
            Action::Pair(cat) => {
                self.guard(state, player)?;
                Self::check_cats(state, player, cat, 2)?;
                state.record_action(player, action);
                let policy = if player.is_automated() {
                    StealPolicy::Priority(&self.config.opponent.steal_priority)
                } else {
                    StealPolicy::Random
                };
                EffectResolver::resolve_pair(state, player, cat, policy);
                Ok(())
            }
            Action::Trio { cat, requested } => {
                self.guard(state, player)?;
                Self::check_cats(state, player, cat, 3)?;
                state.record_action(player, action);
                EffectResolver::resolve_trio(state, player, cat, requested);
                Ok(())
            }
        }
    }

    /// Resolve a card that made it through its Nope window.
    fn apply_effect(&self, state: &mut GameState, actor: PlayerId, card: CardKind) {
        match EffectResolver::resolve(state, actor, card, &self.config) {
            TurnOutcome::Continue => {
                if self.config.auto_draw_after_play && !actor.is_automated() {
                    self.draw_for(state, actor);
                }
            }
            TurnOutcome::EndTurn => self.end_turn(state),
            TurnOutcome::ExtendAttack => {
                state.clear_peeked(actor);
                let rule = self.config.attack_rule;
                if let Handoff::Passed { to, owed } = state.turn_mut().attack(rule) {
                    state.push_event(GameEvent::Attacked {
                        player: actor,
                        target: to,
                        owed,
                    });
                }
            }
        }
    }

    fn draw_for(&self, state: &mut GameState, player: PlayerId) {
        match EffectResolver::resolve_draw(state, player) {
            DrawOutcome::Exploded | DrawOutcome::Exhausted => {}
            DrawOutcome::Defused { .. } if !self.config.defuse_ends_turn => {}
            _ => self.end_turn(state),
        }
    }

    /// The active seat finished one turn.
    fn end_turn(&self, state: &mut GameState) {
        let leaving = state.active_player();
        state.clear_peeked(leaving);
        let event = match state.turn_mut().conclude() {
            Handoff::SameActor { owed } => GameEvent::TurnContinues {
                player: leaving,
                owed,
            },
            Handoff::Passed { to, owed } => GameEvent::TurnPassed { to, owed },
        };
        state.push_event(event);
    }

    /// Let the automated seat act until it is no longer its move.
    fn run_opponent(&self, state: &mut GameState) {
        let mut turn = state.turn().turn_number();
        let mut taken = 0;

        while !state.is_over() && state.pending().is_none() && state.active_player() == AUTOMATED {
            if state.turn().turn_number() != turn {
                turn = state.turn().turn_number();
                taken = 0;
            }

            let action = if taken >= self.config.max_opponent_actions {
                Action::Draw
            } else {
                let mut rng = state.rng.clone();
                let view = OpponentView::from_state(state, AUTOMATED);
                let action = self.policy.choose_action(&view, &mut rng);
                state.rng = rng;
                action
            };

            if let Err(err) = self.dispatch(state, AUTOMATED, action) {
                tracing::warn!(%err, ?action, "automated seat chose an illegal action; drawing");
                if let Err(err) = self.dispatch(state, AUTOMATED, Action::Draw) {
                    tracing::warn!(%err, "automated seat cannot draw");
                    break;
                }
            }
            if action != Action::Draw {
                taken += 1;
            }
        }
    }
}

fn reject(err: EngineError) -> EngineError {
    tracing::warn!(code = err.code(), %err, "rejected request");
    err
}

impl RulesEngine for KittenGame {
    fn config(&self) -> &RuleConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.is_over() {
            return vec![];
        }
        if let Some(pending) = state.pending() {
            if pending.decider() != player {
                return vec![];
            }
            let mut actions = vec![Action::Interrupt { use_nope: false }];
            if state.hand(player).contains(CardKind::Nope) {
                actions.push(Action::Interrupt { use_nope: true });
            }
            return actions;
        }
        if state.active_player() != player {
            return vec![];
        }

        let hand = state.hand(player);
        let mut actions = vec![Action::Draw];
        for kind in CardKind::ALL {
            let held = hand.count(kind);
            if held == 0 {
                continue;
            }
            if Self::check_playable(kind).is_ok() {
                actions.push(Action::Play(kind));
            }
            if kind.is_cat() && held >= 2 {
                actions.push(Action::Pair(kind));
            }
            if kind.is_cat() && held >= 3 {
                for requested in CardKind::ALL.into_iter().filter(|k| !k.is_hazard()) {
                    actions.push(Action::Trio {
                        cat: kind,
                        requested,
                    });
                }
            }
        }
        actions
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), EngineError> {
        self.dispatch(state, player, action).map_err(reject)?;
        tracing::debug!(%player, ?action, "applied action");

        if self.config.auto_opponent
            && !player.is_automated()
            && !state.is_over()
            && state.pending().is_none()
            && state.active_player() == AUTOMATED
        {
            self.run_opponent(state);
        }
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner().map(GameResult::Winner)
    }
}
