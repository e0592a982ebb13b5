//! Automated seat integration tests.
//!
//! These run the automated seat through the engine boundary, the way the
//! presentation layer does: a local request that ends the turn hands
//! control over, and the call returns once it comes back.

use kitten_rules::ai::{
    Choice, Condition, DecisionRule, DecisionTable, HazardSense, HeuristicOpponent, OpponentConfig,
    OpponentPolicy, OpponentView,
};
use kitten_rules::cards::CardKind::{self, *};
use kitten_rules::core::{Action, GameRng, GameStateBuilder, NopeConfig, PlayerId, RuleConfig};
use kitten_rules::events::GameEvent;
use kitten_rules::game::KittenGame;

const HUMAN: PlayerId = PlayerId::HUMAN;
const AI: PlayerId = PlayerId::AUTOMATED;

fn quiet_nope() -> NopeConfig {
    NopeConfig {
        strong_chance: 0.0,
        base_chance: 0.0,
        ..NopeConfig::default()
    }
}

fn game_with(opponent: OpponentConfig) -> KittenGame {
    KittenGame::new(
        RuleConfig::default()
            .with_nope(quiet_nope())
            .with_opponent(opponent),
    )
    .unwrap()
}

/// Always asks for a card it may not hold.
struct Stubborn(CardKind);

impl OpponentPolicy for Stubborn {
    fn choose_action(&self, _view: &OpponentView<'_>, _rng: &mut GameRng) -> Action {
        Action::Play(self.0)
    }
}

// =============================================================================
// Decision Ladder
// =============================================================================

/// A visible hazard on top makes the automated seat Skip instead of drawing.
#[test]
fn test_skips_hazard() {
    let game = game_with(OpponentConfig::default());
    let mut state = GameStateBuilder::new()
        .deck([Favor, ExplodingKitten, Skip, Skip, Skip, Skip])
        .hand(AI, [Skip])
        .build();

    game.draw(&mut state).unwrap();

    assert!(!state.is_over());
    assert_eq!(state.active_player(), HUMAN);
    assert!(state.hand(AI).is_empty());
    assert_eq!(state.deck().len(), 5);
    assert!(state
        .events()
        .iter()
        .any(|e| *e == GameEvent::Skipped { player: AI }));
}

/// With only its own knowledge to go on, the automated seat walks into it.
#[test]
fn test_known_only_draws_hazard() {
    let game = game_with(OpponentConfig::default().with_hazard_sense(HazardSense::KnownOnly));
    let mut state = GameStateBuilder::new()
        .deck([Favor, ExplodingKitten, Skip, Skip, Skip, Skip])
        .hand(AI, [Skip])
        .build();

    game.draw(&mut state).unwrap();

    assert_eq!(state.winner(), Some(HUMAN));
}

/// Pair steals follow the priority list.
#[test]
fn test_pair_steal_priority() {
    let game = game_with(OpponentConfig::default());
    let mut state = GameStateBuilder::new()
        .deck([Skip; 6])
        .hand(HUMAN, [Favor, Defuse])
        .hand(AI, [TacoCat, TacoCat])
        .build();

    game.draw(&mut state).unwrap();

    assert_eq!(state.hand(HUMAN).count(Defuse), 0);
    assert_eq!(state.hand(AI).cards(), &[Defuse, Skip]);
    assert_eq!(state.active_player(), HUMAN);
}

/// An attacked automated seat takes both of its turns.
#[test]
fn test_attacked_seat_draws_twice() {
    let game = game_with(OpponentConfig::default().with_table(DecisionTable::draw_only()));
    let mut state = GameStateBuilder::new()
        .deck([Skip, Favor, Shuffle])
        .hand(HUMAN, [Attack])
        .build();

    game.play_card(&mut state, Attack).unwrap();

    assert_eq!(state.active_player(), HUMAN);
    assert_eq!(state.hand(AI).cards(), &[Skip, Favor]);
    assert_eq!(state.turn().owed(), 0);
}

/// Attacking back ends every owed turn.
#[test]
fn test_counter_attack() {
    let table = DecisionTable::new(vec![DecisionRule::new(
        1,
        Condition::Always,
        Choice::Play(Attack),
    )]);
    let game = game_with(OpponentConfig::default().with_table(table));
    let mut state = GameStateBuilder::new()
        .deck([Skip, Favor, Shuffle])
        .hand(HUMAN, [Attack])
        .hand(AI, [Attack])
        .build();

    game.play_card(&mut state, Attack).unwrap();

    assert_eq!(state.active_player(), HUMAN);
    assert_eq!(state.turn().owed(), 2);
    assert_eq!(state.deck().len(), 3);
}

// =============================================================================
// Loop Safety
// =============================================================================

/// An illegal choice falls back to drawing.
#[test]
fn test_illegal_choice_draws() {
    let game = KittenGame::default().with_policy(Stubborn(Skip));
    let mut state = GameStateBuilder::new()
        .deck([Favor, Attack])
        .build();

    game.draw(&mut state).unwrap();

    assert_eq!(state.hand(AI).cards(), &[Attack]);
    assert_eq!(state.active_player(), HUMAN);
}

/// The action cap forces a draw.
#[test]
fn test_action_cap() {
    let table = DecisionTable::new(vec![DecisionRule::new(
        1,
        Condition::Always,
        Choice::Play(SeeTheFuture),
    )]);
    let config = RuleConfig::default()
        .with_nope(quiet_nope())
        .with_max_opponent_actions(2)
        .with_opponent(OpponentConfig::default().with_table(table));
    let game = KittenGame::new(config).unwrap();
    let mut state = GameStateBuilder::new()
        .deck([Skip, Favor, Shuffle, Peek])
        .hand(AI, [SeeTheFuture; 4])
        .build();

    game.draw(&mut state).unwrap();

    assert_eq!(state.hand(AI).count(SeeTheFuture), 2);
    assert_eq!(state.hand(AI).count(Favor), 1);
    assert_eq!(state.active_player(), HUMAN);
}

/// The default policy is usable on its own.
#[test]
fn test_policy_direct() {
    let state = GameStateBuilder::new()
        .deck([ExplodingKitten, Skip])
        .hand(AI, [Attack])
        .build();
    let policy = HeuristicOpponent::default();
    let view = OpponentView::from_state(&state, AI);

    assert_eq!(policy.choose_action(&view, &mut GameRng::new(1)), Action::Play(Attack));
}
