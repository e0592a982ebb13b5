//! Turn controller integration tests.
//!
//! Attack counter variants, Skip during an attack, and the defuse rule
//! variant, applied through `RulesEngine::apply_action` for both seats.

use kitten_rules::cards::CardKind::*;
use kitten_rules::core::{Action, AttackRule, GameStateBuilder, PlayerId, RuleConfig};
use kitten_rules::events::GameEvent;
use kitten_rules::game::KittenGame;
use kitten_rules::rules::RulesEngine;

const HUMAN: PlayerId = PlayerId::HUMAN;
const AI: PlayerId = PlayerId::AUTOMATED;

fn manual(rule: AttackRule) -> KittenGame {
    KittenGame::new(
        RuleConfig::default()
            .with_auto_opponent(false)
            .with_attack_rule(rule),
    )
    .unwrap()
}

// =============================================================================
// Attack Variants
// =============================================================================

fn counter_attack_owed(rule: AttackRule) -> u32 {
    let game = manual(rule);
    let mut state = GameStateBuilder::new()
        .deck([Skip, Favor])
        .hand(AI, [Attack])
        .active(AI)
        .owed(2)
        .build();

    game.apply_action(&mut state, AI, Action::Play(Attack)).unwrap();
    assert_eq!(state.active_player(), HUMAN);
    state.turn().owed()
}

/// Reset: the counter is always 2.
#[test]
fn test_attack_reset() {
    assert_eq!(counter_attack_owed(AttackRule::Reset), 2);
}

/// Stack: owed turns carry over.
#[test]
fn test_attack_stack() {
    assert_eq!(counter_attack_owed(AttackRule::Stack), 4);
}

/// Increment: an attack during an attack adds one.
#[test]
fn test_attack_increment() {
    assert_eq!(counter_attack_owed(AttackRule::Increment), 3);
}

/// The attack event reports the new counter.
#[test]
fn test_attack_event() {
    let game = manual(AttackRule::Stack);
    let mut state = GameStateBuilder::new()
        .deck([Skip])
        .hand(HUMAN, [Attack])
        .build();

    game.play_card(&mut state, Attack).unwrap();

    assert_eq!(
        state.events().last(),
        Some(&GameEvent::Attacked {
            player: HUMAN,
            target: AI,
            owed: 2
        })
    );
}

// =============================================================================
// Owed Turns
// =============================================================================

/// Skip clears one owed turn; the seat keeps playing.
#[test]
fn test_skip_during_attack() {
    let game = manual(AttackRule::Reset);
    let mut state = GameStateBuilder::new()
        .deck([Favor, Shuffle])
        .hand(HUMAN, [Skip])
        .owed(2)
        .build();

    game.play_card(&mut state, Skip).unwrap();
    assert_eq!(state.active_player(), HUMAN);
    assert_eq!(state.turn().owed(), 1);

    game.draw(&mut state).unwrap();
    assert_eq!(state.active_player(), AI);
    assert_eq!(state.turn().owed(), 0);
}

/// Every turn taken bumps the turn number.
#[test]
fn test_turn_numbers() {
    let game = manual(AttackRule::Reset);
    let mut state = GameStateBuilder::new().deck([Skip, Favor, Shuffle]).build();

    assert_eq!(state.turn().turn_number(), 1);
    game.draw(&mut state).unwrap();
    game.apply_action(&mut state, AI, Action::Draw).unwrap();
    assert_eq!(state.turn().turn_number(), 3);

    let turns: Vec<_> = state.history().iter().map(|r| (r.player, r.turn)).collect();
    assert_eq!(turns, vec![(HUMAN, 1), (AI, 2)]);
}

// =============================================================================
// Defuse Variants
// =============================================================================

/// By default a defused hazard ends the turn.
#[test]
fn test_defuse_ends_turn_by_default() {
    let game = manual(AttackRule::Reset);
    let mut state = GameStateBuilder::new()
        .deck([ExplodingKitten, Skip])
        .hand(HUMAN, [Defuse])
        .build();

    game.draw(&mut state).unwrap();

    assert_eq!(state.active_player(), AI);
}

/// Optionally the drawer must draw again.
#[test]
fn test_defuse_then_draw_again() {
    let game = KittenGame::new(
        RuleConfig::default()
            .with_auto_opponent(false)
            .with_defuse_ends_turn(false),
    )
    .unwrap();
    let mut state = GameStateBuilder::new()
        .deck([ExplodingKitten])
        .hand(HUMAN, [Defuse, Defuse])
        .build();

    game.draw(&mut state).unwrap();
    assert_eq!(state.active_player(), HUMAN);
    assert_eq!(state.deck().len(), 1);

    // The only card left is the hazard again.
    game.draw(&mut state).unwrap();
    assert_eq!(state.active_player(), HUMAN);
    assert_eq!(state.discard().count(Defuse), 2);
    assert!(!state.is_over());
}
