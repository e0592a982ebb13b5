//! # kitten-rules
//!
//! A rules engine for a two-seat "Exploding Kittens"-style card game: one
//! local seat driven by external input and one automated seat driven by a
//! table-driven heuristic.
//!
//! ## Design Principles
//!
//! 1. **One Owned State**: Every operation takes `&mut GameState`. There is
//!    no global session; a game can be cloned, checkpointed and restored.
//!
//! 2. **Closed Card Vocabulary**: Cards are a `CardKind` enum. Fuzzy name
//!    matching exists only for the external text interface.
//!
//! 3. **Configuration Over Convention**: Rule variants (attack stacking,
//!    whether a defuse ends the turn) and the opponent's decision table are
//!    data in `RuleConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles use `im-rs`, so snapshots and
//!   checkpoints clone in O(1).
//!
//! - **Deterministic Randomness**: A single seedable ChaCha8 `GameRng`
//!   drives shuffles, hazard reinsertion and every opponent coin flip.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration, errors
//! - `cards`: Card vocabulary and deck construction
//! - `zones`: Deck, discard pile and hands
//! - `events`: Append-only event log
//! - `effects`: Card effect resolution
//! - `interrupt`: Nope windows
//! - `rules`: Turn control and the `RulesEngine` trait
//! - `ai`: The automated opponent
//! - `game`: The engine boundary, snapshots and counters
//!
//! ```
//! use kitten_rules::{KittenGame, PlayerId};
//!
//! let game = KittenGame::default();
//! let mut state = game.new_game("Ada", 42);
//!
//! game.draw(&mut state).unwrap();
//! let snap = state.snapshot(PlayerId::HUMAN);
//! // The automated seat has played; control is back with the local seat
//! // unless it is waiting on a Nope decision or somebody exploded.
//! assert!(snap.game_over || snap.pending.is_some() || snap.active == PlayerId::HUMAN);
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod events;
pub mod effects;
pub mod interrupt;
pub mod rules;
pub mod ai;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AttackRule, EngineError, GameRng, GameRngState, GameState,
    GameStateBuilder, LossCause, NopeConfig, Outcome, PendingAction, PlayerId, PlayerMap,
    RuleConfig,
};

pub use crate::cards::{CardKind, DeckBuilder};

pub use crate::zones::{Deck, DiscardPile, Hand, ZonePosition};

pub use crate::events::{EventLog, GameEvent};

pub use crate::effects::{DrawOutcome, EffectResolver, StealPolicy, TurnOutcome};

pub use crate::interrupt::{InterruptOutcome, NopeWindow};

pub use crate::rules::{GameResult, Phase, RulesEngine, TurnState};

pub use crate::ai::{
    Choice, Condition, DecisionRule, DecisionTable, HazardSense, HeuristicOpponent,
    OpponentConfig, OpponentPolicy, OpponentView,
};

pub use crate::game::{KittenGame, Snapshot, Stats};
