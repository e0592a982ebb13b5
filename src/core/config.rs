//! Rule configuration.
//!
//! The same engine plays several editions of the game. They differ in the
//! card mix, how repeated Attacks combine, whether a defused hazard ends the
//! turn, and how the automated seat plays. `RuleConfig` captures all of it;
//! `RuleConfig::default()` is the classic two-player edition.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::ai::OpponentConfig;
use crate::cards::CardKind;

/// How an Attack sets the forced-extra-turns counter of its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRule {
    /// Counter becomes 2 regardless of what was owed.
    #[default]
    Reset,
    /// Turns still owed by the attacker carry over, plus 2.
    Stack,
    /// An attack during an attack adds 1; otherwise the counter becomes 2.
    Increment,
}

impl AttackRule {
    /// Counter for the attacked seat, given the counter the attacker held.
    #[must_use]
    pub fn next_counter(self, owed: u32) -> u32 {
        match self {
            AttackRule::Reset => 2,
            AttackRule::Stack => owed + 2,
            AttackRule::Increment if owed > 0 => owed + 1,
            AttackRule::Increment => 2,
        }
    }
}

/// When the automated seat cancels a card with Nope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NopeConfig {
    /// Cards worth cancelling.
    pub strong_cards: Vec<CardKind>,
    /// Cancel probability for strong cards.
    pub strong_chance: f64,
    /// Cancel probability for anything else.
    pub base_chance: f64,
}

impl Default for NopeConfig {
    fn default() -> Self {
        Self {
            strong_cards: vec![
                CardKind::Attack,
                CardKind::Favor,
                CardKind::Peek,
                CardKind::Shuffle,
                CardKind::SeeTheFuture,
                CardKind::Skip,
            ],
            strong_chance: 0.7,
            base_chance: 0.03,
        }
    }
}

impl NopeConfig {
    /// Probability of cancelling `card`.
    #[must_use]
    pub fn chance_for(&self, card: CardKind) -> f64 {
        if self.strong_cards.contains(&card) {
            self.strong_chance
        } else {
            self.base_chance
        }
    }
}

/// Complete rule configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Copies of each card in the box. Hazards are not listed: a game uses
    /// one fewer than its seat count.
    pub frequencies: Vec<(CardKind, usize)>,

    /// Cards dealt to each seat before its guaranteed Defuse.
    pub hand_size: usize,

    /// Opponent cards revealed by Peek.
    pub peek_count: usize,

    pub attack_rule: AttackRule,

    /// Whether surviving a hazard with Defuse ends the drawer's turn.
    pub defuse_ends_turn: bool,

    /// Whether a local-seat card that does not end the turn immediately
    /// draws for that seat, ending the turn.
    pub auto_draw_after_play: bool,

    /// Whether ending the human turn runs the automated seat right away.
    pub auto_opponent: bool,

    /// Non-draw actions the automated seat may take in one turn before it is
    /// made to draw.
    pub max_opponent_actions: usize,

    /// Display name of the automated seat.
    pub opponent_name: String,

    pub nope: NopeConfig,

    pub opponent: OpponentConfig,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            frequencies: vec![
                (CardKind::Defuse, 3),
                (CardKind::Nope, 6),
                (CardKind::TacoCat, 7),
                (CardKind::BeardCat, 7),
                (CardKind::RainbowRalphingCat, 7),
                (CardKind::Skip, 4),
                (CardKind::Attack, 4),
                (CardKind::SeeTheFuture, 4),
                (CardKind::Favor, 3),
                (CardKind::Shuffle, 3),
                (CardKind::Peek, 1),
                (CardKind::Unlucky, 2),
            ],
            hand_size: 4,
            peek_count: 3,
            attack_rule: AttackRule::Reset,
            defuse_ends_turn: true,
            auto_draw_after_play: false,
            auto_opponent: true,
            max_opponent_actions: 32,
            opponent_name: "AI".to_string(),
            nope: NopeConfig::default(),
            opponent: OpponentConfig::default(),
        }
    }
}

impl RuleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the card mix.
    #[must_use]
    pub fn with_frequencies(mut self, frequencies: Vec<(CardKind, usize)>) -> Self {
        self.frequencies = frequencies;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_attack_rule(mut self, rule: AttackRule) -> Self {
        self.attack_rule = rule;
        self
    }

    #[must_use]
    pub fn with_defuse_ends_turn(mut self, ends: bool) -> Self {
        self.defuse_ends_turn = ends;
        self
    }

    #[must_use]
    pub fn with_auto_draw_after_play(mut self, auto: bool) -> Self {
        self.auto_draw_after_play = auto;
        self
    }

    #[must_use]
    pub fn with_auto_opponent(mut self, auto: bool) -> Self {
        self.auto_opponent = auto;
        self
    }

    #[must_use]
    pub fn with_max_opponent_actions(mut self, max: usize) -> Self {
        self.max_opponent_actions = max;
        self
    }

    #[must_use]
    pub fn with_opponent_name(mut self, name: impl Into<String>) -> Self {
        self.opponent_name = name.into();
        self
    }

    #[must_use]
    pub fn with_nope(mut self, nope: NopeConfig) -> Self {
        self.nope = nope;
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentConfig) -> Self {
        self.opponent = opponent;
        self
    }

    /// Copies of `kind` in the box.
    #[must_use]
    pub fn frequency(&self, kind: CardKind) -> usize {
        self.frequencies
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, n)| n)
            .sum()
    }

    /// Check probabilities and the card mix.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.frequencies.iter().any(|(k, _)| k.is_hazard()) {
            return Err(EngineError::InvalidConfig(
                "hazard count derives from the seat count; do not list it".to_string(),
            ));
        }
        if self.max_opponent_actions == 0 {
            return Err(EngineError::InvalidConfig(
                "max_opponent_actions must be at least 1".to_string(),
            ));
        }

        let mut probabilities = vec![self.nope.strong_chance, self.nope.base_chance];
        probabilities.extend(self.opponent.table.probabilities());
        if let crate::ai::HazardSense::Odds(threshold) = self.opponent.hazard_sense {
            probabilities.push(threshold);
        }
        if let Some(bad) = probabilities
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(EngineError::InvalidConfig(format!(
                "probability {bad} is outside [0, 1]"
            )));
        }

        Ok(())
    }
}
