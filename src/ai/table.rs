//! The opponent's decision table.
//!
//! The automated seat's play is an ordered list of rules. Each rule pairs a
//! condition with a choice; the first rule whose choice is available from
//! the current hand and whose condition holds wins. Probabilities are part
//! of the table (`Condition::Chance`), so tests can pin them to 0.0 or 1.0
//! and get fully deterministic behavior.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;

/// A test evaluated against what the automated seat can see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Always,
    /// An Exploding Kitten is known or suspected in the top three cards.
    HazardAhead,
    /// The automated seat holds no foreknowledge of the deck.
    NoForeknowledge,
    /// The automated seat's hand has fewer than `n` cards.
    HandBelow(usize),
    /// The deck has fewer than `n` cards.
    DeckBelow(usize),
    /// A coin flip with the given probability of success.
    Chance(f64),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    fn for_each_chance(&self, f: &mut impl FnMut(f64)) {
        match self {
            Condition::Chance(p) => f(*p),
            Condition::All(cs) | Condition::Any(cs) => {
                cs.iter().for_each(|c| c.for_each_chance(f));
            }
            _ => {}
        }
    }
}

/// What a matching rule plays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// Play the first card of the list that is held.
    PlayFirstHeld(Vec<CardKind>),
    /// Play this card if held.
    Play(CardKind),
    /// Play the first cat pair held and steal.
    PairSteal,
}

/// One row of the decision table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    /// Lower runs first.
    pub priority: u8,
    pub condition: Condition,
    pub choice: Choice,
}

impl DecisionRule {
    #[must_use]
    pub fn new(priority: u8, condition: Condition, choice: Choice) -> Self {
        Self {
            priority,
            condition,
            choice,
        }
    }
}

/// Ordered decision rules. When no rule matches, the seat draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTable {
    rules: Vec<DecisionRule>,
}

impl DecisionTable {
    /// Build a table; rules are sorted by priority (stable for ties).
    #[must_use]
    pub fn new(mut rules: Vec<DecisionRule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// A table with no rules: the seat always draws.
    #[must_use]
    pub fn draw_only() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    /// Every probability used anywhere in the table.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        let mut out = Vec::new();
        for rule in &self.rules {
            rule.condition.for_each_chance(&mut |p| out.push(p));
        }
        out
    }
}

impl Default for DecisionTable {
    /// The classic ladder:
    ///
    /// 1. Hazard ahead: Skip, Shuffle or Attack, in that order.
    /// 2. No foreknowledge: See the Future, 60% of the time.
    /// 3. Any cat pair: play it and steal.
    /// 4. Favor, when the hand is under 8 cards or 20% of the time.
    /// 5. Shuffle when fewer than 5 cards remain.
    fn default() -> Self {
        Self::new(vec![
            DecisionRule::new(
                1,
                Condition::HazardAhead,
                Choice::PlayFirstHeld(vec![CardKind::Skip, CardKind::Shuffle, CardKind::Attack]),
            ),
            DecisionRule::new(
                2,
                Condition::All(vec![Condition::NoForeknowledge, Condition::Chance(0.6)]),
                Choice::Play(CardKind::SeeTheFuture),
            ),
            DecisionRule::new(3, Condition::Always, Choice::PairSteal),
            DecisionRule::new(
                4,
                Condition::Any(vec![Condition::HandBelow(8), Condition::Chance(0.2)]),
                Choice::Play(CardKind::Favor),
            ),
            DecisionRule::new(5, Condition::DeckBelow(5), Choice::Play(CardKind::Shuffle)),
        ])
    }
}

/// How the automated seat decides a hazard is near the top of the deck.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum HazardSense {
    /// Only its own See the Future results count.
    KnownOnly,
    /// Without foreknowledge, it inspects the real top three cards.
    PeekDeck,
    /// Without foreknowledge, it suspects a hazard when the chance of one
    /// sitting in the top three reaches the threshold.
    Odds(f64),
}

/// Everything that shapes the automated seat's play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    pub table: DecisionTable,
    pub hazard_sense: HazardSense,
    /// Steal order when the automated seat plays a pair. Unlisted cards are
    /// taken from the front of the hand.
    pub steal_priority: Vec<CardKind>,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            table: DecisionTable::default(),
            hazard_sense: HazardSense::PeekDeck,
            steal_priority: vec![
                CardKind::Defuse,
                CardKind::Nope,
                CardKind::Attack,
                CardKind::Favor,
                CardKind::Peek,
            ],
        }
    }
}

impl OpponentConfig {
    #[must_use]
    pub fn with_table(mut self, table: DecisionTable) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub fn with_hazard_sense(mut self, sense: HazardSense) -> Self {
        self.hazard_sense = sense;
        self
    }
}
