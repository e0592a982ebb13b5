//! Card collections: the shared draw and discard piles and per-seat hands.
//!
//! Piles are backed by `im::Vector` so snapshots and checkpoints clone in
//! O(1). The deck's front (index 0) is the next card drawn.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::rng::GameRng;

/// Position for inserting a card into the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Next card to be drawn.
    Top,
    /// Last card to be drawn.
    Bottom,
    /// Insert at a specific index (0 = top). Clamped to the deck length.
    Index(usize),
}

/// The shared draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardKind>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the next card.
    pub fn draw(&mut self) -> Option<CardKind> {
        self.cards.pop_front()
    }

    /// The next `n` cards, top first, without removing them.
    #[must_use]
    pub fn peek_top(&self, n: usize) -> Vec<CardKind> {
        self.cards.iter().take(n).copied().collect()
    }

    /// Insert a card; returns the index it landed at.
    pub fn insert(&mut self, card: CardKind, position: ZonePosition) -> usize {
        let idx = match position {
            ZonePosition::Top => 0,
            ZonePosition::Bottom => self.cards.len(),
            ZonePosition::Index(i) => i.min(self.cards.len()),
        };
        self.cards.insert(idx, card);
        idx
    }

    /// Uniform random permutation.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardKind> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Move every discarded card into the deck and shuffle.
    ///
    /// Returns the number of cards moved.
    pub fn refill_from(&mut self, discard: &mut DiscardPile, rng: &mut GameRng) -> usize {
        let moved = discard.take_all();
        let count = moved.len();
        self.cards.append(moved);
        self.shuffle(rng);
        count
    }

    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().copied()
    }
}

impl FromIterator<CardKind> for Deck {
    fn from_iter<I: IntoIterator<Item = CardKind>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Played and consumed cards, in the order they arrived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vector<CardKind>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: CardKind) {
        self.cards.push_back(card);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Most recently discarded card.
    #[must_use]
    pub fn last(&self) -> Option<CardKind> {
        self.cards.last().copied()
    }

    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().copied()
    }

    fn take_all(&mut self) -> Vector<CardKind> {
        std::mem::take(&mut self.cards)
    }
}

impl FromIterator<CardKind> for DiscardPile {
    fn from_iter<I: IntoIterator<Item = CardKind>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// One seat's cards.
///
/// Semantically a multiset; the insertion order is kept because Peek
/// reveals "the first few" cards and the presentation layer shows it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardKind>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }

    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    #[must_use]
    pub fn contains(&self, kind: CardKind) -> bool {
        self.cards.contains(&kind)
    }

    pub fn push(&mut self, card: CardKind) {
        self.cards.push(card);
    }

    /// Remove one card of `kind`. Returns false if none is held.
    pub fn remove_one(&mut self, kind: CardKind) -> bool {
        match self.cards.iter().position(|&c| c == kind) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove the card at `index`.
    pub fn take_at(&mut self, index: usize) -> Option<CardKind> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Remove a uniformly random non-precious card, or any card if only
    /// precious ones remain. `None` on an empty hand.
    pub fn take_expendable(&mut self, rng: &mut GameRng) -> Option<CardKind> {
        if self.cards.is_empty() {
            return None;
        }
        let expendable: Vec<usize> = (0..self.cards.len())
            .filter(|&i| !self.cards[i].is_precious())
            .collect();
        let idx = if expendable.is_empty() {
            rng.gen_range_usize(0..self.cards.len())
        } else {
            expendable[rng.gen_range_usize(0..expendable.len())]
        };
        self.take_at(idx)
    }

    /// Remove a uniformly random card.
    pub fn take_random(&mut self, rng: &mut GameRng) -> Option<CardKind> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = rng.gen_range_usize(0..self.cards.len());
        self.take_at(idx)
    }

    /// Remove the first held card from `priority`, else the first card.
    pub fn take_by_priority(&mut self, priority: &[CardKind]) -> Option<CardKind> {
        match priority.iter().find(|&&k| self.contains(k)) {
            Some(&kind) => {
                self.remove_one(kind);
                Some(kind)
            }
            None => self.take_at(0),
        }
    }

    /// Shuffle the display order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Cards in display order (Defuse, Nope, ... cats last).
    #[must_use]
    pub fn sorted(&self) -> Vec<CardKind> {
        let mut cards = self.cards.clone();
        cards.sort_by_key(|k| k.display_rank());
        cards
    }

    /// Resolve free text against the cards actually held.
    #[must_use]
    pub fn find_match(&self, query: &str) -> Option<CardKind> {
        crate::cards::kind::best_match(self.cards.iter().copied(), query)
    }
}

impl Extend<CardKind> for Hand {
    fn extend<I: IntoIterator<Item = CardKind>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}

impl FromIterator<CardKind> for Hand {
    fn from_iter<I: IntoIterator<Item = CardKind>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
