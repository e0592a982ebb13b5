//! The closed card vocabulary.
//!
//! Cards have no per-instance identity: two Skips are interchangeable, so a
//! card is simply its `CardKind`.

use serde::{Deserialize, Serialize};

/// Every kind of card in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Hazard: ends the game for its drawer unless a Defuse is held.
    ExplodingKitten,
    /// Escape: consumed to survive an Exploding Kitten.
    Defuse,
    /// Cancel: voids another card before it resolves.
    Nope,
    TacoCat,
    BeardCat,
    RainbowRalphingCat,
    Skip,
    Attack,
    SeeTheFuture,
    Favor,
    Shuffle,
    Peek,
    /// Drawing this forces the drawer to discard a card.
    Unlucky,
}

impl CardKind {
    /// All kinds, in declaration order.
    pub const ALL: [CardKind; 13] = [
        CardKind::ExplodingKitten,
        CardKind::Defuse,
        CardKind::Nope,
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowRalphingCat,
        CardKind::Skip,
        CardKind::Attack,
        CardKind::SeeTheFuture,
        CardKind::Favor,
        CardKind::Shuffle,
        CardKind::Peek,
        CardKind::Unlucky,
    ];

    /// The interchangeable cat cards, used in pairs and trios.
    pub const CATS: [CardKind; 3] = [
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowRalphingCat,
    ];

    /// Hand display order. Kinds not listed (the hazard) sort last.
    const DISPLAY_ORDER: [CardKind; 12] = [
        CardKind::Defuse,
        CardKind::Nope,
        CardKind::Skip,
        CardKind::Attack,
        CardKind::SeeTheFuture,
        CardKind::Peek,
        CardKind::Favor,
        CardKind::Shuffle,
        CardKind::Unlucky,
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowRalphingCat,
    ];

    /// Printed card name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::ExplodingKitten => "Exploding Kitten",
            CardKind::Defuse => "Defuse",
            CardKind::Nope => "Nope",
            CardKind::TacoCat => "Taco Cat",
            CardKind::BeardCat => "Beard Cat",
            CardKind::RainbowRalphingCat => "Rainbow Ralphing Cat",
            CardKind::Skip => "Skip",
            CardKind::Attack => "Attack",
            CardKind::SeeTheFuture => "See the Future",
            CardKind::Favor => "Favor",
            CardKind::Shuffle => "Shuffle",
            CardKind::Peek => "Peek",
            CardKind::Unlucky => "Unlucky",
        }
    }

    #[must_use]
    pub const fn is_cat(self) -> bool {
        matches!(
            self,
            CardKind::TacoCat | CardKind::BeardCat | CardKind::RainbowRalphingCat
        )
    }

    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(self, CardKind::ExplodingKitten)
    }

    #[must_use]
    pub const fn is_escape(self) -> bool {
        matches!(self, CardKind::Defuse)
    }

    #[must_use]
    pub const fn is_cancel(self) -> bool {
        matches!(self, CardKind::Nope)
    }

    /// Cards a player gives away only when nothing else is left.
    #[must_use]
    pub const fn is_precious(self) -> bool {
        matches!(self, CardKind::Defuse | CardKind::Nope)
    }

    /// Position in the hand display order.
    #[must_use]
    pub fn display_rank(self) -> usize {
        Self::DISPLAY_ORDER
            .iter()
            .position(|&k| k == self)
            .unwrap_or(Self::DISPLAY_ORDER.len())
    }

    /// Resolve a free-text card name.
    ///
    /// Case-insensitive; tries an exact name, then a prefix, then a
    /// substring. Only for external text input: rule resolution always works
    /// on `CardKind` directly.
    ///
    /// ```
    /// use kitten_rules::cards::CardKind;
    ///
    /// assert_eq!(CardKind::from_query("see the future"), Some(CardKind::SeeTheFuture));
    /// assert_eq!(CardKind::from_query("taco"), Some(CardKind::TacoCat));
    /// assert_eq!(CardKind::from_query("ralph"), Some(CardKind::RainbowRalphingCat));
    /// assert_eq!(CardKind::from_query("banana"), None);
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Option<CardKind> {
        best_match(Self::ALL.iter().copied(), query)
    }

    /// Resolve a free-text cat name against the three cat kinds.
    #[must_use]
    pub fn cat_from_query(query: &str) -> Option<CardKind> {
        best_match(Self::CATS.iter().copied(), query)
    }
}

/// Exact, then prefix, then substring match over `candidates`.
pub(crate) fn best_match(
    candidates: impl Iterator<Item = CardKind> + Clone,
    query: &str,
) -> Option<CardKind> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    let lower = |k: &CardKind| k.name().to_lowercase();
    candidates
        .clone()
        .find(|k| lower(k) == q)
        .or_else(|| candidates.clone().find(|k| lower(k).starts_with(&q)))
        .or_else(|| candidates.clone().find(|k| lower(k).contains(&q)))
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(CardKind::ExplodingKitten.is_hazard());
        assert!(CardKind::Defuse.is_escape());
        assert!(CardKind::Nope.is_cancel());
        assert!(CardKind::Defuse.is_precious());
        assert!(CardKind::Nope.is_precious());
        assert!(!CardKind::Attack.is_precious());

        let cats: Vec<_> = CardKind::ALL.iter().filter(|k| k.is_cat()).copied().collect();
        assert_eq!(cats, CardKind::CATS.to_vec());
    }

    #[test]
    fn test_display_uses_printed_name() {
        assert_eq!(CardKind::SeeTheFuture.to_string(), "See the Future");
        assert_eq!(CardKind::ExplodingKitten.to_string(), "Exploding Kitten");
    }

    #[test]
    fn test_display_rank() {
        assert_eq!(CardKind::Defuse.display_rank(), 0);
        assert!(CardKind::Skip.display_rank() < CardKind::TacoCat.display_rank());
        assert_eq!(CardKind::ExplodingKitten.display_rank(), 12);
    }

    #[test]
    fn test_query_prefers_exact_over_prefix() {
        // "shuffle" is exact for Shuffle; nothing else should win.
        assert_eq!(CardKind::from_query("SHUFFLE"), Some(CardKind::Shuffle));
        // "s" is a prefix of Skip before See the Future and Shuffle in ALL order.
        assert_eq!(CardKind::from_query("s"), Some(CardKind::Skip));
    }

    #[test]
    fn test_query_substring_fallback() {
        assert_eq!(CardKind::from_query("future"), Some(CardKind::SeeTheFuture));
        assert_eq!(CardKind::from_query("kitten"), Some(CardKind::ExplodingKitten));
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(CardKind::from_query("   "), None);
    }

    #[test]
    fn test_cat_query_ignores_other_cards() {
        assert_eq!(CardKind::cat_from_query("beard"), Some(CardKind::BeardCat));
        assert_eq!(CardKind::cat_from_query("skip"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&CardKind::Favor).unwrap();
        let back: CardKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CardKind::Favor);
    }
}
