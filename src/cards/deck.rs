//! Deck construction.
//!
//! Builds the starting hands and draw pile from a `RuleConfig` frequency
//! table. Every seat is guaranteed one Defuse; the remaining Defuses and the
//! Exploding Kittens go into the deck after dealing, so nobody can be dealt
//! a hazard.

use crate::core::config::RuleConfig;
use crate::core::{GameRng, PlayerMap};
use crate::zones::{Deck, Hand};

use super::CardKind;

/// Deals a new game.
pub struct DeckBuilder<'a> {
    config: &'a RuleConfig,
}

impl<'a> DeckBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a RuleConfig) -> Self {
        Self { config }
    }

    /// Exploding Kittens in a game for `player_count` seats.
    #[must_use]
    pub fn hazard_count(player_count: usize) -> usize {
        player_count.saturating_sub(1).max(1)
    }

    /// Deal hands and build the draw pile.
    ///
    /// Short pools degrade gracefully: dealing stops when the pool runs out.
    pub fn build(&self, player_count: usize, rng: &mut GameRng) -> (PlayerMap<Hand>, Deck) {
        let mut pool: Vec<CardKind> = self
            .config
            .frequencies
            .iter()
            .filter(|(kind, _)| !kind.is_hazard() && !kind.is_escape())
            .flat_map(|&(kind, n)| std::iter::repeat(kind).take(n))
            .collect();
        rng.shuffle(&mut pool);

        let mut hands = PlayerMap::new(player_count, |_| Hand::new());
        for player in crate::core::PlayerId::all(player_count) {
            let take = self.config.hand_size.min(pool.len());
            let hand = &mut hands[player];
            for card in pool.drain(..take) {
                hand.push(card);
            }
            hand.push(CardKind::Defuse);
            hand.shuffle(rng);
        }

        let spare_escapes = self
            .config
            .frequency(CardKind::Defuse)
            .saturating_sub(player_count);
        pool.extend(std::iter::repeat(CardKind::ExplodingKitten).take(Self::hazard_count(player_count)));
        pool.extend(std::iter::repeat(CardKind::Defuse).take(spare_escapes));
        rng.shuffle(&mut pool);

        tracing::debug!(
            deck = pool.len(),
            hand_size = self.config.hand_size,
            "dealt new game"
        );
        (hands, pool.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_default_deal() {
        let config = RuleConfig::default();
        let mut rng = GameRng::new(42);

        let (hands, deck) = DeckBuilder::new(&config).build(2, &mut rng);

        for player in PlayerId::all(2) {
            assert_eq!(hands[player].len(), 5);
            assert_eq!(hands[player].count(CardKind::Defuse), 1);
            assert!(!hands[player].contains(CardKind::ExplodingKitten));
        }
        // 51 box cards, minus 2 dealt Defuses taken from the box count,
        // plus one hazard.
        assert_eq!(deck.len() + 10, 51 + 1);
        assert_eq!(deck.count(CardKind::ExplodingKitten), 1);
        assert_eq!(deck.count(CardKind::Defuse), 1);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let config = RuleConfig::default();
        let (h1, d1) = DeckBuilder::new(&config).build(2, &mut GameRng::new(5));
        let (h2, d2) = DeckBuilder::new(&config).build(2, &mut GameRng::new(5));

        assert_eq!(d1, d2);
        assert_eq!(h1[PlayerId::HUMAN], h2[PlayerId::HUMAN]);
    }

    #[test]
    fn test_short_pool_degrades() {
        let config = RuleConfig::default()
            .with_frequencies(vec![(CardKind::Skip, 3)])
            .with_hand_size(4);
        let mut rng = GameRng::new(1);

        let (hands, deck) = DeckBuilder::new(&config).build(2, &mut rng);

        assert_eq!(hands[PlayerId::HUMAN].len(), 4);
        assert_eq!(hands[PlayerId::AUTOMATED].len(), 1);
        assert_eq!(deck.iter().collect::<Vec<_>>(), vec![CardKind::ExplodingKitten]);
    }

    #[test]
    fn test_hazard_count() {
        assert_eq!(DeckBuilder::hazard_count(1), 1);
        assert_eq!(DeckBuilder::hazard_count(2), 1);
        assert_eq!(DeckBuilder::hazard_count(4), 3);
    }
}
