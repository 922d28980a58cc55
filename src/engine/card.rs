//! Cards and dealing for the 3-card deck.
//!
//! Kuhn Poker is played with exactly three ranks: Jack < Queen < King.
//! Each hand deals one card to each seat; the third card is burned unseen.
//! That undealt card is what gives the game its imperfect information.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card rank in the 3-card deck.
///
/// Ordering follows rank: `Jack < Queen < King`. Showdowns compare with
/// this order; ties cannot occur because the two dealt cards are always
/// distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Lowest rank.
    Jack,
    /// Middle rank.
    Queen,
    /// Highest rank.
    King,
}

impl Card {
    /// All three ranks in ascending order.
    pub const ALL: [Card; 3] = [Card::Jack, Card::Queen, Card::King];

    /// Index of this rank into fixed-size per-card tables (0..3).
    pub fn index(self) -> usize {
        match self {
            Card::Jack => 0,
            Card::Queen => 1,
            Card::King => 2,
        }
    }

    /// One-letter symbol for compact display.
    pub fn symbol(self) -> &'static str {
        match self {
            Card::Jack => "J",
            Card::Queen => "Q",
            Card::King => "K",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The 3-card deck.
///
/// Stateless: each deal shuffles a fresh copy of the rank set, so no card
/// can repeat within a hand and every hand is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deck;

impl Deck {
    /// Deal one hand: shuffle the three ranks uniformly and return the
    /// first two as `(player_card, opponent_card)`.
    ///
    /// The third card is discarded without being observed by either seat.
    /// Always succeeds; the returned cards are always distinct.
    pub fn deal<R: Rng>(rng: &mut R) -> (Card, Card) {
        let mut cards = Card::ALL;

        // Fisher-Yates shuffle
        for i in (1..cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            cards.swap(i, j);
        }

        (cards[0], cards[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ranks_are_totally_ordered() {
        assert!(Card::Jack < Card::Queen);
        assert!(Card::Queen < Card::King);
        assert!(Card::Jack < Card::King);
    }

    #[test]
    fn deal_returns_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let (player, opponent) = Deck::deal(&mut rng);
            assert_ne!(player, opponent);
        }
    }

    #[test]
    fn deal_is_deterministic_with_seed() {
        let deal_five = |seed: u64| -> Vec<(Card, Card)> {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5).map(|_| Deck::deal(&mut rng)).collect()
        };
        assert_eq!(deal_five(42), deal_five(42));
    }

    #[test]
    fn all_unordered_pairs_occur_with_similar_frequency() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut pair_counts = [0u32; 3];
        let trials = 30_000;

        for _ in 0..trials {
            let (a, b) = Deck::deal(&mut rng);
            // The pair missing a given rank is identified by the rank not dealt.
            let missing = 3 - a.index() - b.index();
            pair_counts[missing] += 1;
        }

        // Each of the 3 unordered pairs should be near trials/3.
        let expected = trials / 3;
        for &count in &pair_counts {
            let deviation = (count as i64 - expected as i64).abs();
            assert!(
                deviation < (expected / 10) as i64,
                "pair count {} too far from expected {}",
                count,
                expected
            );
        }
    }
}
