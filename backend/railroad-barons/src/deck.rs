use crate::card::Card;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::iter::repeat;

/// Default multiplicity of each drawable card (eight colors and wild).
pub const NUM_CARDS_PER_COLOR: usize = 20;

/// The supply of cards the [`crate::manager::Manager`] deals from.
///
/// Implementations must never run dry: drawing from an empty deck resets it first.
pub trait Deck {
    /// Removes and returns the top card.
    fn draw(&mut self) -> Card;

    /// How many cards can be drawn before the deck resets itself.
    fn remaining(&self) -> usize;

    /// Refills the deck to its full composition, in a fresh order.
    fn reset(&mut self);
}

/// A shuffled deck holding the same number of cards of each color, wild cards included.
#[derive(Debug)]
pub struct StandardDeck {
    cards: Vec<Card>,
    cards_per_color: usize,
    rng: StdRng,
}

impl StandardDeck {
    /// Creates a full, shuffled deck with [`NUM_CARDS_PER_COLOR`] cards of each kind.
    ///
    /// # Example
    /// ```
    /// use railroad_barons::deck::{Deck, StandardDeck};
    ///
    /// let deck = StandardDeck::new();
    /// assert_eq!(deck.remaining(), 180);
    /// ```
    pub fn new() -> Self {
        Self::with_rng(NUM_CARDS_PER_COLOR, StdRng::from_entropy())
    }

    /// Same as [`StandardDeck::new`], but with a reproducible order.
    pub fn with_seed(cards_per_color: usize, seed: u64) -> Self {
        Self::with_rng(cards_per_color, StdRng::seed_from_u64(seed))
    }

    pub fn with_cards_per_color(cards_per_color: usize) -> Self {
        Self::with_rng(cards_per_color, StdRng::from_entropy())
    }

    fn with_rng(cards_per_color: usize, rng: StdRng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(cards_per_color * Card::DRAWABLE.len()),
            cards_per_color,
            rng,
        };
        deck.reset();

        deck
    }

    /// Number of cards in a full deck.
    #[inline]
    pub fn size(&self) -> usize {
        self.cards_per_color * Card::DRAWABLE.len()
    }

    #[cfg(test)]
    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for StandardDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck for StandardDeck {
    fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            self.reset();
        }

        // A deck with no cards per color stays empty after the reset.
        self.cards.pop().unwrap_or(Card::None)
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn reset(&mut self) {
        self.cards.clear();
        for card in Card::DRAWABLE {
            self.cards.extend(repeat(card).take(self.cards_per_color));
        }

        self.cards.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn count_per_card(cards: &[Card]) -> HashMap<Card, usize> {
        let mut counts = HashMap::new();
        for card in cards {
            counts.entry(*card).and_modify(|num| *num += 1).or_insert(1);
        }

        counts
    }

    #[test]
    fn new_deck_has_canonical_composition() {
        let deck = StandardDeck::new();

        assert_eq!(deck.remaining(), 180);
        assert_eq!(deck.size(), 180);

        let counts = count_per_card(deck.cards());
        assert_eq!(counts.len(), 9);
        for card in Card::DRAWABLE {
            assert_eq!(counts[&card], NUM_CARDS_PER_COLOR);
        }
        assert!(!counts.contains_key(&Card::None));
    }

    #[test]
    fn new_deck_different_every_time() {
        // With 180 cards, there is a negligible chance of shuffling the same deck twice.
        let first_deck = StandardDeck::new();
        let second_deck = StandardDeck::new();

        assert_ne!(first_deck.cards(), second_deck.cards());
    }

    #[test]
    fn seeded_decks_are_reproducible() {
        let mut first_deck = StandardDeck::with_seed(NUM_CARDS_PER_COLOR, 7);
        let mut second_deck = StandardDeck::with_seed(NUM_CARDS_PER_COLOR, 7);

        for _ in 0..50 {
            assert_eq!(first_deck.draw(), second_deck.draw());
        }
    }

    #[test]
    fn draw_removes_top_card() {
        let mut deck = StandardDeck::new();
        let top = *deck.cards().last().unwrap();

        assert_eq!(deck.draw(), top);
        assert_eq!(deck.remaining(), 179);
    }

    #[test]
    fn reset_refills_partially_drawn_deck() {
        let mut deck = StandardDeck::with_cards_per_color(2);
        for _ in 0..5 {
            deck.draw();
        }
        assert_eq!(deck.remaining(), 13);

        deck.reset();
        assert_eq!(deck.remaining(), 18);
        for card in Card::DRAWABLE {
            assert_eq!(count_per_card(deck.cards())[&card], 2);
        }
    }

    #[test]
    fn draw_from_empty_deck_resets_it() {
        let mut deck = StandardDeck::with_cards_per_color(1);
        for _ in 0..9 {
            assert!(!deck.draw().is_none());
        }
        assert_eq!(deck.remaining(), 0);

        assert!(!deck.draw().is_none());
        assert_eq!(deck.remaining(), 8);
    }

    #[test]
    fn degenerate_deck_draws_none() {
        let mut deck = StandardDeck::with_cards_per_color(0);
        assert_eq!(deck.draw(), Card::None);
        assert_eq!(deck.remaining(), 0);
    }
}
