use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// Represents the different cards a player can hold.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumCount, EnumIter, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
    /// Matches with any color, but only one can stand in for a colored card per claim.
    Wild,
    /// Placeholder for a missing card, e.g. in a [`Pair`] built from an empty hand.
    /// Never part of a deck.
    None,
}

impl Card {
    /// The eight playable colors, in the canonical order used to break ties
    /// when choosing which cards to spend on a route.
    pub const COLORS: [Card; 8] = [
        Card::Black,
        Card::Blue,
        Card::Green,
        Card::Orange,
        Card::Pink,
        Card::Red,
        Card::White,
        Card::Yellow,
    ];

    /// Every card found in a deck: the eight colors and the wild card.
    pub const DRAWABLE: [Card; 9] = [
        Card::Black,
        Card::Blue,
        Card::Green,
        Card::Orange,
        Card::Pink,
        Card::Red,
        Card::White,
        Card::Yellow,
        Card::Wild,
    ];

    /// Whether the current card is wild, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use railroad_barons::card::Card;
    ///
    /// assert!(!Card::Black.is_wild());
    /// assert!(Card::Wild.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == Card::Wild
    }

    /// Whether the card is the empty placeholder.
    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Card::None
    }
}

/// Cards are dealt to the current player two at a time, at the start of their turn.
///
/// Either card may be [`Card::None`] when the pair was built from fewer than two cards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pair {
    first: Card,
    second: Card,
}

impl Pair {
    pub fn new(first: Card, second: Card) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn first(&self) -> Card {
        self.first
    }

    #[inline]
    pub fn second(&self) -> Card {
        self.second
    }
}

impl Default for Pair {
    fn default() -> Self {
        Self::new(Card::None, Card::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn card_to_string() {
        assert_eq!(Card::Orange.to_string(), "orange");
        assert_eq!(Card::Wild.to_string(), "wild");
        assert_eq!(Card::None.to_string(), "none");
    }

    #[test]
    fn card_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Card::Blue)?, r#""blue""#);
        assert_eq!(serde_json::to_string(&Card::None)?, r#""none""#);
        Ok(())
    }

    #[test]
    fn json_to_card() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Card>(r#""wild""#)?, Card::Wild);
        assert_eq!(serde_json::from_str::<Card>(r#""yellow""#)?, Card::Yellow);
        Ok(())
    }

    #[test]
    fn invalid_json_to_card() {
        assert!(serde_json::from_str::<Card>(r#""turquoise""#).is_err());
    }

    #[test]
    fn canonical_colors_exclude_wild_and_none() {
        assert_eq!(Card::COUNT, 10);
        assert!(Card::COLORS.iter().all(|card| !card.is_wild() && !card.is_none()));

        let drawable: Vec<Card> = Card::iter().filter(|card| !card.is_none()).collect();
        assert_eq!(drawable, Card::DRAWABLE);
    }

    #[test]
    fn default_pair_is_empty() {
        let pair = Pair::default();
        assert_eq!(pair.first(), Card::None);
        assert_eq!(pair.second(), Card::None);
    }
}
