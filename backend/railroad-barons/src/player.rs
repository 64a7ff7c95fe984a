use crate::baron::Baron;
use crate::card::{Card, Pair};
use crate::error::ClaimError;
use crate::observer::{ObserverId, Observers, PlayerObserver};
use crate::route::{Route, RouteId};

use serde::Serialize;
use std::rc::Rc;
use tracing::debug;

// Every player starts the game with 45 pieces.
pub const NUM_OF_PIECES: u8 = 45;

/// The cards a player would spend to claim a given route, as returned by [`Player::check_claim`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct CardsToSpend {
    /// The single color used.
    pub color: Card,
    /// How many cards of `color` are spent.
    pub num_colored: u8,
    /// Whether one wild card completes the set.
    pub uses_wild: bool,
}

/// Information about a player's state, returned by [`Player::get_player_state`].
#[derive(Debug, PartialEq, Serialize)]
pub struct PlayerState<'a> {
    pub baron: Baron,
    pub pieces: u8,
    pub score: u32,
    pub hand: &'a [Card],
    pub claimed_routes: &'a [RouteId],
}

/// Encapsulates a player's hand, pieces, claimed routes and score.
///
/// The [`Player`] is not aware of other players, nor of turns: it assumes every call comes
/// from the [`crate::manager::Manager`] during that player's turn, and only checks whether
/// it holds the resources to claim a route.
pub struct Player {
    baron: Baron,
    /// Order matters: the last two cards are the ones most recently dealt.
    hand: Vec<Card>,
    pieces: u8,
    claimed_routes: Vec<RouteId>,
    score: u32,
    observers: Observers<dyn PlayerObserver>,
}

impl Player {
    /// Creates a new player, with an empty hand and no claimed route.
    pub fn new(baron: Baron, pieces: u8) -> Self {
        Self {
            baron,
            hand: Vec::new(),
            pieces,
            claimed_routes: Vec::new(),
            score: 0,
            observers: Observers::new(),
        }
    }

    #[inline]
    pub fn baron(&self) -> Baron {
        self.baron
    }

    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// How many pieces the player has left to build routes with.
    #[inline]
    pub fn pieces(&self) -> u8 {
        self.pieces
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn claimed_routes(&self) -> &[RouteId] {
        &self.claimed_routes
    }

    pub fn register_observer(&mut self, observer: Rc<dyn PlayerObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    fn notify_observers(&self) {
        for observer in self.observers.iter() {
            observer.player_changed(self);
        }
    }

    /// Replaces the whole hand with the given cards.
    pub fn reset(&mut self, dealt: &[Card]) {
        self.hand.clear();
        self.hand
            .extend(dealt.iter().filter(|card| !card.is_none()).copied());

        self.notify_observers();
    }

    /// Brings the player back to the start of a game: `dealt` as the hand, `pieces` left,
    /// no claimed route, and no points.
    pub fn restart(&mut self, dealt: &[Card], pieces: u8) {
        self.pieces = pieces;
        self.score = 0;
        self.claimed_routes.clear();

        self.reset(dealt);
    }

    /// Adds a pair of cards at the end of the hand.
    /// Placeholder [`Card::None`] cards are dropped.
    pub fn receive(&mut self, dealt: Pair) {
        for card in [dealt.first(), dealt.second()] {
            if !card.is_none() {
                self.hand.push(card);
            }
        }

        self.notify_observers();
    }

    /// The two cards most recently added to the hand, in the order they were added:
    /// the newest card is second, as it was in the dealt [`Pair`], rather than first.
    ///
    /// With fewer than two cards in hand, the missing slots are [`Card::None`].
    ///
    /// # Example
    /// ```
    /// use railroad_barons::baron::Baron;
    /// use railroad_barons::card::{Card, Pair};
    /// use railroad_barons::player::Player;
    ///
    /// let mut player = Player::new(Baron::Red, 45);
    /// assert_eq!(player.last_two_cards(), Pair::new(Card::None, Card::None));
    ///
    /// player.reset(&[Card::Blue]);
    /// assert_eq!(player.last_two_cards(), Pair::new(Card::Blue, Card::None));
    ///
    /// player.receive(Pair::new(Card::Red, Card::Wild));
    /// assert_eq!(player.last_two_cards(), Pair::new(Card::Red, Card::Wild));
    /// ```
    pub fn last_two_cards(&self) -> Pair {
        match self.hand.as_slice() {
            [] => Pair::default(),
            [only] => Pair::new(*only, Card::None),
            [.., second_to_last, last] => Pair::new(*second_to_last, *last),
        }
    }

    /// Exact number of `card` in hand.
    pub fn count(&self, card: Card) -> usize {
        self.hand.iter().filter(|held| **held == card).count()
    }

    /// Whether the player could claim any route of the given length.
    ///
    /// `None` means there is no unclaimed route left, so the player cannot continue.
    pub fn can_continue(&self, shortest_unclaimed_length: Option<u8>) -> bool {
        match shortest_unclaimed_length {
            Some(length) => self.pieces >= length,
            None => false,
        }
    }

    /// Whether the player can claim the given route right now.
    ///
    /// Never mutates anything.
    pub fn can_claim(&self, route: &Route) -> bool {
        self.check_claim(route).is_ok()
    }

    /// Verifies that the player could claim the given route.
    ///
    /// Returns an `Err` if either:
    ///   * The route already has a baron.
    ///   * There are not enough pieces left.
    ///   * There is no color of which the player holds the route's length in cards,
    ///     or the route's length minus one alongside a wild card.
    ///
    /// Otherwise, returns the cards that [`Player::claim`] would spend. Colors which
    /// do not need a wild card are preferred, then the first color in [`Card::COLORS`].
    pub fn check_claim(&self, route: &Route) -> Result<CardsToSpend, ClaimError> {
        if route.is_claimed() {
            return Err(ClaimError::AlreadyClaimed {
                baron: route.baron(),
            });
        }

        let length = route.length();
        if self.pieces < length {
            return Err(ClaimError::NotEnoughPieces {
                needed: length,
                left: self.pieces,
            });
        }

        let counts = Card::COLORS.map(|color| self.count(color));

        if let Some(color_index) = counts.iter().position(|count| *count >= length as usize) {
            return Ok(CardsToSpend {
                color: Card::COLORS[color_index],
                num_colored: length,
                uses_wild: false,
            });
        }

        if self.count(Card::Wild) >= 1 {
            if let Some(color_index) = counts
                .iter()
                .position(|count| *count + 1 >= length as usize)
            {
                return Ok(CardsToSpend {
                    color: Card::COLORS[color_index],
                    num_colored: length.saturating_sub(1),
                    uses_wild: true,
                });
            }
        }

        Err(ClaimError::NotEnoughCards { length })
    }

    /// Try to claim a route for the player.
    ///
    /// Returns an `Err` under the conditions listed in [`Player::check_claim`],
    /// in which case neither the player nor the route changed.
    ///
    /// Otherwise, hands the route to the player's baron, spends the cards (the earliest
    /// dealt ones of that color first) and pieces, adds the route's points to the score,
    /// and returns those points.
    pub fn claim(&mut self, route: &mut Route) -> Result<u32, ClaimError> {
        let cards_to_spend = self.check_claim(route)?;

        if !route.claim(self.baron) {
            return Err(ClaimError::AlreadyClaimed {
                baron: route.baron(),
            });
        }

        self.remove_cards(cards_to_spend.color, cards_to_spend.num_colored as usize);
        if cards_to_spend.uses_wild {
            self.remove_cards(Card::Wild, 1);
        }

        let points = route.point_value();
        self.score += points;
        self.pieces -= route.length();
        self.claimed_routes.push(route.id());

        debug!(
            "{} spent {} {} cards{} on route {} ({} points).",
            self.baron,
            cards_to_spend.num_colored,
            cards_to_spend.color,
            if cards_to_spend.uses_wild {
                " and a wild card"
            } else {
                ""
            },
            route.id(),
            points
        );

        self.notify_observers();
        Ok(points)
    }

    fn remove_cards(&mut self, card: Card, mut num: usize) {
        self.hand.retain(|held| {
            if num > 0 && *held == card {
                num -= 1;
                false
            } else {
                true
            }
        });
    }

    /// Retrieve a serializable view of the player.
    pub fn get_player_state(&self) -> PlayerState {
        PlayerState {
            baron: self.baron,
            pieces: self.pieces,
            score: self.score,
            hand: &self.hand,
            claimed_routes: &self.claimed_routes,
        }
    }
}
