use crate::{
    baron::Baron,
    card::{Card, Pair},
    config::GameConfig,
    deck::Deck,
    error::{ClaimError, ConfigError},
    map::Map,
    observer::{ManagerObserver, ObserverId, Observers},
    player::{Player, PlayerState},
    route::RouteId,
    strategy::{Decision, Strategy},
};

use array_init::array_init;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info};

const MAX_PLAYERS: usize = Baron::PLAYERS.len();

/// Every player is dealt this many cards when a game starts, and whenever the deck runs out.
pub const NUM_STARTING_CARDS: usize = 4;

#[derive(Clone, Copy, Serialize, Debug, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
/// Phases of the game, which act as states in the game's finite-state machine.
///
/// # JSON
/// Phases are serialized in snake_case.
pub enum GamePhase {
    /// No map was installed yet: nothing can be claimed.
    NotStarted,
    /// The current player may claim at most one route, or pass.
    ///
    /// Either way, the turn then ends and we stay in this phase for the next player,
    /// until the game is over.
    WaitingForClaim,
    /// Every route is claimed, or no player can claim any of the routes left.
    ///
    /// No actions can be taken at this point.
    GameOver,
}

#[derive(Serialize)]
/// All the information about a game's current state, returned by [`Manager::get_state`].
pub struct GameState<'a> {
    pub phase: GamePhase,
    /// Whose turn it is. `None` until a game is started.
    pub current_player: Option<Baron>,
    /// Set once the game is over.
    pub winner: Option<Baron>,
    pub cards_remaining: usize,
    /// In the order they were claimed.
    pub claimed_routes: &'a [RouteId],
    /// In rotation order, starting with the current player.
    pub players_state: SmallVec<[PlayerState<'a>; MAX_PLAYERS]>,
}

/// In charge of holding all the state of the game, dealing cards, validating claims,
/// and rotating amongst players.
///
/// This overall acts as a finite-state machine.
pub struct Manager {
    config: GameConfig,
    /// The current phase of the game, which marks nodes (states) in this finite-state machine.
    phase: GamePhase,
    /// The rotation: the current player is at the front.
    ///
    /// A player whose turn ends goes to the back, as does a player who cannot continue.
    players: VecDeque<Player>,
    /// Holds the [`Map`].
    /// Only populated once the game is started!
    map: Option<Map>,
    deck: Box<dyn Deck>,
    /// Mirrors the claimed routes of the map, in the order they were claimed.
    claimed_routes: Vec<RouteId>,
    observers: Observers<dyn ManagerObserver>,
}

impl Manager {
    /// Creates a new [`Manager`] in the [`GamePhase::NotStarted`], with one player per
    /// configured baron.
    ///
    /// Returns an `Err` if the configuration is invalid: see [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let players = config
            .barons
            .iter()
            .map(|baron| Player::new(*baron, config.starting_pieces))
            .collect();
        let deck = Box::new(config.build_deck());

        Ok(Self {
            config,
            phase: GamePhase::NotStarted,
            players,
            map: None,
            deck,
            claimed_routes: Vec::new(),
            observers: Observers::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The player whose turn it is. `None` until a game is started.
    pub fn current_player(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::NotStarted => None,
            _ => self.players.front(),
        }
    }

    /// All players, in rotation order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, baron: Baron) -> Option<&Player> {
        self.players.iter().find(|player| player.baron() == baron)
    }

    pub fn player_mut(&mut self, baron: Baron) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.baron() == baron)
    }

    #[inline]
    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    /// Mostly useful to register [`crate::observer::MapObserver`]s.
    #[inline]
    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut()
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    #[inline]
    pub fn claimed_routes(&self) -> &[RouteId] {
        &self.claimed_routes
    }

    pub fn register_observer(&mut self, observer: Rc<dyn ManagerObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Returns the game's state.
    pub fn get_state(&self) -> GameState {
        let winner = match self.phase {
            GamePhase::GameOver => self.winner().map(|player| player.baron()),
            _ => None,
        };

        GameState {
            phase: self.phase,
            current_player: self.current_player().map(|player| player.baron()),
            winner,
            cards_remaining: self.cards_remaining(),
            claimed_routes: &self.claimed_routes,
            players_state: self
                .players
                .iter()
                .map(|player| player.get_player_state())
                .collect(),
        }
    }

    /// Starts a new game on `map`, with a freshly shuffled deck built from the configuration.
    pub fn start_game(&mut self, map: Map) {
        let deck = Box::new(self.config.build_deck());
        self.start_game_with_deck(map, deck);
    }

    /// Starts a new game on `map`, dealing from `deck`.
    ///
    /// Whatever game was in progress is dropped entirely:
    ///   * Players go back to the configured rotation order, with their starting pieces
    ///     and no points.
    ///   * Every player is dealt [`NUM_STARTING_CARDS`] cards, one at a time.
    ///   * The first player is dealt a pair, and their turn starts.
    ///
    /// Observers registered on the manager and on players are kept.
    pub fn start_game_with_deck(&mut self, map: Map, deck: Box<dyn Deck>) {
        self.deck = deck;

        let barons = &self.config.barons;
        self.players
            .make_contiguous()
            .sort_by_key(|player| barons.iter().position(|baron| *baron == player.baron()));

        for player in self.players.iter_mut() {
            let hand: [Card; NUM_STARTING_CARDS] = array_init(|_| self.deck.draw());
            player.restart(&hand, self.config.starting_pieces);
        }

        self.claimed_routes = map
            .routes()
            .iter()
            .filter(|route| route.is_claimed())
            .map(|route| route.id())
            .collect();
        info!(
            "Starting a game on a {}x{} map with {} routes ({} already claimed), for {} players.",
            map.rows(),
            map.cols(),
            map.routes().len(),
            self.claimed_routes.len(),
            self.players.len()
        );
        self.map = Some(map);

        self.phase = GamePhase::WaitingForClaim;
        self.start_turn();
    }

    /// Whether every route of the map is claimed.
    /// Always `false` if no game was started.
    pub fn game_over(&self) -> bool {
        self.map
            .as_ref()
            .map_or(false, |map| map.all_routes_claimed())
    }

    /// The player with the highest score.
    /// Amongst players with the same score, the first one in the rotation wins.
    ///
    /// Returns `None` if no game was started.
    pub fn winner(&self) -> Option<&Player> {
        if self.phase == GamePhase::NotStarted {
            return None;
        }

        let mut players = self.players.iter();
        let mut winner = players.next()?;
        for player in players {
            if player.score() > winner.score() {
                winner = player;
            }
        }

        Some(winner)
    }

    /// Whether the current player could claim the route at the given cell.
    pub fn can_current_player_claim(&self, row: usize, col: usize) -> bool {
        if self.phase != GamePhase::WaitingForClaim {
            return false;
        }

        match (self.map.as_ref(), self.players.front()) {
            (Some(map), Some(player)) => map
                .route_at(row, col)
                .map_or(false, |route| player.can_claim(route)),
            _ => false,
        }
    }

    fn check_playing(&self) -> Result<(), ClaimError> {
        match self.phase {
            GamePhase::NotStarted => Err(ClaimError::NoGameInProgress),
            GamePhase::GameOver => Err(ClaimError::GameOver),
            GamePhase::WaitingForClaim => Ok(()),
        }
    }

    /// The current player claims the route having a track at the given cell, then their turn ends.
    ///
    /// Returns an `Err` if either:
    ///   * We are not in [`GamePhase::WaitingForClaim`].
    ///   * There is no track at that cell.
    ///   * [`Player::claim`] failed.
    ///
    /// In which case nothing changed, and it is still the same player's turn.
    ///
    /// Otherwise, returns the claimed route.
    pub fn claim(&mut self, row: usize, col: usize) -> Result<RouteId, ClaimError> {
        self.check_playing()?;

        let route_id = self
            .map
            .as_ref()
            .and_then(|map| map.route_at(row, col))
            .map(|route| route.id())
            .ok_or(ClaimError::NoRoute { row, col })?;

        self.claim_route(route_id)?;
        Ok(route_id)
    }

    fn claim_route(&mut self, route_id: RouteId) -> Result<(), ClaimError> {
        self.check_playing()?;

        let map = self.map.as_mut().ok_or(ClaimError::NoGameInProgress)?;
        let player = self
            .players
            .front_mut()
            .ok_or(ClaimError::NoGameInProgress)?;
        let route = map
            .route_mut(route_id)
            .ok_or(ClaimError::UnknownRoute(route_id))?;

        let points = player.claim(route)?;
        info!(
            "{} claimed route {} of length {}, for {} points.",
            player.baron(),
            route_id,
            route.length(),
            points
        );

        map.mark_claimed(route_id);
        self.claimed_routes.push(route_id);

        self.end_turn()
    }

    /// Ends the current player's turn, whether they claimed a route or not.
    ///
    /// Returns an `Err` if we are not in [`GamePhase::WaitingForClaim`].
    ///
    /// Otherwise, the current player goes to the back of the rotation, and:
    ///   * Players who cannot claim any route left are skipped, in turn.
    ///   * If the deck is empty, it is reset, and every player is dealt a new hand.
    ///   * If the game is not over, the next player is dealt a pair, and their turn starts.
    ///     Otherwise, we transition to [`GamePhase::GameOver`].
    pub fn end_turn(&mut self) -> Result<(), ClaimError> {
        self.check_playing()?;

        self.players.rotate_left(1);
        if let Some(finished) = self.players.back() {
            for observer in self.observers.iter() {
                observer.turn_ended(self, finished);
            }
        }

        let shortest_unclaimed_length = self
            .map
            .as_ref()
            .and_then(|map| map.shortest_unclaimed_length());
        let mut someone_can_continue = false;
        for _ in 0..self.players.len() {
            match self.players.front() {
                Some(player) if player.can_continue(shortest_unclaimed_length) => {
                    someone_can_continue = true;
                    break;
                }
                Some(player) => {
                    debug!("{} cannot claim any route left, and is skipped.", player.baron());
                    self.players.rotate_left(1);
                }
                None => break,
            }
        }

        if self.deck.remaining() == 0 {
            info!("The deck is empty: reshuffling it, and dealing new hands.");
            self.deck.reset();
            for player in self.players.iter_mut() {
                let hand: [Card; NUM_STARTING_CARDS] = array_init(|_| self.deck.draw());
                player.reset(&hand);
            }
        }

        if !self.game_over() && someone_can_continue {
            self.start_turn();
        } else {
            self.phase = GamePhase::GameOver;
            if let Some(winner) = self.winner() {
                info!(
                    "Game over: {} wins with {} points.",
                    winner.baron(),
                    winner.score()
                );
                for observer in self.observers.iter() {
                    observer.game_over(self, winner);
                }
            }
        }

        Ok(())
    }

    fn start_turn(&mut self) {
        let pair = Pair::new(self.deck.draw(), self.deck.draw());

        if let Some(player) = self.players.front_mut() {
            debug!(
                "{} is dealt {} and {}.",
                player.baron(),
                pair.first(),
                pair.second()
            );
            player.receive(pair);
        }

        if let Some(player) = self.players.front() {
            for observer in self.observers.iter() {
                observer.turn_started(self, player);
            }
        }
    }

    /// Lets `strategy` play the current player's turn: either claiming a route, or passing.
    ///
    /// Returns an `Err` if we are not in [`GamePhase::WaitingForClaim`], or if the chosen
    /// route cannot be claimed by the current player. In which case nothing changed.
    ///
    /// Otherwise, returns what was decided.
    pub fn play_turn(&mut self, strategy: &mut dyn Strategy) -> Result<Decision, ClaimError> {
        self.check_playing()?;

        let decision = strategy.decide(self);
        match decision {
            Decision::Claim(route_id) => self.claim_route(route_id)?,
            Decision::Pass => self.end_turn()?,
        }

        Ok(decision)
    }
}
