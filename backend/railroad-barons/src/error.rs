//! Error types shared across the engine.

use crate::baron::Baron;
use crate::map::StationId;
use crate::route::RouteId;

use thiserror::Error;

/// Why a claim (or a turn action) was refused.
///
/// Whenever one of these is returned, neither the map nor any player was mutated.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClaimError {
    #[error("Cannot act before a game is started.")]
    NoGameInProgress,

    #[error("Cannot act once the game is over.")]
    GameOver,

    #[error("There is no route at ({row}, {col}).")]
    NoRoute { row: usize, col: usize },

    #[error("There is no route {0}.")]
    UnknownRoute(RouteId),

    #[error("The selected route is already claimed by {baron}.")]
    AlreadyClaimed { baron: Baron },

    #[error("Cannot claim a route of length {needed}, whilst having only {left} pieces left.")]
    NotEnoughPieces { needed: u8, left: u8 },

    #[error("Not enough cards of a single color to claim a route of length {length}.")]
    NotEnoughCards { length: u8 },
}

/// Problems found while building or (de)serializing a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("No station has id {0}.")]
    UnknownStation(StationId),

    #[error("Station id {0} is used more than once.")]
    DuplicateStation(StationId),

    #[error("Station {0} lies outside of any grid that can be represented.")]
    CoordinateOutOfRange(StationId),

    #[error("Stations {0} and {1} are neither on the same row nor on the same column.")]
    MisalignedStations(StationId, StationId),

    #[error("Stations {0} and {1} are adjacent, so no track fits between them.")]
    AdjacentStations(StationId, StationId),

    #[error("Stations {0} and {1} are too far apart to be connected by a single route.")]
    RouteTooLong(StationId, StationId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Invalid [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot create a game without players.")]
    NoPlayers,

    #[error("Cannot create a game with {0} players: there are only 4 barons.")]
    TooManyPlayers(usize),

    #[error("A player cannot play as the unclaimed baron.")]
    UnclaimedBaron,

    #[error("Baron {0} is assigned to more than one player.")]
    DuplicateBaron(Baron),

    #[error("Players must start the game with at least one piece.")]
    NoPieces,

    #[error("The deck must hold at least one card of each color.")]
    NoCards,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
