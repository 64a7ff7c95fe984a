//! Engine of Railroad Barons: players take turns claiming routes between stations of a grid map,
//! spending pieces and cards of a single color, until every route has a baron.

pub mod baron;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod manager;
pub mod map;
pub mod map_maker;
pub mod observer;
pub mod player;
pub mod route;
pub mod space;
pub mod strategy;

pub use baron::Baron;
pub use card::{Card, Pair};
pub use config::GameConfig;
pub use deck::{Deck, StandardDeck};
pub use error::{ClaimError, ConfigError, MapError};
pub use manager::{GamePhase, GameState, Manager};
pub use map::{Map, MapBuilder};
pub use player::Player;
pub use route::{Route, RouteId};
pub use strategy::{Decision, FirstClaimable, Strategy};
