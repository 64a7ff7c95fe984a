//! Automated players.
//!
//! A [`Strategy`] only picks a move: the [`Manager`] then plays it exactly as it would
//! play a human player's claim or pass.

use crate::manager::Manager;
use crate::route::RouteId;

use serde::Serialize;

/// What the current player does with their turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Claim(RouteId),
    Pass,
}

pub trait Strategy {
    /// Picks a move for the current player of `manager`.
    fn decide(&mut self, manager: &Manager) -> Decision;
}

/// Claims the first route, in map order, that the current player can afford. Passes otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstClaimable;

impl Strategy for FirstClaimable {
    fn decide(&mut self, manager: &Manager) -> Decision {
        let (map, player) = match (manager.map(), manager.current_player()) {
            (Some(map), Some(player)) => (map, player),
            _ => return Decision::Pass,
        };

        map.routes()
            .iter()
            .find(|route| player.can_claim(route))
            .map_or(Decision::Pass, |route| Decision::Claim(route.id()))
    }
}
