use crate::baron::Baron;
use crate::error::MapError;
use crate::observer::{MapObserver, ObserverId, Observers};
use crate::route::{Route, RouteId};
use crate::space::{Space, Station};

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use strum_macros::{Display, EnumIter};
use tracing::debug;

/// Identifier of a station, as found in map files.
pub type StationId = u32;

/// Borders of the grid.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    North,
    South,
    East,
    West,
}

/// Routes with at least one end station on each border of the grid.
/// Derived once the map is built.
#[derive(Debug, Default)]
struct EdgeRoutes {
    north: Vec<RouteId>,
    south: Vec<RouteId>,
    east: Vec<RouteId>,
    west: Vec<RouteId>,
}

impl EdgeRoutes {
    fn get(&self, edge: Edge) -> &[RouteId] {
        match edge {
            Edge::North => &self.north,
            Edge::South => &self.south,
            Edge::East => &self.east,
            Edge::West => &self.west,
        }
    }
}

/// Accumulates stations and routes before freezing them into a [`Map`].
///
/// # Example
/// ```
/// use railroad_barons::baron::Baron;
/// use railroad_barons::map::MapBuilder;
/// use railroad_barons::space::Station;
///
/// let mut builder = MapBuilder::new();
/// builder.add_station(0, Station::new("Rochester", 0, 0)).unwrap();
/// builder.add_station(1, Station::new("Syracuse", 0, 4)).unwrap();
/// builder.add_route(0, 1, Baron::Unclaimed).unwrap();
///
/// let map = builder.build();
/// assert_eq!((map.rows(), map.cols()), (1, 5));
/// assert_eq!(map.shortest_unclaimed_length(), Some(3));
/// ```
#[derive(Debug, Default)]
pub struct MapBuilder {
    stations: BTreeMap<StationId, Station>,
    routes: Vec<Route>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an `Err` if `id` is already taken, or if the station lies on the last
    /// row or column a `usize` can address, leaving no room to count the grid's extent.
    pub fn add_station(&mut self, id: StationId, station: Station) -> Result<(), MapError> {
        if self.stations.contains_key(&id) {
            return Err(MapError::DuplicateStation(id));
        }

        if station.row().checked_add(1).is_none() || station.col().checked_add(1).is_none() {
            return Err(MapError::CoordinateOutOfRange(id));
        }

        self.stations.insert(id, station);
        Ok(())
    }

    /// Adds a route between two already added stations.
    ///
    /// A `baron` other than [`Baron::Unclaimed`] restores a claim, e.g. from a saved map.
    pub fn add_route(
        &mut self,
        origin: StationId,
        destination: StationId,
        baron: Baron,
    ) -> Result<RouteId, MapError> {
        let origin_station = self
            .stations
            .get(&origin)
            .ok_or(MapError::UnknownStation(origin))?;
        let destination_station = self
            .stations
            .get(&destination)
            .ok_or(MapError::UnknownStation(destination))?;

        let id = RouteId(self.routes.len());
        let mut route = Route::new(
            id,
            (origin, origin_station),
            (destination, destination_station),
        )?;

        if !baron.is_unclaimed() {
            route.claim(baron);
        }

        self.routes.push(route);
        Ok(id)
    }

    /// Freezes the stations and routes.
    ///
    /// The grid spans from (0, 0) to the southern-most and eastern-most stations.
    pub fn build(self) -> Map {
        let rows = self
            .stations
            .values()
            .map(|station| station.row() + 1)
            .max()
            .unwrap_or(0);
        let cols = self
            .stations
            .values()
            .map(|station| station.col() + 1)
            .max()
            .unwrap_or(0);

        let mut tracks_index = HashMap::new();
        for route in &self.routes {
            for (position, track) in route.tracks().iter().enumerate() {
                // Should two routes cross, the first one keeps the cell.
                tracks_index
                    .entry((track.row(), track.col()))
                    .or_insert((route.id(), position));
            }
        }

        let mut edge_routes = EdgeRoutes::default();
        for route in &self.routes {
            let ends = [&self.stations[&route.origin()], &self.stations[&route.destination()]];

            if ends.iter().any(|station| station.row() == 0) {
                edge_routes.north.push(route.id());
            }
            if ends.iter().any(|station| station.row() + 1 == rows) {
                edge_routes.south.push(route.id());
            }
            if ends.iter().any(|station| station.col() + 1 == cols) {
                edge_routes.east.push(route.id());
            }
            if ends.iter().any(|station| station.col() == 0) {
                edge_routes.west.push(route.id());
            }
        }

        debug!(
            "Built a {}x{} map with {} stations and {} routes.",
            rows,
            cols,
            self.stations.len(),
            self.routes.len()
        );

        Map {
            rows,
            cols,
            stations: self.stations,
            routes: self.routes,
            tracks_index,
            edge_routes,
            observers: Observers::new(),
        }
    }
}

/// The grid of stations, and the routes connecting them.
///
/// Once built, only the barons of the routes ever change.
/// Not thread-safe!
pub struct Map {
    rows: usize,
    cols: usize,
    stations: BTreeMap<StationId, Station>,
    /// Indexed by [`RouteId`].
    routes: Vec<Route>,
    /// Maps a cell to the route holding a track there, and the position of that track in the route.
    tracks_index: HashMap<(usize, usize), (RouteId, usize)>,
    edge_routes: EdgeRoutes,
    observers: Observers<dyn MapObserver>,
}

impl Map {
    pub fn builder() -> MapBuilder {
        MapBuilder::new()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations.iter().map(|(id, station)| (*id, station))
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.index())
    }

    pub(crate) fn route_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.get_mut(id.index())
    }

    /// The track or station at the given cell, if any.
    ///
    /// Tracks are looked up first.
    pub fn space_at(&self, row: usize, col: usize) -> Option<Space> {
        if let Some((route_id, position)) = self.tracks_index.get(&(row, col)) {
            return Some(Space::Track(&self.routes[route_id.index()].tracks()[*position]));
        }

        self.stations
            .values()
            .find(|station| station.row() == row && station.col() == col)
            .map(Space::Station)
    }

    /// The route holding a track at the given cell, if any.
    /// Stations do not belong to any route.
    pub fn route_at(&self, row: usize, col: usize) -> Option<&Route> {
        self.tracks_index
            .get(&(row, col))
            .map(|(route_id, _)| &self.routes[route_id.index()])
    }

    /// Length of the shortest route nobody has claimed yet.
    ///
    /// Returns `None` if there is no such route, including when the map has no routes at all.
    pub fn shortest_unclaimed_length(&self) -> Option<u8> {
        self.routes
            .iter()
            .filter(|route| !route.is_claimed())
            .map(|route| route.length())
            .min()
    }

    /// Whether every route has a baron. Vacuously true for a map without routes.
    pub fn all_routes_claimed(&self) -> bool {
        self.routes.iter().all(|route| route.is_claimed())
    }

    pub fn routes_touching(&self, edge: Edge) -> &[RouteId] {
        self.edge_routes.get(edge)
    }

    pub fn register_observer(&mut self, observer: Rc<dyn MapObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Lets observers know that the given route was just claimed.
    ///
    /// This does not claim the route: see [`Route::claim`].
    pub fn mark_claimed(&self, id: RouteId) {
        if let Some(route) = self.route(id) {
            for observer in self.observers.iter() {
                observer.route_claimed(self, route);
            }
        }
    }
}
