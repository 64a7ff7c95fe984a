use crate::baron::Baron;
use crate::route::RouteId;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Direction in which a route, and each of its tracks, runs across the grid.
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

/// A named point on the grid, which routes start and end at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Station {
    name: String,
    row: usize,
    col: usize,
}

impl Station {
    pub fn new(name: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            name: name.into(),
            row,
            col,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }
}

/// One grid cell of a route.
///
/// A track is owned by its route; `route` is only a handle back to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Track {
    orientation: Orientation,
    baron: Baron,
    route: RouteId,
    row: usize,
    col: usize,
}

impl Track {
    pub(crate) fn new(orientation: Orientation, route: RouteId, row: usize, col: usize) -> Self {
        Self {
            orientation,
            baron: Baron::Unclaimed,
            route,
            row,
            col,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Always the same as the baron of [`Track::route`].
    #[inline]
    pub fn baron(&self) -> Baron {
        self.baron
    }

    #[inline]
    pub fn route(&self) -> RouteId {
        self.route
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    pub(crate) fn set_baron(&mut self, baron: Baron) {
        self.baron = baron;
    }
}

/// Whatever occupies a cell of the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Space<'a> {
    Track(&'a Track),
    Station(&'a Station),
}

impl<'a> Space<'a> {
    pub fn row(&self) -> usize {
        match self {
            Space::Track(track) => track.row(),
            Space::Station(station) => station.row(),
        }
    }

    pub fn col(&self) -> usize {
        match self {
            Space::Track(track) => track.col(),
            Space::Station(station) => station.col(),
        }
    }

    /// Whether both spaces sit on the same cell.
    pub fn collocated(&self, other: &Space) -> bool {
        self.row() == other.row() && self.col() == other.col()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&Orientation::Horizontal)?,
            r#""horizontal""#
        );
        assert_eq!(
            serde_json::from_str::<Orientation>(r#""vertical""#)?,
            Orientation::Vertical
        );
        Ok(())
    }

    #[test]
    fn new_track_is_unclaimed() {
        let track = Track::new(Orientation::Vertical, RouteId(3), 4, 1);
        assert_eq!(track.baron(), Baron::Unclaimed);
        assert_eq!(track.route(), RouteId(3));
        assert_eq!((track.row(), track.col()), (4, 1));
    }

    #[test]
    fn spaces_collocated() {
        let station = Station::new("Albany", 2, 3);
        let track = Track::new(Orientation::Horizontal, RouteId(0), 2, 3);
        let other_track = Track::new(Orientation::Horizontal, RouteId(0), 2, 4);

        assert!(Space::Station(&station).collocated(&Space::Track(&track)));
        assert!(!Space::Track(&track).collocated(&Space::Track(&other_track)));
    }
}
