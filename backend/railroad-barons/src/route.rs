use crate::baron::Baron;
use crate::error::MapError;
use crate::map::StationId;
use crate::space::{Orientation, Station, Track};

use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

// Most routes are short: keep their tracks inline.
const INLINE_TRACKS: usize = 6;

/// Stable handle to a [`Route`] of a [`crate::map::Map`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    /// Position of the route in [`crate::map::Map::routes`].
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Points granted for claiming a route of the given length.
///
/// # Example
/// ```
/// use railroad_barons::route::points_for_length;
///
/// assert_eq!(points_for_length(3), 4);
/// assert_eq!(points_for_length(6), 15);
/// assert_eq!(points_for_length(8), 25);
/// ```
pub fn points_for_length(length: u8) -> u32 {
    match length {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 4,
        4 => 7,
        5 => 10,
        6 => 15,
        length => 5 * (length as u32 - 3),
    }
}

/// A straight line of tracks between two stations, claimed as a whole.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Route {
    id: RouteId,
    origin: StationId,
    destination: StationId,
    orientation: Orientation,
    length: u8,
    baron: Baron,
    tracks: SmallVec<[Track; INLINE_TRACKS]>,
}

impl Route {
    /// Lays out the tracks strictly between `origin` and `destination`, in order from the origin.
    ///
    /// Returns an `Err` if the stations are not on the same row or column,
    /// or if there is no cell between them.
    pub(crate) fn new(
        id: RouteId,
        (origin_id, origin): (StationId, &Station),
        (destination_id, destination): (StationId, &Station),
    ) -> Result<Self, MapError> {
        let (orientation, distance) = if origin.row() == destination.row() {
            (
                Orientation::Horizontal,
                origin.col().abs_diff(destination.col()),
            )
        } else if origin.col() == destination.col() {
            (
                Orientation::Vertical,
                origin.row().abs_diff(destination.row()),
            )
        } else {
            return Err(MapError::MisalignedStations(origin_id, destination_id));
        };

        if distance < 2 {
            return Err(MapError::AdjacentStations(origin_id, destination_id));
        }

        let length = u8::try_from(distance - 1)
            .map_err(|_| MapError::RouteTooLong(origin_id, destination_id))?;

        let step = |from: usize, to: usize, offset: usize| match from.cmp(&to) {
            Ordering::Less => from + offset,
            _ => from - offset,
        };

        let tracks = (1..=distance - 1)
            .map(|offset| match orientation {
                Orientation::Horizontal => Track::new(
                    orientation,
                    id,
                    origin.row(),
                    step(origin.col(), destination.col(), offset),
                ),
                Orientation::Vertical => Track::new(
                    orientation,
                    id,
                    step(origin.row(), destination.row(), offset),
                    origin.col(),
                ),
            })
            .collect();

        Ok(Self {
            id,
            origin: origin_id,
            destination: destination_id,
            orientation,
            length,
            baron: Baron::Unclaimed,
            tracks,
        })
    }

    #[inline]
    pub fn id(&self) -> RouteId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> StationId {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> StationId {
        self.destination
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of tracks, which is also the number of cards and pieces needed to claim the route.
    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn baron(&self) -> Baron {
        self.baron
    }

    #[inline]
    pub fn is_claimed(&self) -> bool {
        !self.baron.is_unclaimed()
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn point_value(&self) -> u32 {
        points_for_length(self.length)
    }

    /// Whether one of the route's tracks sits at the given cell.
    /// The stations at both ends are not part of the route.
    pub fn includes_coordinate(&self, row: usize, col: usize) -> bool {
        self.tracks
            .iter()
            .any(|track| track.row() == row && track.col() == col)
    }

    /// Hands the route, and all its tracks, to `claimant`.
    ///
    /// A route can only be claimed once: returns `false` without changing anything
    /// if it already belongs to someone. `claimant` must not be [`Baron::Unclaimed`].
    pub fn claim(&mut self, claimant: Baron) -> bool {
        if self.is_claimed() {
            return false;
        }

        self.baron = claimant;
        for track in &mut self.tracks {
            track.set_baron(claimant);
        }

        true
    }
}
