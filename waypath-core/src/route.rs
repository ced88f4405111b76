//! Assembled routes and their legs.
//!
//! A [`Route`] is the terminal artefact of a planning run: the legs in tour
//! order plus the trip metadata a result writer needs.

use geo::{Coord, LineString, MultiLineString};
use thiserror::Error;

use crate::{RoutedPath, TourOrder, Waypoint};

/// The routed path between two consecutive waypoints of a tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Waypoint the leg departs from.
    pub from: Waypoint,
    /// Waypoint the leg arrives at.
    pub to: Waypoint,
    /// Path polyline; coordinates use `x = longitude`, `y = latitude`.
    pub geometry: LineString<f64>,
    /// Leg length in metres.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
    /// Cumulative climb in metres.
    pub ascend_m: f64,
    /// Cumulative drop in metres.
    pub descend_m: f64,
}

impl Leg {
    /// Build a leg from a router answer.
    #[must_use]
    pub fn from_path(from: Waypoint, to: Waypoint, path: RoutedPath) -> Self {
        Self {
            from,
            to,
            geometry: path.geometry,
            distance_m: path.distance_m,
            duration_s: path.duration_s,
            ascend_m: path.ascend_m,
            descend_m: path.descend_m,
        }
    }

    /// First coordinate of the geometry.
    #[must_use]
    pub fn start(&self) -> Option<Coord<f64>> {
        self.geometry.0.first().copied()
    }

    /// Last coordinate of the geometry.
    #[must_use]
    pub fn end(&self) -> Option<Coord<f64>> {
        self.geometry.0.last().copied()
    }
}

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No legs were supplied.
    #[error("route must contain at least one leg")]
    EmptyRoute,
}

/// Ordered legs of a planned trip with its metadata.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use waypath_core::{Leg, PointSet, Route, RoutedPath, TourOrder};
///
/// let points = PointSet::new([Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])?;
/// let (Some(a), Some(b)) = (points.get(0), points.get(1)) else {
///     unreachable!("two points were supplied");
/// };
/// let path = RoutedPath {
///     distance_m: 100.0,
///     duration_s: 20.0,
///     ascend_m: 3.0,
///     descend_m: 1.0,
///     geometry: LineString::new(vec![a.location(), b.location()]),
/// };
/// let route = Route::new(
///     vec![Leg::from_path(*a, *b, path)],
///     "bike",
///     false,
///     TourOrder::new(vec![0, 1])?,
/// )?;
/// assert_eq!(route.total_distance_m(), 100.0);
/// assert_eq!(route.profile_name(), "bike");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    legs: Vec<Leg>,
    profile_name: String,
    round_trip: bool,
    order: TourOrder,
}

impl Route {
    /// Validate and construct a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyRoute`] when `legs` is empty.
    pub fn new(
        legs: Vec<Leg>,
        profile_name: impl Into<String>,
        round_trip: bool,
        order: TourOrder,
    ) -> Result<Self, RouteError> {
        if legs.is_empty() {
            return Err(RouteError::EmptyRoute);
        }
        Ok(Self {
            legs,
            profile_name: profile_name.into(),
            round_trip,
            order,
        })
    }

    /// Legs in tour order; the closing leg of a round trip is last.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Routing profile the legs were computed with.
    #[must_use]
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Whether the trip returns to its start.
    #[must_use]
    pub const fn round_trip(&self) -> bool {
        self.round_trip
    }

    /// Waypoint indices in visiting order.
    #[must_use]
    pub const fn order(&self) -> &TourOrder {
        &self.order
    }

    /// Sum of leg distances in metres.
    #[must_use]
    pub fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_m).sum()
    }

    /// Sum of leg travel times in seconds.
    #[must_use]
    pub fn total_duration_s(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_s).sum()
    }

    /// Sum of leg climbs in metres.
    #[must_use]
    pub fn total_ascend_m(&self) -> f64 {
        self.legs.iter().map(|leg| leg.ascend_m).sum()
    }

    /// Sum of leg drops in metres.
    #[must_use]
    pub fn total_descend_m(&self) -> f64 {
        self.legs.iter().map(|leg| leg.descend_m).sum()
    }

    /// All leg geometries in tour order.
    #[must_use]
    pub fn geometry(&self) -> MultiLineString<f64> {
        MultiLineString::new(self.legs.iter().map(|leg| leg.geometry.clone()).collect())
    }
}
