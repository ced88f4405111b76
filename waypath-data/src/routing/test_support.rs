//! Test utilities for routers.
//!
//! This module provides [`StubRouter`], a deterministic test double for
//! [`PointRouter`] that answers from a pre-configured distance matrix without
//! making HTTP requests.

use geo::LineString;
use waypath_core::{PointRouter, RoutedPath, RouterError, Waypoint};

/// Travel speed used to derive stub durations, in metres per second.
const STUB_SPEED_MPS: f64 = 4.0;

/// Stub `PointRouter` for testing.
///
/// Legs are straight segments between the two waypoints. Distances come from
/// the configured matrix, climbs from the optional elevation list.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use waypath_core::{PointRouter, PointSet};
/// use waypath_data::routing::test_support::StubRouter;
///
/// let router = StubRouter::with_distances(vec![vec![0.0, 60.0], vec![60.0, 0.0]]);
/// let points = PointSet::new([Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }])?;
/// let (Some(a), Some(b)) = (points.get(0), points.get(1)) else {
///     unreachable!("two points were supplied");
/// };
/// assert_eq!(router.route(a, b)?.distance_m, 60.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubRouter {
    profile: String,
    response: StubResponse,
    elevations: Vec<f64>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Distances(Vec<Vec<f64>>),
    Error(RouterError),
}

impl StubRouter {
    /// Create a router answering from `distances[from][to]`.
    ///
    /// Pairs outside the matrix fail with [`RouterError::NoRouteFound`].
    #[must_use]
    pub fn with_distances(distances: Vec<Vec<f64>>) -> Self {
        Self {
            profile: "stub".to_owned(),
            response: StubResponse::Distances(distances),
            elevations: Vec::new(),
        }
    }

    /// Create a router that fails every query with `error`.
    #[must_use]
    pub fn with_error(error: RouterError) -> Self {
        Self {
            profile: "stub".to_owned(),
            response: StubResponse::Error(error),
            elevations: Vec::new(),
        }
    }

    /// Create a router with unit distances between distinct waypoints.
    #[must_use]
    pub fn with_unit_distances(size: usize) -> Self {
        Self::with_distances(
            (0..size)
                .map(|i| (0..size).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
                .collect(),
        )
    }

    /// Report elevations (metres) per waypoint index to derive climbs.
    #[must_use]
    pub fn with_elevations(mut self, elevations: Vec<f64>) -> Self {
        self.elevations = elevations;
        self
    }

    /// Override the reported profile name.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    fn elevation(&self, index: usize) -> f64 {
        self.elevations.get(index).copied().unwrap_or(0.0)
    }
}

impl PointRouter for StubRouter {
    fn profile(&self) -> &str {
        &self.profile
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        let distances = match &self.response {
            StubResponse::Distances(distances) => distances,
            StubResponse::Error(error) => return Err(error.clone()),
        };
        let distance_m = distances
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .ok_or_else(|| RouterError::NoRouteFound {
                from: from.index(),
                to: to.index(),
                message: "pair outside the stub matrix".to_owned(),
            })?;
        let rise = self.elevation(to.index()) - self.elevation(from.index());
        Ok(RoutedPath {
            distance_m,
            duration_s: distance_m / STUB_SPEED_MPS,
            ascend_m: rise.max(0.0),
            descend_m: (-rise).max(0.0),
            geometry: LineString::new(vec![from.location(), to.location()]),
        })
    }
}
