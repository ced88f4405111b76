//! Deterministic routers and sequencers used by unit and behaviour tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::LineString;

use crate::{
    CostMatrix, PointRouter, RoutedPath, RouterError, SequenceError, Sequencer, TourOrder,
    Waypoint,
};

/// Metres per degree used by [`StraightLineRouter`].
pub const METRES_PER_DEGREE: f64 = 111_320.0;

/// Travel speed used by [`StraightLineRouter`], in metres per second.
pub const STRAIGHT_LINE_SPEED_MPS: f64 = 5.0;

/// Router joining waypoints with a straight segment.
///
/// Distances treat degrees as a planar grid scaled by [`METRES_PER_DEGREE`];
/// elevation never changes.
#[derive(Debug, Clone, Default)]
pub struct StraightLineRouter;

impl StraightLineRouter {
    /// Planar distance between two waypoints in metres.
    #[must_use]
    pub fn distance_m(from: &Waypoint, to: &Waypoint) -> f64 {
        let dx = to.longitude() - from.longitude();
        let dy = to.latitude() - from.latitude();
        dx.hypot(dy) * METRES_PER_DEGREE
    }
}

impl PointRouter for StraightLineRouter {
    fn profile(&self) -> &str {
        "straight-line"
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        let distance_m = Self::distance_m(from, to);
        Ok(RoutedPath {
            distance_m,
            duration_s: distance_m / STRAIGHT_LINE_SPEED_MPS,
            ascend_m: 0.0,
            descend_m: 0.0,
            geometry: LineString::new(vec![from.location(), to.location()]),
        })
    }
}

/// Straight-line router that cannot route one directed pair.
#[derive(Debug, Clone)]
pub struct UnreachablePairRouter {
    from: usize,
    to: usize,
}

impl UnreachablePairRouter {
    /// Fail every query from waypoint `from` to waypoint `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl PointRouter for UnreachablePairRouter {
    fn profile(&self) -> &str {
        StraightLineRouter.profile()
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        if from.index() == self.from && to.index() == self.to {
            return Err(RouterError::NoRouteFound {
                from: self.from,
                to: self.to,
                message: "Connection between locations not found".to_owned(),
            });
        }
        StraightLineRouter.route(from, to)
    }
}

/// Router wrapper counting the queries it forwards.
#[derive(Debug, Default)]
pub struct CountingRouter<R> {
    inner: R,
    calls: AtomicUsize,
}

impl<R> CountingRouter<R> {
    /// Wrap `inner`.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries forwarded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<R> PointRouter for CountingRouter<R>
where
    R: PointRouter,
{
    fn profile(&self) -> &str {
        self.inner.profile()
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route(from, to)
    }
}

/// Sequencer that keeps waypoints in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrderSequencer;

impl Sequencer for InputOrderSequencer {
    fn sequence(&self, matrix: &CostMatrix, _round_trip: bool) -> Result<TourOrder, SequenceError> {
        if matrix.is_empty() {
            return Err(SequenceError::InfeasibleOrder);
        }
        Ok(TourOrder::new((0..matrix.size()).collect())?)
    }
}

/// Distance matrix of the unit square `(0,0) (1,0) (1,1) (0,1)`.
///
/// Sides cost `1`, diagonals cost `√2`.
///
/// # Errors
///
/// Never fails in practice; the signature mirrors
/// [`CostMatrix::from_distances`].
pub fn unit_square_matrix() -> Result<CostMatrix, crate::CostMatrixError> {
    let diagonal = std::f64::consts::SQRT_2;
    CostMatrix::from_distances(vec![
        vec![0.0, 1.0, diagonal, 1.0],
        vec![1.0, 0.0, 1.0, diagonal],
        vec![diagonal, 1.0, 0.0, 1.0],
        vec![1.0, diagonal, 1.0, 0.0],
    ])
}
