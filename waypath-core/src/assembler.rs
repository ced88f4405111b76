//! Turn a visiting order into a concrete multi-leg route.

use thiserror::Error;

use crate::{Leg, PointRouter, PointSet, Route, RouteError, RouterError, TourOrder, Waypoint};

/// Errors returned by [`RouteAssembler::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The order produced no legs.
    #[error("route must contain at least one leg")]
    EmptyRoute,
    /// The order does not visit every waypoint of the point set exactly once.
    #[error("tour order covers {order_len} waypoints but the point set holds {points_len}")]
    OrderLengthMismatch {
        /// Waypoints in the order.
        order_len: usize,
        /// Waypoints in the point set.
        points_len: usize,
    },
    /// The order referenced a waypoint missing from the point set.
    #[error("tour order references unknown waypoint {index}")]
    UnknownWaypoint {
        /// Offending index.
        index: usize,
    },
    /// The router found no path for a leg.
    #[error("no route found for leg from waypoint {from} to waypoint {to}: {source}")]
    NoRouteFound {
        /// Origin waypoint index.
        from: usize,
        /// Destination waypoint index.
        to: usize,
        /// Router failure.
        #[source]
        source: RouterError,
    },
}

impl From<RouteError> for AssembleError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::EmptyRoute => Self::EmptyRoute,
        }
    }
}

/// Queries the router once per tour transition and collects the legs.
///
/// Leg `k` of the result is the transition `order[k] → order[k + 1]`; for a
/// round trip the closing leg back to the start comes last. Queries are
/// issued sequentially in tour order.
#[derive(Debug)]
pub struct RouteAssembler<'r, R>
where
    R: PointRouter + ?Sized,
{
    router: &'r R,
}

impl<'r, R> RouteAssembler<'r, R>
where
    R: PointRouter + ?Sized,
{
    /// Construct an assembler over `router`.
    pub const fn new(router: &'r R) -> Self {
        Self { router }
    }

    /// Assemble the route visiting `points` in `order`.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::OrderLengthMismatch`] when the order and the
    /// point set differ in size, [`AssembleError::EmptyRoute`] when the order
    /// yields no legs and [`AssembleError::NoRouteFound`] when a leg cannot be
    /// routed.
    pub fn assemble(
        &self,
        points: &PointSet,
        order: &TourOrder,
        round_trip: bool,
    ) -> Result<Route, AssembleError> {
        if order.len() != points.len() {
            return Err(AssembleError::OrderLengthMismatch {
                order_len: order.len(),
                points_len: points.len(),
            });
        }
        let legs = order
            .transitions(round_trip)
            .map(|(from, to)| self.leg(points, from, to))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "assembled {} legs for {} waypoints (round trip: {round_trip})",
            legs.len(),
            order.len()
        );
        Ok(Route::new(
            legs,
            self.router.profile(),
            round_trip,
            order.clone(),
        )?)
    }

    fn leg(&self, points: &PointSet, from: usize, to: usize) -> Result<Leg, AssembleError> {
        let origin = waypoint(points, from)?;
        let destination = waypoint(points, to)?;
        let path = self
            .router
            .route(&origin, &destination)
            .map_err(|source| AssembleError::NoRouteFound { from, to, source })?;
        log::trace!(
            "leg {from} -> {to}: {:.1} m, +{:.1} m / -{:.1} m",
            path.distance_m,
            path.ascend_m,
            path.descend_m
        );
        Ok(Leg::from_path(origin, destination, path))
    }
}

fn waypoint(points: &PointSet, index: usize) -> Result<Waypoint, AssembleError> {
    points
        .get(index)
        .copied()
        .ok_or(AssembleError::UnknownWaypoint { index })
}
