//! End-to-end trip planning: cost matrix, sequencing and route assembly.

use thiserror::Error;

use crate::{
    AssembleError, CostMatrixBuilder, MatrixConfig, MatrixError, PointRouter, PointSet,
    Route, RouteAssembler, SequenceError, Sequencer,
};

/// Errors returned by [`TripPlanner::plan_trip`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Building the cost matrix failed.
    #[error("failed to build cost matrix: {0}")]
    Matrix(#[from] MatrixError),
    /// Ordering the waypoints failed.
    #[error("failed to order waypoints: {0}")]
    Sequence(#[from] SequenceError),
    /// Assembling the legs failed.
    #[error("failed to assemble route: {0}")]
    Assemble(#[from] AssembleError),
}

/// Plans a trip through a point set with a router and a sequencer.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use waypath_core::{
///     CostMatrix, PointRouter, PointSet, RoutedPath, RouterError, SequenceError, Sequencer,
///     TourOrder, TripPlanner, Waypoint,
/// };
///
/// struct Flat;
///
/// impl PointRouter for Flat {
///     fn profile(&self) -> &str {
///         "flat"
///     }
///
///     fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
///         Ok(RoutedPath {
///             distance_m: 10.0,
///             duration_s: 2.0,
///             ascend_m: 0.0,
///             descend_m: 0.0,
///             geometry: LineString::new(vec![from.location(), to.location()]),
///         })
///     }
/// }
///
/// struct AsGiven;
///
/// impl Sequencer for AsGiven {
///     fn sequence(&self, matrix: &CostMatrix, _round_trip: bool) -> Result<TourOrder, SequenceError> {
///         Ok(TourOrder::new((0..matrix.size()).collect())?)
///     }
/// }
///
/// let points = PointSet::new([
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.01, y: 0.0 },
///     Coord { x: 0.01, y: 0.01 },
/// ])?;
/// let route = TripPlanner::new(Flat, AsGiven).plan_trip(&points, true)?;
/// assert_eq!(route.legs().len(), 3);
/// assert_eq!(route.total_distance_m(), 30.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TripPlanner<R, S>
where
    R: PointRouter,
    S: Sequencer,
{
    router: R,
    sequencer: S,
    matrix_config: MatrixConfig,
}

impl<R, S> TripPlanner<R, S>
where
    R: PointRouter,
    S: Sequencer,
{
    /// Construct a planner using the default matrix configuration.
    pub fn new(router: R, sequencer: S) -> Self {
        Self::with_matrix_config(router, sequencer, MatrixConfig::default())
    }

    /// Construct a planner with an explicit matrix configuration.
    pub const fn with_matrix_config(router: R, sequencer: S, matrix_config: MatrixConfig) -> Self {
        Self {
            router,
            sequencer,
            matrix_config,
        }
    }

    /// Router used for matrix and leg queries.
    pub const fn router(&self) -> &R {
        &self.router
    }

    /// Build the matrix, order the waypoints and assemble the route.
    ///
    /// # Errors
    ///
    /// Surfaces the first failing stage verbatim through [`PlanError`].
    pub fn plan_trip(&self, points: &PointSet, round_trip: bool) -> Result<Route, PlanError> {
        let matrix =
            CostMatrixBuilder::with_config(&self.router, self.matrix_config.clone()).build(points)?;
        let order = self.sequencer.sequence(&matrix, round_trip)?;
        log::info!(
            "ordered {} waypoints (round trip: {round_trip}): {:?}",
            order.len(),
            order.as_slice()
        );
        let route = RouteAssembler::new(&self.router).assemble(points, &order, round_trip)?;
        log::info!(
            "planned {} legs, {:.0} m total, +{:.0} m / -{:.0} m",
            route.legs().len(),
            route.total_distance_m(),
            route.total_ascend_m(),
            route.total_descend_m()
        );
        Ok(route)
    }
}
