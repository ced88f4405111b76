//! Populate a [`CostMatrix`] by querying a [`PointRouter`] for every pair.

use std::num::NonZeroUsize;

use rayon::prelude::*;
use thiserror::Error;

use crate::{PointRouter, PointSet, RouterError, Waypoint};

use super::cost::{Cost, CostMatrix};

/// Configuration for [`CostMatrixBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Maximum number of router queries in flight at once.
    pub concurrency: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

impl MatrixConfig {
    /// Set the worker pool size. Values below one are raised to one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Errors returned by [`CostMatrixBuilder::build`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The point set held no waypoints.
    #[error("at least one waypoint is required to build a cost matrix")]
    EmptyInput,
    /// A pairwise router query failed.
    #[error("routing unavailable from waypoint {from} to waypoint {to}: {source}")]
    RoutingUnavailable {
        /// Origin waypoint index.
        from: usize,
        /// Destination waypoint index.
        to: usize,
        /// Router failure.
        #[source]
        source: RouterError,
    },
    /// The router answered with a negative or non-finite cost.
    #[error("router returned an invalid cost from waypoint {from} to waypoint {to}")]
    InvalidCost {
        /// Origin waypoint index.
        from: usize,
        /// Destination waypoint index.
        to: usize,
    },
    /// The worker pool could not be created.
    #[error("failed to start matrix worker pool: {message}")]
    WorkerPool {
        /// Pool construction error.
        message: String,
    },
}

/// Builds a dense cost matrix with one router query per ordered pair.
///
/// Queries run on a dedicated `rayon` pool sized by
/// [`MatrixConfig::concurrency`]. The first failing query aborts the build and
/// no partial matrix is returned.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use waypath_core::{CostMatrixBuilder, PointRouter, PointSet, RoutedPath, RouterError, Waypoint};
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
/// let points = PointSet::new([Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }])?;
/// let matrix = CostMatrixBuilder::new(&Flat).build(&points)?;
/// assert_eq!(matrix.distance(0, 1), Some(10.0));
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.distance(0, 0), Some(0.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct CostMatrixBuilder<'r, R>
where
    R: PointRouter + ?Sized,
{
    router: &'r R,
    config: MatrixConfig,
}

impl<'r, R> CostMatrixBuilder<'r, R>
where
    R: PointRouter + ?Sized,
{
    /// Construct a builder with default configuration.
    pub fn new(router: &'r R) -> Self {
        Self::with_config(router, MatrixConfig::default())
    }

    /// Construct a builder with explicit configuration.
    pub const fn with_config(router: &'r R, config: MatrixConfig) -> Self {
        Self { router, config }
    }

    /// Query the router for every ordered pair and return the full matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::EmptyInput`] for an empty point set and
    /// [`MatrixError::RoutingUnavailable`] when any query fails.
    pub fn build(&self, points: &PointSet) -> Result<CostMatrix, MatrixError> {
        let size = points.len();
        if size == 0 {
            return Err(MatrixError::EmptyInput);
        }

        let pairs: Vec<(&Waypoint, &Waypoint)> = points
            .iter()
            .flat_map(|from| {
                points
                    .iter()
                    .filter(move |to| to.index() != from.index())
                    .map(move |to| (from, to))
            })
            .collect();
        log::debug!(
            "building {size}x{size} cost matrix with {} router queries (concurrency {})",
            pairs.len(),
            self.config.concurrency
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency.max(1))
            .build()
            .map_err(|err| MatrixError::WorkerPool {
                message: err.to_string(),
            })?;

        let costs: Vec<(usize, usize, Cost)> = pool.install(|| {
            pairs
                .into_par_iter()
                .map(|(from, to)| self.query(from, to))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let mut cells = vec![Cost::ZERO; size * size];
        for (from, to, cost) in costs {
            if let Some(cell) = cells.get_mut(from * size + to) {
                *cell = cost;
            }
        }
        log::debug!("cost matrix for {size} waypoints complete");
        Ok(CostMatrix::from_cells(size, cells))
    }

    fn query(&self, from: &Waypoint, to: &Waypoint) -> Result<(usize, usize, Cost), MatrixError> {
        let path =
            self.router
                .route(from, to)
                .map_err(|source| MatrixError::RoutingUnavailable {
                    from: from.index(),
                    to: to.index(),
                    source,
                })?;
        let cost = Cost::new(path.distance_m, path.duration_s);
        if !cost.is_valid() {
            log::warn!(
                "router returned invalid cost {cost:?} from waypoint {} to waypoint {}",
                from.index(),
                to.index()
            );
            return Err(MatrixError::InvalidCost {
                from: from.index(),
                to: to.index(),
            });
        }
        Ok((from.index(), to.index(), cost))
    }
}
