//! Pairwise travel costs between waypoints.
//!
//! [`CostMatrixBuilder`] queries a [`PointRouter`](crate::PointRouter) once per
//! ordered waypoint pair and returns a fully populated [`CostMatrix`]. The
//! matrix is read-only once built.

mod builder;
mod cost;

pub use builder::{CostMatrixBuilder, MatrixConfig, MatrixError};
pub use cost::{Cost, CostMatrix, CostMatrixError};
