//! Query shortest paths between two waypoints.
//!
//! The [`PointRouter`] trait abstracts a point-to-point road-network router.
//! Callers supply two [`Waypoint`](crate::Waypoint) values and receive a
//! [`RoutedPath`] describing distance, duration, elevation change and the
//! path geometry.
//!
//! Errors are returned when no path exists or when the routing service cannot
//! be reached.

mod error;
mod provider;

pub use error::RouterError;
pub use provider::{PointRouter, RoutedPath};
