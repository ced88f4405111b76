//! Router trait and the path record it returns.

use geo::LineString;

use crate::Waypoint;

use super::error::RouterError;

/// A routed path between two waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPath {
    /// Path length in metres.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
    /// Cumulative climb in metres.
    pub ascend_m: f64,
    /// Cumulative drop in metres.
    pub descend_m: f64,
    /// Path polyline; coordinates use `x = longitude`, `y = latitude`.
    pub geometry: LineString<f64>,
}

/// Compute the shortest path between two waypoints.
///
/// Implementations must be `Send + Sync`: the cost matrix builder queries a
/// single router from several worker threads at once.
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, LineString};
/// use waypath_core::{PointRouter, PointSet, RoutedPath, RouterError, Waypoint};
///
/// struct CrowFlies;
///
/// impl PointRouter for CrowFlies {
///     fn profile(&self) -> &str {
///         "crow"
///     }
///
///     fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
///         Ok(RoutedPath {
///             distance_m: 1.0,
///             duration_s: 1.0,
///             ascend_m: 0.0,
///             descend_m: 0.0,
///             geometry: LineString::new(vec![from.location(), to.location()]),
///         })
///     }
/// }
///
/// let points = PointSet::new([Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])?;
/// let (Some(a), Some(b)) = (points.get(0), points.get(1)) else {
///     unreachable!("two points were supplied");
/// };
/// let path = CrowFlies.route(a, b)?;
/// assert_eq!(path.geometry.0.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PointRouter: Send + Sync {
    /// Name of the routing profile (for example `"bike"`).
    fn profile(&self) -> &str;

    /// Route from `from` to `to`.
    ///
    /// Implementations must return [`RouterError::NoRouteFound`] carrying both
    /// waypoint indices when the destination is unreachable.
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError>;
}

impl<R> PointRouter for &R
where
    R: PointRouter + ?Sized,
{
    fn profile(&self) -> &str {
        (**self).profile()
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        (**self).route(from, to)
    }
}

impl<R> PointRouter for Box<R>
where
    R: PointRouter + ?Sized,
{
    fn profile(&self) -> &str {
        (**self).profile()
    }

    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        (**self).route(from, to)
    }
}
