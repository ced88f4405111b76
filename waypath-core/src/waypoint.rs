//! Waypoints and the validated point set they belong to.
//!
//! A [`Waypoint`] is identified by its position in the original input list.
//! Waypoints are only created through [`PointSet::new`], which guarantees the
//! indices form the contiguous range `[0, N)`.

use geo::Coord;
use thiserror::Error;

/// A single geographic coordinate to be visited.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    index: usize,
    location: Coord<f64>,
}

impl Waypoint {
    /// Position of the waypoint in the original input list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Geographic position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

/// Errors returned by [`PointSet::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointSetError {
    /// A coordinate fell outside the WGS84 range or was not finite.
    #[error(
        "waypoint {index} has invalid coordinate (lat {latitude}, lon {longitude}); \
         latitude must be within [-90, 90] and longitude within [-180, 180]"
    )]
    InvalidCoordinate {
        /// Input position of the offending coordinate.
        index: usize,
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
}

/// Ordered, index-addressed waypoints.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypath_core::PointSet;
///
/// let points = PointSet::new([
///     Coord { x: 14.42, y: 50.08 },
///     Coord { x: 14.43, y: 50.09 },
/// ])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.get(1).map(|w| w.index()), Some(1));
/// # Ok::<(), waypath_core::PointSetError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    waypoints: Vec<Waypoint>,
}

impl PointSet {
    /// Validate coordinates and assign contiguous indices in input order.
    ///
    /// An empty input yields an empty set; stages that need waypoints reject
    /// it themselves.
    ///
    /// # Errors
    ///
    /// Returns [`PointSetError::InvalidCoordinate`] for the first coordinate
    /// outside the WGS84 range.
    pub fn new<I>(coords: I) -> Result<Self, PointSetError>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let waypoints = coords
            .into_iter()
            .enumerate()
            .map(|(index, location)| {
                if valid_location(location) {
                    Ok(Waypoint { index, location })
                } else {
                    Err(PointSetError::InvalidCoordinate {
                        index,
                        latitude: location.y,
                        longitude: location.x,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { waypoints })
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the set holds no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint with the given index, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// Iterate over waypoints in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    /// Borrow the waypoints as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn valid_location(location: Coord<f64>) -> bool {
    (-90.0..=90.0).contains(&location.y) && (-180.0..=180.0).contains(&location.x)
}
