//! Load a [`PointSet`] from a GeoJSON `FeatureCollection`.

use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use thiserror::Error;
use waypath_core::{PointSet, PointSetError};

use super::types::{InputCollection, InputGeometry, RawPosition};

/// Errors raised while loading a point set.
#[derive(Debug, Error)]
pub enum PointSetLoadError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The input is not well-formed JSON or does not match GeoJSON structure.
    #[error("malformed GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The top-level object is not a `FeatureCollection`.
    #[error("expected a FeatureCollection, found {kind}")]
    NotAFeatureCollection {
        /// Top-level `type` member.
        kind: String,
    },
    /// A feature carries a geometry other than `Point` or `MultiPoint`.
    #[error("feature {feature_index} has unsupported geometry type {kind}")]
    UnsupportedGeometry {
        /// Position of the feature in the collection.
        feature_index: usize,
        /// Geometry `type` member.
        kind: String,
    },
    /// A position has fewer than two ordinates.
    #[error("feature {feature_index} has a position with fewer than two ordinates")]
    InvalidPosition {
        /// Position of the feature in the collection.
        feature_index: usize,
    },
    /// A coordinate is outside the valid latitude/longitude range.
    #[error(transparent)]
    InvalidCoordinate(#[from] PointSetError),
    /// No waypoint could be read from the document.
    #[error("input contains no points")]
    EmptyInput,
}

/// Read a point set from GeoJSON text.
///
/// Features are visited in document order and waypoint indices follow that
/// order. A feature with a `null` geometry is skipped, a `Point` yields one
/// waypoint and a `MultiPoint` one waypoint per position. `null` positions
/// are skipped.
///
/// # Examples
/// ```
/// use waypath_data::geojson::load_point_set;
///
/// let json = r#"{
///     "type": "FeatureCollection",
///     "features": [
///         {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [13.4, 52.5]}},
///         {"type": "Feature", "properties": {}, "geometry": null}
///     ]
/// }"#;
/// let points = load_point_set(json.as_bytes())?;
/// assert_eq!(points.len(), 1);
/// # Ok::<(), waypath_data::geojson::PointSetLoadError>(())
/// ```
///
/// # Errors
///
/// Returns [`PointSetLoadError::UnsupportedGeometry`] for any other geometry
/// type, [`PointSetLoadError::EmptyInput`] when no waypoint results and
/// parse or validation errors for malformed input.
pub fn load_point_set<R>(reader: R) -> Result<PointSet, PointSetLoadError>
where
    R: Read,
{
    let collection: InputCollection = serde_json::from_reader(BufReader::new(reader))?;
    if collection.kind != "FeatureCollection" {
        return Err(PointSetLoadError::NotAFeatureCollection {
            kind: collection.kind,
        });
    }

    let mut coords = Vec::new();
    for (feature_index, feature) in collection.features.into_iter().enumerate() {
        let Some(raw) = feature.geometry else {
            log::debug!("feature {feature_index} has no geometry; skipping");
            continue;
        };
        match InputGeometry::try_from(raw)? {
            InputGeometry::Point(position) => {
                if let Some(coord) = to_coord(feature_index, position)? {
                    coords.push(coord);
                }
            }
            InputGeometry::MultiPoint(positions) => {
                for position in positions {
                    if let Some(coord) = to_coord(feature_index, position)? {
                        coords.push(coord);
                    }
                }
            }
            InputGeometry::Unsupported(kind) => {
                return Err(PointSetLoadError::UnsupportedGeometry {
                    feature_index,
                    kind,
                });
            }
        }
    }

    if coords.is_empty() {
        return Err(PointSetLoadError::EmptyInput);
    }
    let points = PointSet::new(coords)?;
    log::info!("loaded {} waypoints", points.len());
    Ok(points)
}

/// Read a point set from a GeoJSON file.
///
/// # Errors
///
/// Returns [`PointSetLoadError::Io`] when the file cannot be opened or read,
/// otherwise the errors of [`load_point_set`].
pub fn load_point_set_from_path(path: &Utf8Path) -> Result<PointSet, PointSetLoadError> {
    let file = waypath_fs::open_input(path).map_err(|source| PointSetLoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    load_point_set(file).map_err(|err| match err {
        PointSetLoadError::Parse(parse) if parse.is_io() => PointSetLoadError::Io {
            path: path.to_owned(),
            source: parse.into(),
        },
        other => other,
    })
}

fn to_coord(
    feature_index: usize,
    position: Option<RawPosition>,
) -> Result<Option<Coord<f64>>, PointSetLoadError> {
    let Some(position) = position else {
        return Ok(None);
    };
    match position.as_slice() {
        [lon, lat, ..] => Ok(Some(Coord { x: *lon, y: *lat })),
        _ => Err(PointSetLoadError::InvalidPosition { feature_index }),
    }
}
