//! Write a planned [`Route`] as a GeoJSON `FeatureCollection`.

use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use waypath_core::Route;

use super::types::{RouteFeature, RouteFeatureCollection, RouteGeometry, RouteProperties};

/// Errors raised while writing a route.
#[derive(Debug, Error)]
pub enum RouteWriteError {
    /// The output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// File being written.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Serialising or flushing the document failed.
    #[error("failed to serialise route: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the output document for `route`.
///
/// One `LineString` feature per leg in tour order, then one
/// `MultiLineString` feature for the whole trip.
#[must_use]
pub fn route_to_feature_collection(route: &Route) -> RouteFeatureCollection {
    let mut features: Vec<RouteFeature> = route
        .legs()
        .iter()
        .map(|leg| {
            feature(
                RouteGeometry::line(&leg.geometry),
                RouteProperties::Leg {
                    distance_m: leg.distance_m,
                    ascend_m: leg.ascend_m,
                    descend_m: leg.descend_m,
                },
            )
        })
        .collect();
    features.push(feature(
        RouteGeometry::lines(route.legs().iter().map(|leg| &leg.geometry)),
        RouteProperties::Trip {
            profile: route.profile_name().to_owned(),
            round_trip: route.round_trip(),
            ordered_indices: route.order().as_slice().to_vec(),
        },
    ));
    RouteFeatureCollection {
        kind: "FeatureCollection".to_owned(),
        features,
    }
}

fn feature(geometry: RouteGeometry, properties: RouteProperties) -> RouteFeature {
    RouteFeature {
        kind: "Feature".to_owned(),
        geometry,
        properties,
    }
}

/// Serialise `route` as pretty-printed GeoJSON into `writer`.
///
/// # Errors
///
/// Returns [`RouteWriteError::Serialize`] when writing fails.
pub fn write_route_geojson<W>(writer: W, route: &Route) -> Result<(), RouteWriteError>
where
    W: Write,
{
    let mut buffered = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut buffered, &route_to_feature_collection(route))?;
    buffered.write_all(b"\n").map_err(serde_json::Error::io)?;
    buffered.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write `route` to the file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`RouteWriteError::Io`] when the file cannot be created or written.
pub fn write_route_geojson_to_path(path: &Utf8Path, route: &Route) -> Result<(), RouteWriteError> {
    let io_error = |source: io::Error| RouteWriteError::Io {
        path: path.to_owned(),
        source,
    };
    let file = waypath_fs::create_output(path).map_err(io_error)?;
    write_route_geojson(file, route).map_err(|err| match err {
        RouteWriteError::Serialize(inner) if inner.is_io() => io_error(inner.into()),
        other => other,
    })?;
    log::info!("wrote {} legs to {path}", route.legs().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use waypath_core::{Leg, PointSet, RoutedPath, TourOrder};

    #[fixture]
    fn route() -> Route {
        let points = PointSet::new([
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ])
        .expect("valid coordinates");
        let leg = |from: usize, to: usize, ascend_m: f64| {
            let (Some(a), Some(b)) = (points.get(from), points.get(to)) else {
                panic!("waypoints exist");
            };
            Leg::from_path(
                *a,
                *b,
                RoutedPath {
                    distance_m: 100.0,
                    duration_s: 25.0,
                    ascend_m,
                    descend_m: 1.0,
                    geometry: LineString::new(vec![a.location(), b.location()]),
                },
            )
        };
        Route::new(
            vec![leg(0, 2, 3.0), leg(2, 1, 0.0), leg(1, 0, 2.0)],
            "bike",
            true,
            TourOrder::new(vec![0, 2, 1]).expect("valid order"),
        )
        .expect("route has legs")
    }

    fn written(route: &Route) -> Value {
        let mut buffer = Vec::new();
        write_route_geojson(&mut buffer, route).expect("write");
        serde_json::from_slice(&buffer).expect("valid JSON")
    }

    #[rstest]
    fn one_feature_per_leg_then_trip(route: Route) {
        let document = written(&route);
        let features = document["features"].as_array().expect("features array");

        assert_eq!(document["type"], "FeatureCollection");
        assert_eq!(features.len(), 4);
        for leg in &features[..3] {
            assert_eq!(leg["geometry"]["type"], "LineString");
            assert_eq!(leg["properties"]["type"], "leg");
        }
        assert_eq!(features[3]["geometry"]["type"], "MultiLineString");
    }

    #[rstest]
    fn leg_feature_carries_metrics_and_lon_lat(route: Route) {
        let document = written(&route);
        let first = &document["features"][0];

        assert_eq!(
            first["geometry"]["coordinates"],
            json!([[0.0, 0.0], [1.0, 1.0]])
        );
        assert_eq!(
            first["properties"],
            json!({"type": "leg", "distance_m": 100.0, "ascend_m": 3.0, "descend_m": 1.0})
        );
    }

    #[rstest]
    fn trip_feature_describes_the_tour(route: Route) {
        let document = written(&route);
        let trip = &document["features"][3];

        assert_eq!(
            trip["properties"],
            json!({"type": "trip", "profile": "bike", "roundTrip": true, "ordered_indices": [0, 2, 1]})
        );
        assert_eq!(
            trip["geometry"]["coordinates"].as_array().map(Vec::len),
            Some(3)
        );
    }

    #[rstest]
    fn document_deserialises_into_typed_model(route: Route) {
        let mut buffer = Vec::new();
        write_route_geojson(&mut buffer, &route).expect("write");

        let parsed: RouteFeatureCollection = serde_json::from_slice(&buffer).expect("typed parse");

        assert_eq!(parsed, route_to_feature_collection(&route));
    }

    #[rstest]
    fn path_writer_creates_parent_directories(route: Route) {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("out/route.geojson"))
            .expect("temp path is UTF-8");

        write_route_geojson_to_path(&path, &route).expect("write to path");

        let text = std::fs::read_to_string(&path).expect("read back");
        let document: Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(document["features"].as_array().map(Vec::len), Some(4));
    }
}
