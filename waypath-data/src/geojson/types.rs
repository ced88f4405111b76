//! Serde models for the GeoJSON documents read and written by this crate.
//!
//! Only the subset needed for point-set input and route output is modelled.
//! Foreign members and feature properties of input documents are ignored.

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// Input `FeatureCollection`.
#[derive(Debug, Deserialize)]
pub(crate) struct InputCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<InputFeature>,
}

/// Input `Feature`; a missing geometry deserialises as `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct InputFeature {
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// Geometry object before its `type` has been interpreted.
#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

/// A GeoJSON position: `[lon, lat]` with optional extra ordinates.
pub(crate) type RawPosition = Vec<f64>;

/// Input geometry after dispatch on its `type`.
#[derive(Debug, PartialEq)]
pub(crate) enum InputGeometry {
    /// A `Point`; `None` when its position is `null`.
    Point(Option<RawPosition>),
    /// A `MultiPoint`; `null` positions are kept as `None`.
    MultiPoint(Vec<Option<RawPosition>>),
    /// Any other geometry type, by name.
    Unsupported(String),
}

impl TryFrom<RawGeometry> for InputGeometry {
    type Error = serde_json::Error;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let RawGeometry { kind, coordinates } = raw;
        match kind.as_str() {
            "Point" => Ok(Self::Point(serde_json::from_value(coordinates)?)),
            "MultiPoint" => {
                let positions: Option<Vec<Option<RawPosition>>> =
                    serde_json::from_value(coordinates)?;
                Ok(Self::MultiPoint(positions.unwrap_or_default()))
            }
            _ => Ok(Self::Unsupported(kind)),
        }
    }
}

/// Output `FeatureCollection`: one feature per leg, then the trip feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Leg features in tour order followed by the trip feature.
    pub features: Vec<RouteFeature>,
}

/// Output `Feature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Leg or trip geometry.
    pub geometry: RouteGeometry,
    /// Leg or trip metadata.
    pub properties: RouteProperties,
}

/// Output geometry, tagged by GeoJSON `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RouteGeometry {
    /// A single leg polyline.
    LineString {
        /// `[lon, lat]` positions.
        coordinates: Vec<[f64; 2]>,
    },
    /// Every leg polyline of the trip, in order.
    MultiLineString {
        /// One `[lon, lat]` position list per leg.
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl RouteGeometry {
    /// Geometry of a single leg.
    #[must_use]
    pub fn line(line: &LineString<f64>) -> Self {
        Self::LineString {
            coordinates: positions(line),
        }
    }

    /// Geometry of a whole trip.
    #[must_use]
    pub fn lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a LineString<f64>>,
    {
        Self::MultiLineString {
            coordinates: lines.into_iter().map(positions).collect(),
        }
    }
}

fn positions(line: &LineString<f64>) -> Vec<[f64; 2]> {
    line.coords().map(|&Coord { x, y }| [x, y]).collect()
}

/// Fixed property records, tagged by the `type` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouteProperties {
    /// Metrics of one leg.
    Leg {
        /// Leg length in metres.
        distance_m: f64,
        /// Climb in metres.
        ascend_m: f64,
        /// Drop in metres.
        descend_m: f64,
    },
    /// Metadata of the whole trip.
    Trip {
        /// Routing profile.
        profile: String,
        /// Whether the trip returns to its start.
        #[serde(rename = "roundTrip")]
        round_trip: bool,
        /// Waypoint indices in visiting order.
        ordered_indices: Vec<usize>,
    },
}
