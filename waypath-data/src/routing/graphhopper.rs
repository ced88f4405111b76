//! GraphHopper API response types for the Routing service.
//!
//! Only the fields the router reads are modelled; everything else in the
//! payload is ignored.
//!
//! See: <https://docs.graphhopper.com/#tag/Routing-API>

use serde::Deserialize;

/// GraphHopper `/route` response.
///
/// Successful responses carry `paths`; failures carry `message`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Alternative paths, best first.
    #[serde(default)]
    pub paths: Vec<ResponsePath>,

    /// Error message on failure, for example
    /// `"Connection between locations not found"`.
    pub message: Option<String>,
}

/// A single routed path.
#[derive(Debug, Deserialize)]
pub struct ResponsePath {
    /// Length in metres.
    pub distance: f64,

    /// Travel time in milliseconds.
    pub time: u64,

    /// Cumulative climb in metres; absent when elevation is disabled.
    #[serde(default)]
    pub ascend: f64,

    /// Cumulative drop in metres; absent when elevation is disabled.
    #[serde(default)]
    pub descend: f64,

    /// Unencoded polyline (`points_encoded=false`).
    pub points: PathPoints,
}

/// GeoJSON `LineString` geometry of a path.
#[derive(Debug, Deserialize)]
pub struct PathPoints {
    /// Positions as `[lon, lat]` or `[lon, lat, elevation]`.
    pub coordinates: Vec<Vec<f64>>,
}

/// Error body returned with non-success status codes.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure reason.
    pub message: String,
}
