//! Data access for the Waypath trip planner.
//!
//! Responsibilities:
//! - Adapt external routing services to [`waypath_core::PointRouter`].
//! - Read point sets from GeoJSON and write planned routes back as GeoJSON.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `waypath-core`).
//! - Keep blocking I/O off async executors; the HTTP router owns its runtime.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod geojson;
pub mod routing;

pub use geojson::{
    PointSetLoadError, RouteWriteError, load_point_set, load_point_set_from_path,
    write_route_geojson, write_route_geojson_to_path,
};
pub use routing::{GraphHopperRouter, GraphHopperRouterConfig, RouterBuildError};
