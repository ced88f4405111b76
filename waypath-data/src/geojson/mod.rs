//! GeoJSON input and output.
//!
//! [`load_point_set`] turns a `FeatureCollection` of `Point` and `MultiPoint`
//! features into a [`waypath_core::PointSet`]; [`write_route_geojson`] turns a
//! planned [`waypath_core::Route`] into a `FeatureCollection` of leg and trip
//! features.

mod loader;
mod types;
mod writer;

pub use loader::{PointSetLoadError, load_point_set, load_point_set_from_path};
pub use types::{RouteFeature, RouteFeatureCollection, RouteGeometry, RouteProperties};
pub use writer::{
    RouteWriteError, route_to_feature_collection, write_route_geojson,
    write_route_geojson_to_path,
};
