//! Facade crate for the Waypath trip planner.
//!
//! This crate re-exports the core domain types and exposes the default
//! sequencer and the GraphHopper and GeoJSON adapters behind feature flags.

#![forbid(unsafe_code)]

pub use waypath_core::{
    AssembleError, Cost, CostMatrix, CostMatrixBuilder, CostMatrixError, Leg, MatrixConfig,
    MatrixError, PlanError, PointRouter, PointSet, PointSetError, Route, RouteAssembler,
    RouteError, RoutedPath, RouterError, SequenceError, Sequencer, TourOrder, TourOrderError,
    TripPlanner, Waypoint, tour_distance,
};

#[cfg(feature = "solver-local")]
pub use waypath_solver_local::{LocalSearchConfig, LocalSearchSequencer};

#[cfg(feature = "data")]
pub use waypath_data::{
    GraphHopperRouter, GraphHopperRouterConfig, PointSetLoadError, RouteWriteError,
    RouterBuildError, load_point_set, load_point_set_from_path, write_route_geojson,
    write_route_geojson_to_path,
};
