//! HTTP-based point-to-point routing.
//!
//! This module provides [`GraphHopperRouter`], an implementation of
//! [`waypath_core::PointRouter`] that fetches one path per waypoint pair from
//! a GraphHopper server, including climb and drop when elevation is enabled.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use waypath_data::routing::{GraphHopperRouter, GraphHopperRouterConfig};
//!
//! let config = GraphHopperRouterConfig::new("http://localhost:8989")
//!     .with_profile("bike")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let router = GraphHopperRouter::with_config(config)?;
//! # Ok::<(), waypath_data::routing::RouterBuildError>(())
//! ```

mod graphhopper;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, GraphHopperRouter,
    GraphHopperRouterConfig, RouterBuildError,
};
