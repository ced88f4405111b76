//! `PointRouter` backed by a GraphHopper server's Routing API.
//!
//! The [`PointRouter`] trait is synchronous so the core library stays usable
//! from plain threads (the matrix builder calls it from a `rayon` pool). This
//! router bridges the async HTTP calls to that interface by blocking on a
//! Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use waypath_core::{PointRouter, PointSet};
//! use waypath_data::routing::GraphHopperRouter;
//!
//! let router = GraphHopperRouter::new("http://localhost:8989")?;
//! let points = PointSet::new([
//!     Coord { x: 13.40, y: 52.52 },
//!     Coord { x: 13.42, y: 52.50 },
//! ])?;
//! let (Some(from), Some(to)) = (points.get(0), points.get(1)) else {
//!     return Ok(());
//! };
//! let path = router.route(from, to)?;
//! println!("{:.0} m, +{:.0} m", path.distance_m, path.ascend_m);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::{Coord, LineString};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use waypath_core::{PointRouter, RoutedPath, RouterError, Waypoint};

use super::graphhopper::{ErrorResponse, ResponsePath, RouteResponse};

/// Errors raised while constructing a [`GraphHopperRouter`].
#[derive(Debug, Error)]
pub enum RouterBuildError {
    /// The base URL could not be parsed.
    #[error("invalid routing service URL {url}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for GraphHopper requests.
pub const DEFAULT_USER_AGENT: &str = "waypath-routing/0.1";

/// Default GraphHopper base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8989";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "bike";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Worker threads of the router's own runtime.
const RUNTIME_WORKERS: usize = 2;

/// Configuration for [`GraphHopperRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphHopperRouterConfig {
    /// Base URL for the GraphHopper service (e.g., `"http://localhost:8989"`).
    pub base_url: String,
    /// Routing profile sent with every request.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Whether to request elevation data for ascent and descent.
    pub elevation: bool,
}

impl Default for GraphHopperRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            elevation: true,
        }
    }
}

impl GraphHopperRouterConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable elevation data.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: bool) -> Self {
        self.elevation = elevation;
        self
    }
}

/// Point-to-point router using the GraphHopper `/route` endpoint.
///
/// # Runtime behaviour
///
/// The router owns a small multi-threaded Tokio runtime reused across calls,
/// so several threads may route at once. When called from within an existing
/// multi-threaded Tokio runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it drives the request on its own runtime from a
/// scoped helper thread, since that runtime cannot be entered from a thread
/// already inside one.
pub struct GraphHopperRouter {
    client: Client,
    config: GraphHopperRouterConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for GraphHopperRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHopperRouter")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl GraphHopperRouter {
    /// Create a router with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RouterBuildError> {
        Self::with_config(GraphHopperRouterConfig::new(base_url))
    }

    /// Create a router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: GraphHopperRouterConfig) -> Result<Self, RouterBuildError> {
        let endpoint_str = format!("{}/route", config.base_url.trim_end_matches('/'));
        let endpoint =
            Url::parse(&endpoint_str).map_err(|source| RouterBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(RouterBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_WORKERS)
            .thread_name("waypath-router")
            .enable_all()
            .build()
            .map_err(RouterBuildError::Runtime)?;
        log::debug!(
            "GraphHopper router targeting {endpoint} with profile {}",
            config.profile
        );
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GraphHopperRouterConfig {
        &self.config
    }

    /// Build the request URL for one leg.
    ///
    /// GraphHopper expects `point=lat,lon`, origin first.
    fn route_url(&self, from: &Waypoint, to: &Waypoint) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("point", &point_param(from))
            .append_pair("point", &point_param(to))
            .append_pair("profile", &self.config.profile)
            .append_pair("points_encoded", "false")
            .append_pair("instructions", "false")
            .append_pair("elevation", if self.config.elevation { "true" } else { "false" });
        url
    }

    /// Fetch one leg asynchronously.
    async fn fetch_path(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        let url = self.route_url(from, to);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(convert_failure(from, to, url.as_str(), status.as_u16(), &body));
        }

        let route_response: RouteResponse =
            response
                .json()
                .await
                .map_err(|err| RouterError::ParseError {
                    message: err.to_string(),
                })?;
        convert_response(from, to, route_response)
    }

    /// Convert a reqwest error to a `RouterError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouterError {
        if error.is_timeout() {
            return RouterError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RouterError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RouterError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl PointRouter for GraphHopperRouter {
    fn profile(&self) -> &str {
        &self.config.profile
    }

    /// Route one leg through GraphHopper.
    ///
    /// # Runtime requirements
    ///
    /// May be called from plain threads or from within any Tokio runtime.
    /// Inside a `current_thread` runtime the call blocks that runtime until a
    /// helper thread has performed the request on the router's own runtime.
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RoutedPath, RouterError> {
        let future = self.fetch_path(from, to);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => std::thread::scope(|scope| {
                match scope.spawn(|| self.runtime.block_on(future)).join() {
                    Ok(result) => result,
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}

fn point_param(waypoint: &Waypoint) -> String {
    format!("{},{}", waypoint.latitude(), waypoint.longitude())
}

/// Map a non-success response to a `RouterError`.
///
/// GraphHopper answers `400` with a `message` when it cannot snap a point or
/// connect the two locations; that is reported as unreachable.
fn convert_failure(
    from: &Waypoint,
    to: &Waypoint,
    url: &str,
    status: u16,
    body: &str,
) -> RouterError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|parsed| parsed.message);
    match message {
        Some(message) if status == 400 => RouterError::NoRouteFound {
            from: from.index(),
            to: to.index(),
            message,
        },
        Some(message) => RouterError::HttpError {
            url: url.to_owned(),
            status,
            message,
        },
        None => RouterError::HttpError {
            url: url.to_owned(),
            status,
            message: body.trim().to_owned(),
        },
    }
}

/// Convert a GraphHopper response to a `RoutedPath`, taking the best path.
///
/// A successful status without paths is a service error when GraphHopper
/// explains itself with a `message`, and an unreachable pair otherwise.
fn convert_response(
    from: &Waypoint,
    to: &Waypoint,
    response: RouteResponse,
) -> Result<RoutedPath, RouterError> {
    let RouteResponse { paths, message } = response;
    let Some(path) = paths.into_iter().next() else {
        return Err(match message {
            Some(message) => RouterError::ServiceError { message },
            None => RouterError::NoRouteFound {
                from: from.index(),
                to: to.index(),
                message: "routing service returned no paths".to_owned(),
            },
        });
    };
    convert_path(path)
}

fn convert_path(path: ResponsePath) -> Result<RoutedPath, RouterError> {
    let coords = path
        .points
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok(Coord { x: *lon, y: *lat }),
            _ => Err(RouterError::ParseError {
                message: format!("path position {position:?} has fewer than two ordinates"),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RoutedPath {
        distance_m: path.distance,
        duration_s: Duration::from_millis(path.time).as_secs_f64(),
        ascend_m: path.ascend,
        descend_m: path.descend,
        geometry: LineString::new(coords),
    })
}
