//! Errors from [`crate::router::PointRouter::route`].
use thiserror::Error;

/// Errors returned by a [`PointRouter`](crate::PointRouter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The router found no path between the two waypoints.
    #[error("no route found from waypoint {from} to waypoint {to}: {message}")]
    NoRouteFound {
        /// Index of the origin waypoint.
        from: usize,
        /// Index of the destination waypoint.
        to: usize,
        /// Explanation reported by the router.
        message: String,
    },
    /// The routing service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// The routing service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("routing service returned HTTP {status} for {url}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },
    /// The routing service reported an error of its own.
    #[error("routing service error: {message}")]
    ServiceError {
        /// Message reported by the service.
        message: String,
    },
    /// The routing service answered with a payload that could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error.
        message: String,
    },
}
