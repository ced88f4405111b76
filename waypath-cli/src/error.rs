//! Error types emitted by the Waypath CLI.
//!
//! Keep this error type reasonably small, as the CLI helpers return
//! `Result<_, CliError>` throughout.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypath_core::PlanError;
use waypath_data::geojson::{PointSetLoadError, RouteWriteError};
use waypath_data::routing::RouterBuildError;

/// Errors emitted by the Waypath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Constructing the GraphHopper router failed.
    #[error("failed to build router for {base_url:?}: {source}")]
    BuildRouter {
        base_url: String,
        #[source]
        source: RouterBuildError,
    },
    /// The point set could not be loaded.
    #[error("failed to load points: {0}")]
    LoadPoints(#[from] PointSetLoadError),
    /// Planning the trip failed.
    #[error("failed to plan trip: {0}")]
    Plan(#[from] PlanError),
    /// Writing the GeoJSON result failed.
    #[error("failed to write route: {0}")]
    WriteRoute(#[from] RouteWriteError),
    /// Writing the run summary failed.
    #[error("failed to write summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
