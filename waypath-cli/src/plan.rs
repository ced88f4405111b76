//! Plan command implementation for the Waypath CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypath_core::{MatrixConfig, PointRouter, Route, TripPlanner};
use waypath_data::geojson::{load_point_set_from_path, write_route_geojson_to_path};
use waypath_data::routing::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, GraphHopperRouter, GraphHopperRouterConfig,
};
use waypath_solver_local::{LocalSearchConfig, LocalSearchSequencer};

use crate::{
    ARG_CONCURRENCY, ARG_MAX_PASSES, ARG_OUTPUT, ARG_POINTS, ARG_PROFILE, ARG_ROUND_TRIP,
    ARG_ROUTER_URL, CliError, DEFAULT_OUTPUT, ENV_POINTS,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip through the points of a GeoJSON FeatureCollection. \
                 Points are ordered with a nearest-neighbour tour refined by \
                 2-opt over GraphHopper distances, then every leg is routed and \
                 the trip is written as GeoJSON.",
    about = "Plan a trip through a set of points"
)]
#[ortho_config(prefix = "WAYPATH")]
pub(crate) struct PlanArgs {
    /// Path to a GeoJSON FeatureCollection of Point or MultiPoint features.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Base URL of the GraphHopper server (e.g. "http://localhost:8989").
    #[arg(long = ARG_ROUTER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) router_url: Option<String>,
    /// GraphHopper routing profile.
    #[arg(long = ARG_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Return to the first point at the end of the trip (default true).
    #[arg(long = ARG_ROUND_TRIP, value_name = "bool")]
    #[serde(default)]
    pub(crate) round_trip: Option<bool>,
    /// Path of the GeoJSON result (default `route.geojson`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Maximum number of routing requests in flight while building the matrix.
    #[arg(long = ARG_CONCURRENCY, value_name = "count")]
    #[serde(default)]
    pub(crate) concurrency: Option<usize>,
    /// Upper bound on 2-opt improvement passes.
    #[arg(long = ARG_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_passes: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// GeoJSON input path.
    pub(crate) points: Utf8PathBuf,
    /// GraphHopper base URL.
    pub(crate) router_url: String,
    /// GraphHopper routing profile.
    pub(crate) profile: String,
    /// Whether the trip returns to its start.
    pub(crate) round_trip: bool,
    /// GeoJSON output path.
    pub(crate) output: Utf8PathBuf,
    pub(crate) matrix: MatrixConfig,
    pub(crate) search: LocalSearchConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.points, ARG_POINTS)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match waypath_fs::is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let points = args.points.ok_or(CliError::MissingArgument {
            field: ARG_POINTS,
            env: ENV_POINTS,
        })?;
        let matrix = args
            .concurrency
            .map_or_else(MatrixConfig::default, |concurrency| {
                MatrixConfig::default().with_concurrency(concurrency)
            });
        let search = args
            .max_passes
            .map_or_else(LocalSearchConfig::default, |max_passes| {
                LocalSearchConfig::default().with_max_passes(max_passes)
            });

        Ok(Self {
            points,
            router_url: args
                .router_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            profile: args.profile.unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
            round_trip: args.round_trip.unwrap_or(true),
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            matrix,
            search,
        })
    }
}

/// Builds the router for the current plan invocation.
pub(crate) trait PlanRouterBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn PointRouter>, CliError>;
}

pub(crate) struct GraphHopperRouterBuilder;

impl PlanRouterBuilder for GraphHopperRouterBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn PointRouter>, CliError> {
        let router_config = GraphHopperRouterConfig::new(config.router_url.clone())
            .with_profile(config.profile.clone());
        let router =
            GraphHopperRouter::with_config(router_config).map_err(|source| {
                CliError::BuildRouter {
                    base_url: config.router_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(router))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &GraphHopperRouterBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanRouterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let points = load_point_set_from_path(&config.points)?;
    let router = builder.build(&config)?;
    let planner = TripPlanner::with_matrix_config(
        router,
        LocalSearchSequencer::with_config(config.search.clone()),
        config.matrix.clone(),
    );
    let route = planner.plan_trip(&points, config.round_trip)?;
    write_route_geojson_to_path(&config.output, &route)?;
    log::info!("route written to {}", config.output);
    write_summary(writer, &config.output, &route)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_summary(writer: &mut dyn Write, output: &Utf8Path, route: &Route) -> Result<(), CliError> {
    writeln!(
        writer,
        "{} legs, {:.0} m, +{:.0} m / -{:.0} m, written to {output}",
        route.legs().len(),
        route.total_distance_m(),
        route.total_ascend_m(),
        route.total_descend_m(),
    )
    .map_err(CliError::WriteSummary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
