//! Command-line interface for planning cycling trips with Waypath.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_POINTS: &str = "points";
const ARG_ROUTER_URL: &str = "router-url";
const ARG_PROFILE: &str = "profile";
const ARG_ROUND_TRIP: &str = "round-trip";
const ARG_OUTPUT: &str = "output";
const ARG_CONCURRENCY: &str = "concurrency";
const ARG_MAX_PASSES: &str = "max-passes";
const ENV_POINTS: &str = "WAYPATH_CMDS_PLAN_POINTS";

/// Default path of the GeoJSON result.
const DEFAULT_OUTPUT: &str = "route.geojson";

/// Run the Waypath CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError::ArgumentParsing`] for invalid arguments (including
/// `--help` and `--version` requests) and the command's own errors otherwise.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypath",
    about = "Plan cycling trips through a set of GeoJSON points",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the points, route every leg and write the trip as GeoJSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
