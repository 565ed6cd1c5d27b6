//! Command-line interface for the Planeco itinerary engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod display;
mod error;
mod plan;
mod vehicles;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_PLAN_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_PLAN_ORS_BASE_URL: &str = "ors-base-url";
pub(crate) const ARG_PLAN_ORS_API_KEY: &str = "ors-api-key";
pub(crate) const ARG_PLAN_MAX_FOLLOWING: &str = "max-following";
pub(crate) const ENV_PLAN_REQUEST: &str = "PLANECO_CMDS_PLAN_REQUEST_PATH";

/// Run the Planeco CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Plan(args) => run_plan(args, &mut stdout),
        Command::Vehicles => vehicles::write_vehicles(&mut stdout),
    }
}

/// Log to stderr at `warn` unless `RUST_LOG` says otherwise; `--verbose`
/// forces `debug`.
fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    builder.target(env_logger::Target::Stderr);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}

#[derive(Debug, Parser)]
#[command(
    name = "planeco",
    about = "Plan eco-aware multi-stop itineraries",
    version
)]
struct Cli {
    /// Log provider requests and planning decisions.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the stops of a JSON request and print the itinerary.
    Plan(PlanArgs),
    /// List the supported travel modes.
    Vehicles,
}

#[cfg(test)]
mod tests;
