//! Plan command implementation for the Planeco CLI.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use planeco_core::config::DEFAULT_MAX_FOLLOWING_STOPS;
use planeco_core::{
    CycleOutcome, DistanceMatrixProvider, DurationProvider, ItineraryController, ItineraryResult,
    PlannerConfig, RouteGeometryProvider, RoutingBackends, StopSet, VehicleId, Waypoint,
};
use planeco_data::routing::{
    DEFAULT_ORS_BASE_URL, DEFAULT_OSRM_BASE_URL, OrsClient, OrsConfig, OsrmClient, OsrmConfig,
};
use planeco_solver_exact::ExactOptimizer;
use serde::{Deserialize, Serialize};

use crate::display::DisplaySummary;
use crate::{
    ARG_PLAN_MAX_FOLLOWING, ARG_PLAN_ORS_API_KEY, ARG_PLAN_ORS_BASE_URL, ARG_PLAN_OSRM_BASE_URL,
    ARG_PLAN_REQUEST, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan an itinerary from a JSON request holding an origin, \
                 the following stops and a travel mode. Following stops are \
                 reordered to minimise the open path from the origin, routed \
                 through OSRM or OpenRouteService depending on the mode, and \
                 printed as JSON with distance, time and carbon footprint.",
    about = "Plan an itinerary from a JSON stop list"
)]
#[ortho_config(prefix = "PLANECO")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Base URL for the OpenRouteService API.
    #[arg(long = ARG_PLAN_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// OpenRouteService API key.
    #[arg(long = ARG_PLAN_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Largest number of following stops accepted for ordering.
    #[arg(long = ARG_PLAN_MAX_FOLLOWING, value_name = "count")]
    #[serde(default)]
    pub(crate) max_following: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Base URL for the matrix+shape backend.
    pub(crate) osrm_base_url: String,
    /// Base URL for the directions backend.
    pub(crate) ors_base_url: String,
    /// Directions backend API key.
    pub(crate) ors_api_key: Option<String>,
    /// Largest accepted number of following stops.
    pub(crate) max_following_stops: usize,
}

impl fmt::Debug for PlanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanConfig")
            .field("request_path", &self.request_path)
            .field("osrm_base_url", &self.osrm_base_url)
            .field("ors_base_url", &self.ors_base_url)
            .field("ors_api_key", &self.ors_api_key.as_ref().map(|_| "<redacted>"))
            .field("max_following_stops", &self.max_following_stops)
            .finish()
    }
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }

    pub(crate) fn osrm_config(&self) -> OsrmConfig {
        OsrmConfig::new(self.osrm_base_url.clone())
    }

    pub(crate) fn ors_config(&self) -> OrsConfig {
        let config = OrsConfig::new(self.ors_base_url.clone());
        match &self.ors_api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    pub(crate) fn planner_config(&self) -> PlannerConfig {
        PlannerConfig::default().with_max_following_stops(self.max_following_stops)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        Ok(Self {
            request_path,
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned()),
            ors_base_url: args
                .ors_base_url
                .unwrap_or_else(|| DEFAULT_ORS_BASE_URL.to_owned()),
            ors_api_key: args.ors_api_key,
            max_following_stops: args.max_following.unwrap_or(DEFAULT_MAX_FOLLOWING_STOPS),
        })
    }
}

/// JSON stop list consumed by `plan`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct PlanRequest {
    /// Fixed start of the itinerary.
    pub(crate) origin: Waypoint,
    /// Stops to visit, in entry order.
    #[serde(default)]
    pub(crate) following: Vec<Waypoint>,
    /// Travel mode; the sentinel is rejected when there is a path to plan.
    #[serde(default)]
    pub(crate) vehicle: VehicleId,
}

impl PlanRequest {
    fn into_parts(self) -> (StopSet, VehicleId) {
        (
            StopSet::with_stops(Some(self.origin), self.following),
            self.vehicle,
        )
    }
}

/// Printed result of a `plan` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanReport {
    pub(crate) vehicle: VehicleId,
    pub(crate) itinerary: ItineraryResult,
    pub(crate) display: DisplaySummary,
}

impl PlanReport {
    fn new(vehicle: VehicleId, itinerary: ItineraryResult) -> Self {
        Self {
            vehicle,
            display: DisplaySummary::for_result(&itinerary),
            itinerary,
        }
    }
}

/// Builds the routing backends for the current plan invocation.
pub(super) trait BackendsBuilder {
    type Matrix: DistanceMatrixProvider;
    type Shape: RouteGeometryProvider;
    type Directions: RouteGeometryProvider + DurationProvider;

    fn build(
        &self,
        config: &PlanConfig,
    ) -> Result<RoutingBackends<Self::Matrix, Self::Shape, Self::Directions>, CliError>;
}

/// OSRM for the matrix and motorised shapes, OpenRouteService for the rest.
pub(super) struct HttpBackendsBuilder;

impl BackendsBuilder for HttpBackendsBuilder {
    type Matrix = OsrmClient;
    type Shape = OsrmClient;
    type Directions = OrsClient;

    fn build(
        &self,
        config: &PlanConfig,
    ) -> Result<RoutingBackends<OsrmClient, OsrmClient, OrsClient>, CliError> {
        let osrm =
            OsrmClient::with_config(config.osrm_config()).map_err(|source| {
                CliError::BuildProvider {
                    base_url: config.osrm_base_url.clone(),
                    source,
                }
            })?;
        let ors = OrsClient::with_config(config.ors_config()).map_err(|source| {
            CliError::BuildProvider {
                base_url: config.ors_base_url.clone(),
                source,
            }
        })?;
        Ok(RoutingBackends {
            matrix: osrm.clone(),
            shape: osrm,
            directions: ors,
        })
    }
}

pub(super) fn run_plan(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_plan_with(args, &HttpBackendsBuilder, writer)
}

pub(super) fn run_plan_with<B: BackendsBuilder>(
    args: PlanArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_plan(args, builder)?;
    write_plan_report(writer, &report)
}

fn execute_plan<B: BackendsBuilder>(args: PlanArgs, builder: &B) -> Result<PlanReport, CliError> {
    let config = resolve_plan_config(args)?;
    let request = load_plan_request(&config.request_path)?;
    let backends = builder.build(&config)?;
    let controller = ItineraryController::new(backends, ExactOptimizer::new())
        .with_config(config.planner_config());

    let (stops, vehicle) = request.into_parts();
    log::debug!(
        "planning {} following stops by {vehicle}",
        stops.following().len()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let result = match runtime.block_on(controller.load(stops, vehicle)) {
        CycleOutcome::Planned(result) => result,
        CycleOutcome::Failed(error) => return Err(error.into()),
        // Nothing else drives this controller, so the committed result stands.
        CycleOutcome::Superseded => controller.result(),
    };
    Ok(PlanReport::new(vehicle, result))
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = File::open(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_report(writer: &mut dyn Write, report: &PlanReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseItinerary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
