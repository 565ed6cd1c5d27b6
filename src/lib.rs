//! Facade crate for the Planeco itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the exact route
//! optimiser and the HTTP routing backends behind feature flags.

#![forbid(unsafe_code)]

pub use planeco_core::{
    Backend, BackendProfile, BackendSelection, CycleOutcome, DistanceMatrix,
    DistanceMatrixProvider, DurationProvider, ItineraryController, ItineraryResult,
    OptimizeError, OrderOptimizer, PlanError, PlanStage, PlannerConfig, PlannerSnapshot,
    ProviderError, RouteGeometryProvider, RouteMetrics, RouteSummary, RoutingBackends, StopSet,
    StopSetError, ValidationError, VehicleId, VehicleProfile, Waypoint, WaypointError,
    select_backend,
};

#[cfg(feature = "solver-exact")]
pub use planeco_solver_exact::ExactOptimizer;

#[cfg(feature = "http")]
pub use planeco_data::routing::{OrsClient, OrsConfig, OsrmClient, OsrmConfig, ProviderBuildError};
