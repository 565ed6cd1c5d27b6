//! Core domain types for the Planeco itinerary engine.
//!
//! The crate models a stop set (one fixed origin plus unordered following
//! waypoints), the vehicle profile registry, and the provider traits through
//! which distance matrices, route geometry and leg durations are fetched.
//! [`ItineraryController`] orchestrates a planning cycle across those
//! boundaries and owns the canonical stop order and the latest result.
//!
//! Backend-specific payloads never appear here: HTTP clients adapt their
//! responses into [`DistanceMatrix`] and [`RouteSummary`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod controller;
pub mod error;
pub mod itinerary;
pub mod metrics;
pub mod optimizer;
pub mod provider;
pub mod router;
pub mod stop_set;
pub mod vehicle;
pub mod waypoint;

#[doc(hidden)]
pub mod test_support;

pub use config::PlannerConfig;
pub use controller::{CycleOutcome, ItineraryController, PlannerSnapshot, RoutingBackends};
pub use error::{PlanError, PlanStage, ValidationError};
pub use itinerary::ItineraryResult;
pub use metrics::RouteMetrics;
pub use optimizer::{OptimizeError, OrderOptimizer, path_distance, validate_matrix};
pub use provider::{
    DistanceMatrix, DistanceMatrixProvider, DurationProvider, ProviderError,
    RouteGeometryProvider, RouteSummary,
};
pub use router::{Backend, BackendProfile, BackendSelection, select_backend};
pub use stop_set::{StopSet, StopSetError};
pub use vehicle::{UnknownVehicle, VehicleId, VehicleProfile};
pub use waypoint::{Waypoint, WaypointError};
