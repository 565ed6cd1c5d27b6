//! Provider boundaries for routing data.
//!
//! Three traits abstract the external routing services a planning cycle
//! talks to: [`DistanceMatrixProvider`] for the all-pairs distance table,
//! [`RouteGeometryProvider`] for the path through an ordered stop list, and
//! [`DurationProvider`] for per-leg durations used to refine motorised travel
//! times. Every implementation adapts its backend payload into
//! [`DistanceMatrix`] or [`RouteSummary`]; backend field names stay behind
//! the client boundary.
//!
//! Failures of any call are reported as [`ProviderError`].

mod error;
mod matrix;
mod route;

pub use error::ProviderError;
pub use matrix::{DistanceMatrix, DistanceMatrixProvider};
pub use route::{DurationProvider, RouteGeometryProvider, RouteSummary};
