//! Route geometry and leg-duration provider traits.

use std::time::Duration;

use async_trait::async_trait;
use geo::LineString;

use crate::{BackendProfile, Waypoint};

use super::error::ProviderError;

/// Provider-agnostic summary of a route through an ordered stop list.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Distance of the whole path in metres.
    pub distance_meters: f64,
    /// Travel time of the whole path.
    pub duration: Duration,
    /// Path shape as `(longitude, latitude)` coordinates.
    pub geometry: LineString<f64>,
}

/// Fetch the path for an ordered stop list.
///
/// One request covers the whole path; the response yields one geometry and
/// one aggregate distance and duration.
#[async_trait]
pub trait RouteGeometryProvider: Send + Sync {
    /// Route through `waypoints` in order using the backend `profile`.
    async fn route(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<RouteSummary, ProviderError>;
}

/// Fetch per-leg travel durations for an ordered stop list.
///
/// An empty list means the backend answered without usable segment data.
#[async_trait]
pub trait DurationProvider: Send + Sync {
    /// Durations of each leg between consecutive `waypoints`.
    async fn leg_durations(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<Vec<Duration>, ProviderError>;
}
