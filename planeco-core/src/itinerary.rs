//! The consolidated result of a planning cycle.

use geo::LineString;

use crate::{RouteMetrics, Waypoint};

/// Everything the map and summary views need about the current itinerary.
///
/// The result is replaced wholesale at the end of each committed cycle and
/// handed to consumers by value; nothing else holds onto the last route.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ItineraryResult {
    /// Path through the ordered waypoints, when one was retrieved.
    pub geometry: Option<LineString<f64>>,
    /// Markers in visiting order, origin first.
    pub ordered_waypoints: Vec<Waypoint>,
    /// Route length in kilometres, two decimals.
    pub total_distance_km: f64,
    /// Travel time in whole minutes.
    pub total_time_minutes: u64,
    /// Carbon footprint in grams of CO₂, two decimals.
    pub carbon_footprint_g: f64,
}

impl ItineraryResult {
    /// Result for a stop set without an origin: no markers, no metrics.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Markers without a path and with zeroed metrics.
    ///
    /// Used for a lone origin and for cycles aborted before routing.
    pub fn markers_only(ordered_waypoints: Vec<Waypoint>) -> Self {
        Self {
            ordered_waypoints,
            ..Self::default()
        }
    }

    /// A routed itinerary.
    pub const fn routed(
        geometry: LineString<f64>,
        ordered_waypoints: Vec<Waypoint>,
        metrics: RouteMetrics,
    ) -> Self {
        Self {
            geometry: Some(geometry),
            ordered_waypoints,
            total_distance_km: metrics.distance_km,
            total_time_minutes: metrics.time_minutes,
            carbon_footprint_g: metrics.carbon_footprint_g,
        }
    }

    /// Whether a path line is available.
    pub const fn has_path(&self) -> bool {
        self.geometry.is_some()
    }
}
