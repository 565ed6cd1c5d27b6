//! Metric reconciliation across providers.
//!
//! Distance always comes from the geometry backend. Time comes from a
//! provider duration when one is available, otherwise from the vehicle's
//! nominal speed. Emissions scale the distance by the vehicle's factor.
//!
//! Units are fixed: kilometres rounded to two decimals, whole minutes, and
//! grams of CO₂ rounded to two decimals. Formatting into hours or kilograms
//! belongs to the presentation layer.

use std::time::Duration;

use crate::VehicleProfile;

/// Reconciled figures for one route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteMetrics {
    /// Route length in kilometres, two decimals.
    pub distance_km: f64,
    /// Travel time in whole minutes.
    pub time_minutes: u64,
    /// Carbon footprint in grams of CO₂, two decimals.
    pub carbon_footprint_g: f64,
}

/// Round to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert metres to kilometres, rounded to two decimals.
pub fn meters_to_km(meters: f64) -> f64 {
    round_to_hundredths(meters / 1000.0)
}

/// Whole minutes in `duration`, rounded down.
pub const fn whole_minutes(duration: Duration) -> u64 {
    duration.as_secs() / 60
}

/// Sum of leg durations, or `None` if the total overflows [`Duration`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use planeco_core::metrics::total_duration;
///
/// let legs = [Duration::from_secs(600), Duration::from_secs(900)];
/// assert_eq!(total_duration(&legs), Some(Duration::from_secs(1_500)));
/// assert_eq!(total_duration(&[Duration::MAX, Duration::from_secs(1)]), None);
/// ```
pub fn total_duration(legs: &[Duration]) -> Option<Duration> {
    legs.iter()
        .try_fold(Duration::ZERO, |total, leg| total.checked_add(*leg))
}

/// Speed-derived travel time: `floor(distance_km / speed_kmh * 60)`.
///
/// A zero or invalid speed yields zero minutes.
///
/// # Examples
/// ```
/// use planeco_core::metrics::fallback_minutes;
///
/// assert_eq!(fallback_minutes(120.0, 60.0), 120);
/// assert_eq!(fallback_minutes(7.5, 15.0), 30);
/// assert_eq!(fallback_minutes(3.0, 0.0), 0);
/// ```
pub fn fallback_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    if speed_kmh <= 0.0 || !speed_kmh.is_finite() || !distance_km.is_finite() {
        return 0;
    }
    let minutes = (distance_km / speed_kmh * 60.0).floor();
    // Non-negative and floored at this point.
    if minutes <= 0.0 { 0 } else { minutes as u64 }
}

/// Carbon footprint in grams: `distance_km * factor`, two decimals.
pub fn carbon_footprint_g(distance_km: f64, emission_factor_g_per_km: f64) -> f64 {
    round_to_hundredths(distance_km * emission_factor_g_per_km)
}

/// Reconcile a route's figures.
///
/// `measured` is the provider duration for the route, or `None` when the
/// duration source was unavailable; in that case the nominal speed of
/// `profile` estimates the time from the rounded distance.
///
/// # Examples
/// ```
/// use planeco_core::{VehicleId, VehicleProfile};
/// use planeco_core::metrics::aggregate;
///
/// let metrics = aggregate(100_000.0, None, &VehicleProfile::for_id(VehicleId::Car));
/// assert_eq!(metrics.distance_km, 100.0);
/// assert_eq!(metrics.time_minutes, 100);
/// assert_eq!(metrics.carbon_footprint_g, 21_800.0);
/// ```
pub fn aggregate(
    distance_meters: f64,
    measured: Option<Duration>,
    profile: &VehicleProfile,
) -> RouteMetrics {
    let distance_km = meters_to_km(distance_meters);
    let time_minutes = measured.map_or_else(
        || fallback_minutes(distance_km, profile.nominal_speed_kmh),
        whole_minutes,
    );
    RouteMetrics {
        distance_km,
        time_minutes,
        carbon_footprint_g: carbon_footprint_g(distance_km, profile.emission_factor_g_per_km),
    }
}
