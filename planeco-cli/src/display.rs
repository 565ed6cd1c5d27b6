//! Human-readable renderings of the itinerary metrics.

use serde::Serialize;

use planeco_core::ItineraryResult;

const MINUTES_PER_HOUR: u64 = 60;
const GRAMS_PER_KG: u64 = 1000;

/// Summary strings printed next to the raw metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DisplaySummary {
    pub(crate) distance: String,
    pub(crate) time: String,
    pub(crate) carbon: String,
}

impl DisplaySummary {
    pub(crate) fn for_result(result: &ItineraryResult) -> Self {
        Self {
            distance: format_distance(result.total_distance_km),
            time: format_minutes(result.total_time_minutes),
            carbon: format_carbon(result.carbon_footprint_g),
        }
    }
}

pub(crate) fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// Minutes below an hour print bare; longer spans print as `"{h} h {m}"`.
pub(crate) fn format_minutes(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        return minutes.to_string();
    }
    let hours = minutes / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;
    format!("{hours} h {rest}")
}

/// Grams below a kilogram print as-is; heavier footprints print as
/// `"{kg} kg {g}"` with the grams rounded.
pub(crate) fn format_carbon(grams: f64) -> String {
    if !grams.is_finite() || grams < 1000.0 {
        return grams.to_string();
    }
    // Finite and at least 1000 here.
    let whole = grams.round() as u64;
    let kg = whole / GRAMS_PER_KG;
    let rest = whole % GRAMS_PER_KG;
    format!("{kg} kg {rest}")
}
