//! OpenRouteService Directions API types (GeoJSON flavour).
//!
//! See: <https://openrouteservice.org/dev/#/api-docs/v2/directions/{profile}/geojson/post>.
//!
//! The service omits zero-valued `distance` and `duration` fields, so every
//! numeric field is optional.

use serde::{Deserialize, Serialize};

use super::geojson::LineGeometry;

/// Request body: the ordered positions to route through.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// `[longitude, latitude]` pairs in visiting order.
    pub coordinates: Vec<[f64; 2]>,
}

/// GeoJSON `FeatureCollection` returned on success.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Routes, best first.
    #[serde(default)]
    pub features: Vec<DirectionsFeature>,
}

/// One route feature.
#[derive(Debug, Deserialize)]
pub struct DirectionsFeature {
    /// Route shape.
    pub geometry: LineGeometry,
    /// Route summary and per-leg segments.
    pub properties: DirectionsProperties,
}

/// Properties of a route feature.
#[derive(Debug, Default, Deserialize)]
pub struct DirectionsProperties {
    /// One segment per leg between consecutive positions.
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Whole-route totals.
    pub summary: Option<Summary>,
}

/// A leg between two consecutive positions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    /// Leg distance in metres.
    pub distance: Option<f64>,
    /// Leg duration in seconds.
    pub duration: Option<f64>,
}

/// Whole-route totals.
#[derive(Debug, Default, Deserialize)]
pub struct Summary {
    /// Route distance in metres.
    pub distance: Option<f64>,
    /// Route duration in seconds.
    pub duration: Option<f64>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error detail.
    pub error: ErrorDetail,
}

/// Error detail; the service sends either an object or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Structured error with a numeric code.
    Coded {
        /// Service-specific error code.
        code: i64,
        /// Human-readable message.
        message: String,
    },
    /// Plain message.
    Message(String),
}

impl ErrorDetail {
    /// Render as a single message line.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Coded { code, message } => format!("{message} (code {code})"),
            Self::Message(message) => message.clone(),
        }
    }
}
