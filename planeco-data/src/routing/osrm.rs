//! OSRM API response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>.

use serde::Deserialize;

use super::geojson::LineGeometry;

/// OSRM Table API response requested with `annotations=distance`.
///
/// The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"InvalidOptions"` - Invalid option combination
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of distances in metres.
    ///
    /// Values are `None` when no route exists between a pair.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// OSRM Route API response requested with `overview=full&geometries=geojson`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM (`"Ok"`, `"NoRoute"`, `"InvalidQuery"`, ...).
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route through all requested coordinates.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
    /// Route shape.
    pub geometry: LineGeometry,
}
