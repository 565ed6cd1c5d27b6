//! Test helpers for writing plan requests and stubbing the routing backends.

use camino::{Utf8Path, Utf8PathBuf};
use planeco_core::RoutingBackends;
use planeco_core::test_support::{StubDistanceMatrixProvider, StubRouteProvider};
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{BackendsBuilder, PlanConfig};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Temporary workspace holding a `request.json` path.
pub(super) struct RequestDir {
    _dir: TempDir,
    pub(super) request_path: Utf8PathBuf,
}

impl RequestDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");
        Self {
            _dir: dir,
            request_path,
        }
    }

    pub(super) fn write_request(&self, payload: &str) {
        write_utf8(&self.request_path, payload.as_bytes());
    }
}

/// Origin on Place Bellecour plus two following stops.
pub(super) fn request_json(vehicle: &str) -> String {
    format!(
        r#"{{
            "origin": {{ "address": "Place Bellecour, Lyon", "lat": 45.7578, "lon": 4.832 }},
            "following": [
                {{ "address": "Gare Part-Dieu, Lyon", "lat": 45.7605, "lon": 4.8593 }},
                {{ "address": "Parc de la Tête d'Or, Lyon", "lat": 45.7772, "lon": 4.8553 }}
            ],
            "vehicle": "{vehicle}"
        }}"#
    )
}

/// Builds stub backends whose routes all measure `distance_meters`.
pub(super) struct StubBackendsBuilder {
    pub(super) distance_meters: f64,
}

impl BackendsBuilder for StubBackendsBuilder {
    type Matrix = StubDistanceMatrixProvider;
    type Shape = StubRouteProvider;
    type Directions = StubRouteProvider;

    fn build(
        &self,
        _config: &PlanConfig,
    ) -> Result<RoutingBackends<Self::Matrix, Self::Shape, Self::Directions>, CliError> {
        Ok(RoutingBackends {
            matrix: StubDistanceMatrixProvider::uniform(1_000.0),
            shape: StubRouteProvider::straight_line(self.distance_meters),
            directions: StubRouteProvider::straight_line(self.distance_meters),
        })
    }
}
