//! Behavioural tests for the OSRM and OpenRouteService clients.
//!
//! Each scenario runs against a local wiremock server.

use std::cell::RefCell;
use std::time::Duration;

use planeco_core::{
    BackendProfile, DistanceMatrix, DistanceMatrixProvider, ProviderError, RouteGeometryProvider,
    RouteSummary, Waypoint,
};
use planeco_data::routing::{OrsClient, OrsConfig, OsrmClient};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct RoutingWorld {
    runtime: Runtime,
    server: MockServer,
    route: RefCell<Option<Result<RouteSummary, ProviderError>>>,
    matrix: RefCell<Option<Result<DistanceMatrix, ProviderError>>>,
}

impl RoutingWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let server = runtime.block_on(MockServer::start());
        Self {
            runtime,
            server,
            route: RefCell::new(None),
            matrix: RefCell::new(None),
        }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn route_error(&self) -> ProviderError {
        self.route
            .borrow()
            .clone()
            .expect("route requested")
            .expect_err("expected route failure")
    }

    fn matrix_error(&self) -> ProviderError {
        self.matrix
            .borrow()
            .clone()
            .expect("matrix requested")
            .expect_err("expected matrix failure")
    }
}

#[fixture]
fn world() -> RoutingWorld {
    RoutingWorld::new()
}

fn stops(count: usize) -> Vec<Waypoint> {
    [
        ("Place Bellecour", 45.7578, 4.832),
        ("Gare Part-Dieu", 45.7605, 4.8593),
        ("Parc de la Tête d'Or", 45.7772, 4.8553),
    ]
    .into_iter()
    .take(count)
    .map(|(address, lat, lon)| Waypoint::new(address, lat, lon).expect("valid"))
    .collect()
}

// --- Given steps ---

#[given("the directions backend answers with two segments")]
fn directions_two_segments(world: &RoutingWorld) {
    world.mount(
        Mock::given(method("POST"))
            .and(path("/v2/directions/foot-walking/geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "features": [{
                        "properties": {
                            "segments": [
                                { "distance": 2630.0, "duration": 1800.0 },
                                { "distance": 1900.0, "duration": 1380.0 }
                            ],
                            "summary": { "distance": 4530.0, "duration": 3000.0 }
                        },
                        "geometry": { "coordinates": [[4.832, 45.7578], [4.8593, 45.7605], [4.8553, 45.7772]] }
                    }]
                }"#,
            )),
    );
}

#[given("the directions backend rejects the API key")]
fn directions_rejects_key(world: &RoutingWorld) {
    world.mount(
        Mock::given(method("POST")).respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{ "error": "Access to this API has been disallowed" }"#),
        ),
    );
}

#[given("the table service reports an unreachable pair")]
fn table_with_unreachable_pair(world: &RoutingWorld) {
    world.mount(
        Mock::given(method("GET"))
            .and(path_regex(r"^/table/v1/driving/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{ "code": "Ok", "distances": [[0.0, null], [2904.8, 0.0]] }"#,
            )),
    );
}

#[given("the table service rejects the query")]
fn table_rejects_query(world: &RoutingWorld) {
    world.mount(
        Mock::given(method("GET"))
            .and(path_regex(r"^/table/v1/driving/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{ "code": "InvalidQuery", "message": "Query string malformed" }"#,
            )),
    );
}

// --- When steps ---

#[when("I route three stops on foot")]
fn route_on_foot(world: &RoutingWorld) {
    let client = OrsClient::with_config(OrsConfig::new(world.server.uri()).with_api_key("key"))
        .expect("client should build");
    let outcome = world
        .runtime
        .block_on(client.route(&stops(3), BackendProfile::FootWalking));
    world.route.replace(Some(outcome));
}

#[when("I request the distance matrix for two stops")]
fn request_matrix(world: &RoutingWorld) {
    let client = OsrmClient::new(world.server.uri()).expect("client should build");
    let outcome = world.runtime.block_on(client.distance_matrix(&stops(2)));
    world.matrix.replace(Some(outcome));
}

// --- Then steps ---

#[then("the route duration is the sum of the segment durations")]
fn route_duration_sums_segments(world: &RoutingWorld) {
    let borrowed = world.route.borrow();
    let summary = borrowed
        .as_ref()
        .expect("route requested")
        .as_ref()
        .expect("route should succeed");
    assert_eq!(summary.duration, Duration::from_secs(3_180));
}

#[then("the route distance comes from the summary")]
fn route_distance_from_summary(world: &RoutingWorld) {
    let borrowed = world.route.borrow();
    let summary = borrowed
        .as_ref()
        .expect("route requested")
        .as_ref()
        .expect("route should succeed");
    assert_eq!(summary.distance_meters, 4_530.0);
    assert_eq!(summary.geometry.0.len(), 3);
}

#[then("the unreachable pair is infinitely far")]
fn unreachable_pair_is_infinite(world: &RoutingWorld) {
    let borrowed = world.matrix.borrow();
    let matrix = borrowed
        .as_ref()
        .expect("matrix requested")
        .as_ref()
        .expect("matrix should succeed");
    assert_eq!(
        matrix,
        &vec![vec![0.0, f64::INFINITY], vec![2904.8, 0.0]]
    );
}

#[then("a service error with code InvalidQuery is returned")]
fn service_error_returned(world: &RoutingWorld) {
    assert_eq!(
        world.matrix_error(),
        ProviderError::ServiceError {
            code: "InvalidQuery".to_owned(),
            message: "Query string malformed".to_owned(),
        }
    );
}

#[then("an HTTP error with status 403 is returned")]
fn http_error_returned(world: &RoutingWorld) {
    let error = world.route_error();
    assert!(
        matches!(
            &error,
            ProviderError::HttpError { status: 403, message, .. }
                if message == "Access to this API has been disallowed"
        ),
        "expected HttpError 403, got {error:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/routing_providers.feature", name = $title)]
        fn $fn_name(world: RoutingWorld) {
            let _ = world;
        }
    };
}

register_scenario!(routing_a_walk, "routing a walk through the directions backend");
register_scenario!(reading_unreachable_pairs, "reading unreachable pairs from the table service");
register_scenario!(surfacing_table_errors, "surfacing a table service error");
register_scenario!(surfacing_rejected_keys, "surfacing a rejected API key");
