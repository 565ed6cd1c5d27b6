//! Unit tests for the planning cycle.

use std::pin::pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::Poll;
use std::time::Duration;

use async_trait::async_trait;
use rstest::rstest;
use tokio::sync::Notify;

use super::*;
use crate::test_support::{
    CountingOptimizer, IdentityOptimizer, StubDistanceMatrixProvider, StubRouteProvider,
};
use crate::{BackendProfile, DistanceMatrix, OptimizeError, PlanStage, ProviderError, ValidationError};

type StubController<O = IdentityOptimizer> = ItineraryController<
    StubDistanceMatrixProvider,
    StubRouteProvider,
    StubRouteProvider,
    CountingOptimizer<O>,
>;

/// Reverses the current following order.
#[derive(Debug, Default)]
struct ReverseOptimizer;

impl OrderOptimizer for ReverseOptimizer {
    fn optimize(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>, OptimizeError> {
        Ok((1..matrix.len()).rev().collect())
    }
}

fn waypoint(label: &str) -> Waypoint {
    Waypoint::new(label, 45.76, 4.83).expect("valid coordinates")
}

fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        url: "http://localhost:8080/v2/directions".to_owned(),
        message: "connection refused".to_owned(),
    }
}

fn controller_with<O: OrderOptimizer>(
    matrix: StubDistanceMatrixProvider,
    shape: StubRouteProvider,
    directions: StubRouteProvider,
    optimizer: O,
) -> StubController<O> {
    ItineraryController::new(
        RoutingBackends {
            matrix,
            shape,
            directions,
        },
        CountingOptimizer::new(optimizer),
    )
}

fn default_controller() -> StubController {
    controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(120_000.0).with_duration(Duration::from_secs(7_200)),
        StubRouteProvider::straight_line(12_000.0).with_duration(Duration::from_secs(2_880)),
        IdentityOptimizer,
    )
}

fn labels(waypoints: &[Waypoint]) -> Vec<&str> {
    waypoints.iter().map(Waypoint::address).collect()
}

#[tokio::test]
async fn following_without_origin_yields_an_empty_result() {
    let controller = default_controller();
    let outcome = controller.add_following(waypoint("a")).await;
    assert_eq!(outcome, CycleOutcome::Planned(ItineraryResult::empty()));
    assert_eq!(controller.backends().matrix.calls(), 0);
}

#[tokio::test]
async fn lone_origin_shows_one_marker_without_routing() {
    let controller = default_controller();
    let outcome = controller.set_origin(waypoint("origin")).await;

    let result = outcome.result().expect("lone origin plans");
    assert_eq!(labels(&result.ordered_waypoints), ["origin"]);
    assert!(!result.has_path());
    assert_eq!(result.total_distance_km, 0.0);
    assert_eq!(result.total_time_minutes, 0);
    assert_eq!(controller.backends().matrix.calls(), 0);
    assert_eq!(controller.optimizer().calls(), 0);
}

#[tokio::test]
async fn missing_vehicle_aborts_before_any_provider_call() {
    let controller = default_controller();
    controller.set_origin(waypoint("origin")).await;
    let outcome = controller.add_following(waypoint("a")).await;

    assert_eq!(
        outcome,
        CycleOutcome::Failed(ValidationError::VehicleRequired.into())
    );
    let result = controller.result();
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "a"]);
    assert!(!result.has_path());
    assert_eq!(result.carbon_footprint_g, 0.0);
    assert_eq!(controller.backends().matrix.calls(), 0);
    assert_eq!(controller.backends().shape.route_calls(), 0);
}

#[tokio::test]
async fn too_many_stops_are_rejected_before_the_matrix_fetch() {
    let controller = default_controller().with_config(PlannerConfig::default().with_max_following_stops(2));
    let stops = StopSet::with_stops(
        Some(waypoint("origin")),
        vec![waypoint("a"), waypoint("b"), waypoint("c")],
    );
    let outcome = controller.load(stops, VehicleId::Car).await;

    assert_eq!(
        outcome.error(),
        Some(&PlanError::from(ValidationError::TooManyStops { count: 3, limit: 2 }))
    );
    assert_eq!(controller.backends().matrix.calls(), 0);
}

#[tokio::test]
async fn optimised_order_replaces_the_following_stops() {
    let controller = controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(30_000.0),
        StubRouteProvider::straight_line(30_000.0),
        ReverseOptimizer,
    );
    let stops = StopSet::with_stops(
        Some(waypoint("origin")),
        vec![waypoint("a"), waypoint("b"), waypoint("c")],
    );
    let outcome = controller.load(stops, VehicleId::ByFoot).await;

    let result = outcome.result().expect("cycle plans");
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "c", "b", "a"]);
    assert_eq!(labels(&controller.following()), ["c", "b", "a"]);
    assert_eq!(
        result.geometry.as_ref().map(|line| line.0.len()),
        Some(4)
    );
}

#[tokio::test]
async fn vehicle_change_reuses_the_optimised_order() {
    let controller = default_controller();
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a"), waypoint("b")]);
    controller.load(stops, VehicleId::Car).await;
    assert_eq!(controller.backends().matrix.calls(), 1);
    assert_eq!(controller.optimizer().calls(), 1);

    let outcome = controller.set_vehicle(VehicleId::Bike).await;

    assert!(outcome.result().is_some());
    assert_eq!(controller.backends().matrix.calls(), 1);
    assert_eq!(controller.optimizer().calls(), 1);
    assert_eq!(controller.backends().directions.route_calls(), 1);
    assert_eq!(
        controller.backends().directions.profiles().last(),
        Some(&BackendProfile::CyclingRegular)
    );
}

#[tokio::test]
async fn membership_change_runs_the_optimiser_again() {
    let controller = default_controller();
    controller.set_vehicle(VehicleId::Car).await;
    controller.set_origin(waypoint("origin")).await;
    controller.add_following(waypoint("a")).await;
    controller.add_following(waypoint("b")).await;
    assert_eq!(controller.optimizer().calls(), 2);

    controller
        .remove_following(0)
        .await
        .expect("index 0 exists");
    assert_eq!(controller.optimizer().calls(), 3);
    assert_eq!(labels(&controller.following()), ["b"]);
}

#[tokio::test]
async fn out_of_range_removal_starts_no_cycle() {
    let controller = default_controller();
    controller.set_origin(waypoint("origin")).await;
    let generation = controller.generation();

    let err = controller
        .remove_following(4)
        .await
        .expect_err("no following stops");
    assert_eq!(err, StopSetError::IndexOutOfRange { index: 4, len: 0 });
    assert_eq!(controller.generation(), generation);
}

#[tokio::test]
async fn single_following_stop_uses_the_backend_distance() {
    let controller = default_controller();
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a")]);
    let outcome = controller.load(stops, VehicleId::ByFoot).await;

    let result = outcome.result().expect("cycle plans");
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "a"]);
    assert_eq!(result.total_distance_km, 12.0);
    assert_eq!(result.total_time_minutes, 48);
    assert_eq!(result.carbon_footprint_g, 0.0);
}

#[rstest]
#[case::segments(
    StubRouteProvider::straight_line(0.0)
        .with_leg_durations(vec![Duration::from_secs(3_000), Duration::from_secs(1_200)]),
    70
)]
#[case::failure(StubRouteProvider::straight_line(0.0).with_leg_error(network_error()), 120)]
#[case::no_segments(StubRouteProvider::straight_line(0.0), 120)]
#[case::overflowing_segments(
    StubRouteProvider::straight_line(0.0)
        .with_leg_durations(vec![Duration::from_secs(u64::MAX / 2 + 1); 2]),
    120
)]
#[tokio::test]
async fn motorised_duration_prefers_segments_then_nominal_speed(
    #[case] directions: StubRouteProvider,
    #[case] minutes: u64,
) {
    let controller = controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(120_000.0).with_duration(Duration::from_secs(5_400)),
        directions,
        IdentityOptimizer,
    );
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a"), waypoint("b")]);
    let outcome = controller.load(stops, VehicleId::Car).await;

    let result = outcome.result().expect("degraded durations still plan");
    assert_eq!(result.total_distance_km, 120.0);
    assert_eq!(result.total_time_minutes, minutes);
    assert_eq!(result.carbon_footprint_g, 26_160.0);
    assert_eq!(controller.backends().directions.leg_calls(), 1);
    assert_eq!(
        controller.backends().directions.profiles(),
        [BackendProfile::DrivingCar]
    );
    assert_eq!(
        controller.backends().shape.profiles(),
        [BackendProfile::Driving]
    );
}

#[tokio::test]
async fn bike_duration_comes_from_the_directions_route() {
    let controller = default_controller();
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a")]);
    let outcome = controller.load(stops, VehicleId::Bike).await;

    let result = outcome.result().expect("cycle plans");
    assert_eq!(result.total_time_minutes, 48);
    assert_eq!(result.carbon_footprint_g, 72.0);
    assert_eq!(controller.backends().directions.leg_calls(), 0);
    assert_eq!(controller.backends().shape.route_calls(), 0);
}

#[tokio::test]
async fn matrix_failure_zeroes_metrics_and_keeps_stop_order() {
    let controller = controller_with(
        StubDistanceMatrixProvider::with_error(network_error()),
        StubRouteProvider::straight_line(10_000.0),
        StubRouteProvider::straight_line(10_000.0),
        ReverseOptimizer,
    );
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a"), waypoint("b")]);
    let outcome = controller.load(stops, VehicleId::Car).await;

    let error = outcome.error().expect("matrix failure aborts");
    assert!(matches!(
        error,
        PlanError::Provider {
            stage: PlanStage::Matrix,
            ..
        }
    ));
    assert_eq!(controller.optimizer().calls(), 0);
    assert_eq!(labels(&controller.following()), ["a", "b"]);
    let result = controller.result();
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "a", "b"]);
    assert_eq!(result.total_distance_km, 0.0);
    assert_eq!(controller.last_error().as_ref(), Some(error));
}

#[tokio::test]
async fn geometry_failure_keeps_the_previous_result() {
    let controller = controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(50_000.0).with_duration(Duration::from_secs(3_000)),
        StubRouteProvider::failing(network_error()),
        IdentityOptimizer,
    );
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a")]);
    let planned = controller.load(stops, VehicleId::Car).await;
    let previous = planned.result().cloned().expect("car route plans");

    let outcome = controller.set_vehicle(VehicleId::ByFoot).await;

    let error = outcome.error().expect("geometry failure aborts");
    assert_eq!(
        error.user_message(),
        "routing provider unavailable: error fetching route"
    );
    assert_eq!(controller.result(), previous);
    assert_eq!(controller.vehicle(), VehicleId::ByFoot);
}

#[tokio::test]
async fn deselecting_the_vehicle_clears_the_route_but_keeps_the_order() {
    let controller = controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(30_000.0),
        StubRouteProvider::straight_line(30_000.0),
        ReverseOptimizer,
    );
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a"), waypoint("b")]);
    controller.load(stops, VehicleId::Car).await;

    let rejected = controller.set_vehicle(VehicleId::ChooseYourVehicle).await;
    assert_eq!(
        rejected.error(),
        Some(&PlanError::Validation(ValidationError::VehicleRequired))
    );
    let cleared = controller.result();
    assert_eq!(labels(&cleared.ordered_waypoints), ["origin", "b", "a"]);
    assert!(cleared.geometry.is_none());
    assert_eq!(cleared.total_distance_km, 0.0);

    let replanned = controller.set_vehicle(VehicleId::Car).await;
    let result = replanned.result().expect("car plans again");
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "b", "a"]);
    assert_eq!(controller.backends().matrix.calls(), 1);
    assert_eq!(controller.optimizer().calls(), 1);
}

#[tokio::test]
async fn refresh_retries_geometry_without_reordering() {
    let controller = controller_with(
        StubDistanceMatrixProvider::uniform(1_000.0),
        StubRouteProvider::straight_line(50_000.0)
            .with_transient_route_error(network_error(), 1),
        StubRouteProvider::straight_line(50_000.0),
        ReverseOptimizer,
    );
    let stops = StopSet::with_stops(Some(waypoint("origin")), vec![waypoint("a"), waypoint("b")]);
    let failed = controller.load(stops, VehicleId::Car).await;
    assert!(failed.error().is_some(), "first geometry request fails");
    assert_eq!(labels(&controller.following()), ["b", "a"]);

    let outcome = controller.refresh().await;

    let result = outcome.result().expect("retried geometry plans");
    assert_eq!(labels(&result.ordered_waypoints), ["origin", "b", "a"]);
    assert_eq!(result.total_distance_km, 50.0);
    assert_eq!(result.total_time_minutes, 50);
    assert_eq!(controller.backends().matrix.calls(), 1);
    assert_eq!(controller.optimizer().calls(), 1);
    assert_eq!(controller.backends().shape.route_calls(), 2);
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn successful_cycle_clears_the_last_error() {
    let controller = default_controller();
    controller.set_origin(waypoint("origin")).await;
    controller.add_following(waypoint("a")).await;
    assert!(controller.last_error().is_some());

    controller.set_vehicle(VehicleId::ElectricCar).await;
    let snapshot = controller.snapshot();
    assert!(snapshot.last_error.is_none());
    assert_eq!(snapshot.result.carbon_footprint_g, 12_360.0);
    assert_eq!(snapshot.generation, 3);
}

/// Matrix provider whose first request waits until released.
#[derive(Debug, Default)]
struct GatedMatrix {
    gate: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl DistanceMatrixProvider for GatedMatrix {
    async fn distance_matrix(
        &self,
        waypoints: &[Waypoint],
    ) -> Result<DistanceMatrix, ProviderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
        }
        Ok(vec![vec![1.0; waypoints.len()]; waypoints.len()])
    }
}

#[tokio::test]
async fn stale_cycle_does_not_overwrite_a_newer_result() {
    let controller = ItineraryController::new(
        RoutingBackends {
            matrix: GatedMatrix::default(),
            shape: StubRouteProvider::straight_line(9_000.0),
            directions: StubRouteProvider::straight_line(9_000.0),
        },
        IdentityOptimizer,
    );
    controller.set_origin(waypoint("origin")).await;
    controller.set_vehicle(VehicleId::Car).await;

    let mut slow = pin!(controller.add_following(waypoint("a")));
    let pending = std::future::poll_fn(|cx| Poll::Ready(slow.as_mut().poll(cx).is_pending())).await;
    assert!(pending, "first cycle should wait on the matrix");

    let fast = controller.add_following(waypoint("b")).await;
    controller.backends().matrix.gate.notify_one();
    let slow = slow.await;

    assert_eq!(slow, CycleOutcome::Superseded);
    let fresh = fast.result().cloned().expect("newer cycle plans");
    assert_eq!(labels(&fresh.ordered_waypoints), ["origin", "a", "b"]);
    assert_eq!(controller.result(), fresh);
}
