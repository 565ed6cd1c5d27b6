//! Deterministic provider and optimiser doubles used by unit, behaviour and
//! doc tests across the workspace.
//!
//! Every double counts its calls so tests can assert which stages of a
//! planning cycle ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use geo::LineString;

use crate::{
    BackendProfile, DistanceMatrix, DistanceMatrixProvider, DurationProvider, OptimizeError,
    OrderOptimizer, ProviderError, RouteGeometryProvider, RouteSummary, Waypoint,
    optimizer::validate_matrix,
};

/// `DistanceMatrixProvider` returning a canned matrix or error.
#[derive(Debug)]
pub struct StubDistanceMatrixProvider {
    response: Response,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum Response {
    Uniform(f64),
    Matrix(DistanceMatrix),
    Error(ProviderError),
}

impl StubDistanceMatrixProvider {
    /// Every off-diagonal entry is `distance_meters`, sized to the request.
    pub const fn uniform(distance_meters: f64) -> Self {
        Self::from_response(Response::Uniform(distance_meters))
    }

    /// Always return `matrix`, whatever the request size.
    pub const fn with_matrix(matrix: DistanceMatrix) -> Self {
        Self::from_response(Response::Matrix(matrix))
    }

    /// Always fail with `error`.
    pub const fn with_error(error: ProviderError) -> Self {
        Self::from_response(Response::Error(error))
    }

    const fn from_response(response: Response) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of matrix requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceMatrixProvider for StubDistanceMatrixProvider {
    async fn distance_matrix(
        &self,
        waypoints: &[Waypoint],
    ) -> Result<DistanceMatrix, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if waypoints.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        match &self.response {
            Response::Uniform(distance) => {
                let n = waypoints.len();
                Ok((0..n)
                    .map(|i| (0..n).map(|j| if i == j { 0.0 } else { *distance }).collect())
                    .collect())
            }
            Response::Matrix(matrix) => Ok(matrix.clone()),
            Response::Error(error) => Err(error.clone()),
        }
    }
}

/// Route and leg-duration double for either backend family.
///
/// Routes are straight lines through the requested waypoints with a fixed
/// distance and duration. Leg durations default to an empty list, which the
/// controller treats as "no usable segment data".
#[derive(Debug)]
pub struct StubRouteProvider {
    distance_meters: f64,
    duration: Duration,
    route_error: Option<ProviderError>,
    failing_calls: usize,
    legs: Result<Vec<Duration>, ProviderError>,
    route_calls: AtomicUsize,
    leg_calls: AtomicUsize,
    profiles: Mutex<Vec<BackendProfile>>,
}

impl StubRouteProvider {
    /// Routes of `distance_meters` with zero duration.
    pub fn straight_line(distance_meters: f64) -> Self {
        Self {
            distance_meters,
            duration: Duration::ZERO,
            route_error: None,
            failing_calls: usize::MAX,
            legs: Ok(Vec::new()),
            route_calls: AtomicUsize::new(0),
            leg_calls: AtomicUsize::new(0),
            profiles: Mutex::new(Vec::new()),
        }
    }

    /// Routes that always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::straight_line(0.0).with_route_error(error)
    }

    /// Report `duration` as the whole-route travel time.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fail route requests with `error`.
    #[must_use]
    pub fn with_route_error(mut self, error: ProviderError) -> Self {
        self.route_error = Some(error);
        self.failing_calls = usize::MAX;
        self
    }

    /// Fail the first `calls` route requests with `error`, then recover.
    #[must_use]
    pub fn with_transient_route_error(mut self, error: ProviderError, calls: usize) -> Self {
        self.route_error = Some(error);
        self.failing_calls = calls;
        self
    }

    /// Answer leg-duration requests with `legs`.
    #[must_use]
    pub fn with_leg_durations(mut self, legs: Vec<Duration>) -> Self {
        self.legs = Ok(legs);
        self
    }

    /// Fail leg-duration requests with `error`.
    #[must_use]
    pub fn with_leg_error(mut self, error: ProviderError) -> Self {
        self.legs = Err(error);
        self
    }

    /// Number of route requests received.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Number of leg-duration requests received.
    pub fn leg_calls(&self) -> usize {
        self.leg_calls.load(Ordering::SeqCst)
    }

    /// Profiles of every request received, in arrival order.
    pub fn profiles(&self) -> Vec<BackendProfile> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, profile: BackendProfile) {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(profile);
    }
}

#[async_trait]
impl RouteGeometryProvider for StubRouteProvider {
    async fn route(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<RouteSummary, ProviderError> {
        let call = self.route_calls.fetch_add(1, Ordering::SeqCst);
        self.record(profile);
        if let Some(error) = &self.route_error
            && call < self.failing_calls
        {
            return Err(error.clone());
        }
        Ok(RouteSummary {
            distance_meters: self.distance_meters,
            duration: self.duration,
            geometry: waypoints.iter().map(Waypoint::coord).collect::<LineString<f64>>(),
        })
    }
}

#[async_trait]
impl DurationProvider for StubRouteProvider {
    async fn leg_durations(
        &self,
        _waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<Vec<Duration>, ProviderError> {
        self.leg_calls.fetch_add(1, Ordering::SeqCst);
        self.record(profile);
        self.legs.clone()
    }
}

/// Optimiser that keeps the current order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityOptimizer;

impl OrderOptimizer for IdentityOptimizer {
    fn optimize(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>, OptimizeError> {
        validate_matrix(matrix)?;
        Ok((1..matrix.len()).collect())
    }
}

/// Wraps an optimiser and counts invocations.
#[derive(Debug, Default)]
pub struct CountingOptimizer<O> {
    inner: O,
    calls: AtomicUsize,
}

impl<O> CountingOptimizer<O> {
    /// Count calls made to `inner`.
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `optimize` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<O: OrderOptimizer> OrderOptimizer for CountingOptimizer<O> {
    fn optimize(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>, OptimizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.optimize(matrix)
    }
}
