//! Itinerary orchestration.
//!
//! [`ItineraryController`] owns the stop set, the selected vehicle and the
//! latest [`ItineraryResult`]. Every triggering event (origin change,
//! following-stop change, vehicle change) runs one planning cycle:
//!
//! 1. validation of the stop set and travel mode;
//! 2. distance matrix fetch and order optimisation, skipped when only the
//!    vehicle changed since the last optimisation;
//! 3. route geometry fetch from the backend chosen for the vehicle;
//! 4. an optional duration refinement and metric reconciliation.
//!
//! Each event bumps a generation counter. A cycle commits its outcome only
//! if no newer event arrived while it was suspended on a provider call, so a
//! slow response can never overwrite a fresher result.
//!
//! # Examples
//! ```
//! use planeco_core::test_support::{IdentityOptimizer, StubDistanceMatrixProvider, StubRouteProvider};
//! use planeco_core::{CycleOutcome, ItineraryController, RoutingBackends, VehicleId, Waypoint};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ItineraryController::new(
//!     RoutingBackends {
//!         matrix: StubDistanceMatrixProvider::uniform(1_000.0),
//!         shape: StubRouteProvider::straight_line(12_000.0),
//!         directions: StubRouteProvider::straight_line(12_000.0),
//!     },
//!     IdentityOptimizer,
//! );
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! # runtime.block_on(async {
//! controller.set_origin(Waypoint::new("Depot", 48.85, 2.35)?).await;
//! controller.set_vehicle(VehicleId::ByFoot).await;
//! let outcome = controller.add_following(Waypoint::new("Market", 48.86, 2.36)?).await;
//! let CycleOutcome::Planned(result) = outcome else { panic!("cycle should plan") };
//! assert_eq!(result.total_distance_km, 12.0);
//! assert_eq!(result.carbon_footprint_g, 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })
//! # }
//! ```

mod cycle;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    DistanceMatrixProvider, DurationProvider, ItineraryResult, OrderOptimizer, PlanError,
    PlannerConfig, RouteGeometryProvider, StopSet, StopSetError, VehicleId, Waypoint,
};

use cycle::{CycleCommit, CycleInput};

/// The three provider roles a planning cycle talks to.
///
/// `matrix` and `shape` are typically the same matrix+shape service, and
/// `directions` serves both geometry for active modes and the duration
/// refinement for motorised modes.
#[derive(Debug, Clone)]
pub struct RoutingBackends<M, G, D> {
    /// All-pairs distance source used for ordering.
    pub matrix: M,
    /// Geometry source for motorised modes.
    pub shape: G,
    /// Geometry source for bike and foot, and duration source for motorised
    /// modes.
    pub directions: D,
}

/// How a planning cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The cycle committed a new result.
    Planned(ItineraryResult),
    /// The cycle aborted and recorded the error.
    Failed(PlanError),
    /// A newer event arrived before the cycle finished; nothing was
    /// committed.
    Superseded,
}

impl CycleOutcome {
    /// The committed result, if the cycle planned one.
    pub const fn result(&self) -> Option<&ItineraryResult> {
        match self {
            Self::Planned(result) => Some(result),
            Self::Failed(_) | Self::Superseded => None,
        }
    }

    /// The error, if the cycle failed.
    pub const fn error(&self) -> Option<&PlanError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Planned(_) | Self::Superseded => None,
        }
    }
}

/// Point-in-time copy of the controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSnapshot {
    /// Stop set in its canonical (last optimised) order.
    pub stops: StopSet,
    /// Selected travel mode.
    pub vehicle: VehicleId,
    /// Latest committed result.
    pub result: ItineraryResult,
    /// Error of the latest committed cycle, if it failed.
    pub last_error: Option<PlanError>,
    /// Generation of the latest event.
    pub generation: u64,
}

#[derive(Debug, Default)]
struct PlannerState {
    stops: StopSet,
    vehicle: VehicleId,
    // Cleared by every membership change; a vehicle change alone keeps it.
    order_settled: bool,
    result: ItineraryResult,
    last_error: Option<PlanError>,
}

/// Owns the stop set and runs a planning cycle on every change.
pub struct ItineraryController<M, G, D, O> {
    backends: RoutingBackends<M, G, D>,
    optimizer: O,
    config: PlannerConfig,
    generation: AtomicU64,
    state: Mutex<PlannerState>,
}

impl<M, G, D, O> ItineraryController<M, G, D, O>
where
    M: DistanceMatrixProvider,
    G: RouteGeometryProvider,
    D: RouteGeometryProvider + DurationProvider,
    O: OrderOptimizer,
{
    /// Construct a controller with the default [`PlannerConfig`].
    pub fn new(backends: RoutingBackends<M, G, D>, optimizer: O) -> Self {
        Self {
            backends,
            optimizer,
            config: PlannerConfig::default(),
            generation: AtomicU64::new(0),
            state: Mutex::new(PlannerState::default()),
        }
    }

    /// Replace the planner configuration.
    #[must_use]
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Providers the controller routes through.
    pub const fn backends(&self) -> &RoutingBackends<M, G, D> {
        &self.backends
    }

    /// Optimiser used to order the following stops.
    pub const fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Set or replace the origin.
    pub async fn set_origin(&self, origin: Waypoint) -> CycleOutcome {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.stops.set_origin(origin);
            state.order_settled = false;
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Remove the origin.
    pub async fn clear_origin(&self) -> CycleOutcome {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.stops.clear_origin();
            state.order_settled = false;
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Append a following stop.
    pub async fn add_following(&self, waypoint: Waypoint) -> CycleOutcome {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.stops.push_following(waypoint);
            state.order_settled = false;
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Remove the following stop at `index` of the current canonical order.
    ///
    /// An out-of-range index is rejected without starting a cycle.
    pub async fn remove_following(&self, index: usize) -> Result<CycleOutcome, StopSetError> {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.stops.remove_following(index)?;
            state.order_settled = false;
            self.advance(&state)
        };
        Ok(self.run(generation, input).await)
    }

    /// Select the travel mode.
    ///
    /// The optimised order is kept: only geometry and metrics are refreshed.
    pub async fn set_vehicle(&self, vehicle: VehicleId) -> CycleOutcome {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.vehicle = vehicle;
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Replace the whole stop set and travel mode as a single event.
    pub async fn load(&self, stops: StopSet, vehicle: VehicleId) -> CycleOutcome {
        let (generation, input) = {
            let mut state = self.lock_state();
            state.stops = stops;
            state.vehicle = vehicle;
            state.order_settled = false;
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Re-run the cycle for the current state, for instance after a
    /// provider outage.
    pub async fn refresh(&self) -> CycleOutcome {
        let (generation, input) = {
            let state = self.lock_state();
            self.advance(&state)
        };
        self.run(generation, input).await
    }

    /// Latest committed result.
    pub fn result(&self) -> ItineraryResult {
        self.lock_state().result.clone()
    }

    /// The stop set in its canonical order.
    pub fn stops(&self) -> StopSet {
        self.lock_state().stops.clone()
    }

    /// Following stops in their canonical (last optimised) order.
    pub fn following(&self) -> Vec<Waypoint> {
        self.lock_state().stops.following().to_vec()
    }

    /// Selected travel mode.
    pub fn vehicle(&self) -> VehicleId {
        self.lock_state().vehicle
    }

    /// Error of the latest committed cycle, if it failed.
    pub fn last_error(&self) -> Option<PlanError> {
        self.lock_state().last_error.clone()
    }

    /// Generation of the latest event.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Copy of the whole controller state.
    pub fn snapshot(&self) -> PlannerSnapshot {
        let state = self.lock_state();
        PlannerSnapshot {
            stops: state.stops.clone(),
            vehicle: state.vehicle,
            result: state.result.clone(),
            last_error: state.last_error.clone(),
            generation: self.generation(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PlannerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Must be called with the state lock held so the event and its
    // generation are observed together.
    fn advance(&self, state: &PlannerState) -> (u64, CycleInput) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let input = CycleInput {
            stops: state.stops.clone(),
            vehicle: state.vehicle,
            order_settled: state.order_settled,
        };
        (generation, input)
    }

    async fn run(&self, generation: u64, input: CycleInput) -> CycleOutcome {
        let commit = self.plan(input).await;
        self.commit(generation, commit)
    }

    fn commit(&self, generation: u64, commit: CycleCommit) -> CycleOutcome {
        let mut state = self.lock_state();
        let latest = self.generation();
        if latest != generation {
            log::debug!("planning cycle {generation} superseded by {latest}");
            return CycleOutcome::Superseded;
        }
        match commit {
            CycleCommit::Planned { stops, result } => {
                state.stops = stops;
                state.order_settled = true;
                state.result = result.clone();
                state.last_error = None;
                CycleOutcome::Planned(result)
            }
            CycleCommit::Failed {
                stops,
                order_settled,
                error,
            } => {
                if error.clears_result() {
                    state.result = ItineraryResult::markers_only(stops.waypoints());
                }
                state.stops = stops;
                state.order_settled = order_settled;
                state.last_error = Some(error.clone());
                CycleOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests;
