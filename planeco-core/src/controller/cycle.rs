//! The steps of a single planning cycle.
//!
//! A cycle works on a private copy of the stop set and never touches the
//! controller state. The controller decides at commit time whether the
//! outcome is still current.

use std::time::Duration;

use crate::metrics;
use crate::{
    Backend, BackendSelection, DistanceMatrixProvider, DurationProvider, ItineraryResult,
    OrderOptimizer, PlanError, PlanStage, ProviderError, RouteGeometryProvider, RouteSummary,
    StopSet, ValidationError, VehicleId, VehicleProfile, Waypoint, select_backend,
};

use super::ItineraryController;

/// State captured when an event starts a cycle.
#[derive(Debug, Clone)]
pub(super) struct CycleInput {
    pub(super) stops: StopSet,
    pub(super) vehicle: VehicleId,
    pub(super) order_settled: bool,
}

/// What a finished cycle asks the controller to commit.
#[derive(Debug)]
pub(super) enum CycleCommit {
    /// New result, with the stop set in its optimised order.
    Planned {
        stops: StopSet,
        result: ItineraryResult,
    },
    /// The cycle aborted. `stops` is the set to keep: reordered when the
    /// optimiser ran before the failure, as captured otherwise.
    Failed {
        stops: StopSet,
        order_settled: bool,
        error: PlanError,
    },
}

impl<M, G, D, O> ItineraryController<M, G, D, O>
where
    M: DistanceMatrixProvider,
    G: RouteGeometryProvider,
    D: RouteGeometryProvider + DurationProvider,
    O: OrderOptimizer,
{
    pub(super) async fn plan(&self, input: CycleInput) -> CycleCommit {
        let CycleInput {
            mut stops,
            vehicle,
            order_settled,
        } = input;

        if stops.origin().is_none() {
            return CycleCommit::Planned {
                stops,
                result: ItineraryResult::empty(),
            };
        }
        if stops.following().is_empty() {
            let result = ItineraryResult::markers_only(stops.waypoints());
            return CycleCommit::Planned { stops, result };
        }

        let selection = match self.validate(&stops, vehicle) {
            Ok(selection) => selection,
            Err(error) => {
                return CycleCommit::Failed {
                    stops,
                    order_settled,
                    error: error.into(),
                };
            }
        };

        if !order_settled {
            let mut reordered = stops.clone();
            if let Err(error) = self.optimise_order(&mut reordered).await {
                return CycleCommit::Failed {
                    stops,
                    order_settled,
                    error,
                };
            }
            stops = reordered;
        }

        let waypoints = stops.waypoints();
        let summary = match self.fetch_route(&waypoints, selection).await {
            Ok(summary) => summary,
            Err(source) => {
                return CycleCommit::Failed {
                    stops,
                    order_settled: true,
                    error: PlanError::provider(PlanStage::Geometry, source),
                };
            }
        };

        let measured = self.measured_duration(&waypoints, selection, &summary).await;
        let metrics = metrics::aggregate(
            summary.distance_meters,
            measured,
            &VehicleProfile::for_id(vehicle),
        );
        CycleCommit::Planned {
            stops,
            result: ItineraryResult::routed(summary.geometry, waypoints, metrics),
        }
    }

    fn validate(
        &self,
        stops: &StopSet,
        vehicle: VehicleId,
    ) -> Result<BackendSelection, ValidationError> {
        let selection = select_backend(vehicle)?;
        let count = stops.following().len();
        let limit = self.config.max_following_stops;
        if count > limit {
            return Err(ValidationError::TooManyStops { count, limit });
        }
        Ok(selection)
    }

    async fn optimise_order(&self, stops: &mut StopSet) -> Result<(), PlanError> {
        let matrix = self
            .backends
            .matrix
            .distance_matrix(&stops.waypoints())
            .await
            .map_err(|source| PlanError::provider(PlanStage::Matrix, source))?;
        let order = self.optimizer.optimize(&matrix)?;
        stops.apply_order(&order)?;
        Ok(())
    }

    async fn fetch_route(
        &self,
        waypoints: &[Waypoint],
        selection: BackendSelection,
    ) -> Result<RouteSummary, ProviderError> {
        match selection.backend {
            Backend::MatrixShape => self.backends.shape.route(waypoints, selection.profile).await,
            Backend::Directions => {
                self.backends
                    .directions
                    .route(waypoints, selection.profile)
                    .await
            }
        }
    }

    /// Provider travel time for the route, or `None` to fall back to the
    /// nominal speed.
    async fn measured_duration(
        &self,
        waypoints: &[Waypoint],
        selection: BackendSelection,
        summary: &RouteSummary,
    ) -> Option<Duration> {
        let Some(profile) = selection.duration_profile else {
            return Some(summary.duration);
        };
        match self.backends.directions.leg_durations(waypoints, profile).await {
            Ok(legs) if legs.is_empty() => {
                log::warn!("{profile} returned no segment durations; estimating from nominal speed");
                None
            }
            Ok(legs) => metrics::total_duration(&legs).or_else(|| {
                log::warn!("{profile} segment durations overflow; estimating from nominal speed");
                None
            }),
            Err(err) => {
                log::warn!("{profile} duration lookup failed: {err}; estimating from nominal speed");
                None
            }
        }
    }
}
