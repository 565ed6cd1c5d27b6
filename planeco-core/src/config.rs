//! Planner configuration.

/// Default upper bound on following stops for the exact search.
///
/// Eight following stops means 40 320 candidate orders per cycle.
pub const DEFAULT_MAX_FOLLOWING_STOPS: usize = 8;

/// Configuration for [`ItineraryController`](crate::ItineraryController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Largest number of following stops a cycle will optimise.
    pub max_following_stops: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_following_stops: DEFAULT_MAX_FOLLOWING_STOPS,
        }
    }
}

impl PlannerConfig {
    /// Set the following-stop limit.
    #[must_use]
    pub const fn with_max_following_stops(mut self, limit: usize) -> Self {
        self.max_following_stops = limit;
        self
    }
}
