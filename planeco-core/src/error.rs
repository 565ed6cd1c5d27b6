//! Planning-cycle errors.
//!
//! A cycle aborts with [`PlanError`]. Validation failures and provider
//! failures are kept apart because they call for different operator action:
//! the former means "pick a travel mode", the latter "the routing service is
//! unreachable". Use [`PlanError::user_message`] for the text shown to users.

use std::fmt;

use thiserror::Error;

use crate::{OptimizeError, ProviderError, StopSetError};

/// Input problems detected before any provider is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Following stops exist but no travel mode was chosen.
    #[error("a vehicle must be selected when following stops are present")]
    VehicleRequired,
    /// More following stops than the exact search is configured to handle.
    #[error("{count} following stops exceed the configured limit of {limit}")]
    TooManyStops {
        /// Number of following stops supplied.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Network stage at which a provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    /// All-pairs distance matrix fetch.
    Matrix,
    /// Route geometry fetch.
    Geometry,
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matrix => "distance matrix",
            Self::Geometry => "route geometry",
        })
    }
}

/// Reasons a planning cycle aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The stop set or travel mode failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A provider call failed.
    #[error("{stage} request failed: {source}")]
    Provider {
        /// Stage that failed.
        stage: PlanStage,
        /// Underlying provider failure.
        #[source]
        source: ProviderError,
    },
    /// The optimiser rejected the distance matrix.
    #[error("route optimisation failed: {0}")]
    Optimize(#[from] OptimizeError),
    /// The optimiser returned an order that does not fit the stop set.
    #[error("optimised order could not be applied: {0}")]
    Order(#[from] StopSetError),
}

impl PlanError {
    /// Wrap a provider failure with its stage.
    pub const fn provider(stage: PlanStage, source: ProviderError) -> Self {
        Self::Provider { stage, source }
    }

    /// Mode-specific text for the person planning the itinerary.
    ///
    /// # Examples
    /// ```
    /// use planeco_core::{PlanError, ValidationError};
    ///
    /// let err = PlanError::from(ValidationError::VehicleRequired);
    /// assert_eq!(err.user_message(), "please choose your type of vehicle");
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::VehicleRequired) => {
                "please choose your type of vehicle".to_owned()
            }
            Self::Validation(ValidationError::TooManyStops { count, limit }) => {
                format!("too many following addresses: {count} given, at most {limit} supported")
            }
            Self::Provider {
                stage: PlanStage::Matrix,
                ..
            } => "routing provider unavailable: error fetching routing table".to_owned(),
            Self::Provider {
                stage: PlanStage::Geometry,
                ..
            } => "routing provider unavailable: error fetching route".to_owned(),
            Self::Optimize(_) | Self::Order(_) => {
                "the routing table was unusable for ordering the stops".to_owned()
            }
        }
    }

    /// Whether prior results must be zeroed when this error aborts a cycle.
    ///
    /// Geometry failures keep the previous successful result on display;
    /// every other failure leaves markers only. [`crate::ItineraryController`]
    /// applies this when committing a failed cycle.
    pub const fn clears_result(&self) -> bool {
        !matches!(
            self,
            Self::Provider {
                stage: PlanStage::Geometry,
                ..
            }
        )
    }
}
