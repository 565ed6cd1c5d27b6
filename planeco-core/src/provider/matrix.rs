//! Distance-matrix provider trait and the matrix alias.

use async_trait::async_trait;

use crate::Waypoint;

use super::error::ProviderError;

/// Square matrix of travel distances in metres.
///
/// `matrix[i][j]` is the distance from waypoint `i` to waypoint `j`; row and
/// column `0` belong to the origin. Unreachable pairs are `f64::INFINITY`.
pub type DistanceMatrix = Vec<Vec<f64>>;

/// Fetch pairwise travel distances for a waypoint list.
///
/// The matrix only drives the relative ordering of stops, so implementations
/// query a single generic motorised profile regardless of the caller's
/// travel mode.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use planeco_core::{DistanceMatrix, DistanceMatrixProvider, ProviderError, Waypoint};
///
/// struct FlatProvider;
///
/// #[async_trait]
/// impl DistanceMatrixProvider for FlatProvider {
///     async fn distance_matrix(
///         &self,
///         waypoints: &[Waypoint],
///     ) -> Result<DistanceMatrix, ProviderError> {
///         if waypoints.is_empty() {
///             return Err(ProviderError::EmptyInput);
///         }
///         let n = waypoints.len();
///         Ok((0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1_000.0 }).collect())
///             .collect())
///     }
/// }
/// ```
#[async_trait]
pub trait DistanceMatrixProvider: Send + Sync {
    /// Return an `n×n` matrix of distances for `waypoints`.
    ///
    /// Implementations must return `Err(ProviderError::EmptyInput)` when
    /// `waypoints` is empty.
    async fn distance_matrix(
        &self,
        waypoints: &[Waypoint],
    ) -> Result<DistanceMatrix, ProviderError>;
}
