//! `ExactOptimizer` implementation.

use planeco_core::{DistanceMatrix, OptimizeError, OrderOptimizer, path_distance, validate_matrix};

use crate::next_permutation;

/// Brute-force optimiser over all orderings of the following stops.
///
/// Orders are enumerated lexicographically starting from the current order
/// `1, 2, …, N-1`. A candidate replaces the incumbent only when strictly
/// shorter, so ties resolve to the first order enumerated. With an
/// equidistant matrix the current order is therefore kept.
///
/// # Examples
/// ```
/// use planeco_core::OrderOptimizer;
/// use planeco_solver_exact::ExactOptimizer;
///
/// // Stop 2 lies between the origin and stop 1.
/// let matrix = vec![
///     vec![0.0, 10.0, 4.0],
///     vec![10.0, 0.0, 6.0],
///     vec![4.0, 6.0, 0.0],
/// ];
/// let order = ExactOptimizer::new().optimize(&matrix)?;
/// assert_eq!(order, [2, 1]);
/// # Ok::<(), planeco_core::OptimizeError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactOptimizer;

impl ExactOptimizer {
    /// Construct the optimiser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OrderOptimizer for ExactOptimizer {
    fn optimize(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>, OptimizeError> {
        validate_matrix(matrix)?;

        let mut candidate: Vec<usize> = (1..matrix.len()).collect();
        let mut best = candidate.clone();
        let mut best_distance = path_distance(matrix, &candidate);
        let mut evaluated: u64 = 1;

        while next_permutation(&mut candidate) {
            evaluated = evaluated.saturating_add(1);
            let distance = path_distance(matrix, &candidate);
            if distance < best_distance {
                best_distance = distance;
                best.clone_from(&candidate);
            }
        }

        log::debug!(
            "exact search evaluated {evaluated} orders over {} waypoints",
            matrix.len()
        );
        Ok(best)
    }
}
