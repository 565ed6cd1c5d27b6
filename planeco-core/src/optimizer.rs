//! Visiting-order optimisation over a distance matrix.
//!
//! The origin is fixed at index `0`; an optimiser chooses the order in which
//! the remaining indices are visited along an open path (no return leg).

use thiserror::Error;

use crate::DistanceMatrix;

/// Errors from [`OrderOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The matrix had no rows, so there is no origin.
    #[error("distance matrix is empty")]
    EmptyMatrix,
    /// A row length did not match the number of rows.
    #[error("distance matrix row {row} has {found} entries, expected {expected}")]
    NonSquareMatrix {
        /// Offending row index.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Entries found in the row.
        found: usize,
    },
}

/// Choose a visiting order for the stops of a distance matrix.
///
/// Implementations return a permutation of `1..matrix.len()`; the origin is
/// implicit and never part of the result. Optimisers are synchronous and
/// CPU bound.
pub trait OrderOptimizer: Send + Sync {
    /// Return the visiting order of indices `1..matrix.len()`.
    fn optimize(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>, OptimizeError>;
}

/// Check that `matrix` is non-empty and square.
pub fn validate_matrix(matrix: &DistanceMatrix) -> Result<(), OptimizeError> {
    if matrix.is_empty() {
        return Err(OptimizeError::EmptyMatrix);
    }
    let expected = matrix.len();
    matrix
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
        .map_or(Ok(()), |(row, entries)| {
            Err(OptimizeError::NonSquareMatrix {
                row,
                expected,
                found: entries.len(),
            })
        })
}

/// Sum the leg distances of the path `0 → order[0] → order[1] → …`.
///
/// Missing cells count as unreachable (`f64::INFINITY`).
///
/// # Examples
/// ```
/// use planeco_core::path_distance;
///
/// let matrix = vec![
///     vec![0.0, 10.0, 30.0],
///     vec![10.0, 0.0, 5.0],
///     vec![30.0, 5.0, 0.0],
/// ];
/// assert_eq!(path_distance(&matrix, &[1, 2]), 15.0);
/// assert_eq!(path_distance(&matrix, &[2, 1]), 35.0);
/// ```
pub fn path_distance(matrix: &DistanceMatrix, order: &[usize]) -> f64 {
    let mut from = 0_usize;
    let mut total = 0.0;
    for &to in order {
        total += matrix
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(f64::INFINITY);
        from = to;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_path_has_zero_length() {
        let matrix = vec![vec![0.0]];
        assert_eq!(path_distance(&matrix, &[]), 0.0);
    }

    #[rstest]
    fn missing_cells_are_unreachable() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert!(path_distance(&matrix, &[1, 5]).is_infinite());
    }

    #[rstest]
    fn validate_rejects_empty_and_ragged_matrices() {
        assert_eq!(validate_matrix(&Vec::new()), Err(OptimizeError::EmptyMatrix));
        let ragged = vec![vec![0.0, 1.0], vec![1.0]];
        assert_eq!(
            validate_matrix(&ragged),
            Err(OptimizeError::NonSquareMatrix {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(validate_matrix(&vec![vec![0.0]]), Ok(()));
    }
}
