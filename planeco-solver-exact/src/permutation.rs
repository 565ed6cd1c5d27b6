//! In-place lexicographic permutation stepping.

/// Advance `order` to its lexicographic successor.
///
/// Returns `false`, leaving `order` untouched, once the last permutation
/// (the non-increasing arrangement) has been reached. Starting from a sorted
/// slice, repeated calls visit every permutation exactly once.
///
/// # Examples
/// ```
/// use planeco_solver_exact::next_permutation;
///
/// let mut order = vec![1, 2, 3];
/// assert!(next_permutation(&mut order));
/// assert_eq!(order, [1, 3, 2]);
/// assert!(next_permutation(&mut order));
/// assert_eq!(order, [2, 1, 3]);
///
/// let mut last = vec![3, 2, 1];
/// assert!(!next_permutation(&mut last));
/// assert_eq!(last, [3, 2, 1]);
/// ```
pub fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = order
        .windows(2)
        .rposition(|pair| matches!(pair, [left, right] if left < right))
    else {
        return false;
    };
    let Some(&pivot_value) = order.get(pivot) else {
        return false;
    };
    // The suffix after `pivot` is non-increasing, so the rightmost larger
    // element is the smallest one that still exceeds the pivot.
    let Some(successor) = order.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };
    order.swap(pivot, successor);
    if let Some(suffix) = order.get_mut(pivot + 1..) {
        suffix.reverse();
    }
    true
}
