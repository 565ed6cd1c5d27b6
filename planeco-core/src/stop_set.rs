//! The stop set: one optional origin followed by unordered stops.
//!
//! The origin is conceptually index 0 of every waypoint list derived from the
//! set. The following stops carry no required order; the optimiser permutes
//! them and the controller writes the winning permutation back with
//! [`StopSet::apply_order`].

use thiserror::Error;

use crate::Waypoint;

/// Errors from mutating a [`StopSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopSetError {
    /// A following-stop index did not exist.
    #[error("following stop index {index} is out of range for {len} stops")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of following stops.
        len: usize,
    },
    /// A permutation did not cover every following stop exactly once.
    #[error("order {order:?} is not a permutation of 1..={len}")]
    InvalidOrder {
        /// Offending order, expressed as waypoint indices.
        order: Vec<usize>,
        /// Number of following stops.
        len: usize,
    },
}

/// Origin plus following waypoints.
///
/// # Examples
/// ```
/// use planeco_core::{StopSet, Waypoint};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut stops = StopSet::new();
/// stops.set_origin(Waypoint::new("Depot", 48.85, 2.35)?);
/// stops.push_following(Waypoint::new("A", 48.86, 2.36)?);
/// stops.push_following(Waypoint::new("B", 48.87, 2.30)?);
///
/// stops.apply_order(&[2, 1])?;
/// let labels: Vec<_> = stops.waypoints().iter().map(|w| w.address().to_owned()).collect();
/// assert_eq!(labels, ["Depot", "B", "A"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopSet {
    origin: Option<Waypoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    following: Vec<Waypoint>,
}

impl StopSet {
    /// Construct an empty stop set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a stop set from an origin and following stops.
    pub const fn with_stops(origin: Option<Waypoint>, following: Vec<Waypoint>) -> Self {
        Self { origin, following }
    }

    /// Replace the origin.
    pub fn set_origin(&mut self, origin: Waypoint) {
        self.origin = Some(origin);
    }

    /// Remove the origin, returning it if one was set.
    pub fn clear_origin(&mut self) -> Option<Waypoint> {
        self.origin.take()
    }

    /// Append a following stop.
    pub fn push_following(&mut self, waypoint: Waypoint) {
        self.following.push(waypoint);
    }

    /// Remove the following stop at `index`.
    pub fn remove_following(&mut self, index: usize) -> Result<Waypoint, StopSetError> {
        if index >= self.following.len() {
            return Err(StopSetError::IndexOutOfRange {
                index,
                len: self.following.len(),
            });
        }
        Ok(self.following.remove(index))
    }

    /// The origin, if set.
    pub const fn origin(&self) -> Option<&Waypoint> {
        self.origin.as_ref()
    }

    /// Following stops in their current canonical order.
    pub fn following(&self) -> &[Waypoint] {
        &self.following
    }

    /// Origin followed by the following stops.
    ///
    /// Without an origin only the following stops are returned.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.origin
            .iter()
            .chain(self.following.iter())
            .cloned()
            .collect()
    }

    /// Total number of waypoints, origin included.
    pub fn len(&self) -> usize {
        usize::from(self.origin.is_some()) + self.following.len()
    }

    /// Whether the set holds no waypoints at all.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.following.is_empty()
    }

    /// Reorder the following stops.
    ///
    /// `order` holds waypoint indices as used by the distance matrix, so the
    /// first following stop is `1`. Every index in `1..=following.len()` must
    /// appear exactly once.
    pub fn apply_order(&mut self, order: &[usize]) -> Result<(), StopSetError> {
        let len = self.following.len();
        let invalid = || StopSetError::InvalidOrder {
            order: order.to_vec(),
            len,
        };
        if order.len() != len {
            return Err(invalid());
        }
        let mut seen = vec![false; len];
        let mut reordered = Vec::with_capacity(len);
        for &index in order {
            let slot = index.checked_sub(1).ok_or_else(invalid)?;
            let (Some(flag), Some(waypoint)) = (seen.get_mut(slot), self.following.get(slot))
            else {
                return Err(invalid());
            };
            if *flag {
                return Err(invalid());
            }
            *flag = true;
            reordered.push(waypoint.clone());
        }
        self.following = reordered;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn waypoint(label: &str) -> Waypoint {
        Waypoint::new(label, 48.85, 2.35).expect("valid coordinates")
    }

    #[fixture]
    fn three_stops() -> StopSet {
        StopSet::with_stops(
            Some(waypoint("origin")),
            vec![waypoint("a"), waypoint("b"), waypoint("c")],
        )
    }

    fn labels(stops: &StopSet) -> Vec<String> {
        stops
            .waypoints()
            .iter()
            .map(|w| w.address().to_owned())
            .collect()
    }

    #[rstest]
    fn waypoints_lead_with_origin(three_stops: StopSet) {
        assert_eq!(labels(&three_stops), ["origin", "a", "b", "c"]);
        assert_eq!(three_stops.len(), 4);
    }

    #[rstest]
    fn apply_order_permutes_following(mut three_stops: StopSet) {
        three_stops.apply_order(&[3, 1, 2]).expect("valid permutation");
        assert_eq!(labels(&three_stops), ["origin", "c", "a", "b"]);
    }

    #[rstest]
    #[case(vec![1, 2])]
    #[case(vec![1, 1, 2])]
    #[case(vec![0, 1, 2])]
    #[case(vec![1, 2, 4])]
    fn apply_order_rejects_non_permutations(mut three_stops: StopSet, #[case] order: Vec<usize>) {
        let before = three_stops.clone();
        let err = three_stops
            .apply_order(&order)
            .expect_err("order should be rejected");
        assert!(matches!(err, StopSetError::InvalidOrder { len: 3, .. }));
        assert_eq!(three_stops, before);
    }

    #[rstest]
    fn remove_following_reports_out_of_range(mut three_stops: StopSet) {
        let err = three_stops
            .remove_following(3)
            .expect_err("index 3 is out of range");
        assert_eq!(err, StopSetError::IndexOutOfRange { index: 3, len: 3 });
        let removed = three_stops.remove_following(0).expect("index 0 exists");
        assert_eq!(removed.address(), "a");
    }

    #[rstest]
    fn clearing_origin_keeps_following(mut three_stops: StopSet) {
        let origin = three_stops.clear_origin().expect("origin was set");
        assert_eq!(origin.address(), "origin");
        assert_eq!(labels(&three_stops), ["a", "b", "c"]);
        assert!(!three_stops.is_empty());
    }
}
