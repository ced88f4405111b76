//! Visiting order over waypoint indices.

use thiserror::Error;

/// Errors returned by [`TourOrder::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourOrderError {
    /// No indices were supplied.
    #[error("tour order must contain at least one waypoint")]
    Empty,
    /// The first index was not the designated start.
    #[error("tour order must start at waypoint 0, found {first}")]
    MissingStart {
        /// Index found at the first position.
        first: usize,
    },
    /// An index was repeated or outside `[0, N)`.
    #[error("tour order is not a permutation: waypoint {index} is repeated or out of range")]
    NotAPermutation {
        /// Offending index.
        index: usize,
    },
}

/// Permutation of `[0, N)` starting at waypoint `0`.
///
/// # Examples
/// ```
/// use waypath_core::TourOrder;
///
/// let order = TourOrder::new(vec![0, 2, 1])?;
/// assert_eq!(order.as_slice(), &[0, 2, 1]);
/// assert!(TourOrder::new(vec![1, 0]).is_err());
/// # Ok::<(), waypath_core::TourOrderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourOrder(Vec<usize>);

impl TourOrder {
    /// Validate and wrap a visiting order.
    ///
    /// # Errors
    ///
    /// Fails when `indices` is empty, does not start at `0`, or is not a
    /// permutation of `[0, indices.len())`.
    pub fn new(indices: Vec<usize>) -> Result<Self, TourOrderError> {
        let Some(&first) = indices.first() else {
            return Err(TourOrderError::Empty);
        };
        if first != 0 {
            return Err(TourOrderError::MissingStart { first });
        }
        let mut seen = vec![false; indices.len()];
        for &index in &indices {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(TourOrderError::NotAPermutation { index }),
            }
        }
        Ok(Self(indices))
    }

    /// Indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of waypoints in the order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a validated order holds at least the start waypoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over indices in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Consume the order and return the raw indices.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Directed transitions of the tour.
    ///
    /// Yields `order[k] → order[k + 1]` for every consecutive pair, followed by
    /// the closing transition `order[N - 1] → order[0]` when `round_trip` is
    /// set and the order visits more than one waypoint.
    pub fn transitions(&self, round_trip: bool) -> impl Iterator<Item = (usize, usize)> + '_ {
        let closing = match (round_trip, self.0.first(), self.0.last()) {
            (true, Some(&first), Some(&last)) if self.0.len() > 1 => Some((last, first)),
            _ => None,
        };
        self.0
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some((*from, *to)),
                _ => None,
            })
            .chain(closing)
    }
}

impl<'a> IntoIterator for &'a TourOrder {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_single_start() {
        let order = TourOrder::new(vec![0]).expect("trivial order");
        assert_eq!(order.len(), 1);
        assert_eq!(order.transitions(true).count(), 0);
    }

    #[rstest]
    #[case(vec![], TourOrderError::Empty)]
    #[case(vec![2, 0, 1], TourOrderError::MissingStart { first: 2 })]
    #[case(vec![0, 1, 1], TourOrderError::NotAPermutation { index: 1 })]
    #[case(vec![0, 3, 1], TourOrderError::NotAPermutation { index: 3 })]
    fn rejects_invalid_orders(#[case] indices: Vec<usize>, #[case] expected: TourOrderError) {
        assert_eq!(TourOrder::new(indices), Err(expected));
    }

    #[rstest]
    #[case(false, vec![(0, 2), (2, 1)])]
    #[case(true, vec![(0, 2), (2, 1), (1, 0)])]
    fn transitions_follow_order(#[case] round_trip: bool, #[case] expected: Vec<(usize, usize)>) {
        let order = TourOrder::new(vec![0, 2, 1]).expect("valid order");
        let transitions: Vec<_> = order.transitions(round_trip).collect();
        assert_eq!(transitions, expected);
    }
}
