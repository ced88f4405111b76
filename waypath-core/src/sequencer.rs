//! Order waypoints into a single efficient tour.

use thiserror::Error;

use crate::{CostMatrix, TourOrder, TourOrderError};

/// Errors returned by [`Sequencer::sequence`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The matrix covered no waypoints, so no order exists.
    #[error("cannot order an empty set of waypoints")]
    InfeasibleOrder,
    /// The engine produced something that is not a valid tour.
    #[error("sequencer produced an invalid order: {0}")]
    InvalidOrder(#[from] TourOrderError),
}

/// Produce a visiting order minimising total tour distance.
///
/// The tour always starts at waypoint `0`. Its cost is the sum of
/// `distance[order[k]][order[k + 1]]`, plus the closing edge back to the start
/// when `round_trip` is set. Sequencers must be `Send + Sync` and must return
/// the same order for the same matrix.
pub trait Sequencer: Send + Sync {
    /// Order the waypoints covered by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InfeasibleOrder`] for an empty matrix.
    fn sequence(&self, matrix: &CostMatrix, round_trip: bool) -> Result<TourOrder, SequenceError>;
}

impl<S> Sequencer for &S
where
    S: Sequencer + ?Sized,
{
    fn sequence(&self, matrix: &CostMatrix, round_trip: bool) -> Result<TourOrder, SequenceError> {
        (**self).sequence(matrix, round_trip)
    }
}

impl<S> Sequencer for Box<S>
where
    S: Sequencer + ?Sized,
{
    fn sequence(&self, matrix: &CostMatrix, round_trip: bool) -> Result<TourOrder, SequenceError> {
        (**self).sequence(matrix, round_trip)
    }
}

/// Total distance of visiting `order` under `matrix`.
///
/// Includes the closing edge from the last waypoint back to the first when
/// `round_trip` is set. Indices outside the matrix contribute
/// [`f64::INFINITY`].
///
/// # Examples
/// ```
/// use waypath_core::{CostMatrix, tour_distance};
///
/// let matrix = CostMatrix::from_distances(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ])?;
/// assert_eq!(tour_distance(&matrix, &[0, 1, 2], false), 3.0);
/// assert_eq!(tour_distance(&matrix, &[0, 1, 2], true), 7.0);
/// # Ok::<(), waypath_core::CostMatrixError>(())
/// ```
#[must_use]
pub fn tour_distance(matrix: &CostMatrix, order: &[usize], round_trip: bool) -> f64 {
    let open: f64 = order
        .windows(2)
        .map(|pair| match pair {
            [from, to] => edge(matrix, *from, *to),
            _ => 0.0,
        })
        .sum();
    match (round_trip, order.first(), order.last()) {
        (true, Some(&first), Some(&last)) if order.len() > 1 => open + edge(matrix, last, first),
        _ => open,
    }
}

fn edge(matrix: &CostMatrix, from: usize, to: usize) -> f64 {
    matrix.distance(from, to).unwrap_or(f64::INFINITY)
}
