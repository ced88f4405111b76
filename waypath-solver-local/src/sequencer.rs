//! `LocalSearchSequencer`: nearest-neighbour construction refined by 2-opt.

use waypath_core::{CostMatrix, SequenceError, Sequencer, TourOrder, tour_distance};

use crate::{construct, two_opt};

/// Configuration for [`LocalSearchSequencer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Upper bound on full 2-opt passes over the tour.
    pub max_passes: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self { max_passes: 1000 }
    }
}

impl LocalSearchConfig {
    /// Override the 2-opt pass cap.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Default [`Sequencer`]: a greedy tour from waypoint `0` improved by 2-opt.
///
/// The result is a 2-opt local optimum and depends only on the matrix, the
/// round-trip flag and the pass cap.
///
/// # Examples
/// ```
/// use waypath_core::{CostMatrix, Sequencer};
/// use waypath_solver_local::LocalSearchSequencer;
///
/// let diagonal = std::f64::consts::SQRT_2;
/// let matrix = CostMatrix::from_distances(vec![
///     vec![0.0, 1.0, diagonal, 1.0],
///     vec![1.0, 0.0, 1.0, diagonal],
///     vec![diagonal, 1.0, 0.0, 1.0],
///     vec![1.0, diagonal, 1.0, 0.0],
/// ])?;
/// let order = LocalSearchSequencer::default().sequence(&matrix, true)?;
/// assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchSequencer {
    config: LocalSearchConfig,
}

impl LocalSearchSequencer {
    /// Construct a sequencer using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a sequencer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LocalSearchConfig {
        &self.config
    }
}

impl Sequencer for LocalSearchSequencer {
    fn sequence(&self, matrix: &CostMatrix, round_trip: bool) -> Result<TourOrder, SequenceError> {
        if matrix.is_empty() {
            return Err(SequenceError::InfeasibleOrder);
        }
        let mut order = construct::nearest_neighbour(matrix);
        log::debug!(
            "nearest-neighbour tour over {} waypoints costs {:.1}",
            order.len(),
            tour_distance(matrix, &order, round_trip)
        );

        let outcome = two_opt::improve(matrix, &mut order, round_trip, self.config.max_passes);
        if !outcome.converged && self.config.max_passes > 0 {
            log::warn!(
                "2-opt stopped at the pass cap ({}) before converging",
                self.config.max_passes
            );
        }
        log::debug!(
            "2-opt applied {} reversals over {} passes, cost {:.1}",
            outcome.moves,
            outcome.passes,
            outcome.cost
        );
        Ok(TourOrder::new(order)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use waypath_core::test_support::unit_square_matrix;

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn unit_square_follows_the_perimeter(#[case] round_trip: bool) {
        let matrix = unit_square_matrix().expect("valid matrix");
        let order = LocalSearchSequencer::new()
            .sequence(&matrix, round_trip)
            .expect("order");
        let cost = tour_distance(&matrix, order.as_slice(), round_trip);
        let expected = if round_trip { 4.0 } else { 3.0 };
        assert!((cost - expected).abs() < 1e-9, "cost {cost}");
    }

    #[rstest]
    fn empty_matrix_is_infeasible() {
        let matrix = CostMatrix::from_distances(Vec::new()).expect("empty matrix");
        let err = LocalSearchSequencer::new()
            .sequence(&matrix, true)
            .expect_err("nothing to order");
        assert_eq!(err, SequenceError::InfeasibleOrder);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn single_waypoint_orders_to_itself(#[case] round_trip: bool) {
        let matrix = CostMatrix::from_distances(vec![vec![0.0]]).expect("valid matrix");
        let order = LocalSearchSequencer::new()
            .sequence(&matrix, round_trip)
            .expect("order");
        assert_eq!(order.as_slice(), &[0]);
    }

    #[rstest]
    fn config_builder_sets_pass_cap() {
        let sequencer =
            LocalSearchSequencer::with_config(LocalSearchConfig::default().with_max_passes(3));
        assert_eq!(sequencer.config().max_passes, 3);
        assert_eq!(LocalSearchConfig::default().max_passes, 1000);
    }

    #[rstest]
    fn zero_passes_keeps_the_greedy_tour() {
        let matrix = CostMatrix::from_distances(vec![
            vec![0.0, 1.0, 3.0, 2.0],
            vec![1.0, 0.0, 2.0, 3.0],
            vec![3.0, 2.0, 0.0, 1.0],
            vec![2.0, 3.0, 1.0, 0.0],
        ])
        .expect("valid matrix");
        let sequencer =
            LocalSearchSequencer::with_config(LocalSearchConfig::default().with_max_passes(0));
        let order = sequencer.sequence(&matrix, true).expect("order");
        assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
    }
}
