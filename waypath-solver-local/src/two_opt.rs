//! 2-opt improvement over an existing tour.

use waypath_core::{CostMatrix, tour_distance};

/// Minimum cost reduction, as a fraction of the current tour cost, for a
/// reversal to count as an improvement.
pub(crate) const RELATIVE_IMPROVEMENT: f64 = 1e-12;

/// Outcome of [`improve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Improvement {
    /// Tour cost after the last applied reversal.
    pub cost: f64,
    /// Passes run, including the final pass that found nothing.
    pub passes: usize,
    /// Reversals applied across all passes.
    pub moves: usize,
    /// Whether the last pass found no improving reversal.
    pub converged: bool,
}

/// Apply improving segment reversals until none remain or `max_passes` runs out.
///
/// A move reverses `order[i..=j]` for `1 <= i < j < len`, so position `0`
/// never moves. Candidates are scanned with `i` ascending, then `j`
/// ascending, and a reversal is applied as soon as it lowers the full tour
/// cost by more than [`RELATIVE_IMPROVEMENT`] of its current value, so the
/// accepted moves do not depend on the unit of the matrix. Full re-evaluation keeps
/// asymmetric matrices correct since a reversal flips every inner edge.
pub(crate) fn improve(
    matrix: &CostMatrix,
    order: &mut [usize],
    round_trip: bool,
    max_passes: usize,
) -> Improvement {
    let mut cost = tour_distance(matrix, order, round_trip);
    let mut passes = 0;
    let mut moves = 0;
    let mut converged = false;
    let mut scratch = order.to_vec();

    while passes < max_passes {
        passes += 1;
        let mut improved = false;
        for i in 1..order.len() {
            for j in (i + 1)..order.len() {
                scratch.copy_from_slice(order);
                reverse(&mut scratch, i, j);
                let candidate = tour_distance(matrix, &scratch, round_trip);
                if is_improvement(candidate, cost) {
                    order.copy_from_slice(&scratch);
                    cost = candidate;
                    moves += 1;
                    improved = true;
                }
            }
        }
        if !improved {
            converged = true;
            break;
        }
    }

    Improvement {
        cost,
        passes,
        moves,
        converged,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the acceptance threshold is a float margin relative to the current cost"
)]
fn is_improvement(candidate: f64, current: f64) -> bool {
    current - candidate > current.abs() * RELATIVE_IMPROVEMENT
}

fn reverse(order: &mut [usize], i: usize, j: usize) {
    if let Some(segment) = order.get_mut(i..=j) {
        segment.reverse();
    }
}
