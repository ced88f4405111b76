//! Behavioural tests for `LocalSearchSequencer` using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waypath_core::test_support::unit_square_matrix;
use waypath_core::{CostMatrix, SequenceError, Sequencer, TourOrder, tour_distance};
use waypath_solver_local::LocalSearchSequencer;

#[derive(Debug)]
struct SequencingWorld {
    matrix: RefCell<Option<CostMatrix>>,
    round_trip: RefCell<bool>,
    outcome: RefCell<Option<Result<TourOrder, SequenceError>>>,
}

impl SequencingWorld {
    fn new() -> Self {
        Self {
            matrix: RefCell::new(None),
            round_trip: RefCell::new(true),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<TourOrder, SequenceError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn tour_cost(&self) -> f64 {
        let order = self.expect_outcome().expect("expected an order");
        let matrix = self.matrix.borrow();
        let matrix = matrix.as_ref().expect("matrix should be set");
        tour_distance(matrix, order.as_slice(), *self.round_trip.borrow())
    }

    fn sequence(&self, round_trip: bool) {
        self.round_trip.replace(round_trip);
        let outcome = self.matrix.borrow().as_ref().map_or(
            Err(SequenceError::InfeasibleOrder),
            |matrix| LocalSearchSequencer::new().sequence(matrix, round_trip),
        );
        self.outcome.replace(Some(outcome));
    }
}

#[fixture]
fn world() -> SequencingWorld {
    SequencingWorld::new()
}

#[given("a unit square cost matrix")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_unit_square(world: &SequencingWorld) {
    world
        .matrix
        .replace(Some(unit_square_matrix().expect("valid matrix")));
}

#[given("an empty cost matrix")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_empty(world: &SequencingWorld) {
    world.matrix.replace(Some(
        CostMatrix::from_distances(Vec::new()).expect("empty matrix is square"),
    ));
}

#[when("I sequence a round trip")]
fn when_round_trip(world: &SequencingWorld) {
    world.sequence(true);
}

#[when("I sequence an open trip")]
fn when_open_trip(world: &SequencingWorld) {
    world.sequence(false);
}

#[then("the order starts at waypoint 0")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_starts_at_zero(world: &SequencingWorld) {
    let order = world.expect_outcome().expect("expected an order");
    assert_eq!(order.as_slice().first(), Some(&0));
}

#[then("the tour costs 4")]
fn then_costs_four(world: &SequencingWorld) {
    let cost = world.tour_cost();
    assert!((cost - 4.0).abs() < 1e-9, "cost {cost}");
}

#[then("the tour costs 3")]
fn then_costs_three(world: &SequencingWorld) {
    let cost = world.tour_cost();
    assert!((cost - 3.0).abs() < 1e-9, "cost {cost}");
}

#[then("sequencing reports an infeasible order")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_infeasible(world: &SequencingWorld) {
    let err = world.expect_outcome().expect_err("expected a failure");
    assert_eq!(err, SequenceError::InfeasibleOrder);
}

#[scenario(path = "tests/features/local_search_sequencer.feature", index = 0)]
fn round_trip_square(world: SequencingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/local_search_sequencer.feature", index = 1)]
fn open_trip_square(world: SequencingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/local_search_sequencer.feature", index = 2)]
fn empty_matrix(world: SequencingWorld) {
    let _ = world;
}
