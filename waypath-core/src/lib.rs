//! Core domain types for the Waypath trip planner.
//!
//! A planning run takes a validated [`PointSet`], asks a [`PointRouter`] for
//! the cost of every ordered pair to build a [`CostMatrix`], lets a
//! [`Sequencer`] pick a visiting order and finally routes each consecutive
//! pair again to assemble a [`Route`]. [`TripPlanner`] ties the stages
//! together; each stage is also usable on its own.
//!
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assembler;
pub mod matrix;
mod planner;
mod route;
pub mod router;
mod sequencer;
mod tour;
mod waypoint;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use assembler::{AssembleError, RouteAssembler};
pub use matrix::{Cost, CostMatrix, CostMatrixBuilder, CostMatrixError, MatrixConfig, MatrixError};
pub use planner::{PlanError, TripPlanner};
pub use route::{Leg, Route, RouteError};
pub use router::{PointRouter, RoutedPath, RouterError};
pub use sequencer::{SequenceError, Sequencer, tour_distance};
pub use tour::{TourOrder, TourOrderError};
pub use waypoint::{PointSet, PointSetError, Waypoint};
