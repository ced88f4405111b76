//! Local-search waypoint sequencer for Waypath.
//!
//! This crate provides [`LocalSearchSequencer`], the default implementation of
//! the [`Sequencer`](waypath_core::Sequencer) trait. It builds a greedy
//! nearest-neighbour tour from waypoint `0` and then applies 2-opt segment
//! reversals until no reversal shortens the tour or the pass cap in
//! [`LocalSearchConfig`] is reached. Only distances enter the objective.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod sequencer;
mod two_opt;

pub use sequencer::{LocalSearchConfig, LocalSearchSequencer};
