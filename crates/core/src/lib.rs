//! Core traits and types for point-kinetics transients.
//!
//! This crate defines the shared abstractions that the solver adapter and the
//! reactor model build on:
//!
//! - [`OdeProblem`]: maps a structured state to and from the flat vector an
//!   ODE solver works on, and evaluates its time derivative
//! - [`OutputTimes`]: a validated, strictly increasing sequence of times at
//!   which a solver reports the state
//! - [`Observer`]: receives solver events and optionally returns control actions

mod observer;
mod output_times;
mod problem;

pub use observer::Observer;
pub use output_times::{OutputTimes, OutputTimesError};
pub use problem::OdeProblem;
