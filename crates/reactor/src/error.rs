//! Error types for building and running a reactor transient.

use pke_core::OutputTimesError;
use pke_solvers::transient::adaptive;
use thiserror::Error;

/// A malformed or physically inconsistent problem description.
///
/// Raised while constructing a [`ReactivityProfile`](crate::ReactivityProfile)
/// or [`ProblemSpecification`](crate::ProblemSpecification), never during
/// integration.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("ramp starts at t = {start_time} but stops earlier, at t = {stop_time}")]
    RampReversed { start_time: f64, stop_time: f64 },

    #[error("{field} is not finite")]
    NonFinite { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("the axial mesh needs at least one node")]
    NoNodes,

    #[error("{fractions} delayed fractions but {decay_rates} decay rates")]
    GroupCountMismatch {
        fractions: usize,
        decay_rates: usize,
    },

    #[error("invalid axial power profile: {reason}")]
    InvalidPowerProfile { reason: &'static str },

    #[error(transparent)]
    OutputTimes(#[from] OutputTimesError),
}

/// A flat array or per-node field whose length disagrees with the specification.
///
/// This always indicates a caller bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{what}: expected {expected} values, got {actual}")]
pub struct ShapeError {
    pub what: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl ShapeError {
    /// Returns an error if `actual` differs from `expected`.
    pub(crate) fn check(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self {
                what,
                expected,
                actual,
            })
        }
    }
}

/// Errors returned by [`run`](crate::run) and [`run_observed`](crate::run_observed).
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("numerical divergence")]
    Diverged(#[source] adaptive::Error),

    #[error("solver rejected the run")]
    Solver(#[source] adaptive::Error),
}

impl SimulationError {
    /// Returns `true` if the solver failed to advance the state.
    ///
    /// Retrying with tighter tolerances or another method is left to the caller.
    #[must_use]
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::Diverged(_))
    }
}

impl From<adaptive::Error> for SimulationError {
    fn from(err: adaptive::Error) -> Self {
        if err.is_divergence() {
            return Self::Diverged(err);
        }
        match err {
            adaptive::Error::Problem(source) => match source.downcast::<ShapeError>() {
                Ok(shape) => Self::Shape(*shape),
                Err(source) => Self::Solver(adaptive::Error::Problem(source)),
            },
            other => Self::Solver(other),
        }
    }
}
