use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;
use thiserror::Error;

/// Errors that can occur during adaptive integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("output time {time} precedes the initial time {initial}")]
    OutputBeforeStart { time: f64, initial: f64 },

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("integration from t = {start} to t = {end} failed")]
    Integration {
        start: f64,
        end: f64,
        #[source]
        source: IntegrationError,
    },

    #[error("no step was accepted between t = {start} and t = {end}")]
    NoProgress { start: f64, end: f64 },

    #[error("state is not finite at t = {time}")]
    NonFinite { time: f64 },
}

impl Error {
    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }

    /// Returns `true` if the solver could not carry the state forward.
    ///
    /// Divergence covers exhausted step budgets, step-size underflow,
    /// stiffness detection when enabled, and states that became non-finite.
    #[must_use]
    pub fn is_divergence(&self) -> bool {
        matches!(
            self,
            Self::Integration { .. } | Self::NoProgress { .. } | Self::NonFinite { .. }
        )
    }
}
