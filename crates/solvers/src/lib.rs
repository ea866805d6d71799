//! Numerical solvers for point-kinetics transients.
//!
//! Solvers in this crate work on any [`pke_core::OdeProblem`]. They own
//! step-size control and error estimation; problems only supply the vector
//! field and the mapping between structured and flat states.

pub mod transient;
