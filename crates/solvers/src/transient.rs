//! Time integration of ODE problems.

pub mod adaptive;
