//! Scenario loading and result reporting for the `pke` binary.
//!
//! Reads a TOML [`Scenario`](scenario::Scenario), resolves it into a
//! [`Transient`](scenario::Transient), and writes the simulated states as CSV.

pub mod report;
pub mod scenario;
