//! Point-kinetics neutronics coupled to a 1-D axial model of fuel and coolant
//! temperature.
//!
//! A transient is described by an immutable [`ProblemSpecification`] and an
//! initial [`StateVector`]. [`run`] advances the state across a sequence of
//! [`OutputTimes`] with an adaptive Runge–Kutta integrator, using
//! [`derivative`] as the right-hand side.
//!
//! # Example
//!
//! ```ignore
//! let spec = ProblemSpecification::new(mesh, kinetics, feedback, thermal)?;
//! let initial = StateVector::at_reference(&spec, 0.0, 1.0);
//! let times = OutputTimes::linspace(0.0, 10.0, 101)?;
//!
//! for state in run(&initial, &spec, &times, &Config::default())? {
//!     println!("{} {}", state.time, state.power(&spec));
//! }
//! ```

mod derivative;
mod error;
mod profile;
mod reactivity;
mod simulation;
mod specification;
mod state;

pub use derivative::{derivative, gradient};
pub use error::{ConfigError, ShapeError, SimulationError};
pub use profile::AxialProfile;
pub use reactivity::{Ramp, ReactivityProfile};
pub use simulation::{run, run_observed};
pub use specification::{Feedback, Kinetics, Mesh, ProblemSpecification, Thermal};
pub use state::{Layout, Observables, StateVector};

pub use pke_core::{OutputTimes, OutputTimesError};
pub use pke_solvers::transient::adaptive;
