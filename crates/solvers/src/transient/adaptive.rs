//! Adaptive embedded Runge–Kutta solver for ODE problems.
//!
//! This module hands an [`OdeProblem`] to the Dormand–Prince integrators of
//! the `ode_solvers` crate and reports one decoded state per requested output
//! time. The integrator owns step-size control and local error tolerance;
//! the problem only supplies the vector field.
//!
//! Integration proceeds segment by segment between consecutive output times,
//! so output times need not be evenly spaced.
//!
//! # Example
//!
//! ```ignore
//! use pke_solvers::transient::adaptive;
//!
//! let times = OutputTimes::linspace(0.0, 10.0, 101)?;
//! let solution = adaptive::solve_unobserved(&problem, &initial, &times, &Config::default())?;
//!
//! for state in &solution.states {
//!     println!("{state:?}");
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;
mod system;

pub use action::Action;
pub use config::{Config, Method};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Stats, Status};

use std::{cell::RefCell, rc::Rc};

use ode_solvers::{
    DVector, Dop853, Dopri5,
    dop_shared::{self, OutputType},
};
use pke_core::{Observer, OdeProblem, OutputTimes};

use system::Segment;

/// Integrates an ODE problem across a sequence of output times.
///
/// # Algorithm
///
/// 1. Validate the config and encode the initial state.
/// 2. For each output time:
///    - If it lies after the current time, integrate the flat state up to it.
///    - Reject non-finite results.
///    - Decode the flat state at the output time.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with one state per output time.
///
/// # Observer
///
/// The observer receives an [`Event`] for each output time and may return
/// [`Action::StopEarly`] to terminate the run early.
///
/// # Errors
///
/// Returns an error if the config is invalid, an output time precedes the
/// initial state's time, the problem fails to encode, decode, or differentiate
/// a state, or the integrator fails to reach an output time.
pub fn solve<P, Obs>(
    problem: &P,
    initial: &P::State,
    times: &OutputTimes,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<P::State>, Error>
where
    P: OdeProblem,
    Obs: Observer<Event<P::State>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let initial_time = problem.time(initial);
    if times.first() < initial_time {
        return Err(Error::OutputBeforeStart {
            time: times.first(),
            initial: initial_time,
        });
    }

    let mut y = problem.encode(initial).map_err(Error::problem)?;
    let mut current = initial_time;
    let mut states = Vec::with_capacity(times.len());
    let mut stats = Stats::default();

    for (index, time) in times.iter().enumerate() {
        if time > current {
            y = integrate_segment(problem, config, current, time, &y, &mut stats)?;
            current = time;
        }

        if y.iter().any(|value| !value.is_finite()) {
            return Err(Error::NonFinite { time });
        }

        let state = problem.decode(time, &y).map_err(Error::problem)?;
        let event = Event { index, time, state };
        let action = observer.observe(&event);
        states.push(event.state);

        if let Some(Action::StopEarly) = action {
            log::info!("observer stopped the run at t = {time} ({} outputs)", index + 1);
            return Ok(Solution {
                status: Status::StoppedByObserver,
                states,
                stats,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        states,
        stats,
    })
}

/// Integrates an ODE problem across a sequence of output times without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<P>(
    problem: &P,
    initial: &P::State,
    times: &OutputTimes,
    config: &Config,
) -> Result<Solution<P::State>, Error>
where
    P: OdeProblem,
{
    solve(problem, initial, times, config, ())
}

/// Advances the flat state `y` from `start` to `end` and returns the result.
fn integrate_segment<P: OdeProblem>(
    problem: &P,
    config: &Config,
    start: f64,
    end: f64,
    y: &[f64],
    stats: &mut Stats,
) -> Result<Vec<f64>, Error> {
    let error = Rc::new(RefCell::new(None));
    let latest = Rc::new(RefCell::new(None));
    let system = Segment {
        problem,
        error: Rc::clone(&error),
        latest: Rc::clone(&latest),
    };

    let y_start = DVector::from_vec(y.to_vec());
    let span = end - start;
    let n_stiff = config.stiffness_check.unwrap_or(u32::MAX);

    // Sparse output reports every accepted step, so the last one seen by
    // `solout` is the state at `end`. Dense output interpolates on `|x|` and
    // misses the segment end for negative or non-representable times.
    // The step controller keeps each method's stock settings.
    let result = match config.method {
        Method::Dopri5 => Dopri5::from_param(
            system,
            start,
            end,
            span,
            y_start,
            config.rel_tol,
            config.abs_tol,
            0.9,
            0.04,
            0.2,
            10.0,
            span,
            0.0,
            config.max_steps,
            n_stiff,
            OutputType::Sparse,
        )
        .integrate(),
        Method::Dop853 => Dop853::from_param(
            system,
            start,
            end,
            span,
            y_start,
            config.rel_tol,
            config.abs_tol,
            0.9,
            0.0,
            0.333,
            6.0,
            span,
            0.0,
            config.max_steps,
            n_stiff,
            OutputType::Sparse,
        )
        .integrate(),
    };

    if let Some(err) = error.borrow_mut().take() {
        return Err(Error::problem(err));
    }

    let segment_stats = result.map_err(|source| {
        log::warn!("integration from t = {start} to t = {end} failed: {source}");
        Error::Integration { start, end, source }
    })?;
    absorb(stats, &segment_stats);

    log::debug!(
        "segment [{start}, {end}]: {} evaluations, {} accepted steps",
        segment_stats.num_eval,
        segment_stats.accepted_steps,
    );

    let (_, y_end) = latest
        .borrow_mut()
        .take()
        .ok_or(Error::NoProgress { start, end })?;

    Ok(y_end.as_slice().to_vec())
}

fn absorb(total: &mut Stats, segment: &dop_shared::Stats) {
    total.evaluations = total.evaluations.saturating_add(segment.num_eval);
    total.accepted_steps = total.accepted_steps.saturating_add(segment.accepted_steps);
    total.rejected_steps = total.rejected_steps.saturating_add(segment.rejected_steps);
}
