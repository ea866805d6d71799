//! Driving a transient through the adaptive solver.

use pke_core::{Observer, OdeProblem, OutputTimes};
use pke_solvers::transient::adaptive::{self, Action, Config, Event, Solution, Status};

use crate::{ProblemSpecification, ShapeError, SimulationError, StateVector, gradient};

impl OdeProblem for ProblemSpecification {
    type State = StateVector;
    type Error = ShapeError;

    fn time(&self, state: &StateVector) -> f64 {
        state.time
    }

    fn encode(&self, state: &StateVector) -> Result<Vec<f64>, ShapeError> {
        state.to_array(self)
    }

    fn decode(&self, time: f64, y: &[f64]) -> Result<StateVector, ShapeError> {
        StateVector::from_array(self, time, y)
    }

    fn derivative(&self, time: f64, y: &[f64], dy: &mut [f64]) -> Result<(), ShapeError> {
        let state = StateVector::from_array(self, time, y)?;
        gradient(self, &state)?.write_array(self, dy)
    }
}

/// Advances `initial` across `times` and returns one state per output time.
///
/// Integration starts at `initial.time`; every output time must be at or
/// after it. An output time equal to `initial.time` reproduces the initial
/// state exactly.
///
/// # Errors
///
/// Returns [`SimulationError::Shape`] if `initial` does not match `spec`,
/// [`SimulationError::Diverged`] if the solver cannot reach an output time,
/// or [`SimulationError::Solver`] if the solver rejects `config` or `times`.
pub fn run(
    initial: &StateVector,
    spec: &ProblemSpecification,
    times: &OutputTimes,
    config: &Config,
) -> Result<Vec<StateVector>, SimulationError> {
    run_observed(initial, spec, times, config, ()).map(|solution| solution.states)
}

/// Like [`run`], but forwards every output state to `observer`.
///
/// The observer may return [`Action::StopEarly`], in which case the solution
/// holds the states produced so far and reports
/// [`Status::StoppedByObserver`].
///
/// # Errors
///
/// Returns an error under the same conditions as [`run`].
pub fn run_observed<Obs>(
    initial: &StateVector,
    spec: &ProblemSpecification,
    times: &OutputTimes,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<StateVector>, SimulationError>
where
    Obs: Observer<Event<StateVector>, Action>,
{
    log::info!(
        "starting transient: {} nodes, {} precursor groups, {} outputs from t = {} to t = {}",
        spec.n_z(),
        spec.n_delayed(),
        times.len(),
        times.first(),
        times.last(),
    );

    let logging_observer = |event: &Event<StateVector>| {
        let state = &event.state;
        log::debug!(
            "t = {:e}: power = {:e} W, fuel = {:.3} K, coolant = {:.3} K",
            event.time,
            state.power(spec),
            state.t_fuel_mean(),
            state.t_coolant_mean(),
        );
        observer.observe(event)
    };

    let solution = adaptive::solve(spec, initial, times, config, logging_observer)
        .map_err(SimulationError::from)
        .inspect_err(|err| log::warn!("transient failed: {err}"))?;

    match solution.status {
        Status::Complete => log::info!(
            "transient complete: {} outputs, {} evaluations, {} accepted and {} rejected steps",
            solution.states.len(),
            solution.stats.evaluations,
            solution.stats.accepted_steps,
            solution.stats.rejected_steps,
        ),
        Status::StoppedByObserver => log::warn!(
            "transient stopped by observer after {} of {} outputs",
            solution.states.len(),
            times.len(),
        ),
    }

    Ok(solution)
}
