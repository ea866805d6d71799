//! Governing equations of the coupled kinetics and thermal model.

use crate::{ProblemSpecification, ShapeError, StateVector};

/// Evaluates the time derivative of a flat state array.
///
/// The result has the same layout as `y`.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `y` does not have `n_state_variables` entries.
pub fn derivative(
    spec: &ProblemSpecification,
    time: f64,
    y: &[f64],
) -> Result<Vec<f64>, ShapeError> {
    let state = StateVector::from_array(spec, time, y)?;
    gradient(spec, &state)?.to_array(spec)
}

/// Evaluates the time derivative of an absolute state.
///
/// The returned structure holds rates, not values, so its observables are
/// meaningless.
///
/// # Errors
///
/// Returns a [`ShapeError`] if a field of `state` has the wrong length.
pub fn gradient(
    spec: &ProblemSpecification,
    state: &StateVector,
) -> Result<StateVector, ShapeError> {
    state.check_shape(spec)?;

    let rho = state.total_reactivity(spec);
    let generation_time = spec.generation_time();

    let delayed_source: f64 = spec
        .lambdas()
        .iter()
        .zip(&state.n_delayed)
        .map(|(lambda, c)| lambda * c)
        .sum();
    let n_neutron = spec.beta() * (rho - 1.0) * state.n_neutron / generation_time
        + delayed_source
        + spec.source();

    let n_delayed = spec
        .betas()
        .iter()
        .zip(spec.lambdas())
        .zip(&state.n_delayed)
        .map(|((beta, lambda), c)| beta * rho * state.n_neutron / generation_time - lambda * c)
        .collect();

    Ok(StateVector {
        time: state.time,
        n_neutron,
        n_delayed,
        t_fuel: fuel_rates(spec, state),
        t_coolant: coolant_rates(spec, state),
    })
}

/// Finite-difference stencils of the axial fuel conduction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stencil {
    /// One-sided difference at the first and last node against its only neighbour.
    Boundary,
    /// Central second difference at every node strictly between the ends.
    Interior,
}

impl Stencil {
    /// Returns whether a mesh of `nodes` nodes has every neighbour the stencil reads.
    fn applies(self, nodes: usize) -> bool {
        match self {
            Self::Boundary => nodes >= 2,
            Self::Interior => nodes >= 3,
        }
    }
}

fn fuel_rates(spec: &ProblemSpecification, state: &StateVector) -> Vec<f64> {
    let t = &state.t_fuel;
    let n_z = spec.n_z();
    let capacity = spec.heat_capacity_fuel_per_node();
    let h = spec.heat_transfer_coefficient();
    let power = state.power(spec);

    let mut rates: Vec<f64> = spec
        .power_profile()
        .iter()
        .zip(t)
        .zip(&state.t_coolant)
        .map(|((weight, t_fuel), t_coolant)| {
            power * weight / capacity - (t_fuel - t_coolant) * h / capacity
        })
        .collect();

    let conduction = spec.thermal_conductivity_fuel() / (capacity * spec.d_z().powi(2));

    if Stencil::Boundary.applies(n_z) {
        let last = n_z - 1;
        rates[0] -= conduction * (t[1] - t[0]);
        rates[last] -= conduction * (t[last - 1] - t[last]);
    }

    if Stencil::Interior.applies(n_z) {
        for (j, window) in t.windows(3).enumerate() {
            rates[j + 1] -= conduction * (window[0] + window[2] - 2.0 * window[1]);
        }
    }

    rates
}

fn coolant_rates(spec: &ProblemSpecification, state: &StateVector) -> Vec<f64> {
    let t = &state.t_coolant;
    let capacity = spec.heat_capacity_coolant_per_node();
    let h = spec.heat_transfer_coefficient();
    let advection = spec.speed_coolant() / spec.d_z();

    let mut rates: Vec<f64> = state
        .t_fuel
        .iter()
        .zip(t)
        .map(|(t_fuel, t_coolant)| (t_fuel - t_coolant) * h / capacity)
        .collect();

    for (rate, window) in rates[1..].iter_mut().zip(t.windows(2)) {
        *rate -= advection * (window[1] - window[0]);
    }

    if let (Some(rate), Some(first)) = (rates.first_mut(), t.first()) {
        *rate -= advection * (first - spec.inlet_temperature());
    }

    rates
}
