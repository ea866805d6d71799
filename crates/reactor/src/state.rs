//! The structured state of the reactor and its flat-array encoding.

use std::{fmt, ops::Range};

use crate::{ProblemSpecification, ShapeError};

/// Offsets of each field within the flat state array.
///
/// The layout is `[n_neutron, n_delayed.., t_fuel.., t_coolant..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    n_delayed: usize,
    n_z: usize,
}

impl Layout {
    pub(crate) fn new(n_delayed: usize, n_z: usize) -> Self {
        Self { n_delayed, n_z }
    }

    /// Index of the neutron population.
    pub const NEUTRON: usize = 0;

    #[must_use]
    pub fn delayed(&self) -> Range<usize> {
        1..1 + self.n_delayed
    }

    #[must_use]
    pub fn fuel(&self) -> Range<usize> {
        let start = self.delayed().end;
        start..start + self.n_z
    }

    #[must_use]
    pub fn coolant(&self) -> Range<usize> {
        let start = self.fuel().end;
        start..start + self.n_z
    }

    /// Total number of flat values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coolant().end
    }

    /// Always `false`: the neutron population is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Instantaneous values of every tracked quantity.
///
/// The same structure holds either an absolute state, as produced by the
/// integrator, or its time derivative, as produced by
/// [`gradient`](crate::gradient). Only absolute states have meaningful
/// [observables](StateVector::observables).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Time in s.
    pub time: f64,
    pub n_neutron: f64,
    /// One entry per delayed neutron precursor group.
    pub n_delayed: Vec<f64>,
    /// Fuel temperature of each node in K.
    pub t_fuel: Vec<f64>,
    /// Coolant temperature of each node in K.
    pub t_coolant: Vec<f64>,
}

/// Derived quantities of an absolute state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observables {
    pub time: f64,
    pub n_neutron: f64,
    /// Thermal power in W.
    pub power: f64,
    pub driving_reactivity: f64,
    pub fuel_reactivity: f64,
    pub coolant_reactivity: f64,
    pub total_reactivity: f64,
    pub t_fuel_mean: f64,
    pub t_coolant_mean: f64,
}

impl StateVector {
    /// Creates an all-zero state sized for `spec`.
    #[must_use]
    pub fn zeros(spec: &ProblemSpecification, time: f64) -> Self {
        Self {
            time,
            n_neutron: 0.0,
            n_delayed: vec![0.0; spec.n_delayed()],
            t_fuel: vec![0.0; spec.n_z()],
            t_coolant: vec![0.0; spec.n_z()],
        }
    }

    /// Creates a state with no precursors and every node at the feedback
    /// reference temperature.
    #[must_use]
    pub fn at_reference(spec: &ProblemSpecification, time: f64, n_neutron: f64) -> Self {
        let temperature = spec.temperature_zero();
        Self {
            time,
            n_neutron,
            n_delayed: vec![0.0; spec.n_delayed()],
            t_fuel: vec![temperature; spec.n_z()],
            t_coolant: vec![temperature; spec.n_z()],
        }
    }

    /// Decodes a flat array laid out per [`ProblemSpecification::layout`].
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `array` does not have exactly
    /// `n_state_variables` entries.
    pub fn from_array(
        spec: &ProblemSpecification,
        time: f64,
        array: &[f64],
    ) -> Result<Self, ShapeError> {
        let layout = spec.layout();
        ShapeError::check("state array", layout.len(), array.len())?;

        Ok(Self {
            time,
            n_neutron: array[Layout::NEUTRON],
            n_delayed: array[layout.delayed()].to_vec(),
            t_fuel: array[layout.fuel()].to_vec(),
            t_coolant: array[layout.coolant()].to_vec(),
        })
    }

    /// Encodes the state into a freshly allocated flat array.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if a field's length disagrees with `spec`.
    pub fn to_array(&self, spec: &ProblemSpecification) -> Result<Vec<f64>, ShapeError> {
        let mut array = vec![0.0; spec.n_state_variables()];
        self.write_array(spec, &mut array)?;
        Ok(array)
    }

    /// Encodes the state into `array` in place.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `array` or any field has the wrong length.
    pub fn write_array(
        &self,
        spec: &ProblemSpecification,
        array: &mut [f64],
    ) -> Result<(), ShapeError> {
        let layout = spec.layout();
        ShapeError::check("state array", layout.len(), array.len())?;
        self.check_shape(spec)?;

        array[Layout::NEUTRON] = self.n_neutron;
        array[layout.delayed()].copy_from_slice(&self.n_delayed);
        array[layout.fuel()].copy_from_slice(&self.t_fuel);
        array[layout.coolant()].copy_from_slice(&self.t_coolant);
        Ok(())
    }

    /// Checks that every field has the length `spec` requires.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] naming the first mismatched field.
    pub fn check_shape(&self, spec: &ProblemSpecification) -> Result<(), ShapeError> {
        ShapeError::check("precursor groups", spec.n_delayed(), self.n_delayed.len())?;
        ShapeError::check("fuel temperatures", spec.n_z(), self.t_fuel.len())?;
        ShapeError::check("coolant temperatures", spec.n_z(), self.t_coolant.len())
    }

    // --- Observables ---

    /// Arithmetic mean of the fuel node temperatures.
    #[must_use]
    pub fn t_fuel_mean(&self) -> f64 {
        mean(&self.t_fuel)
    }

    /// Arithmetic mean of the coolant node temperatures.
    #[must_use]
    pub fn t_coolant_mean(&self) -> f64 {
        mean(&self.t_coolant)
    }

    #[must_use]
    pub fn driving_reactivity(&self, spec: &ProblemSpecification) -> f64 {
        spec.driving_reactivity().evaluate(self.time)
    }

    #[must_use]
    pub fn fuel_reactivity(&self, spec: &ProblemSpecification) -> f64 {
        spec.feedback_fuel() * (self.t_fuel_mean() - spec.temperature_zero())
    }

    #[must_use]
    pub fn coolant_reactivity(&self, spec: &ProblemSpecification) -> f64 {
        spec.feedback_coolant() * (self.t_coolant_mean() - spec.temperature_zero())
    }

    /// Driving plus feedback reactivity, in dollars.
    #[must_use]
    pub fn total_reactivity(&self, spec: &ProblemSpecification) -> f64 {
        self.driving_reactivity(spec) + self.fuel_reactivity(spec) + self.coolant_reactivity(spec)
    }

    /// Thermal power in W.
    #[must_use]
    pub fn power(&self, spec: &ProblemSpecification) -> f64 {
        self.n_neutron * spec.energy_fission() / spec.generation_time()
    }

    /// Collects every derived quantity in one pass.
    #[must_use]
    pub fn observables(&self, spec: &ProblemSpecification) -> Observables {
        let driving_reactivity = self.driving_reactivity(spec);
        let fuel_reactivity = self.fuel_reactivity(spec);
        let coolant_reactivity = self.coolant_reactivity(spec);

        Observables {
            time: self.time,
            n_neutron: self.n_neutron,
            power: self.power(spec),
            driving_reactivity,
            fuel_reactivity,
            coolant_reactivity,
            total_reactivity: driving_reactivity + fuel_reactivity + coolant_reactivity,
            t_fuel_mean: self.t_fuel_mean(),
            t_coolant_mean: self.t_coolant_mean(),
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "time:       {}", self.time)?;
        writeln!(f, "n_neutron:  {}", self.n_neutron)?;
        writeln!(f, "precursors: {:?}", self.n_delayed)?;
        writeln!(f, "t_fuel:     {:?}", self.t_fuel)?;
        write!(f, "t_coolant:  {:?}", self.t_coolant)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
