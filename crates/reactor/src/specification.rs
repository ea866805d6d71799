//! The immutable physical description of a reactor transient.
//!
//! Inputs are grouped by concern ([`Mesh`], [`Kinetics`], [`Feedback`],
//! [`Thermal`]) and carry `uom` quantities where a unit applies.
//! [`ProblemSpecification::new`] validates them once and caches SI values
//! plus the derived quantities the derivative needs on every call.

use uom::si::{
    diffusion_coefficient::square_meter_per_second,
    energy::joule,
    f64::{
        DiffusionCoefficient, Energy, Frequency, HeatCapacity, Length, ThermalConductance,
        ThermodynamicTemperature, Time, Velocity,
    },
    frequency::hertz,
    heat_capacity::joule_per_kelvin,
    length::meter,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

use crate::{AxialProfile, ConfigError, ReactivityProfile, state::Layout};

/// Axial discretisation of the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Number of axial nodes.
    pub nodes: usize,
    /// Height of the simulated domain.
    pub total_height: Length,
    /// Distribution of fission heat over the nodes.
    pub power_profile: AxialProfile,
}

/// Point-kinetics parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Kinetics {
    /// Mean neutron generation time.
    pub generation_time: Time,
    /// Neutron source strength.
    pub source: Frequency,
    /// Delayed neutron fraction of each precursor group.
    pub delayed_fractions: Vec<f64>,
    /// Decay rate of each precursor group.
    pub decay_rates: Vec<Frequency>,
    /// Externally imposed reactivity in dollars.
    pub driving_reactivity: ReactivityProfile,
}

/// Temperature feedback on reactivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    /// Fuel temperature coefficient in $/K.
    pub fuel: f64,
    /// Coolant temperature coefficient in $/K.
    pub coolant: f64,
    /// Temperature at which both feedback contributions vanish.
    pub temperature_zero: ThermodynamicTemperature,
}

/// Fuel and coolant heat transport parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermal {
    /// Energy released by one fission.
    pub energy_fission: Energy,
    /// Total heat capacity of the fuel.
    pub heat_capacity_fuel: HeatCapacity,
    /// Total heat capacity of the coolant.
    pub heat_capacity_coolant: HeatCapacity,
    /// Fuel to coolant heat transfer coefficient.
    pub heat_transfer_coefficient: ThermalConductance,
    /// Axial conduction constant of the fuel.
    pub thermal_conductivity_fuel: DiffusionCoefficient,
    /// Axial coolant speed, positive from node 0 upwards.
    pub speed_coolant: Velocity,
    /// Coolant temperature entering node 0.
    pub inlet_temperature: ThermodynamicTemperature,
}

/// Physical constants and derived quantities of one transient.
///
/// All values are stored in SI units. Every accessor is a pure projection
/// of the constructor inputs or of values derived once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSpecification {
    n_z: usize,
    total_height: f64,
    d_z: f64,
    heights: Vec<f64>,
    power_profile: Vec<f64>,

    betas: Vec<f64>,
    lambdas: Vec<f64>,
    beta: f64,
    generation_time: f64,
    source: f64,
    driving_reactivity: ReactivityProfile,

    feedback_fuel: f64,
    feedback_coolant: f64,
    temperature_zero: f64,

    energy_fission: f64,
    heat_capacity_fuel: f64,
    heat_capacity_coolant: f64,
    heat_transfer_coefficient: f64,
    thermal_conductivity_fuel: f64,
    speed_coolant: f64,
    inlet_temperature: f64,
}

impl ProblemSpecification {
    /// Validates the inputs and derives the mesh and kinetics quantities.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the mesh has no nodes, the height,
    /// generation time, or a heat capacity is not positive, the delayed
    /// fractions and decay rates differ in length, the power profile is
    /// malformed, or any value is not finite.
    pub fn new(
        mesh: Mesh,
        kinetics: Kinetics,
        feedback: Feedback,
        thermal: Thermal,
    ) -> Result<Self, ConfigError> {
        let Mesh {
            nodes,
            total_height,
            power_profile,
        } = mesh;
        let Kinetics {
            generation_time,
            source,
            delayed_fractions,
            decay_rates,
            driving_reactivity,
        } = kinetics;

        if nodes < 1 {
            return Err(ConfigError::NoNodes);
        }
        if delayed_fractions.len() != decay_rates.len() {
            return Err(ConfigError::GroupCountMismatch {
                fractions: delayed_fractions.len(),
                decay_rates: decay_rates.len(),
            });
        }

        let total_height = positive("total height", total_height.get::<meter>())?;
        let generation_time = positive("generation time", generation_time.get::<second>())?;
        let heat_capacity_fuel = positive(
            "fuel heat capacity",
            thermal.heat_capacity_fuel.get::<joule_per_kelvin>(),
        )?;
        let heat_capacity_coolant = positive(
            "coolant heat capacity",
            thermal.heat_capacity_coolant.get::<joule_per_kelvin>(),
        )?;

        let betas = delayed_fractions
            .iter()
            .map(|beta| finite("delayed fraction", *beta))
            .collect::<Result<Vec<_>, _>>()?;
        let lambdas = decay_rates
            .iter()
            .map(|lambda| finite("decay rate", lambda.get::<hertz>()))
            .collect::<Result<Vec<_>, _>>()?;
        driving_reactivity.validate()?;

        let d_z = total_height / nodes as f64;
        let heights: Vec<f64> = (0..nodes).map(|j| (j as f64 + 0.5) * d_z).collect();
        let power_profile = power_profile.weights(&heights, total_height)?;

        Ok(Self {
            n_z: nodes,
            total_height,
            d_z,
            heights,
            power_profile,

            beta: betas.iter().sum(),
            betas,
            lambdas,
            generation_time,
            source: finite("source", source.get::<hertz>())?,
            driving_reactivity,

            feedback_fuel: finite("fuel feedback", feedback.fuel)?,
            feedback_coolant: finite("coolant feedback", feedback.coolant)?,
            temperature_zero: finite(
                "reference temperature",
                feedback.temperature_zero.get::<kelvin>(),
            )?,

            energy_fission: finite("fission energy", thermal.energy_fission.get::<joule>())?,
            heat_capacity_fuel,
            heat_capacity_coolant,
            heat_transfer_coefficient: finite(
                "heat transfer coefficient",
                thermal.heat_transfer_coefficient.get::<watt_per_kelvin>(),
            )?,
            thermal_conductivity_fuel: finite(
                "fuel thermal conductivity",
                thermal
                    .thermal_conductivity_fuel
                    .get::<square_meter_per_second>(),
            )?,
            speed_coolant: finite(
                "coolant speed",
                thermal.speed_coolant.get::<meter_per_second>(),
            )?,
            inlet_temperature: finite(
                "inlet temperature",
                thermal.inlet_temperature.get::<kelvin>(),
            )?,
        })
    }

    // --- Mesh ---

    /// Number of axial nodes.
    #[must_use]
    pub fn n_z(&self) -> usize {
        self.n_z
    }

    /// Height of the simulated domain in m.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Node spacing in m.
    #[must_use]
    pub fn d_z(&self) -> f64 {
        self.d_z
    }

    /// Height of each node centre in m.
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Normalized share of the fission power deposited in each node.
    #[must_use]
    pub fn power_profile(&self) -> &[f64] {
        &self.power_profile
    }

    // --- Kinetics ---

    /// Number of delayed neutron precursor groups.
    #[must_use]
    pub fn n_delayed(&self) -> usize {
        self.betas.len()
    }

    #[must_use]
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Decay rates in 1/s.
    #[must_use]
    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    /// Total delayed neutron fraction, the sum of [`betas`](Self::betas).
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Generation time in s.
    #[must_use]
    pub fn generation_time(&self) -> f64 {
        self.generation_time
    }

    /// Neutron source strength in 1/s.
    #[must_use]
    pub fn source(&self) -> f64 {
        self.source
    }

    #[must_use]
    pub fn driving_reactivity(&self) -> &ReactivityProfile {
        &self.driving_reactivity
    }

    // --- Feedback ---

    #[must_use]
    pub fn feedback_fuel(&self) -> f64 {
        self.feedback_fuel
    }

    #[must_use]
    pub fn feedback_coolant(&self) -> f64 {
        self.feedback_coolant
    }

    /// Feedback reference temperature in K.
    #[must_use]
    pub fn temperature_zero(&self) -> f64 {
        self.temperature_zero
    }

    // --- Thermal ---

    /// Energy per fission in J.
    #[must_use]
    pub fn energy_fission(&self) -> f64 {
        self.energy_fission
    }

    /// Total fuel heat capacity in J/K.
    #[must_use]
    pub fn heat_capacity_fuel(&self) -> f64 {
        self.heat_capacity_fuel
    }

    /// Total coolant heat capacity in J/K.
    #[must_use]
    pub fn heat_capacity_coolant(&self) -> f64 {
        self.heat_capacity_coolant
    }

    /// Fuel heat capacity of a single node in J/K.
    #[must_use]
    pub fn heat_capacity_fuel_per_node(&self) -> f64 {
        self.heat_capacity_fuel / self.n_z as f64
    }

    /// Coolant heat capacity of a single node in J/K.
    #[must_use]
    pub fn heat_capacity_coolant_per_node(&self) -> f64 {
        self.heat_capacity_coolant / self.n_z as f64
    }

    /// Fuel to coolant heat transfer coefficient in W/K.
    #[must_use]
    pub fn heat_transfer_coefficient(&self) -> f64 {
        self.heat_transfer_coefficient
    }

    /// Axial fuel conduction constant in m²/s.
    #[must_use]
    pub fn thermal_conductivity_fuel(&self) -> f64 {
        self.thermal_conductivity_fuel
    }

    /// Coolant speed in m/s.
    #[must_use]
    pub fn speed_coolant(&self) -> f64 {
        self.speed_coolant
    }

    /// Coolant inlet temperature in K.
    #[must_use]
    pub fn inlet_temperature(&self) -> f64 {
        self.inlet_temperature
    }

    // --- Layout ---

    /// Length of the flat state vector: `2 * n_z + n_delayed + 1`.
    #[must_use]
    pub fn n_state_variables(&self) -> usize {
        self.layout().len()
    }

    /// Offsets of each field in the flat state vector.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.n_delayed(), self.n_z)
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the unit tests of this crate.

    use super::*;

    pub(crate) fn t(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    pub(crate) fn mesh(nodes: usize) -> Mesh {
        Mesh {
            nodes,
            total_height: Length::new::<meter>(2.0),
            power_profile: AxialProfile::Uniform,
        }
    }

    pub(crate) fn kinetics() -> Kinetics {
        Kinetics {
            generation_time: Time::new::<second>(1e-4),
            source: Frequency::new::<hertz>(10.0),
            delayed_fractions: vec![0.002, 0.005],
            decay_rates: vec![Frequency::new::<hertz>(0.1), Frequency::new::<hertz>(1.0)],
            driving_reactivity: ReactivityProfile::constant(0.2),
        }
    }

    pub(crate) fn feedback() -> Feedback {
        Feedback {
            fuel: -0.01,
            coolant: -0.02,
            temperature_zero: t(300.0),
        }
    }

    pub(crate) fn thermal() -> Thermal {
        Thermal {
            energy_fission: Energy::new::<joule>(3.2e-11),
            heat_capacity_fuel: HeatCapacity::new::<joule_per_kelvin>(400.0),
            heat_capacity_coolant: HeatCapacity::new::<joule_per_kelvin>(800.0),
            heat_transfer_coefficient: ThermalConductance::new::<watt_per_kelvin>(50.0),
            thermal_conductivity_fuel: DiffusionCoefficient::new::<square_meter_per_second>(0.5),
            speed_coolant: Velocity::new::<meter_per_second>(1.5),
            inlet_temperature: t(290.0),
        }
    }

    pub(crate) fn spec(nodes: usize) -> ProblemSpecification {
        ProblemSpecification::new(mesh(nodes), kinetics(), feedback(), thermal())
            .expect("fixture should be valid")
    }
}
