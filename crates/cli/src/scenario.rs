//! TOML scenario files.
//!
//! A scenario names a transient and supplies every input of a
//! [`ProblemSpecification`] in SI units, the output times, and optionally the
//! initial state and solver settings:
//!
//! ```toml
//! name = "ramp"
//!
//! [output_times]
//! start = 0.0
//! stop = 10.0
//! count = 101
//!
//! [mesh]
//! nodes = 10
//! total_height = 3.0
//! power_profile = "cosine"
//!
//! [kinetics]
//! generation_time = 1e-4
//! source = 0.0
//! delayed_fractions = [0.007]
//! decay_rates = [0.1]
//! reactivity = { kind = "ramp", start_time = 1.0, stop_time = 2.0, start_value = 0.0, stop_value = 0.5 }
//!
//! [feedback]
//! fuel = -0.01
//! coolant = -0.005
//! temperature_zero = 550.0
//!
//! [thermal]
//! energy_fission = 3.2e-11
//! heat_capacity_fuel = 1e6
//! heat_capacity_coolant = 4e5
//! heat_transfer_coefficient = 2e5
//! thermal_conductivity_fuel = 1e-6
//! speed_coolant = 4.0
//! ```

use std::{fs, path::Path};

use pke_reactor::{
    AxialProfile, ConfigError, Feedback, Kinetics, Mesh, OutputTimes, ProblemSpecification,
    ReactivityProfile, StateVector, Thermal,
    adaptive::{Config, Method},
};
use serde::Deserialize;
use thiserror::Error;
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

/// Errors raised while reading or resolving a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    Parse(#[from] toml::de::Error),

    #[error("scenario name must not be empty")]
    EmptyName,

    #[error("scenario name {0:?} must be a plain file stem")]
    InvalidName(String),

    #[error("output_times needs either `values` or all of `start`, `stop`, and `count`")]
    AmbiguousOutputTimes,

    #[error("initial precursors: expected {expected} values, got {actual}")]
    PrecursorCount { expected: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A scenario as written in a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub output_times: OutputTimesInput,
    pub mesh: MeshInput,
    pub kinetics: KineticsInput,
    pub feedback: FeedbackInput,
    pub thermal: ThermalInput,
    #[serde(default)]
    pub initial: InitialInput,
    #[serde(default)]
    pub solver: SolverInput,
}

/// Output times as an explicit list or an evenly spaced range.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputTimesInput {
    pub values: Option<Vec<f64>>,
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshInput {
    pub nodes: usize,
    /// m
    pub total_height: f64,
    #[serde(default)]
    pub power_profile: PowerProfileInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerProfileInput {
    #[default]
    Uniform,
    Cosine,
    Custom(Vec<f64>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KineticsInput {
    /// s
    pub generation_time: f64,
    /// 1/s
    pub source: f64,
    pub delayed_fractions: Vec<f64>,
    /// 1/s
    pub decay_rates: Vec<f64>,
    pub reactivity: ReactivityInput,
}

/// Driving reactivity in dollars.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum ReactivityInput {
    Constant {
        value: f64,
    },
    Ramp {
        start_time: f64,
        stop_time: f64,
        start_value: f64,
        stop_value: f64,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackInput {
    /// $/K
    pub fuel: f64,
    /// $/K
    pub coolant: f64,
    /// K
    pub temperature_zero: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermalInput {
    /// J
    pub energy_fission: f64,
    /// J/K
    pub heat_capacity_fuel: f64,
    /// J/K
    pub heat_capacity_coolant: f64,
    /// W/K
    pub heat_transfer_coefficient: f64,
    /// m²/s
    pub thermal_conductivity_fuel: f64,
    /// m/s
    pub speed_coolant: f64,
    /// K, defaults to the feedback reference temperature.
    pub inlet_temperature: Option<f64>,
}

/// Initial neutron population and precursor inventories.
///
/// Fuel and coolant always start at the feedback reference temperature.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitialInput {
    #[serde(default = "default_n_neutron")]
    pub n_neutron: f64,
    pub precursors: Option<Vec<f64>>,
}

impl Default for InitialInput {
    fn default() -> Self {
        Self {
            n_neutron: default_n_neutron(),
            precursors: None,
        }
    }
}

fn default_n_neutron() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodInput {
    #[default]
    Dopri5,
    Dop853,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SolverInput {
    pub method: MethodInput,
    pub rel_tol: f64,
    pub abs_tol: f64,
    pub max_steps: u32,
    pub stiffness_check: Option<u32>,
}

impl Default for SolverInput {
    fn default() -> Self {
        let config = Config::default();
        Self {
            method: MethodInput::default(),
            rel_tol: config.rel_tol,
            abs_tol: config.abs_tol,
            max_steps: config.max_steps,
            stiffness_check: config.stiffness_check,
        }
    }
}

/// Everything needed to run a scenario.
#[derive(Debug, Clone)]
pub struct Transient {
    pub name: String,
    pub spec: ProblemSpecification,
    pub times: OutputTimes,
    pub initial: StateVector,
    pub config: Config,
}

impl Scenario {
    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario.
    pub fn from_toml(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// Validates the scenario and builds the specification, output times,
    /// initial state, and solver config.
    ///
    /// The initial state is taken at the first output time.
    ///
    /// # Errors
    ///
    /// Returns an error if any input is physically inconsistent.
    pub fn resolve(&self) -> Result<Transient, ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::EmptyName);
        }
        // The name becomes `<output-dir>/<name>.csv`.
        if self.name.contains(['/', '\\']) || self.name.starts_with('.') {
            return Err(ScenarioError::InvalidName(self.name.clone()));
        }

        let times = self.output_times.resolve()?;
        let spec = ProblemSpecification::new(
            self.mesh.resolve(),
            self.kinetics.resolve()?,
            self.feedback.resolve(),
            self.thermal.resolve(self.feedback.temperature_zero),
        )?;

        let mut initial = StateVector::at_reference(&spec, times.first(), self.initial.n_neutron);
        if let Some(precursors) = &self.initial.precursors {
            if precursors.len() != spec.n_delayed() {
                return Err(ScenarioError::PrecursorCount {
                    expected: spec.n_delayed(),
                    actual: precursors.len(),
                });
            }
            initial.n_delayed.clone_from(precursors);
        }

        Ok(Transient {
            name: self.name.clone(),
            spec,
            times,
            initial,
            config: self.solver.resolve(),
        })
    }
}

impl OutputTimesInput {
    fn resolve(&self) -> Result<OutputTimes, ScenarioError> {
        let times = match (&self.values, self.start, self.stop, self.count) {
            (Some(values), None, None, None) => OutputTimes::new(values.iter().copied()),
            (None, Some(start), Some(stop), Some(count)) => {
                OutputTimes::linspace(start, stop, count)
            }
            _ => return Err(ScenarioError::AmbiguousOutputTimes),
        };
        Ok(times.map_err(ConfigError::from)?)
    }
}

impl MeshInput {
    fn resolve(&self) -> Mesh {
        Mesh {
            nodes: self.nodes,
            total_height: Length::new::<meter>(self.total_height),
            power_profile: match &self.power_profile {
                PowerProfileInput::Uniform => AxialProfile::Uniform,
                PowerProfileInput::Cosine => AxialProfile::Cosine,
                PowerProfileInput::Custom(weights) => AxialProfile::Custom(weights.clone()),
            },
        }
    }
}

impl KineticsInput {
    fn resolve(&self) -> Result<Kinetics, ConfigError> {
        Ok(Kinetics {
            generation_time: Time::new::<second>(self.generation_time),
            source: Frequency::new::<hertz>(self.source),
            delayed_fractions: self.delayed_fractions.clone(),
            decay_rates: self
                .decay_rates
                .iter()
                .map(|rate| Frequency::new::<hertz>(*rate))
                .collect(),
            driving_reactivity: self.reactivity.resolve()?,
        })
    }
}

impl ReactivityInput {
    fn resolve(self) -> Result<ReactivityProfile, ConfigError> {
        match self {
            Self::Constant { value } => Ok(ReactivityProfile::constant(value)),
            Self::Ramp {
                start_time,
                stop_time,
                start_value,
                stop_value,
            } => ReactivityProfile::ramp(start_time, stop_time, start_value, stop_value),
        }
    }
}

impl FeedbackInput {
    fn resolve(self) -> Feedback {
        Feedback {
            fuel: self.fuel,
            coolant: self.coolant,
            temperature_zero: ThermodynamicTemperature::new::<kelvin>(self.temperature_zero),
        }
    }
}

impl ThermalInput {
    fn resolve(self, temperature_zero: f64) -> Thermal {
        Thermal {
            energy_fission: Energy::new::<joule>(self.energy_fission),
            heat_capacity_fuel: HeatCapacity::new::<joule_per_kelvin>(self.heat_capacity_fuel),
            heat_capacity_coolant: HeatCapacity::new::<joule_per_kelvin>(
                self.heat_capacity_coolant,
            ),
            heat_transfer_coefficient: ThermalConductance::new::<watt_per_kelvin>(
                self.heat_transfer_coefficient,
            ),
            thermal_conductivity_fuel: DiffusionCoefficient::new::<square_meter_per_second>(
                self.thermal_conductivity_fuel,
            ),
            speed_coolant: Velocity::new::<meter_per_second>(self.speed_coolant),
            inlet_temperature: ThermodynamicTemperature::new::<kelvin>(
                self.inlet_temperature.unwrap_or(temperature_zero),
            ),
        }
    }
}

impl SolverInput {
    fn resolve(self) -> Config {
        Config {
            method: match self.method {
                MethodInput::Dopri5 => Method::Dopri5,
                MethodInput::Dop853 => Method::Dop853,
            },
            abs_tol: self.abs_tol,
            rel_tol: self.rel_tol,
            max_steps: self.max_steps,
            stiffness_check: self.stiffness_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const MINIMAL: &str = r#"
        name = "step"

        [output_times]
        values = [0.0, 0.5, 1.0]

        [mesh]
        nodes = 4
        total_height = 2.0

        [kinetics]
        generation_time = 1e-4
        source = 0.0
        delayed_fractions = [0.002, 0.005]
        decay_rates = [0.1, 1.0]
        reactivity = { kind = "constant", value = 0.1 }

        [feedback]
        fuel = -0.01
        coolant = -0.02
        temperature_zero = 550.0

        [thermal]
        energy_fission = 3.2e-11
        heat_capacity_fuel = 400.0
        heat_capacity_coolant = 800.0
        heat_transfer_coefficient = 50.0
        thermal_conductivity_fuel = 0.5
        speed_coolant = 1.5
    "#;

    fn edit(from: &str, to: &str) -> String {
        assert!(MINIMAL.contains(from), "fixture does not contain {from:?}");
        MINIMAL.replace(from, to)
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let transient = Scenario::from_toml(MINIMAL).unwrap().resolve().unwrap();

        assert_eq!(transient.name, "step");
        assert_eq!(transient.times.as_slice(), &[0.0, 0.5, 1.0]);
        assert_eq!(transient.spec.n_z(), 4);
        assert_eq!(transient.spec.power_profile(), &[0.25; 4]);
        assert_relative_eq!(transient.spec.inlet_temperature(), 550.0);
        assert_relative_eq!(transient.spec.driving_reactivity().evaluate(3.0), 0.1);

        assert_eq!(transient.initial.time, 0.0);
        assert_eq!(transient.initial.n_neutron, 1.0);
        assert_eq!(transient.initial.n_delayed, vec![0.0, 0.0]);
        assert_eq!(transient.initial.t_fuel, vec![550.0; 4]);

        assert_eq!(transient.config, Config::default());
    }

    #[test]
    fn optional_sections_override_defaults() {
        let text = format!(
            "{MINIMAL}
            [initial]
            n_neutron = 5.0
            precursors = [1.0, 2.0]

            [solver]
            method = \"dop853\"
            rel_tol = 1e-9
            max_steps = 5000
            stiffness_check = 500
            "
        );
        let text = text.replace(
            "speed_coolant = 1.5",
            "speed_coolant = 1.5\ninlet_temperature = 500.0",
        );

        let transient = Scenario::from_toml(&text).unwrap().resolve().unwrap();

        assert_eq!(transient.initial.n_neutron, 5.0);
        assert_eq!(transient.initial.n_delayed, vec![1.0, 2.0]);
        assert_relative_eq!(transient.spec.inlet_temperature(), 500.0);
        assert_eq!(transient.config.method, Method::Dop853);
        assert_eq!(transient.config.rel_tol, 1e-9);
        assert_eq!(transient.config.abs_tol, Config::default().abs_tol);
        assert_eq!(transient.config.max_steps, 5000);
        assert_eq!(transient.config.stiffness_check, Some(500));
    }

    #[test]
    fn linspace_output_times_and_ramp_reactivity() {
        let text = edit("values = [0.0, 0.5, 1.0]", "start = 0.0\nstop = 2.0\ncount = 5")
            .replace(
                r#"reactivity = { kind = "constant", value = 0.1 }"#,
                r#"reactivity = { kind = "ramp", start_time = 0.0, stop_time = 1.0, start_value = 0.0, stop_value = 0.4 }"#,
            );

        let transient = Scenario::from_toml(&text).unwrap().resolve().unwrap();

        assert_eq!(transient.times.as_slice(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_relative_eq!(transient.spec.driving_reactivity().evaluate(0.5), 0.2);
    }

    #[test]
    fn power_profile_variants_parse() {
        let cosine = edit("total_height = 2.0", "total_height = 2.0\npower_profile = \"cosine\"");
        let transient = Scenario::from_toml(&cosine).unwrap().resolve().unwrap();
        let weights = transient.spec.power_profile();
        assert!(weights[1] > weights[0]);

        let custom = edit(
            "total_height = 2.0",
            "total_height = 2.0\npower_profile = { custom = [1.0, 1.0, 1.0, 5.0] }",
        );
        let transient = Scenario::from_toml(&custom).unwrap().resolve().unwrap();
        assert_relative_eq!(transient.spec.power_profile()[3], 0.625);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = edit("nodes = 4", "nodes = 4\nnode_count = 4");
        assert!(matches!(
            Scenario::from_toml(&text),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn output_times_must_be_one_form() {
        let text = edit("values = [0.0, 0.5, 1.0]", "values = [0.0, 1.0]\ncount = 3");
        let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
        assert!(matches!(err, ScenarioError::AmbiguousOutputTimes));
    }

    #[test]
    fn unordered_output_times_are_a_config_error() {
        let text = edit("values = [0.0, 0.5, 1.0]", "values = [0.0, 1.0, 0.5]");
        let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Config(ConfigError::OutputTimes(_))
        ));
    }

    #[test]
    fn reversed_ramp_is_a_config_error() {
        let text = edit(
            r#"reactivity = { kind = "constant", value = 0.1 }"#,
            r#"reactivity = { kind = "ramp", start_time = 2.0, stop_time = 1.0, start_value = 0.0, stop_value = 0.4 }"#,
        );
        let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Config(ConfigError::RampReversed { .. })
        ));
    }

    #[test]
    fn precursor_count_must_match_groups() {
        let text = format!("{MINIMAL}\n[initial]\nprecursors = [1.0]\n");
        let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::PrecursorCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let text = edit(r#"name = "step""#, r#"name = "  ""#);
        let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
        assert!(matches!(err, ScenarioError::EmptyName));
    }

    #[test]
    fn names_that_leave_the_output_dir_are_rejected() {
        for name in ["../escape", "runs/step", "runs\\step", "..", ".hidden"] {
            let text = edit(r#"name = "step""#, &format!("name = {name:?}"));
            let err = Scenario::from_toml(&text).unwrap().resolve().unwrap_err();
            assert!(
                matches!(&err, ScenarioError::InvalidName(rejected) if rejected == name),
                "{name} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn bundled_scenarios_resolve() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios");
        for name in ["constant.toml", "ramp.toml"] {
            let scenario = Scenario::load(&dir.join(name)).unwrap();
            assert!(scenario.resolve().is_ok(), "{name} should resolve");
        }
    }
}
