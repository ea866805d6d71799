#![allow(dead_code)]

use pke_reactor::{
    AxialProfile, Feedback, Kinetics, Mesh, ProblemSpecification, ReactivityProfile, Thermal,
    adaptive::{Config, Method},
};
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

pub fn t(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(value)
}

pub fn hz(value: f64) -> Frequency {
    Frequency::new::<hertz>(value)
}

pub fn tight() -> Config {
    Config {
        method: Method::Dopri5,
        abs_tol: 1e-12,
        rel_tol: 1e-10,
        ..Config::default()
    }
}

pub fn mesh(nodes: usize) -> Mesh {
    Mesh {
        nodes,
        total_height: Length::new::<meter>(3.0),
        power_profile: AxialProfile::Uniform,
    }
}

/// One precursor group with `beta / generation_time = 70 /s`.
pub fn one_group(reactivity: ReactivityProfile) -> Kinetics {
    Kinetics {
        generation_time: Time::new::<second>(1e-4),
        source: hz(0.0),
        delayed_fractions: vec![0.007],
        decay_rates: vec![hz(0.1)],
        driving_reactivity: reactivity,
    }
}

pub fn no_feedback() -> Feedback {
    Feedback {
        fuel: 0.0,
        coolant: 0.0,
        temperature_zero: t(300.0),
    }
}

pub fn thermal(inlet: f64) -> Thermal {
    Thermal {
        energy_fission: Energy::new::<joule>(3.2e-11),
        heat_capacity_fuel: HeatCapacity::new::<joule_per_kelvin>(150.0),
        heat_capacity_coolant: HeatCapacity::new::<joule_per_kelvin>(300.0),
        heat_transfer_coefficient: ThermalConductance::new::<watt_per_kelvin>(60.0),
        thermal_conductivity_fuel: DiffusionCoefficient::new::<square_meter_per_second>(0.02),
        speed_coolant: Velocity::new::<meter_per_second>(2.0),
        inlet_temperature: t(inlet),
    }
}

pub fn spec(mesh: Mesh, kinetics: Kinetics, feedback: Feedback) -> ProblemSpecification {
    ProblemSpecification::new(mesh, kinetics, feedback, thermal(300.0))
        .expect("test specification should be valid")
}
