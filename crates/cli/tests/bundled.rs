use std::path::{Path, PathBuf};

use pke_cli::{
    report,
    scenario::{Scenario, Transient},
};
use pke_reactor::{StateVector, run};

fn bundled(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenarios")
        .join(name)
}

fn simulate(name: &str) -> (Transient, Vec<StateVector>) {
    let transient = Scenario::load(&bundled(name))
        .and_then(|scenario| scenario.resolve())
        .unwrap();
    let states = run(
        &transient.initial,
        &transient.spec,
        &transient.times,
        &transient.config,
    )
    .unwrap_or_else(|err| panic!("{name} should run to completion: {err}"));
    (transient, states)
}

#[test]
fn constant_scenario_settles_under_feedback() {
    let (transient, states) = simulate("constant.toml");

    assert_eq!(states.len(), transient.times.len());
    let last = states.last().unwrap().observables(&transient.spec);
    assert_eq!(last.time, 20.0);
    assert!(last.t_fuel_mean > 560.0);
    assert!(last.fuel_reactivity < 0.0);
    assert!(last.total_reactivity < last.driving_reactivity);
}

#[test]
fn ramp_scenario_runs_past_the_insertion() {
    let (transient, states) = simulate("ramp.toml");

    assert_eq!(states.len(), transient.times.len());
    for (state, time) in states.iter().zip(transient.times.iter()) {
        assert_eq!(state.time, time);
        assert!(state.n_neutron.is_finite() && state.n_neutron > 0.0);
    }

    let before = &states[10];
    let after = states.last().unwrap();
    assert_eq!(before.time, 1.0);
    assert_eq!(after.time, 30.0);
    assert!(after.n_neutron > before.n_neutron);
    assert!(after.total_reactivity(&transient.spec) > 0.2);
}

#[test]
fn ramp_scenario_report_has_one_row_per_output() {
    let (transient, states) = simulate("ramp.toml");

    let mut buffer = Vec::new();
    report::write_csv(&mut buffer, &transient.spec, &states).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(text.lines().count(), transient.times.len() + 1);
}
