use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use pke_cli::{
    report,
    scenario::{Scenario, Transient},
};
use pke_reactor::run;

fn cli() -> Command {
    Command::new("pke")
        .about("Point-kinetics reactor transient with 1-D fuel and coolant heat transport")
        .arg(
            Arg::new("scenario")
                .required(true)
                .value_name("SCENARIO")
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML scenario file"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .default_value("output")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory the CSV results are written to"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log every output time"),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let scenario_path = matches
        .get_one::<PathBuf>("scenario")
        .context("missing scenario path")?;
    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .context("missing output directory")?;

    simulate(scenario_path, output_dir)
}

fn simulate(scenario_path: &Path, output_dir: &Path) -> Result<()> {
    let Transient {
        name,
        spec,
        times,
        initial,
        config,
    } = Scenario::load(scenario_path)
        .and_then(|scenario| scenario.resolve())
        .with_context(|| format!("invalid scenario {}", scenario_path.display()))?;

    log::info!("running scenario {name:?}");

    let states = run(&initial, &spec, &times, &config)
        .with_context(|| format!("scenario {name:?} failed"))?;

    let path = output_dir.join(format!("{name}.csv"));
    report::write_csv_file(&path, &spec, &states)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if let Some(last) = states.last() {
        let obs = last.observables(&spec);
        log::info!(
            "t = {:e} s: power = {:e} W, fuel = {:.2} K, coolant = {:.2} K",
            obs.time,
            obs.power,
            obs.t_fuel_mean,
            obs.t_coolant_mean,
        );
    }
    log::info!("wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn parses_arguments() {
        let matches = cli()
            .try_get_matches_from(["pke", "scenarios/ramp.toml", "--output-dir", "out", "-v"])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("scenario").unwrap(),
            &PathBuf::from("scenarios/ramp.toml")
        );
        assert_eq!(
            matches.get_one::<PathBuf>("output-dir").unwrap(),
            &PathBuf::from("out")
        );
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn output_dir_defaults_to_output() {
        let matches = cli().try_get_matches_from(["pke", "a.toml"]).unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("output-dir").unwrap(),
            &PathBuf::from("output")
        );
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn scenario_is_required() {
        assert!(cli().try_get_matches_from(["pke"]).is_err());
    }
}
