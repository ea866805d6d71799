//! CSV export of simulation results.
//!
//! One row per output state, one column per observable:
//!
//! ```csv
//! time,n_neutron,power,driving_reactivity,fuel_reactivity,coolant_reactivity,total_reactivity,t_fuel_mean,t_coolant_mean
//! 0e0,1e0,3.2e-7,1e-1,0e0,0e0,1e-1,5.5e2,5.5e2
//! ```

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use pke_reactor::{Observables, ProblemSpecification, StateVector};

/// Column names, in output order.
pub const COLUMNS: [&str; 9] = [
    "time",
    "n_neutron",
    "power",
    "driving_reactivity",
    "fuel_reactivity",
    "coolant_reactivity",
    "total_reactivity",
    "t_fuel_mean",
    "t_coolant_mean",
];

/// Writes a header line followed by one row per state.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_csv<W: Write>(
    mut writer: W,
    spec: &ProblemSpecification,
    states: &[StateVector],
) -> io::Result<()> {
    writeln!(writer, "{}", COLUMNS.join(","))?;

    for state in states {
        let row = values(&state.observables(spec))
            .iter()
            .map(|value| format!("{value:e}"))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{row}")?;
    }

    writer.flush()
}

/// Writes the CSV report to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written.
pub fn write_csv_file(
    path: &Path,
    spec: &ProblemSpecification,
    states: &[StateVector],
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), spec, states)
}

fn values(obs: &Observables) -> [f64; 9] {
    [
        obs.time,
        obs.n_neutron,
        obs.power,
        obs.driving_reactivity,
        obs.fuel_reactivity,
        obs.coolant_reactivity,
        obs.total_reactivity,
        obs.t_fuel_mean,
        obs.t_coolant_mean,
    ]
}
