use anyhow::{ensure, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use std::ffi::OsStr;
use std::path::PathBuf;

extern crate thermolab_core;
use thermolab_core::prelude::*;
use thermolab_core::thermo::{fuel_cell, reforming};

/// Wrapper for thermolab.
/// After running `cargo build --release`, run a 5 s launch of the bundled vehicle with
/// ```bash
/// ./target/release/thermolab-cli drive --launch-secs 5
/// ```
/// or replay a scripted drive with
/// ```bash
/// ./target/release/thermolab-cli drive --veh-file thermolab-core/resources/ev_x_800v.yaml --script-file thermolab-core/resources/launch_and_brake.csv --res-fmt json
/// ```
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct ThermolabApi {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive the powertrain simulation through a pedal script
    Drive {
        #[clap(long, value_parser)]
        /// Path to vehicle file (yaml or json), EV-X 800V Concept if omitted
        veh_file: Option<PathBuf>,
        #[clap(long, value_parser)]
        /// Path to sim params file (yaml or json)
        params_file: Option<PathBuf>,
        #[clap(long, value_parser)]
        /// Path to drive script file (csv, yaml or json)
        script_file: Option<PathBuf>,
        #[clap(long, value_parser, default_value_t = 5.0)]
        /// Length of the accelerator-held launch used when no script is given, s
        launch_secs: f64,
        #[clap(long, value_parser)]
        /// Overrides the script time step, s
        dt: Option<f64>,
        #[clap(long, value_enum, default_value = "summary")]
        /// How to return results
        res_fmt: ResFmt,
    },
    /// Reversible hydrogen fuel-cell voltage
    FuelCell {
        #[clap(long, value_parser)]
        /// Temperature, K
        temp_k: f64,
        #[clap(long, value_parser, default_value_t = 1.0)]
        /// H2 partial pressure, atm
        p_h2: f64,
        #[clap(long, value_enum, default_value = "summary")]
        res_fmt: ResFmt,
    },
    /// Methane steam-reforming equilibrium
    Reforming {
        #[clap(long, value_parser)]
        /// Temperature, K
        temp_k: f64,
        #[clap(long, value_parser)]
        /// Total pressure, atm
        pressure_atm: f64,
        #[clap(long, value_enum, default_value = "summary")]
        res_fmt: ResFmt,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResFmt {
    Summary,
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
struct FuelCellResults {
    temp_k: f64,
    p_h2_atm: f64,
    gibbs_kj_per_mol: f64,
    reversible_voltage_v: f64,
    gibbs_at_p_h2_kj_per_mol: f64,
    voltage_at_p_h2_v: f64,
}

fn print_results<T: Serialize>(results: &T, res_fmt: ResFmt, summary: String) -> anyhow::Result<()> {
    match res_fmt {
        ResFmt::Summary => println!("{summary}"),
        ResFmt::Json => println!("{}", serde_json::to_string_pretty(results)?),
        ResFmt::Yaml => print!("{}", serde_yaml::to_string(results)?),
    }
    Ok(())
}

fn load_script(script_file: Option<PathBuf>, launch_secs: f64) -> anyhow::Result<DriveScript> {
    match script_file {
        Some(path) => {
            log::debug!("loading drive script from {path:?}");
            if path.extension().and_then(OsStr::to_str) == Some("csv") {
                DriveScript::from_csv_file(&path)
            } else {
                DriveScript::from_file(&path)
            }
        }
        None => Ok(DriveScript::launch(launch_secs)),
    }
}

fn drive(
    veh_file: Option<PathBuf>,
    params_file: Option<PathBuf>,
    script_file: Option<PathBuf>,
    launch_secs: f64,
    dt: Option<f64>,
    res_fmt: ResFmt,
) -> anyhow::Result<()> {
    let veh = match veh_file {
        Some(path) => VehicleSpec::from_file(&path)
            .with_context(|| format!("Could not load vehicle from {path:?}"))?,
        None => VehicleSpec::default(),
    };
    let params = match params_file {
        Some(path) => Some(
            SimParams::from_file(&path)
                .with_context(|| format!("Could not load sim params from {path:?}"))?,
        ),
        None => None,
    };
    let mut script = load_script(script_file, launch_secs)?;
    if let Some(dt) = dt {
        script.dt_s = dt;
    }
    script.init()?;

    let mut sd = SimDrive::new(veh, params)?;
    let telemetry = sd.walk(&script)?;
    let summary = format!(
        "{} after {:.2} s of {:?}\n{}",
        sd.veh().name,
        sd.time_s(),
        script.name,
        telemetry.summary()
    );
    print_results(&telemetry, res_fmt, summary)
}

fn fuel_cell_voltage(temp_k: f64, p_h2: f64, res_fmt: ResFmt) -> anyhow::Result<()> {
    ensure!(temp_k > 0.0, "Temperature must be positive: {temp_k} K");
    ensure!(p_h2 > 0.0, "H2 partial pressure must be positive: {p_h2} atm");
    let results = FuelCellResults {
        temp_k,
        p_h2_atm: p_h2,
        gibbs_kj_per_mol: fuel_cell::gibbs_kj_per_mol(temp_k),
        reversible_voltage_v: fuel_cell::reversible_voltage(temp_k),
        gibbs_at_p_h2_kj_per_mol: fuel_cell::gibbs_at_partial_pressure(temp_k, p_h2),
        voltage_at_p_h2_v: fuel_cell::voltage_at_partial_pressure(temp_k, p_h2),
    };
    let summary = format!(
        "T = {} K: dG = {:.3} kJ/mol, E = {:.4} V\npH2 = {} atm: dG = {:.3} kJ/mol, E = {:.4} V",
        temp_k,
        results.gibbs_kj_per_mol,
        results.reversible_voltage_v,
        p_h2,
        results.gibbs_at_p_h2_kj_per_mol,
        results.voltage_at_p_h2_v
    );
    print_results(&results, res_fmt, summary)
}

fn reforming_equilibrium(temp_k: f64, pressure_atm: f64, res_fmt: ResFmt) -> anyhow::Result<()> {
    ensure!(temp_k > 0.0, "Temperature must be positive: {temp_k} K");
    ensure!(
        pressure_atm > 0.0,
        "Total pressure must be positive: {pressure_atm} atm"
    );
    let eq = reforming::equilibrium(temp_k, pressure_atm);
    let summary = format!(
        "T = {} K, p = {} atm: dG = {:.3} kJ/mol, Kp = {:.4e}, extent = {:.4}\nCH4 {:.4}  H2O {:.4}  CO {:.4}  H2 {:.4}",
        eq.temp_k,
        eq.pressure_atm,
        eq.gibbs_kj_per_mol,
        eq.kp,
        eq.extent,
        eq.fractions.ch4,
        eq.fractions.h2o,
        eq.fractions.co,
        eq.fractions.h2
    );
    print_results(&eq, res_fmt, summary)
}

pub fn main() -> anyhow::Result<()> {
    match ThermolabApi::parse().command {
        Command::Drive {
            veh_file,
            params_file,
            script_file,
            launch_secs,
            dt,
            res_fmt,
        } => drive(veh_file, params_file, script_file, launch_secs, dt, res_fmt),
        Command::FuelCell {
            temp_k,
            p_h2,
            res_fmt,
        } => fuel_cell_voltage(temp_k, p_h2, res_fmt),
        Command::Reforming {
            temp_k,
            pressure_atm,
            res_fmt,
        } => reforming_equilibrium(temp_k, pressure_atm, res_fmt),
    }
}
