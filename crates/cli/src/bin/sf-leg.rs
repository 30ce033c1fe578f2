use std::path::PathBuf;

use clap::Parser;
use log::info;
use sims_flanagan::export;
use sims_flanagan::scenario::{evaluate, load_leg};

const LOG_VAR: &str = "SF_LOG";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Evaluate a Sims-Flanagan low-thrust leg from a scenario file"
)]
struct Cli {
    /// Scenario file (YAML list, TOML) or directory of TOML scenarios
    #[arg(long)]
    scenario: PathBuf,

    /// Scenario name (case-insensitive); defaults to the first entry
    #[arg(long)]
    name: Option<String>,

    /// Largest absolute mismatch component still accepted as feasible (SI units)
    #[arg(long, default_value_t = 1.0e-3)]
    tolerance: f64,

    /// Write the configured leg as a versioned JSON archive
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write a per-segment CSV report (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full leg description before the evaluation summary
    #[arg(long, default_value_t = false)]
    describe: bool,
}

fn main() -> anyhow::Result<()> {
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        eprintln!("[warn] could not initialise logger");
    }

    let cli = Cli::parse();
    let (name, leg) = load_leg(&cli.scenario, cli.name.as_deref())?;
    info!("loaded leg '{}' from {}", name, cli.scenario.display());

    if cli.describe {
        print!("{leg}");
    }

    let report = evaluate(&name, &leg, cli.tolerance)?;

    println!("=== Leg '{}' ===", report.name);
    println!(
        "Epochs          : {} -> {} ({:.2} days, {} segments)",
        leg.t_i(),
        leg.t_f(),
        leg.t_f() - leg.t_i(),
        leg.throttles_len()
    );
    println!(
        "Mismatch r [m]  : [{:.6e}, {:.6e}, {:.6e}] |dr| = {:.6e}",
        report.mismatch[0], report.mismatch[1], report.mismatch[2], report.position_mismatch_m
    );
    println!(
        "Mismatch v [m/s]: [{:.6e}, {:.6e}, {:.6e}] |dv| = {:.6e}",
        report.mismatch[3], report.mismatch[4], report.mismatch[5], report.velocity_mismatch_m_s
    );
    println!("Mismatch m [kg] : {:.6}", report.mismatch[6]);
    let worst = report
        .constraints
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    println!(
        "Throttles       : {} segments, max |u|^2 - 1 = {:.6}",
        report.constraints.len(),
        worst
    );
    println!(
        "Approx. dv      : {:.3} m/s (constant-mass estimate)",
        report.approximate_delta_v_m_s
    );
    println!(
        "Feasible        : {}",
        if report.feasible { "yes" } else { "no" }
    );

    if let Some(path) = &cli.export {
        export::leg::write_json(export::writer_for_path(path)?, &leg)?;
        info!("leg archive written to {}", path.display());
    }

    if let Some(path) = &cli.csv {
        let mut writer = export::writer_for_path(path)?;
        export::segments::write_csv(&mut writer, &leg)?;
    }

    Ok(())
}
