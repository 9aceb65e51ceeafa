use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Naiad hydrological model calibration engine.
#[derive(Parser)]
#[command(
    name = "naiad",
    version,
    about = "Calibrate daily rainfall-runoff models against observed discharge"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List available models, objectives, transformations and algorithm settings.
    Models(ModelsArgs),
    /// Simulate discharge for a model and parameter vector.
    Simulate(SimulateArgs),
    /// Calibrate a model against the observed discharge in the forcing file.
    Calibrate(CalibrateArgs),
}

/// Arguments for the `models` subcommand.
#[derive(clap::Args)]
pub struct ModelsArgs {
    /// Path for the JSON listing; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to daily forcing CSV (precipitation, temperature, day_of_year,
    /// discharge, optional pet).
    #[arg(short, long)]
    pub forcing: PathBuf,

    /// Path to catchment metadata JSON.
    #[arg(short, long)]
    pub catchment: PathBuf,

    /// Runoff model name.
    #[arg(short, long, default_value = "gr4j")]
    pub model: String,

    /// Optional snow model chained ahead of the runoff model.
    #[arg(long)]
    pub snow: Option<String>,

    /// Comma-separated parameter vector; model defaults when omitted.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Option<Vec<f64>>,

    /// Path for the simulated discharge CSV; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `calibrate` subcommand.
#[derive(clap::Args)]
pub struct CalibrateArgs {
    /// Path to daily forcing CSV (precipitation, temperature, day_of_year,
    /// discharge, optional pet).
    #[arg(short, long)]
    pub forcing: PathBuf,

    /// Path to catchment metadata JSON.
    #[arg(short, long)]
    pub catchment: PathBuf,

    /// Runoff model name.
    #[arg(short, long, default_value = "gr4j")]
    pub model: String,

    /// Optional snow model chained ahead of the runoff model.
    #[arg(long)]
    pub snow: Option<String>,

    /// Objective function driving the optimizer.
    #[arg(long, default_value = "kge")]
    pub objective: String,

    /// Transformation applied to both series before scoring.
    #[arg(long, default_value = "none")]
    pub transform: String,

    /// Number of complexes.
    #[arg(long)]
    pub n_complexes: Option<usize>,

    /// Window length for the relative-improvement stopping rule.
    #[arg(long)]
    pub k_stop: Option<usize>,

    /// Relative-improvement stopping threshold, in percent.
    #[arg(long)]
    pub p_convergence_threshold: Option<f64>,

    /// Normalized geometric range stopping threshold.
    #[arg(long)]
    pub geometric_range_threshold: Option<f64>,

    /// Evaluation budget.
    #[arg(long)]
    pub max_evaluations: Option<usize>,

    /// Random seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path for the calibration report JSON; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
