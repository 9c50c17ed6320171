use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pythia forecasting model selector.
#[derive(Parser)]
#[command(
    name = "pythia",
    version,
    about = "Model selection and forecasting for univariate time series"
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
    /// Run the grid search and produce the final forecast.
    Select(SelectArgs),
    /// Print the cross-validation window layout without searching.
    Windows(WindowsArgs),
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pythia.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output forecast CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override forecast horizon length from config.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Wall-clock budget in seconds; candidates not started when it expires
    /// are skipped.
    #[arg(long = "time-budget")]
    pub time_budget: Option<u64>,
}

/// Arguments for the `windows` subcommand.
#[derive(clap::Args)]
pub struct WindowsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pythia.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}
