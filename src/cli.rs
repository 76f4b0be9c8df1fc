//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tariff_lab::config::ScenarioConfig;

/// Household energy-economics explorer: tariffs, synthetic data privacy and
/// carbon-aware scheduling.
#[derive(Debug, Parser)]
#[command(name = "tariff-lab", version)]
pub struct Args {
    /// Load scenario from a TOML config file.
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (generic, maharashtra).
    #[arg(long)]
    pub preset: Option<String>,

    /// Override the random seed of every pipeline.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write chart-ready CSV series into this directory.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Start the JSON API after printing the reports.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Bill comparison and load-shifting impact.
    Tariff,
    /// Synthetic records and k-anonymity.
    Privacy,
    /// Lowest-carbon task window.
    Carbon,
    /// Every pipeline (default).
    All,
}

impl Command {
    pub fn includes(self, other: Command) -> bool {
        self == Command::All || self == other
    }
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::All)
    }

    /// Resolves the scenario source: `--scenario`, then `--preset`, then the generic preset.
    pub fn load_scenario(&self) -> anyhow::Result<ScenarioConfig> {
        let mut scenario = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(path)
                .with_context(|| format!("loading scenario {}", path.display()))?,
            (None, Some(name)) => ScenarioConfig::from_preset(name)?,
            (None, None) => ScenarioConfig::generic(),
        };
        if let Some(seed) = self.seed {
            scenario.set_seed(seed);
        }
        Ok(scenario)
    }
}
