//! Command line argument parsing for the rowgroup CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ComparisonPolicy, DEFAULT_OUTPUT_FILE, GroupingConfig};

/// rowgroup - Group records that share a value in the same column
#[derive(Parser, Debug, Clone)]
#[command(name = "rowgroup")]
#[command(about = "Group quoted numeric records that share a value in the same column")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RowGroupArgs {
    /// Input file with one record per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file for the groups (overwritten)
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Which rows may be compared with each other
    #[arg(long, default_value = "same-length")]
    pub policy: PolicyArg,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Summary format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl RowGroupArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }

    /// Build the grouping configuration these arguments describe.
    pub fn to_config(&self) -> GroupingConfig {
        GroupingConfig::default()
            .with_policy(self.policy.into())
            .with_output_path(self.output.clone())
    }
}

/// Comparison policies available in the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyArg {
    /// Only rows with the same number of fields are compared
    SameLength,
    /// Rows of any length are compared over their common positions
    AnyLength,
}

impl From<PolicyArg> for ComparisonPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::SameLength => ComparisonPolicy::SameLength,
            PolicyArg::AnyLength => ComparisonPolicy::AnyLength,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
