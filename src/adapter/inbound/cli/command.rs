//! Command-line interface definitions.
//!
//! Defines the CLI structure for colorpath using `clap`: solving a graph
//! file, inspecting the formulation it produces, and showing configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::model::{Integrality, ModelKind, ModelSettings};
use crate::domain::big_m::BigM;

/// Shortest path visiting every color, as a MILP and its dual
#[derive(Parser, Debug)]
#[command(name = "colorpath")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a graph file and print the result
    Solve(ModelArgs),

    /// Build the formulation for a graph file without solving it
    Inspect(ModelArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `colorpath config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
}

/// Optional path to a configuration file.
#[derive(Args, Debug, Default)]
pub struct ConfigPathArg {
    /// Configuration file; defaults apply when omitted
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Graph file plus per-run model overrides.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Graph file: node colors, edges `(a,b,w);...`, then `s t`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Build the dual program instead of the primal
    #[arg(long)]
    pub dual: bool,

    /// Solve the LP relaxation of the primal
    #[arg(long)]
    pub relaxed: bool,

    /// Subtour-elimination constant, a number or `nodes`
    #[arg(long, value_name = "N|nodes")]
    pub big_m: Option<BigM>,

    /// Colors the path must visit, comma separated
    #[arg(long, value_delimiter = ',', value_name = "COLORS")]
    pub palette: Option<Vec<i64>>,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

impl ModelArgs {
    /// Apply command-line overrides on top of configured settings.
    #[must_use]
    pub fn settings(&self, base: ModelSettings) -> ModelSettings {
        ModelSettings {
            big_m: self.big_m.unwrap_or(base.big_m),
            kind: if self.dual { ModelKind::Dual } else { base.kind },
            integrality: if self.relaxed {
                Integrality::Relaxed
            } else {
                base.integrality
            },
        }
    }
}
