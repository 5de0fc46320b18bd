//! Clap adapter for envfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It provides
//! [`EnvArgs`] and [`EnvSubcommand`], which embed into an application's clap
//! derive to get `env check|list|get|gen|infer` subcommands.
//!
//! The only bridge to the core is [`EnvArgs::into_action()`], which converts
//! parsed arguments into a [`ConfigAction`](crate::ConfigAction). From there,
//! everything flows through
//! [`EnvfigBuilder::handle()`](crate::EnvfigBuilder::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `env` subcommand group.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Env(EnvArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct EnvArgs {
    #[command(subcommand)]
    pub action: Option<EnvSubcommand>,
}

/// Available env subcommands.
#[derive(Debug, Subcommand)]
pub enum EnvSubcommand {
    /// Load and validate the configuration.
    Check,
    /// Show all resolved key-value pairs.
    List,
    /// Show the resolved value and description of one key.
    Get {
        /// Variable name (e.g. "DATABASE_URL").
        key: String,
    },
    /// Generate a commented `.env.example` from the schema.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Infer a schema from the `.env` file and print it as TOML.
    Infer,
}

impl EnvArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `env` (no subcommand) maps to `ConfigAction::Check`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(EnvSubcommand::Check) => ConfigAction::Check,
            Some(EnvSubcommand::List) => ConfigAction::List,
            Some(EnvSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(EnvSubcommand::Gen { output }) => ConfigAction::Gen { output },
            Some(EnvSubcommand::Infer) => ConfigAction::Infer,
        }
    }
}
