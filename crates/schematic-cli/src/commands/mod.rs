//! CLI command definitions and dispatch.

pub mod params;
pub mod resolve;
pub mod validate;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use schematic_common::config::EngineConfig;
use schematic_common::constants::BIN_NAME;

/// Resolve and validate parameterized component schematics.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON engine configuration file.
    #[arg(long, global = true, env = "SCHEMATIC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Instantiate a schematic with parameter values.
    Resolve(resolve::ResolveArgs),
    /// Check a schematic for structural problems.
    Validate(validate::ValidateArgs),
    /// List the parameters a schematic declares.
    Params(params::ParamsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    tracing::debug!(?config, "engine configuration");

    match cli.command {
        Command::Resolve(args) => resolve::execute(args, config),
        Command::Validate(args) => validate::execute(&args),
        Command::Params(args) => params::execute(&args),
    }
}
