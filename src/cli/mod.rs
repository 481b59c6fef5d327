// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod compare;
pub mod extract;

pub use args::{Cli, Commands, CompareArgs, ExtractArgs};

use anyhow::Result;

use crate::config::Config;

/// Loads and validates configuration, then runs the chosen command.
///
/// # Errors
/// Returns error from configuration loading or the command itself.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Extract(args) => {
            config.validate()?;
            extract::handle(args, &config, cli.verbose)
        }
        Commands::Compare(args) => compare::handle(args, &config, cli.verbose),
        Commands::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
