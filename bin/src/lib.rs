//! Command line host for the rpe text engine
//!
//! Resolves configuration, then drives [`rpe_text::TextBuffer`] sessions over
//! files on disk for the subcommands in [`cli::Command`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod paths;

use anyhow::{Context, Result};
use cli::{Cli, Command};
use config::Config;
use std::io::Write;

/// Load configuration for `cli` and run its command, writing output to `out`
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let discovered = paths::discover(&cwd);
    let config =
        Config::load_with_overrides(cli.config.as_deref(), discovered.config_path.as_deref())?;
    tracing::debug!(?config, "loaded config");

    match cli.command {
        Command::Edit {
            path,
            keys,
            dry_run,
        } => commands::edit::run(&config, &path, &keys, dry_run, out).await,
        Command::Inspect { path } => commands::inspect::run(&config, &path, out).await,
    }
}
