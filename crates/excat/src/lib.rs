//! # excat
//!
//! **CLI Binary**
//!
//! This is the entry point for the `excat` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Discover and merge `excat.toml`
//! * Install the log subscriber
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod config;
mod error_hints;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use excat_config::Cli;
use tracing_subscriber::EnvFilter;

/// Entry point used by the `excat` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let resolved = config::discover(cli.global.config.as_deref())?;
    commands::dispatch(cli, &resolved)
}

/// Render an error chain plus any hints that apply to it.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

/// `RUST_LOG` wins; otherwise `-v` enables info and `-vv` debug.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose > 1)
        .try_init();
}
