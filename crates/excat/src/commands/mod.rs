pub(crate) mod check;
pub(crate) mod generate;
pub(crate) mod init;
pub(crate) mod resolve;
pub(crate) mod scan;

use anyhow::Result;
use excat_config as cli;
use tracing::debug;

use crate::config::ResolvedConfig;

pub(crate) fn dispatch(cli: cli::Cli, resolved: &ResolvedConfig) -> Result<()> {
    debug!(config = %resolved.origin(), "settings loaded");
    match cli.command {
        cli::Commands::Scan(args) => scan::handle(args, resolved),
        cli::Commands::Check(args) => check::handle(args, resolved),
        cli::Commands::Generate(args) => generate::handle(args, resolved),
        cli::Commands::Resolve(args) => resolve::handle(args, resolved),
        cli::Commands::Init(args) => init::handle(args),
    }
}
