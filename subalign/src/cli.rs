//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Debug, Parser)]
#[command(name = "subalign")]
#[command(about = "Subtitle re-synchronization tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the offset of target subtitles against a reference and fix them
    Align(crate::align::Args),

    /// Shift subtitles by a fixed number of seconds
    Shift(crate::shift::Args),

    /// Export the token stream read from a subtitle or transcript file
    Tokens(crate::tokens::Args),
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Align(args) => crate::align::execute(args.try_into()?),
        Commands::Shift(args) => crate::shift::execute(args.try_into()?),
        Commands::Tokens(args) => crate::tokens::execute(args.try_into()?),
    }
}
