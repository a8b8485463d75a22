//! Tokens subcommand - export the token stream of a file.

use crate::stream::{load_stream, save_stream};
use eyre::Result;
use std::path::PathBuf;

/// CLI arguments for token export.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to input SRT, TSV or JSON file
    pub path: PathBuf,

    /// Output path, format chosen by extension (default: input with .json extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Give every word its full subtitle span instead of a proportional share
    #[arg(long)]
    pub keep_subs: bool,
}

/// Resolved configuration for token export.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub output: PathBuf,
    pub keep_subs: bool,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let output = args
            .output
            .unwrap_or_else(|| args.path.with_extension("json"));

        Ok(Self {
            path: args.path,
            output,
            keep_subs: args.keep_subs,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let stream = load_stream(&config.path, config.keep_subs)?;

    save_stream(&config.output, &stream)
}
