//! Shift subcommand - move subtitles by a fixed offset.

use crate::srt;
use eyre::{Result, ensure};
use std::path::PathBuf;

/// CLI arguments for shifting subtitles.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to input SRT file
    pub path: PathBuf,

    /// Seconds to add to every timestamp (negative moves subtitles earlier)
    #[arg(allow_negative_numbers = true)]
    pub offset: f64,

    /// Output SRT path (default: input with .shifted.srt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolved configuration for shifting subtitles.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub offset: f64,
    pub output: PathBuf,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        ensure!(args.offset.is_finite(), "offset must be finite: {}", args.offset);

        let output = args
            .output
            .unwrap_or_else(|| args.path.with_extension("shifted.srt"));

        Ok(Self {
            path: args.path,
            offset: args.offset,
            output,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.path.display(),
        output = ?config.output.display(),
        offset = config.offset,
        "shifting subtitles"
    );

    let subtitles = srt::read_subtitles(&config.path)?;

    srt::write_subtitles(&config.output, srt::shift_subtitles(subtitles, config.offset))
}
