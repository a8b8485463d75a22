//! Align subcommand - find the offset of target subtitles and fix them.

use crate::srt;
use crate::stream::load_stream;
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::time::Instant;
use subalign_core::lang::Language;
use subalign_core::search::{Alignment, SearchConfig, align};

/// CLI arguments for subtitle alignment.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Reference stream (SRT, TSV or JSON) with correct timing
    pub reference: PathBuf,

    /// Target SRT subtitles to re-time
    pub target: PathBuf,

    /// Output SRT path (default: target with .aligned.srt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Language shared by both streams
    #[arg(short, long, value_enum, default_value_t = Language::En)]
    pub language: Language,

    /// Give every word its full subtitle span instead of a proportional share
    #[arg(long)]
    pub keep_subs: bool,

    /// Write a JSON report of every search step to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print a preview of the aligned subtitles to stdout
    #[arg(long)]
    pub preview: bool,

    #[command(flatten)]
    pub search_config: SearchConfig,
}

/// Resolved configuration for subtitle alignment.
#[derive(Debug)]
pub struct Config {
    pub reference: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
    pub language: Language,
    pub keep_subs: bool,
    pub report: Option<PathBuf>,
    pub preview: bool,
    pub search_config: SearchConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        args.search_config.validate()?;

        let output = args
            .output
            .unwrap_or_else(|| args.target.with_extension("aligned.srt"));

        Ok(Self {
            reference: args.reference,
            target: args.target,
            output,
            language: args.language,
            keep_subs: args.keep_subs,
            report: args.report,
            preview: args.preview,
            search_config: args.search_config,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        reference = ?config.reference.display(),
        target = ?config.target.display(),
        output = ?config.output.display(),
        language = %config.language,
        "aligning subtitles"
    );

    let reference = load_stream(&config.reference, config.keep_subs)?;
    let subtitles = srt::read_subtitles(&config.target)?;
    let target = srt::to_stream(&subtitles, config.keep_subs);

    let s = Instant::now();

    let alignment = align(&reference, &target, config.language, &config.search_config)
        .wrap_err("failed to align subtitles")?;

    let d = s.elapsed();
    tracing::info!(duration = %format_secs(d.as_secs_f64()), "search completed");

    log_alignment(&alignment);

    let aligned = srt::shift_subtitles(subtitles, alignment.offset);

    if config.preview {
        print!("{}", srt::preview_subtitles(&aligned, 3, 3));
    }

    srt::write_subtitles(&config.output, aligned)?;

    if let Some(report) = &config.report {
        tracing::info!(path = ?report.display(), "write report");

        std::fs::write(report, serde_json::to_string_pretty(&alignment)?)
            .wrap_err_with(|| format!("failed to write report: {:?}", report.display()))?;
    }

    Ok(())
}

fn log_alignment(alignment: &Alignment) {
    let offset = alignment.offset;

    if offset < 0.0 {
        tracing::info!(offset = %format_secs(-offset), "subtitles were shown too late");
    } else if offset > 0.0 {
        tracing::info!(offset = %format_secs(offset), "subtitles were shown too early");
    } else {
        tracing::info!("subtitles are already in sync");
    }
}

/// Format seconds as a string with two decimal places.
fn format_secs(secs: f64) -> String {
    format!("{:.2}s", secs)
}
