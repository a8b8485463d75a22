//! subalign: command-line caller of `subalign-core`.
//!
//! Loads token streams from subtitle and transcript files, runs the offset
//! search and writes shifted SRT subtitles.

pub mod align;
pub mod cli;
pub mod shift;
pub mod srt;
pub mod stream;
pub mod tokens;
