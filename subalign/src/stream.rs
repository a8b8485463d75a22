//! Loading and saving token streams.
//!
//! A stream is read from an SRT subtitle file, a TSV transcript with one
//! `word<TAB>start<TAB>end` line per token, or a JSON array of tokens.

use crate::srt;
use eyre::{Result, WrapErr};
use std::path::Path;
use subalign_core::types::{Token, TokenStream};

/// File format of a token stream, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamFormat {
    Srt,
    Tsv,
    Json,
}

impl StreamFormat {
    /// Detect the format from the file extension.
    ///
    /// Unknown extensions are read as SRT.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("srt") => Self::Srt,
            Some("tsv") => Self::Tsv,
            Some("json") => Self::Json,
            _ => {
                tracing::warn!(path = ?path.display(), "unknown extension, reading as srt");
                Self::Srt
            }
        }
    }
}

/// Load a token stream from `path`.
///
/// `keep_subs` only applies to SRT input.
pub fn load_stream(path: &Path, keep_subs: bool) -> Result<TokenStream> {
    let format = StreamFormat::from_path(path);

    let stream = match format {
        StreamFormat::Srt => srt::to_stream(&srt::read_subtitles(path)?, keep_subs),
        StreamFormat::Tsv => parse_tsv(&read(path)?),
        StreamFormat::Json => serde_json::from_str(&read(path)?)
            .wrap_err_with(|| format!("failed to parse json: {:?}", path.display()))?,
    };

    tracing::info!(
        path = ?path.display(),
        ?format,
        tokens = stream.len(),
        "loaded token stream"
    );

    Ok(stream)
}

/// Save a token stream to `path` in the format matching its extension.
pub fn save_stream(path: &Path, stream: &TokenStream) -> Result<()> {
    let content = match StreamFormat::from_path(path) {
        StreamFormat::Srt => srt::display_subtitles(&srt::from_stream(stream)) + "\n",
        StreamFormat::Tsv => format_tsv(stream),
        StreamFormat::Json => serde_json::to_string_pretty(stream)?,
    };

    tracing::info!(path = ?path.display(), tokens = stream.len(), "write token stream");

    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write stream: {:?}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read: {:?}", path.display()))
}

/// Parse a `word<TAB>start<TAB>end` transcript.
///
/// Blank lines are ignored and malformed lines are skipped with a warning.
pub fn parse_tsv(content: &str) -> TokenStream {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| {
            let token = parse_tsv_line(line);
            if token.is_none() {
                tracing::warn!(line = i + 1, content = line, "skipping malformed tsv line");
            }
            token
        })
        .collect()
}

fn parse_tsv_line(line: &str) -> Option<Token> {
    let mut fields = line.split('\t');
    let word = fields.next()?.trim();
    let start = fields.next()?.trim().parse().ok()?;
    let end = fields.next()?.trim().parse().ok()?;

    if word.is_empty() || fields.next().is_some() {
        return None;
    }

    Some(Token::new(word, start, end))
}

/// Format a stream as a `word<TAB>start<TAB>end` transcript.
pub fn format_tsv(stream: &TokenStream) -> String {
    stream
        .iter()
        .map(|t| format!("{}\t{}\t{}\n", t.text, t.start, t.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(StreamFormat::from_path(Path::new("a.srt")), StreamFormat::Srt);
        assert_eq!(StreamFormat::from_path(Path::new("a.TSV")), StreamFormat::Tsv);
        assert_eq!(StreamFormat::from_path(Path::new("a.json")), StreamFormat::Json);
        assert_eq!(StreamFormat::from_path(Path::new("a.sub")), StreamFormat::Srt);
        assert_eq!(StreamFormat::from_path(Path::new("noext")), StreamFormat::Srt);
    }

    #[test]
    fn parses_tsv_and_skips_malformed_lines() {
        let content = "hello\t0.5\t1.0\n\nbroken line\nworld\t1.0\tx\nthere\t1.2\t1.9\n";

        let stream = parse_tsv(content);
        let tokens = stream.as_slice();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new("hello", 0.5, 1.0));
        assert_eq!(tokens[1], Token::new("there", 1.2, 1.9));
    }

    #[test]
    fn formats_tsv() {
        let stream = TokenStream::from(vec![Token::new("hi", 0.0, 0.25)]);

        assert_eq!(format_tsv(&stream), "hi\t0\t0.25\n");
    }

    #[test]
    fn tsv_keeps_full_timing_precision() {
        let stream = TokenStream::from(vec![
            Token::new("first", 1.0 / 3.0, 0.7071067811865476),
            Token::new("second", 12.345678, 13.0004),
        ]);

        assert_eq!(parse_tsv(&format_tsv(&stream)), stream);
    }
}
