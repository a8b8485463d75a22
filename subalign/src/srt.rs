//! SRT subtitle conversion utilities.
//!
//! Reads and writes SRT files, turns subtitles into word-level token streams
//! and shifts subtitle timing.

use eyre::{Result, WrapErr};
use srtlib::{Subtitle, Subtitles, Timestamp};
use std::path::Path;
use subalign_core::types::{Token, TokenStream};

/// Read subtitles from an SRT file.
pub fn read_subtitles(path: &Path) -> Result<Vec<Subtitle>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read srt: {:?}", path.display()))?;

    let subtitles = parse_subtitles(&content)
        .wrap_err_with(|| format!("failed to parse srt: {:?}", path.display()))?;

    tracing::debug!(path = ?path.display(), count = subtitles.len(), "loaded subtitles");

    Ok(subtitles)
}

/// Parse SRT content, tolerating a byte order mark and CRLF line endings.
pub fn parse_subtitles(content: &str) -> Result<Vec<Subtitle>> {
    let content = content
        .trim_start_matches('\u{feff}')
        .replace('\r', "")
        .trim()
        .to_string();

    if content.is_empty() {
        return Ok(Vec::new());
    }

    Subtitles::parse_from_str(content)
        .map(Subtitles::to_vec)
        .map_err(eyre::Report::new)
}

/// Write subtitles to an SRT file, renumbering them from 1.
pub fn write_subtitles(path: &Path, subtitles: Vec<Subtitle>) -> Result<()> {
    tracing::info!(path = ?path.display(), count = subtitles.len(), "write srt file");

    std::fs::write(path, display_subtitles(&renumber(subtitles)) + "\n")
        .wrap_err_with(|| format!("failed to write srt: {:?}", path.display()))
}

fn renumber(subtitles: Vec<Subtitle>) -> Vec<Subtitle> {
    subtitles
        .into_iter()
        .zip(1..)
        .map(|(s, i)| Subtitle::new(i, s.start_time, s.end_time, s.text))
        .collect()
}

/// Convert an SRT timestamp to seconds.
pub fn timestamp_to_secs(timestamp: &Timestamp) -> f64 {
    let (hours, minutes, seconds, millis) = timestamp.get();
    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0
}

/// Convert seconds to an SRT timestamp, clamping negative times to zero.
pub fn secs_to_timestamp(secs: f64) -> Timestamp {
    Timestamp::from_milliseconds((secs.max(0.0) * 1000.0).round() as u32)
}

/// Move every subtitle by `offset` seconds.
///
/// Times that would become negative are clamped to zero.
pub fn shift_subtitles(subtitles: Vec<Subtitle>, offset: f64) -> Vec<Subtitle> {
    subtitles
        .into_iter()
        .map(|s| {
            let start = secs_to_timestamp(timestamp_to_secs(&s.start_time) + offset);
            let end = secs_to_timestamp(timestamp_to_secs(&s.end_time) + offset);
            Subtitle::new(s.num, start, end, s.text)
        })
        .collect()
}

/// Whether a subtitle carries spoken dialogue rather than a sound or
/// scene description.
pub fn is_dialogue(text: &str) -> bool {
    let text = strip_markup(text);
    let text = text.trim();

    if text.is_empty() || text.to_uppercase() == text {
        return false;
    }

    if text.contains(['♪', '♫']) {
        return false;
    }

    let enclosed = matches!(
        (text.chars().next(), text.chars().last()),
        (Some('['), Some(']')) | (Some('('), Some(')')) | (Some('*'), Some('*'))
    );

    !enclosed
}

/// Remove `<...>` formatting tags and `{...}` override blocks.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut closing = None;

    for c in text.chars() {
        match (closing, c) {
            (None, '<') => closing = Some('>'),
            (None, '{') => closing = Some('}'),
            (None, _) => out.push(c),
            (Some(end), _) if c == end => closing = None,
            (Some(_), _) => {}
        }
    }

    out
}

/// Split subtitle text into word tokens.
///
/// Whitespace separates tokens, punctuation-only tokens are dropped and
/// punctuation inside a token becomes a space, so `l'homme` yields the
/// two-word token `l homme`.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_markup(text)
        .split_whitespace()
        .map(|word| {
            word.split(|c: char| !c.is_alphanumeric())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Build a token stream from dialogue subtitles.
///
/// Each subtitle's display time is split across its tokens in proportion
/// to their character counts. With `keep_subs`, every token keeps the full
/// subtitle span instead.
pub fn to_stream(subtitles: &[Subtitle], keep_subs: bool) -> TokenStream {
    let mut tokens = Vec::new();

    for subtitle in subtitles.iter().filter(|s| is_dialogue(&s.text)) {
        let start = timestamp_to_secs(&subtitle.start_time);
        let end = timestamp_to_secs(&subtitle.end_time);
        let words = tokenize(&subtitle.text);

        if keep_subs {
            tokens.extend(words.into_iter().map(|w| Token::new(w, start, end)));
            continue;
        }

        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let mut cursor = start;

        for word in words {
            let duration = (end - start) * word.chars().count() as f64 / total_chars as f64;
            tokens.push(Token::new(word, cursor, cursor + duration));
            cursor += duration;
        }
    }

    tokens.sort_by(|a, b| a.start.total_cmp(&b.start));
    TokenStream::from(tokens)
}

/// Build one subtitle per run of tokens sharing the same timing.
pub fn from_stream(stream: &TokenStream) -> Vec<Subtitle> {
    stream
        .groups()
        .zip(1..)
        .map(|(group, i)| {
            Subtitle::new(
                i,
                secs_to_timestamp(group.start),
                secs_to_timestamp(group.end),
                group.text,
            )
        })
        .collect()
}

/// Format subtitles as SRT file content.
pub fn display_subtitles(subtitles: &[Subtitle]) -> String {
    subtitles
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Display preview of subtitles (first and last entries).
pub fn preview_subtitles(subtitles: &[Subtitle], head_count: usize, tail_count: usize) -> String {
    let total = subtitles.len();

    if total <= head_count + tail_count {
        display_subtitles(subtitles)
    } else {
        let mut out = Vec::new();
        out.extend(subtitles[0..head_count].iter().map(|s| s.to_string()));
        out.push("...".to_string());
        out.extend(
            subtitles[(total - tail_count)..total]
                .iter()
                .map(|s| s.to_string()),
        );
        out.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtitle(num: usize, start_ms: u32, end_ms: u32, text: &str) -> Subtitle {
        Subtitle::new(
            num,
            Timestamp::from_milliseconds(start_ms),
            Timestamp::from_milliseconds(end_ms),
            text.to_string(),
        )
    }

    #[test]
    fn converts_timestamps() {
        let ts = Timestamp::from_milliseconds(3_723_456);

        assert!((timestamp_to_secs(&ts) - 3723.456).abs() < 1e-9);
        assert_eq!(secs_to_timestamp(3723.456).get(), (1, 2, 3, 456));
        assert_eq!(secs_to_timestamp(-2.0).get(), (0, 0, 0, 0));
    }

    #[test]
    fn parses_srt_with_bom_and_crlf() {
        let content = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,500\r\nHello there.\r\n\r\n\
                       2\r\n00:00:03,000 --> 00:00:04,000\r\nGeneral Kenobi!\r\n";

        let subtitles = parse_subtitles(content).unwrap();

        assert_eq!(subtitles.len(), 2);
        assert_eq!(subtitles[0].text, "Hello there.");
        assert!((timestamp_to_secs(&subtitles[0].end_time) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn parse_error_keeps_srtlib_source() {
        let err = parse_subtitles("1\nnot a timestamp\nHello\n").unwrap_err();

        assert!(err.downcast_ref::<srtlib::ParsingError>().is_some());
    }

    #[test]
    fn filters_non_dialogue() {
        assert!(is_dialogue("Where are you going?"));
        assert!(is_dialogue("<i>Where are you going?</i>"));
        assert!(!is_dialogue("[door creaks]"));
        assert!(!is_dialogue("(sighs heavily)"));
        assert!(!is_dialogue("*laughs*"));
        assert!(!is_dialogue("♪ la la la ♪"));
        assert!(!is_dialogue("NARRATOR:"));
        assert!(!is_dialogue("..."));
    }

    #[test]
    fn strips_markup() {
        assert_eq!(strip_markup("<i>Hello</i> {\\an8}there"), "Hello there");
    }

    #[test]
    fn tokenizes_words() {
        assert_eq!(
            tokenize("Well, l'homme -- it's <b>here</b>!"),
            vec!["Well", "l homme", "it s", "here"]
        );
    }

    #[test]
    fn distributes_duration_by_characters() {
        let subtitles = vec![subtitle(1, 10_000, 13_000, "ab abcd")];

        let stream = to_stream(&subtitles, false);
        let tokens = stream.as_slice();

        assert_eq!(tokens.len(), 2);
        assert!((tokens[0].start - 10.0).abs() < 1e-9);
        assert!((tokens[0].end - 11.0).abs() < 1e-9);
        assert!((tokens[1].start - 11.0).abs() < 1e-9);
        assert!((tokens[1].end - 13.0).abs() < 1e-9);
    }

    #[test]
    fn keep_subs_uses_full_span() {
        let subtitles = vec![subtitle(1, 1_000, 2_000, "two words")];

        let stream = to_stream(&subtitles, true);

        assert!(stream.iter().all(|t| t.start == 1.0 && t.end == 2.0));
        assert_eq!(from_stream(&stream)[0].text, "two words");
    }

    #[test]
    fn skips_descriptions_and_sorts() {
        let subtitles = vec![
            subtitle(2, 5_000, 6_000, "later"),
            subtitle(1, 1_000, 2_000, "[music]"),
            subtitle(3, 3_000, 4_000, "earlier"),
        ];

        let stream = to_stream(&subtitles, false);
        let words: Vec<_> = stream.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(words, vec!["earlier", "later"]);
    }

    #[test]
    fn shifts_and_clamps() {
        let subtitles = vec![
            subtitle(1, 1_000, 2_000, "first"),
            subtitle(2, 5_000, 6_500, "second"),
        ];

        let shifted = shift_subtitles(subtitles, -1.5);

        assert_eq!(shifted[0].start_time.get(), (0, 0, 0, 0));
        assert_eq!(shifted[0].end_time.get(), (0, 0, 0, 500));
        assert_eq!(shifted[1].start_time.get(), (0, 0, 3, 500));
        assert_eq!(shifted[1].end_time.get(), (0, 0, 5, 0));
    }

    #[test]
    fn previews_head_and_tail() {
        let subtitles: Vec<_> = (1..=10)
            .map(|i| subtitle(i, i as u32 * 1000, i as u32 * 1000 + 500, &format!("line {i}")))
            .collect();

        let preview = preview_subtitles(&subtitles, 2, 1);

        assert!(preview.contains("line 1"));
        assert!(preview.contains("line 2"));
        assert!(preview.contains("..."));
        assert!(preview.contains("line 10"));
        assert!(!preview.contains("line 5"));
    }
}
