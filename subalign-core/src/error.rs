//! Error types for subalign-core organized by failure origin.

use thiserror::Error;

/// Alignment error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Search or bucketing parameters are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A token stream cannot be bucketed
    #[error(transparent)]
    Input(#[from] InputError),

    /// One side of an alignment run cannot be aligned
    #[error("{side} stream rejected: {source}")]
    Stream {
        side: Side,
        #[source]
        source: InputError,
    },
}

impl Error {
    /// Attach the stream side to an input error, leaving others unchanged.
    pub fn on_side(self, side: Side) -> Self {
        match self {
            Error::Input(source) => source.on(side),
            other => other,
        }
    }
}

/// Configuration errors (search budget, bucket width, selectors).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Iteration budget must allow at least one candidate offset
    #[error("invalid iteration budget: {0} (minimum 1)")]
    InvalidMaxIters(usize),

    /// Bucket width must be a positive finite number of seconds
    #[error("invalid bucket width: {0}s")]
    InvalidWidth(f64),

    /// Bucket shift must be finite
    #[error("invalid bucket shift: {0}s")]
    InvalidShift(f64),

    /// Unknown similarity measure key
    #[error(
        "unknown similarity measure: {0} (expected jaccard-index, overlap-coeff or overlap-count)"
    )]
    UnknownMeasure(String),

    /// Unknown ISO-639-1 language tag
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
}

/// Token stream validation errors.
#[derive(Debug, Error)]
pub enum InputError {
    /// Stream has no tokens
    #[error("stream is empty")]
    EmptyStream,

    /// Stream covers no time at all
    #[error("stream is degenerate: spans {start}s to {end}s")]
    DegenerateStream { start: f64, end: f64 },

    /// Token timing is negative, non-finite or reversed
    #[error("token #{index} {text:?} has invalid timing: {start}s to {end}s")]
    InvalidToken {
        index: usize,
        text: String,
        start: f64,
        end: f64,
    },

    /// Every token was filtered out as a stopword
    #[error("no encodable token (only stopwords)")]
    NoEncodableTokens,
}

impl InputError {
    /// Attach the stream side this error was raised for.
    pub fn on(self, side: Side) -> Error {
        Error::Stream { side, source: self }
    }
}

/// Which stream of an alignment run an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Reference,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Reference => f.write_str("reference"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Result type alias for subalign-core operations.
pub type Result<T> = std::result::Result<T, Error>;
