//! Core types for subalign-core

use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Word with timestamps.
///
/// `text` may be a single word or a space-separated phrase emitted by an
/// upstream tokenizer or translator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Raw token text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Tokens ordered by start time.
///
/// Ordering is maintained by whoever builds the stream and is not checked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Start of the first token, if any.
    pub fn start(&self) -> Option<f64> {
        self.tokens.first().map(|t| t.start)
    }

    /// End of the last token, if any.
    pub fn end(&self) -> Option<f64> {
        self.tokens.last().map(|t| t.end)
    }

    /// Time covered from the first start to the last end.
    pub fn duration(&self) -> Option<f64> {
        Some(self.end()? - self.start()?)
    }

    /// Copy of this stream with every token moved by `seconds`.
    pub fn shifted(&self, seconds: f64) -> Self {
        self.tokens
            .iter()
            .map(|t| Token::new(t.text.clone(), t.start + seconds, t.end + seconds))
            .collect()
    }

    /// Check that the stream can be bucketed.
    ///
    /// Rejects empty streams, streams whose overall span is zero (such as a
    /// single zero-duration token), and tokens with negative, non-finite or
    /// reversed timestamps.
    pub fn validate(&self) -> Result<(), InputError> {
        let (Some(start), Some(end)) = (self.start(), self.end()) else {
            return Err(InputError::EmptyStream);
        };

        if let Some((index, token)) = self.tokens.iter().enumerate().find(|(_, t)| {
            !t.start.is_finite() || !t.end.is_finite() || t.start < 0.0 || t.end < t.start
        }) {
            return Err(InputError::InvalidToken {
                index,
                text: token.text.clone(),
                start: token.start,
                end: token.end,
            });
        }

        if end <= start {
            return Err(InputError::DegenerateStream { start, end });
        }

        Ok(())
    }

    /// Iterate over runs of consecutive tokens sharing the same timing.
    ///
    /// Each run is yielded as its space-joined text with the shared start
    /// and end, which rebuilds phrase-level entries from a stream where a
    /// whole subtitle was assigned to each of its words.
    pub fn groups(&self) -> Groups<'_> {
        Groups {
            tokens: &self.tokens,
        }
    }
}

/// Iterator returned by [`TokenStream::groups`].
pub struct Groups<'a> {
    tokens: &'a [Token],
}

impl Iterator for Groups<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.tokens.first()?;
        let len = self
            .tokens
            .iter()
            .take_while(|t| t.start == first.start && t.end == first.end)
            .count();

        let (group, rest) = self.tokens.split_at(len);
        self.tokens = rest;

        let text = group
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Token::new(text, first.start, first.end))
    }
}
