//! Core traits for alignment components.

use std::borrow::Cow;

/// Language-scoped stopword set and stemmer.
///
/// The [`TokenEncoder`](crate::encoder::TokenEncoder) calls this to collapse
/// inflected forms of a word onto one canonical form. Implementations only
/// ever receive lowercased words.
pub trait Lexicon {
    /// Whether a lowercased word carries too little information to be
    /// compared.
    fn is_stopword(&self, word: &str) -> bool;

    /// Reduce a lowercased word to its stem.
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn is_stopword(&self, word: &str) -> bool {
        (**self).is_stopword(word)
    }

    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        (**self).stem(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Box<L> {
    fn is_stopword(&self, word: &str) -> bool {
        (**self).is_stopword(word)
    }

    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        (**self).stem(word)
    }
}
