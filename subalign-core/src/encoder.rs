//! Canonical integer encoding of raw words.

use crate::traits::Lexicon;
use std::collections::HashMap;

/// Integer surrogate for a canonical word form, unique within one encoder.
pub type CanonicalId = u32;

/// Maps raw words to small integer ids for fast set comparison.
///
/// Ids are handed out in first-seen order and never reclaimed, so one
/// encoder must be shared by both streams of an alignment run and dropped
/// with it.
#[derive(Debug)]
pub struct TokenEncoder<L> {
    lexicon: L,
    counter: CanonicalId,
    /// Canonical form to id
    ids: HashMap<String, CanonicalId>,
    /// Id to the canonical form it was allocated for
    forms: HashMap<CanonicalId, String>,
    /// Raw word to canonical form, `None` for stopwords
    canonical: HashMap<String, Option<String>>,
}

impl<L: Lexicon> TokenEncoder<L> {
    pub fn new(lexicon: L) -> Self {
        Self {
            lexicon,
            counter: 0,
            ids: HashMap::new(),
            forms: HashMap::new(),
            canonical: HashMap::new(),
        }
    }

    /// Number of ids allocated so far.
    pub fn len(&self) -> usize {
        self.counter as usize
    }

    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }

    /// Lowercase and stem a single word, or `None` for a stopword.
    pub fn canonicalize(&mut self, word: &str) -> Option<String> {
        if let Some(form) = self.canonical.get(word) {
            return form.clone();
        }

        let lower = word.to_lowercase();
        let form = (!self.lexicon.is_stopword(&lower))
            .then(|| self.lexicon.stem(&lower).into_owned());

        self.canonical.insert(word.to_string(), form.clone());
        form
    }

    /// Encode a raw token, or `None` when it carries no comparable content.
    ///
    /// A token holding several space-separated words is merged onto the id
    /// of the first of its words already seen, and every word of it is then
    /// mapped to that id. This lets a translated phrase match single-word
    /// occurrences of any of its parts.
    pub fn encode(&mut self, raw: &str) -> Option<CanonicalId> {
        let raw = raw.trim();

        if raw.contains(' ') {
            return self.encode_phrase(raw);
        }

        let form = self.canonicalize(raw)?;
        match self.ids.get(&form) {
            Some(&id) => Some(id),
            None => Some(self.allocate(form)),
        }
    }

    fn encode_phrase(&mut self, phrase: &str) -> Option<CanonicalId> {
        let forms: Vec<String> = phrase
            .split(' ')
            .filter(|word| !word.is_empty())
            .filter_map(|word| self.canonicalize(word))
            .collect();

        let first = forms.first()?.clone();
        let id = forms
            .iter()
            .find_map(|form| self.ids.get(form).copied())
            .unwrap_or_else(|| self.allocate(first));

        for form in forms {
            self.ids.insert(form, id);
        }

        Some(id)
    }

    fn allocate(&mut self, form: String) -> CanonicalId {
        let id = self.counter;
        self.counter += 1;

        tracing::trace!(id, form = %form, "allocated canonical id");

        self.forms.insert(id, form.clone());
        self.ids.insert(form, id);
        id
    }

    /// Canonical form an id was first allocated for.
    pub fn decode(&self, id: CanonicalId) -> Option<&str> {
        self.forms.get(&id).map(String::as_str)
    }

    /// Id currently mapped to a canonical form.
    pub fn lookup(&self, form: &str) -> Option<CanonicalId> {
        self.ids.get(form).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    #[test]
    fn drops_stopwords() {
        let mut encoder = TokenEncoder::new(Language::En);

        assert_eq!(encoder.encode("the"), None);
        assert_eq!(encoder.encode("The"), None);
        assert!(encoder.is_empty());
    }

    #[test]
    fn allocates_in_first_seen_order() {
        let mut encoder = TokenEncoder::new(Language::En);

        assert_eq!(encoder.encode("cat"), Some(0));
        assert_eq!(encoder.encode("sat"), Some(1));
        assert_eq!(encoder.encode("cat"), Some(0));
        assert_eq!(encoder.len(), 2);
        assert_eq!(encoder.decode(1), Some("sat"));
    }

    #[test]
    fn collapses_case_and_inflection() {
        let mut encoder = TokenEncoder::new(Language::En);

        let id = encoder.encode("Walking");
        assert!(id.is_some());
        assert_eq!(encoder.encode("walked"), id);
        assert_eq!(encoder.encode("walks"), id);
    }

    #[test]
    fn phrase_joins_existing_word() {
        let mut encoder = TokenEncoder::new(Language::En);

        let house = encoder.encode("house");
        let phrase = encoder.encode("big house");

        assert_eq!(phrase, house);
        assert_eq!(encoder.encode("big"), house);
    }

    #[test]
    fn phrase_allocates_when_nothing_seen() {
        let mut encoder = TokenEncoder::new(Language::En);

        let phrase = encoder.encode("red house").unwrap();

        assert_eq!(encoder.encode("red"), Some(phrase));
        assert_eq!(encoder.encode("house"), Some(phrase));
        assert_eq!(encoder.len(), 1);
    }

    #[test]
    fn phrase_skips_stopwords() {
        let mut encoder = TokenEncoder::new(Language::En);

        let house = encoder.encode("house");

        assert_eq!(encoder.encode("the house"), house);
        assert_eq!(encoder.encode("of the"), None);
        assert_eq!(encoder.lookup("the"), None);
    }

    #[test]
    fn phrase_prefers_first_known_word() {
        let mut encoder = TokenEncoder::new(Language::En);

        let dog = encoder.encode("dog").unwrap();
        let cat = encoder.encode("cat").unwrap();

        assert_eq!(encoder.encode("cat dog"), Some(cat));
        assert_eq!(encoder.lookup("dog"), Some(cat));
        assert_ne!(dog, cat);
    }
}
