//! Built-in lexicons keyed by ISO-639-1 tag.
//!
//! Each language carries a stopword list and a Snowball stemmer.

use crate::error::ConfigError;
use crate::traits::Lexicon;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Supported languages.
#[derive(
    clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// French
    Fr,
    /// Spanish
    Es,
    /// German
    De,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::En, Self::Fr, Self::Es, Self::De];

    /// ISO-639-1 tag.
    pub fn iso(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::De => "de",
        }
    }

    fn stopwords(self) -> &'static HashSet<&'static str> {
        static EN: LazyLock<HashSet<&str>> =
            LazyLock::new(|| EN_STOPWORDS.iter().copied().collect());
        static FR: LazyLock<HashSet<&str>> =
            LazyLock::new(|| FR_STOPWORDS.iter().copied().collect());
        static ES: LazyLock<HashSet<&str>> =
            LazyLock::new(|| ES_STOPWORDS.iter().copied().collect());
        static DE: LazyLock<HashSet<&str>> =
            LazyLock::new(|| DE_STOPWORDS.iter().copied().collect());

        match self {
            Self::En => &EN,
            Self::Fr => &FR,
            Self::Es => &ES,
            Self::De => &DE,
        }
    }

    fn stemmer(self) -> &'static Stemmer {
        static EN: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));
        static FR: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::French));
        static ES: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::Spanish));
        static DE: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::German));

        match self {
            Self::En => &EN,
            Self::Fr => &FR,
            Self::Es => &ES,
            Self::De => &DE,
        }
    }
}

impl Lexicon for Language {
    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords().contains(word)
    }

    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.stemmer().stem(word)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.iso() == tag)
            .ok_or_else(|| ConfigError::UnknownLanguage(s.to_string()))
    }
}

const EN_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves", "s", "t", "d", "ll", "m", "re", "ve", "don", "didn", "doesn", "isn", "wasn",
];

const FR_STOPWORDS: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux", "il",
    "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me", "même", "mes", "moi", "mon",
    "ne", "nos", "notre", "nous", "on", "ou", "par", "pas", "pour", "qu", "que", "qui", "sa",
    "se", "ses", "son", "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une", "vos", "votre",
    "vous", "c", "d", "j", "l", "à", "m", "n", "s", "t", "y", "été", "étée", "étées", "étés",
    "étant", "suis", "es", "est", "sommes", "êtes", "sont", "serai", "sera", "serons", "seront",
    "étais", "était", "étions", "étiez", "étaient", "fus", "fut", "ai", "as", "avons", "avez",
    "ont", "aurai", "aura", "aurons", "auront", "avais", "avait", "avions", "aviez", "avaient",
    "eu", "ça", "cela", "cet", "cette", "ici", "là",
];

const ES_STOPWORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para",
    "con", "no", "una", "su", "al", "lo", "como", "más", "pero", "sus", "le", "ya", "o", "este",
    "sí", "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "también", "me", "hasta",
    "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos", "uno", "les", "ni",
    "contra", "otros", "ese", "eso", "ante", "ellos", "e", "esto", "mí", "antes", "algunos",
    "qué", "unos", "yo", "otro", "otras", "otra", "él", "tanto", "esa", "estos", "mucho",
    "quienes", "nada", "muchos", "cual", "poco", "ella", "estar", "estas", "es", "son", "fue",
    "era", "tu", "te", "ti", "mi", "tú", "usted", "ustedes", "nosotros", "vosotros", "ha",
    "he", "has", "han",
];

const DE_STOPWORDS: &[&str] = &[
    "aber", "alle", "als", "also", "am", "an", "auch", "auf", "aus", "bei", "bin", "bis", "bist",
    "da", "damit", "dann", "das", "dass", "dein", "dem", "den", "der", "des", "dich", "die",
    "dir", "doch", "du", "ein", "eine", "einem", "einen", "einer", "er", "es", "euch", "für",
    "hat", "hatte", "ich", "ihr", "im", "in", "ist", "ja", "kein", "man", "mein", "mich", "mir",
    "mit", "nach", "nicht", "noch", "nun", "nur", "ob", "oder", "sein", "sich", "sie", "sind",
    "so", "über", "um", "und", "uns", "unter", "vom", "von", "vor", "war", "waren", "was", "weil",
    "wenn", "wer", "wie", "wir", "wird", "wo", "zu", "zum", "zur",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_tags() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!(matches!(
            "xx".parse::<Language>(),
            Err(ConfigError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn recognizes_stopwords() {
        assert!(Language::En.is_stopword("the"));
        assert!(!Language::En.is_stopword("cat"));
        assert!(Language::Fr.is_stopword("les"));
        assert!(!Language::Fr.is_stopword("chat"));
    }

    #[test]
    fn collapses_english_inflections() {
        let en = Language::En;

        assert_eq!(en.stem("cats"), "cat");
        assert_eq!(en.stem("walking"), en.stem("walked"));
        assert_eq!(en.stem("running"), en.stem("run"));
        assert_eq!(en.stem("stopped"), en.stem("stop"));
        assert_eq!(en.stem("stories"), en.stem("story"));
    }

    #[test]
    fn keeps_short_words() {
        assert_eq!(Language::En.stem("sat"), "sat");
        assert_eq!(Language::En.stem("red"), "red");
        assert_eq!(Language::En.stem("bus"), "bus");
    }

    #[test]
    fn collapses_inflections_in_every_language() {
        assert_eq!(Language::Fr.stem("chats"), Language::Fr.stem("chat"));
        assert_eq!(Language::Es.stem("gatos"), Language::Es.stem("gato"));
        assert_eq!(Language::De.stem("katzen"), Language::De.stem("katze"));
    }
}
