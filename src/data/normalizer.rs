// ============================================================
// Layer 4 — Text Normaliser
// ============================================================
// Turns a raw message into a stemmed, stopword-free token string.
//
// Steps (applied in order; each depends on the previous output):
//   1. Lowercase the whole input
//   2. Tokenize with the Treebank-style WordTokenizer
//   3. Keep only tokens made entirely of letters and digits
//      (combining marks excluded)
//   4. Drop stopwords and single punctuation characters
//   5. Stem every surviving token
//   6. Join the stems with single spaces
//
// Example:
//   "WIN a FREE iPhone!! Call 1-800-555-0100 now."
//     → win a free iphone ! ! call 1-800-555-0100 now .
//     → win a free iphone call now              (alphanumeric only)
//     → win free iphone call                    (stopwords gone)
//     → "win free iphon call"                   (stemmed)
//
// normalize() is total: any string, including "", whitespace,
// or pure punctuation, yields a (possibly empty) string.

use once_cell::sync::Lazy;
use unicode_normalization::char::is_combining_mark;

use crate::data::stemmer::StemmerKind;
use crate::data::stopwords::{is_punctuation, is_stopword};
use crate::data::tokenizer::WordTokenizer;
use crate::domain::traits::Stemmer;

/// Normaliser with the default Porter stemmer, shared process-wide
static DEFAULT: Lazy<TextNormalizer> = Lazy::new(TextNormalizer::default);

/// Normalise with the default configuration.
pub fn normalize(raw: &str) -> String {
    DEFAULT.normalize(raw)
}

pub struct TextNormalizer {
    tokenizer: WordTokenizer,
    stemmer:   Box<dyn Stemmer>,
}

impl TextNormalizer {
    pub fn new(stemmer: Box<dyn Stemmer>) -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            stemmer,
        }
    }

    pub fn with_kind(kind: StemmerKind) -> Self {
        Self::new(kind.build())
    }

    pub fn stemmer_name(&self) -> &'static str {
        self.stemmer.name()
    }

    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();

        self.tokenizer
            .tokenize(&lowered)
            .into_iter()
            .filter(|t| is_alphanumeric(t))
            .filter(|t| !is_stopword(t) && !is_punctuation(t))
            .map(|t| self.stemmer.stem(&t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::with_kind(StemmerKind::Porter)
    }
}

/// Non-empty and every char a letter or number. A token with any
/// inner punctuation ("1-800", "5.50", "n't") fails as a whole, and
/// so does one carrying a combining mark (Devanagari vowel signs, a
/// decomposed accent): marks are not letters in their own right.
fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_alphanumeric() && !is_combining_mark(c))
}
