// ============================================================
// Layer 4 — Stopwords and Punctuation
// ============================================================
// Two fixed, read-only sets consulted by the text normaliser:
//
//   STOPWORDS   — the standard 179-word English stopword list
//                 (lowercase, contractions included)
//   PUNCTUATION — the 32 ASCII punctuation characters
//
// Both are built once on first use and never mutated, so any
// number of normalisers (and threads) can share them.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const ENGLISH_STOPWORDS: [&str; 179] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// ASCII punctuation, in code-point order
pub const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

pub static PUNCTUATION: Lazy<HashSet<char>> = Lazy::new(|| ASCII_PUNCTUATION.chars().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// True when the token is a single punctuation character.
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PUNCTUATION.contains(&c),
        _ => false,
    }
}
