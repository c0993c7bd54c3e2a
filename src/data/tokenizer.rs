// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits text into word tokens the way the Penn Treebank
// conventions do, which is NOT the same as splitting on spaces:
//
//   "don't stop!"         → do | n't | stop | !
//   "hello, world."       → hello | , | world | .
//   "(free) $5.50"        → ( | free | ) | $ | 5.50
//   "1-800-555-0100 now." → 1-800-555-0100 | now | .
//
// Text is first cut into sentences on Unicode (UAX #29)
// sentence boundaries; each sentence then goes through an
// ordered list of regex rewrites that pad punctuation,
// brackets, quotes, and contractions with spaces, and the
// result is split on whitespace.
//
// Hyphenated words and decimals stay in one piece; the
// normaliser's alphanumeric filter later throws them away.
//
// Reference: regex crate documentation
//            unicode-segmentation crate (split_sentence_bounds)

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

/// One rewrite: every match of the pattern is replaced with the
/// template (`${1}`-style group references).
struct Rewrite {
    pattern:  Regex,
    template: &'static str,
}

fn rewrites(rules: &[(&str, &'static str)]) -> Vec<Rewrite> {
    rules
        .iter()
        .map(|&(pattern, template)| Rewrite {
            pattern: Regex::new(pattern).expect("tokenizer patterns are valid"),
            template,
        })
        .collect()
}

static STARTING_QUOTES: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    rewrites(&[
        (r"([«“‘„]|[`]+)", " ${1} "),
        (r#"^""#, "``"),
        (r"(``)", " ${1} "),
        (r#"([ (\[{<])("|'{2})"#, "${1} `` "),
    ])
});

/// An opening single quote glued to a one-letter word: 'x
static QUOTED_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\w)\b").expect("tokenizer patterns are valid"));

static PUNCTUATION: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    rewrites(&[
        (r#"([^.])(\.)([\]\)}>"']*)\s*$"#, "${1} ${2} ${3} "),
        (r"([:,])([^\d])", " ${1} ${2}"),
        (r"([:,])$", " ${1} "),
        (r"\.{2,}", " ${0} "),
        (r"[;@#$%&]", " ${0} "),
        (r#"([^.])(\.)([\]\)}>"']*)\s*$"#, "${1} ${2}${3} "),
        (r"[?!]", " ${0} "),
        (r"([^'])' ", "${1} ' "),
        (r"[*]", " ${0} "),
        (r"[\]\[(){}<>]", " ${0} "),
        (r"--", " -- "),
    ])
});

static ENDING_QUOTES: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    rewrites(&[
        (r"([»”’])", " ${1} "),
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ])
});

static CONTRACTIONS: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    rewrites(&[
        (r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        (r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        (r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        (r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        (r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        (r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        (r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        (r"(?i)\b(wan)(na)\s", " ${1} ${2} "),
        (r"(?i) ('t)(is)\b", " ${1} ${2} "),
        (r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ])
});

/// Treebank-style word tokenizer. Holds no state; the compiled
/// rules are shared statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize `text` sentence by sentence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_sentence_bounds()
            .flat_map(tokenize_sentence)
            .collect()
    }
}

fn apply(rules: &[Rewrite], text: String) -> String {
    rules.iter().fold(text, |acc, rule| {
        rule.pattern.replace_all(&acc, rule.template).into_owned()
    })
}

fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, sentence.to_string());

    // Split 'x from its quote unless x starts a contraction ('m, 't, ...)
    let text = QUOTED_LETTER
        .replace_all(&text, |caps: &Captures| {
            let letter = &caps[1];
            if matches!(letter, "m" | "t" | "s" | "d" | "n" | "M" | "T" | "S" | "D" | "N") {
                caps[0].to_string()
            } else {
                format!("' {letter}")
            }
        })
        .into_owned();

    let text = apply(&PUNCTUATION, text);
    let text = apply(&ENDING_QUOTES, format!(" {text} "));
    let text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}
