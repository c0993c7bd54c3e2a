// ============================================================
// Layer 4 — Stemmers
// ============================================================
// Reduces a word to an approximate root by stripping suffixes.
//
// Two implementations of the Stemmer trait:
//
//   PorterStemmer   — Porter (1980) with the widely used
//                     extensions (default)
//   SnowballStemmer — the Snowball "English" (Porter2)
//                     algorithm from rust-stemmers
//
// Porter in brief. A word is viewed as [C](VC)^m[V], where C is
// a run of consonants, V a run of vowels, and m the "measure".
// Five steps each try a list of suffix rules; the FIRST rule
// whose suffix matches is the only one considered, and it fires
// only if its condition on the remaining stem holds.
//
//   Step 1a  plurals            caresses → caress, ponies → poni
//   Step 1b  -ed / -ing         hopping → hop, filing → file
//   Step 1c  y → i              happy → happi
//   Step 2   double suffixes    relational → relate
//   Step 3   -ic-, -ful, -ness  generalize → general
//   Step 4   single suffixes    adjustment → adjust
//   Step 5   tidy up -e / -ll   rate → rate, controll → control
//
// Extensions over the 1980 paper:
//   - A small pool of irregular forms is looked up first
//   - Words of one or two letters are returned unchanged
//   - -ies / -ied on four-letter words become -ie (ties → tie)
//   - Step 1c only fires after a consonant (enjoy stays enjoy)
//   - Step 2 tries -alli first, adds -fulli → -ful and -logi → -log
//   - A two-letter vowel+consonant stem counts as "cvc"
//
// Reference: Porter, M.F. (1980). "An algorithm for suffix
//            stripping." Program, 14(3), 130-137.

use crate::domain::traits::Stemmer;

/// Which stemming algorithm the normaliser uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StemmerKind {
    #[default]
    Porter,
    Snowball,
}

impl StemmerKind {
    pub fn build(self) -> Box<dyn Stemmer> {
        match self {
            StemmerKind::Porter   => Box::new(PorterStemmer::new()),
            StemmerKind::Snowball => Box::new(SnowballStemmer::new()),
        }
    }
}

// ─── Snowball (rust-stemmers) ─────────────────────────────────────────────────

/// Snowball English stemmer backed by the rust-stemmers crate.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}

// ─── Porter ───────────────────────────────────────────────────────────────────

/// Porter stemmer. Stateless, so a single instance can be shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();

        if let Some(fixed) = irregular_form(&lower) {
            return fixed.to_string();
        }

        let w: Vec<char> = lower.chars().collect();
        if w.len() <= 2 {
            return lower;
        }

        let w = step1a(w);
        let w = step1b(w);
        let w = step1c(w);
        let w = step2(w);
        let w = step3(w);
        let w = step4(w);
        let w = step5a(w);
        let w = step5b(w);

        w.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Forms the suffix rules get wrong, mapped straight to their stem
fn irregular_form(word: &str) -> Option<&'static str> {
    let stem = match word {
        "sky" | "skies"        => "sky",
        "dying"                => "die",
        "lying"                => "lie",
        "tying"                => "tie",
        "news"                 => "news",
        "innings" | "inning"   => "inning",
        "outings" | "outing"   => "outing",
        "cannings" | "canning" => "canning",
        "howe"                 => "howe",
        "proceed"              => "proceed",
        "exceed"               => "exceed",
        "succeed"              => "succeed",
        _ => return None,
    };
    Some(stem)
}

/// A condition evaluated on the stem left after removing a suffix
#[derive(Debug, Clone, Copy)]
enum Cond {
    Always,
    /// m > 0
    Measure,
    /// m > 1
    MeasureGt1,
    /// stem longer than one letter and ending in a consonant
    AfterConsonant,
    /// m > 1 and the stem ends in s or t
    IonStem,
}

impl Cond {
    fn holds(self, stem: &[char]) -> bool {
        match self {
            Cond::Always         => true,
            Cond::Measure        => measure(stem) > 0,
            Cond::MeasureGt1     => measure(stem) > 1,
            Cond::AfterConsonant => stem.len() > 1 && ends_in_consonant(stem),
            Cond::IonStem        => measure(stem) > 1 && matches!(stem.last(), Some('s' | 't')),
        }
    }
}

/// (suffix, replacement, condition)
type Rule = (&'static str, &'static str, Cond);

/// One pass over the word: `mask[i]` is true when `w[i]` acts as a
/// consonant. y is a consonant at the start or after a vowel.
fn consonant_mask(w: &[char]) -> Vec<bool> {
    let mut mask: Vec<bool> = Vec::with_capacity(w.len());
    for (i, &c) in w.iter().enumerate() {
        let consonant = match c {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !mask[i - 1],
            _ => true,
        };
        mask.push(consonant);
    }
    mask
}

fn ends_in_consonant(w: &[char]) -> bool {
    consonant_mask(w).last().copied().unwrap_or(false)
}

/// m in [C](VC)^m[V]: the number of vowel→consonant transitions
fn measure(stem: &[char]) -> usize {
    consonant_mask(stem)
        .windows(2)
        .filter(|pair| !pair[0] && pair[1])
        .count()
}

fn contains_vowel(stem: &[char]) -> bool {
    consonant_mask(stem).iter().any(|&consonant| !consonant)
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && ends_in_consonant(w)
}

/// consonant-vowel-consonant ending, the last not w, x or y
fn ends_cvc(w: &[char]) -> bool {
    let mask = consonant_mask(w);
    match mask.as_slice() {
        [.., c1, v, c2] => {
            *c1 && !*v && *c2 && !matches!(w[w.len() - 1], 'w' | 'x' | 'y')
        }
        [v, c] => !*v && *c,
        _ => false,
    }
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    w.len() >= n && w[w.len() - n..].iter().copied().eq(suffix.chars())
}

fn with_suffix(stem: &[char], replacement: &str) -> Vec<char> {
    let mut out = stem.to_vec();
    out.extend(replacement.chars());
    out
}

/// Try `rules` in order. Returns None when no suffix matched at
/// all; otherwise the rewritten word, or the word unchanged when
/// the first matching rule's condition failed.
fn apply_rules(w: &[char], rules: &[Rule]) -> Option<Vec<char>> {
    for &(suffix, replacement, condition) in rules {
        if ends_with(w, suffix) {
            let stem = &w[..w.len() - suffix.len()];
            return Some(if condition.holds(stem) {
                with_suffix(stem, replacement)
            } else {
                w.to_vec()
            });
        }
    }
    None
}

fn step1a(w: Vec<char>) -> Vec<char> {
    if w.len() == 4 && ends_with(&w, "ies") {
        return with_suffix(&w[..1], "ie");
    }

    const RULES: [Rule; 4] = [
        ("sses", "ss", Cond::Always),
        ("ies", "i", Cond::Always),
        ("ss", "ss", Cond::Always),
        ("s", "", Cond::Always),
    ];
    apply_rules(&w, &RULES).unwrap_or(w)
}

fn step1b(w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "ied") {
        let replacement = if w.len() == 4 { "ie" } else { "i" };
        return with_suffix(&w[..w.len() - 3], replacement);
    }

    if ends_with(&w, "eed") {
        let stem = &w[..w.len() - 3];
        return if Cond::Measure.holds(stem) {
            with_suffix(stem, "ee")
        } else {
            w
        };
    }

    let stem = ["ed", "ing"].iter().find_map(|suffix| {
        if !ends_with(&w, suffix) {
            return None;
        }
        let stem = &w[..w.len() - suffix.len()];
        contains_vowel(stem).then(|| stem.to_vec())
    });
    let Some(mut stem) = stem else {
        return w;
    };

    // Repair the stem so later steps see a plausible word
    if ends_with(&stem, "at") || ends_with(&stem, "bl") || ends_with(&stem, "iz") {
        stem.push('e');
    } else if ends_double_consonant(&stem) {
        if !matches!(stem[stem.len() - 1], 'l' | 's' | 'z') {
            stem.pop();
        }
    } else if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

fn step1c(w: Vec<char>) -> Vec<char> {
    const RULES: [Rule; 1] = [("y", "i", Cond::AfterConsonant)];
    apply_rules(&w, &RULES).unwrap_or(w)
}

fn step2(w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "alli") && Cond::Measure.holds(&w[..w.len() - 4]) {
        return step2(with_suffix(&w[..w.len() - 4], "al"));
    }

    const RULES: [Rule; 21] = [
        ("ational", "ate", Cond::Measure),
        ("tional", "tion", Cond::Measure),
        ("enci", "ence", Cond::Measure),
        ("anci", "ance", Cond::Measure),
        ("izer", "ize", Cond::Measure),
        ("bli", "ble", Cond::Measure),
        ("alli", "al", Cond::Measure),
        ("entli", "ent", Cond::Measure),
        ("eli", "e", Cond::Measure),
        ("ousli", "ous", Cond::Measure),
        ("ization", "ize", Cond::Measure),
        ("ation", "ate", Cond::Measure),
        ("ator", "ate", Cond::Measure),
        ("alism", "al", Cond::Measure),
        ("iveness", "ive", Cond::Measure),
        ("fulness", "ful", Cond::Measure),
        ("ousness", "ous", Cond::Measure),
        ("aliti", "al", Cond::Measure),
        ("iviti", "ive", Cond::Measure),
        ("biliti", "ble", Cond::Measure),
        ("fulli", "ful", Cond::Measure),
    ];
    if let Some(out) = apply_rules(&w, &RULES) {
        return out;
    }

    // The l of -logi stays with the stem, so geo-/theo- qualify
    if ends_with(&w, "logi") && Cond::Measure.holds(&w[..w.len() - 3]) {
        return with_suffix(&w[..w.len() - 4], "log");
    }
    w
}

fn step3(w: Vec<char>) -> Vec<char> {
    const RULES: [Rule; 7] = [
        ("icate", "ic", Cond::Measure),
        ("ative", "", Cond::Measure),
        ("alize", "al", Cond::Measure),
        ("iciti", "ic", Cond::Measure),
        ("ical", "ic", Cond::Measure),
        ("ful", "", Cond::Measure),
        ("ness", "", Cond::Measure),
    ];
    apply_rules(&w, &RULES).unwrap_or(w)
}

fn step4(w: Vec<char>) -> Vec<char> {
    const RULES: [Rule; 19] = [
        ("al", "", Cond::MeasureGt1),
        ("ance", "", Cond::MeasureGt1),
        ("ence", "", Cond::MeasureGt1),
        ("er", "", Cond::MeasureGt1),
        ("ic", "", Cond::MeasureGt1),
        ("able", "", Cond::MeasureGt1),
        ("ible", "", Cond::MeasureGt1),
        ("ant", "", Cond::MeasureGt1),
        ("ement", "", Cond::MeasureGt1),
        ("ment", "", Cond::MeasureGt1),
        ("ent", "", Cond::MeasureGt1),
        ("ion", "", Cond::IonStem),
        ("ou", "", Cond::MeasureGt1),
        ("ism", "", Cond::MeasureGt1),
        ("ate", "", Cond::MeasureGt1),
        ("iti", "", Cond::MeasureGt1),
        ("ous", "", Cond::MeasureGt1),
        ("ive", "", Cond::MeasureGt1),
        ("ize", "", Cond::MeasureGt1),
    ];
    apply_rules(&w, &RULES).unwrap_or(w)
}

fn step5a(w: Vec<char>) -> Vec<char> {
    if !ends_with(&w, "e") {
        return w;
    }
    let stem = &w[..w.len() - 1];
    let m = measure(stem);
    if m > 1 || (m == 1 && !ends_cvc(stem)) {
        stem.to_vec()
    } else {
        w
    }
}

fn step5b(mut w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "ll") && measure(&w[..w.len() - 1]) > 1 {
        w.pop();
    }
    w
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn porter(word: &str) -> String {
        PorterStemmer::new().stem(word)
    }

    #[test]
    fn test_plurals() {
        assert_eq!(porter("caresses"), "caress");
        assert_eq!(porter("ponies"), "poni");
        assert_eq!(porter("ties"), "tie");
        assert_eq!(porter("caress"), "caress");
        assert_eq!(porter("cats"), "cat");
        assert_eq!(porter("flies"), "fli");
    }

    #[test]
    fn test_ed_and_ing() {
        assert_eq!(porter("running"), "run");
        assert_eq!(porter("hopping"), "hop");
        assert_eq!(porter("filing"), "file");
        assert_eq!(porter("agreed"), "agre");
        assert_eq!(porter("plastered"), "plaster");
        assert_eq!(porter("conflated"), "conflat");
        assert_eq!(porter("falling"), "fall");
        assert_eq!(porter("sing"), "sing");
    }

    #[test]
    fn test_y_to_i() {
        assert_eq!(porter("happy"), "happi");
        assert_eq!(porter("enjoy"), "enjoy");
    }

    #[test]
    fn test_multi_step_suffixes() {
        assert_eq!(porter("relational"), "relat");
        assert_eq!(porter("generalization"), "gener");
        assert_eq!(porter("hopefulness"), "hope");
        assert_eq!(porter("adjustment"), "adjust");
    }

    #[test]
    fn test_short_and_irregular_words() {
        assert_eq!(porter("is"), "is");
        assert_eq!(porter("a"), "a");
        assert_eq!(porter("dying"), "die");
        assert_eq!(porter("skies"), "sky");
        assert_eq!(porter("news"), "news");
    }

    #[test]
    fn test_numbers_are_untouched() {
        assert_eq!(porter("123"), "123");
        assert_eq!(porter("2024"), "2024");
    }

    #[test]
    fn test_spam_vocabulary() {
        assert_eq!(porter("iphone"), "iphon");
        assert_eq!(porter("free"), "free");
        assert_eq!(porter("call"), "call");
        assert_eq!(porter("win"), "win");
        assert_eq!(porter("prize"), "prize");
        assert_eq!(porter("winner"), "winner");
    }

    #[test]
    fn test_non_ascii_letters_do_not_panic() {
        assert_eq!(porter("café"), "café");
        assert_eq!(porter("naïve"), "naïv");
    }

    #[test]
    fn test_long_y_run_is_linear() {
        // y alternates consonant/vowel along the run, so the last y
        // follows a consonant and becomes i
        let word = "y".repeat(200_000);
        let stem = porter(&word);
        assert_eq!(stem.len(), 200_000);
        assert!(stem.starts_with("yyyy"));
        assert!(stem.ends_with("yi"));
    }

    #[test]
    fn test_y_after_vowel_is_consonant() {
        assert_eq!(measure(&['t', 'o', 'y']), 1);
        assert_eq!(consonant_mask(&['y', 'y', 'y']), vec![true, false, true]);
        assert!(contains_vowel(&['s', 'y']));
    }

    #[test]
    fn test_snowball_is_available() {
        let s = StemmerKind::Snowball.build();
        assert_eq!(s.name(), "snowball");
        assert_eq!(s.stem("running"), "run");
    }
}
