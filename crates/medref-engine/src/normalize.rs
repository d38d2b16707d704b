//! Text normalization.
//!
//! All comparisons in the pipeline happen on normalized text: lowercase,
//! possessive-free, punctuation-stripped, whitespace-collapsed. The same
//! normalization is applied to queries, cluster keywords, and record fields,
//! so equality and containment tests compare like with like.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

/// Medical terms whose possessive forms are canonicalized before generic
/// apostrophe handling, so "Parkinson's", "parkinsons", and "parkinson"
/// all normalize to the same token.
const POSSESSIVE_MEDICAL_TERMS: &[&str] = &["parkinson", "alzheimer", "huntington", "crohn"];

/// Generic suffix words optionally stripped as standalone tokens.
const GENERIC_SUFFIXES: &[&str] = &[
    "disease",
    "diseases",
    "syndrome",
    "syndromes",
    "condition",
    "conditions",
    "disorder",
    "disorders",
];

/// A normalized query with its word forms precomputed.
#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    /// The normalized query string.
    pub text: String,
    /// Normalized words in query order.
    pub words: Vec<String>,
    /// Word set for O(1) intersection tests.
    pub word_set: HashSet<String>,
}

impl NormalizedQuery {
    /// Builds a normalized query from already-normalized text.
    pub fn from_text(text: String) -> Self {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let word_set = words.iter().cloned().collect();
        Self {
            text,
            words,
            word_set,
        }
    }

    /// Returns true if the normalized text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Canonicalizes text into the comparable normalized form.
///
/// Owns a bounded memo cache keyed by the exact input string. The cache is a
/// performance optimization only: a miss recomputes, and the output for a
/// given input never depends on cache state. Safe for concurrent use.
#[derive(Debug)]
pub struct Normalizer {
    /// Whether bare generic suffix words are stripped (pipeline-wide policy).
    strip_suffixes: bool,
    /// Maximum cached entries before the cache is reset.
    cache_capacity: usize,
    /// Memoized input -> normalized output.
    cache: Mutex<HashMap<String, String>>,
}

impl Normalizer {
    /// Creates a normalizer with the given suffix policy and cache bound.
    pub fn new(strip_suffixes: bool, cache_capacity: usize) -> Self {
        Self {
            strip_suffixes,
            cache_capacity,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Normalizes `text`, consulting the memo cache.
    pub fn normalize(&self, text: &str) -> String {
        if let Some(hit) = self.cache.lock().get(text) {
            return hit.clone();
        }

        let normalized = normalize_text(text, self.strip_suffixes);

        let mut cache = self.cache.lock();
        if cache.len() >= self.cache_capacity {
            // Wholesale reset keeps the bound without eviction bookkeeping.
            cache.clear();
        }
        cache.insert(text.to_string(), normalized.clone());
        normalized
    }

    /// Normalizes `text` and splits it into word forms.
    pub fn query(&self, text: &str) -> NormalizedQuery {
        NormalizedQuery::from_text(self.normalize(text))
    }

    /// Current number of cached entries.
    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }
}

/// Pure normalization, uncached.
///
/// Steps, in order: lowercase and trim; canonicalize known possessive medical
/// terms; generic possessive handling (`'s` -> `s`, remaining apostrophes
/// deleted); replace non-alphanumeric characters with spaces and collapse
/// whitespace; optionally strip bare generic suffix words.
fn normalize_text(text: &str, strip_suffixes: bool) -> String {
    let mut s = text.trim().to_lowercase();

    for term in POSSESSIVE_MEDICAL_TERMS {
        s = s.replace(&format!("{term}'s"), term);
        s = s.replace(&format!("{term}s"), term);
    }

    s = s.replace("'s", "s");
    s = s.replace('\'', "");

    let spaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if strip_suffixes {
        strip_generic_suffixes(&collapsed)
    } else {
        collapsed
    }
}

/// Removes standalone generic suffix words.
///
/// If every word would be stripped, the input is returned unchanged so that
/// queries like "disease" remain representable.
fn strip_generic_suffixes(text: &str) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !GENERIC_SUFFIXES.contains(word))
        .collect();

    if kept.is_empty() {
        text.to_string()
    } else {
        kept.join(" ")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(true, 100)
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalizer().normalize("  Migraine Headache  "), "migraine headache");
    }

    #[test]
    fn possessive_medical_terms_canonicalized() {
        let n = normalizer();
        assert_eq!(n.normalize("Parkinson's Disease"), "parkinson");
        assert_eq!(n.normalize("parkinsons disease"), "parkinson");
        assert_eq!(n.normalize("parkinson disease"), "parkinson");
        assert_eq!(n.normalize("Alzheimer's"), "alzheimer");
        assert_eq!(n.normalize("Crohns"), "crohn");
    }

    #[test]
    fn possessive_insensitive_equality() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Parkinson's Disease"),
            n.normalize("parkinsons disease")
        );
        assert_eq!(
            n.normalize("Huntington's disease"),
            n.normalize("huntington")
        );
    }

    #[test]
    fn generic_possessives() {
        let n = Normalizer::new(false, 100);
        assert_eq!(n.normalize("women's health"), "womens health");
        assert_eq!(n.normalize("don't"), "dont");
    }

    #[test]
    fn punctuation_becomes_single_space() {
        let n = Normalizer::new(false, 100);
        assert_eq!(n.normalize("ehlers-danlos syndrome"), "ehlers danlos syndrome");
        assert_eq!(n.normalize("pain!!  (chronic)"), "pain chronic");
    }

    #[test]
    fn suffix_stripping_is_standalone_only() {
        let n = normalizer();
        // "diseases" as a bare word is stripped; embedded forms are not.
        assert_eq!(n.normalize("rare diseases clinic"), "rare clinic");
        assert_eq!(n.normalize("lyme disease"), "lyme");
    }

    #[test]
    fn suffix_stripping_never_empties() {
        let n = normalizer();
        assert_eq!(n.normalize("disease"), "disease");
        assert_eq!(n.normalize("syndromes"), "syndromes");
    }

    #[test]
    fn empty_input_maps_to_empty() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("   "), "");
        assert_eq!(normalizer().normalize("!!!"), "");
    }

    #[test]
    fn idempotent() {
        let n = normalizer();
        for input in [
            "Parkinson's Disease",
            "Ehlers-Danlos syndrome",
            "  Chronic PAIN!!  ",
            "diabetes",
            "disease",
            "",
        ] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn cache_hit_matches_uncached() {
        let n = normalizer();
        let first = n.normalize("Parkinson's Disease");
        let second = n.normalize("Parkinson's Disease");
        assert_eq!(first, second);
        assert_eq!(first, normalize_text("Parkinson's Disease", true));
    }

    #[test]
    fn cache_resets_at_capacity() {
        let n = Normalizer::new(true, 3);
        for i in 0..3 {
            let _unused = n.normalize(&format!("query {i}"));
        }
        assert_eq!(n.cache_len(), 3);

        // Next insert clears and re-seeds the cache.
        let _unused = n.normalize("query 3");
        assert_eq!(n.cache_len(), 1);
        assert_eq!(n.normalize("query 0"), "query 0");
    }

    #[test]
    fn normalized_query_word_forms() {
        let q = normalizer().query("Chronic Migraine Pain");
        assert_eq!(q.text, "chronic migraine pain");
        assert_eq!(q.words, vec!["chronic", "migraine", "pain"]);
        assert!(q.word_set.contains("migraine"));
        assert!(!q.is_empty());
    }
}
