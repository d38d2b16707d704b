//! Query validation gates.
//!
//! Validation is a cheap pre-filter that runs before any scoring work. Two
//! gates exist, selected per deployment profile through
//! [`ValidationMode`](crate::config::ValidationMode):
//!
//! - The **heuristic** gate rejects obviously non-medical or gibberish text
//!   using character-level checks on the raw query.
//! - The **keyword-overlap** gate accepts only queries sharing vocabulary
//!   with the cluster catalogue.
//!
//! A query passing either gate may still produce zero results.

use crate::index::ClusterIndex;
use crate::normalize::NormalizedQuery;

/// Non-medical slang and noise tokens rejected outright.
///
/// Matched case-insensitively against the whole trimmed query.
static DENYLIST: &[&str] = &[
    "lol", "lmao", "rofl", "omg", "wtf", "idk", "smh", "bruh", "asdf", "asdfgh", "qwerty",
    "zxcvbn", "test", "testing", "hello", "blah",
];

/// Minimum character-diversity ratio (distinct chars / total chars).
const MIN_DIVERSITY: f32 = 0.4;

/// Run length of identical consecutive characters treated as gibberish.
const MAX_CHAR_RUN: usize = 4;

/// Occurrences of rare letters (q, x, z) treated as gibberish.
const MAX_RARE_LETTERS: usize = 2;

/// Heuristic gate: returns true if the query plausibly looks medical.
///
/// All checks run on the raw trimmed lowercase string, not the normalized
/// form, so punctuation and repetition survive long enough to be inspected.
pub fn is_valid_medical_query(query: &str) -> bool {
    let q = query.trim().to_lowercase();

    if q.chars().count() < 3 {
        return false;
    }
    if DENYLIST.contains(&q.as_str()) {
        return false;
    }
    if char_diversity(&q) < MIN_DIVERSITY {
        return false;
    }
    if has_char_run(&q, MAX_CHAR_RUN) {
        return false;
    }
    if is_all_vowels(&q) || is_all_consonants(&q) {
        return false;
    }
    if rare_letter_count(&q) >= MAX_RARE_LETTERS {
        return false;
    }

    true
}

/// Keyword-overlap gate: returns true if the normalized query or any of its
/// words longer than 2 characters appears in the global keyword set.
pub fn is_medical_query(query: &NormalizedQuery, index: &ClusterIndex) -> bool {
    if query.is_empty() {
        return false;
    }
    if index.global_keywords().contains(&query.text) {
        return true;
    }
    query
        .words
        .iter()
        .any(|w| w.len() > 2 && index.global_keywords().contains(w))
}

/// Ratio of distinct characters to total characters.
fn char_diversity(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let distinct = text
        .chars()
        .collect::<std::collections::HashSet<_>>()
        .len();
    distinct as f32 / total as f32
}

/// Detects `run` or more identical consecutive characters.
fn has_char_run(text: &str, run: usize) -> bool {
    let mut count = 0;
    let mut previous = None;
    for c in text.chars() {
        if Some(c) == previous {
            count += 1;
            if count >= run {
                return true;
            }
        } else {
            previous = Some(c);
            count = 1;
        }
    }
    false
}

/// True if `c` is an ASCII vowel.
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// True if every alphabetic character is a vowel (and at least one exists).
fn is_all_vowels(text: &str) -> bool {
    let mut saw_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        saw_letter = true;
        if !is_vowel(c) {
            return false;
        }
    }
    saw_letter
}

/// True if every alphabetic character is a consonant (and at least one exists).
fn is_all_consonants(text: &str) -> bool {
    let mut saw_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        saw_letter = true;
        if is_vowel(c) {
            return false;
        }
    }
    saw_letter
}

/// Counts occurrences of the rare letters q, x, and z.
fn rare_letter_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, 'q' | 'x' | 'z')).count()
}
