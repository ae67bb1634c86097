//! Text normalization and fuzzy matching
//!
//! Every comparison in the crate goes through [`normalize`] first, so
//! "São Paulo", "sao paulo" and "SAO PAULO" are the same string by the
//! time any matching happens.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref LOCATION_FILLER_RE: Regex =
        Regex::new(r"\b(estado|cidade|de|do|da|em|no|na|dos|das)\b").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Minimum needle length for fuzzy matching. Shorter tokens ("sp", "ev")
/// produce too many false positives.
const FUZZY_MIN_NEEDLE: usize = 4;

/// Maximum edit distance tolerated by [`fuzzy_includes`].
const FUZZY_MAX_DISTANCE: usize = 2;

/// Lowercase and strip diacritics (NFD decomposition, combining marks
/// removed). Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Strip Portuguese filler words from a free-text location phrase, so
/// "no estado de Sao Paulo" reduces to "sao paulo".
pub fn clean_location_phrase(text: &str) -> String {
    let normalized = normalize(text);
    let cleaned = LOCATION_FILLER_RE.replace_all(&normalized, " ");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

/// First letter of each word, e.g. "belo horizonte" -> "bh".
pub fn initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect()
}

/// Levenshtein edit distance. Symmetric, zero on identical strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Typo-tolerant containment check.
///
/// True if `needle` occurs verbatim in `haystack`, or if some substring of
/// `haystack` of the same character length is within edit distance 2 of
/// `needle`. Needles shorter than 4 characters never fuzzy-match.
/// Both inputs are expected to be normalized already.
pub fn fuzzy_includes(haystack: &str, needle: &str) -> bool {
    if haystack.is_empty() || needle.is_empty() {
        return false;
    }
    if haystack.contains(needle) {
        return true;
    }
    let needle_chars: Vec<char> = needle.chars().collect();
    let len = needle_chars.len();
    if len < FUZZY_MIN_NEEDLE {
        return false;
    }
    let hay_chars: Vec<char> = haystack.chars().collect();
    if hay_chars.len() < len {
        return false;
    }
    for window in hay_chars.windows(len) {
        let sub: String = window.iter().collect();
        if levenshtein(&sub, needle) <= FUZZY_MAX_DISTANCE {
            return true;
        }
    }
    false
}
