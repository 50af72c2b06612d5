use crate::dictionary::{is_generic_label, INGREDIENTS};

/// Maximum length difference tolerated by the single-word substring rule.
const MAX_FUZZY_LEN_DIFF: usize = 3;

/// Shortest object name eligible for substring matching.
const MIN_OBJECT_SUBSTRING_LEN: usize = 4;

/// Lower-case and trim a raw label before matching.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve a classifier label to a canonical ingredient.
///
/// Rules, first hit wins:
/// 1. generic labels never match;
/// 2. exact match against any entry;
/// 3. single-word substring match with a bounded length difference;
/// 4. word-set containment in either direction.
///
/// Rule 2 runs as a full pass before the others. Rules 3 and 4 share one pass in
/// declaration order, so on ambiguity the earliest declared entry wins.
pub fn match_label(candidate: &str) -> Option<&'static str> {
    let candidate = normalize(candidate);
    if candidate.is_empty() || is_generic_label(&candidate) {
        return None;
    }

    if let Some(entry) = exact_match(&candidate) {
        return Some(entry);
    }

    let candidate_tokens = tokens(&candidate);
    INGREDIENTS.iter().copied().find(|entry| {
        single_word_match(&candidate, entry) || word_set_match(&candidate_tokens, entry)
    })
}

/// Resolve a localized object name to a canonical ingredient.
///
/// Objects are usually single nouns, so after the exact pass a substring test
/// in either direction is used, with the same length bound as labels. Names
/// shorter than four characters only match exactly.
pub fn match_object(candidate: &str) -> Option<&'static str> {
    let candidate = normalize(candidate);
    if candidate.is_empty() || is_generic_label(&candidate) {
        return None;
    }

    if let Some(entry) = exact_match(&candidate) {
        return Some(entry);
    }
    if candidate.len() < MIN_OBJECT_SUBSTRING_LEN {
        return None;
    }

    INGREDIENTS.iter().copied().find(|entry| {
        let contained = candidate.contains(entry) || entry.contains(candidate.as_str());
        contained && candidate.len().abs_diff(entry.len()) <= MAX_FUZZY_LEN_DIFF
    })
}

fn exact_match(candidate: &str) -> Option<&'static str> {
    INGREDIENTS.iter().copied().find(|entry| *entry == candidate)
}

fn single_word_match(candidate: &str, entry: &str) -> bool {
    if !is_single_word(candidate) || !is_single_word(entry) {
        return false;
    }
    let contained = candidate.contains(entry) || entry.contains(candidate);
    contained && candidate.len().abs_diff(entry.len()) <= MAX_FUZZY_LEN_DIFF
}

fn word_set_match(candidate_tokens: &[&str], entry: &str) -> bool {
    if candidate_tokens.is_empty() {
        return false;
    }
    let entry_tokens = tokens(entry);
    let entry_in_candidate = entry_tokens.iter().all(|t| candidate_tokens.contains(t));
    let candidate_in_entry = candidate_tokens.iter().all(|t| entry_tokens.contains(t));
    entry_in_candidate || candidate_in_entry
}

fn is_single_word(text: &str) -> bool {
    !text.contains(|c: char| c.is_whitespace() || c == '-')
}

fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect()
}
