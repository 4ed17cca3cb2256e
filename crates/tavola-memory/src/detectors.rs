//! Preference detectors.
//!
//! A fixed set of lightweight pattern detectors run against each user
//! message. Detection is best-effort: unmatched text is a no-op, and
//! each detector only ever writes its own key.

use std::sync::LazyLock;

use regex::Regex;

use tavola_types::PreferenceKey;

static CUISINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(italian|chinese|indian|mexican|japanese|thai|korean|french|mediterranean|vietnamese|lebanese|greek|mughlai)\b",
    )
    .expect("invalid cuisine regex")
});

static BUDGET_LOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cheap|budget|affordable|inexpensive)\b").expect("invalid budget regex")
});

static BUDGET_HIGH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(expensive|upscale|fancy|fine\s+dining|splurge)\b")
        .expect("invalid budget regex")
});

// Capitalized place name after a locative preposition. "near me" has no
// capital and falls through.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bin|\bnear|\baround)\s+([A-Z][\w']*(?:\s+[A-Z][\w']*)*)")
        .expect("invalid location regex")
});

/// Run every detector against the text and return the (key, value)
/// pairs that matched.
pub fn detect(text: &str) -> Vec<(PreferenceKey, String)> {
    let mut found = Vec::new();

    if let Some(m) = CUISINE_RE.find(text) {
        found.push((PreferenceKey::Cuisine, m.as_str().to_lowercase()));
    }

    if BUDGET_LOW_RE.is_match(text) {
        found.push((PreferenceKey::Budget, "budget-friendly".to_string()));
    } else if BUDGET_HIGH_RE.is_match(text) {
        found.push((PreferenceKey::Budget, "upscale".to_string()));
    }

    if let Some(place) = extract_location(text) {
        found.push((PreferenceKey::Location, place));
    }

    found
}

/// Extract a capitalized place name following "in"/"near"/"around".
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
