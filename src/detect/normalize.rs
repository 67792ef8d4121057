// src/detect/normalize.rs
//
// Location strings scraped from job pages usually mix the place with
// employment metadata, e.g. "San Francisco, CA · Hybrid · Full-time".
// Normalization strips the metadata and keeps the result short enough for
// storage and display. Never fails; the worst case is returning the cleaned
// input unchanged.
use regex::Regex;
use std::sync::LazyLock;

static EMPLOYMENT_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Remote|Hybrid|On[- ]?site|Full[- ]time|Part[- ]time|Contract|Internship)\b")
        .expect("hard-coded tag pattern")
});

// "City, ST" / "City, Country", or failing that a leading capitalized phrase.
static PLACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-zA-Z.\s'-]+,\s*[A-Z]{2,}|[A-Z][a-zA-Z.\s'-]+")
        .expect("hard-coded place pattern")
});

const MAX_LOCATION_LEN: usize = 60;

/// Reduce a raw scraped location to a short plain-text place name.
pub fn normalize_location(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let without_bullets = raw.replace('·', " ");
    let without_tags = EMPLOYMENT_TAGS.replace_all(&without_bullets, "");
    let cleaned = without_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.len() <= MAX_LOCATION_LEN {
        return cleaned;
    }

    match PLACE_PATTERN.find(&cleaned) {
        Some(found) => found.as_str().trim().to_string(),
        None => cleaned,
    }
}
