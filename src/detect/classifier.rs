// src/detect/classifier.rs
//
// Decides whether a page is a job detail page (one specific posting) as
// opposed to a search or listing page. Pure predicate; gates extraction so
// JobInfo is never populated from listing chrome.
use scraper::{Html, Selector};

use super::rules::{SiteId, SITE_RULES};

/// Heading selectors for the generic "looks like a posting" heuristic.
const HEADING_SELECTORS: &[&str] = &["main h1", "h1.job-title", "h1[class*=\"title\"]"];

/// An apply-labeled control is the other half of the heuristic.
const APPLY_SELECTORS: &[&str] = &[
    "button[type=\"submit\"][id*=\"apply\"]",
    "button[id*=\"apply\"]",
    "a[id*=\"apply\"]",
    "a[href*=\"apply\"]",
];

/// Scan the site table in order; first rule whose hostname substring and
/// path pattern both match wins.
pub fn match_site(hostname: &str, path: &str) -> Option<SiteId> {
    SITE_RULES
        .iter()
        .find(|rule| hostname.contains(rule.host) && rule.path.matches(path))
        .map(|rule| rule.id)
}

/// Fallback for hosts not in the table: a prominent heading plus an
/// "apply" button or link. Both must be present.
pub fn looks_like_job_detail(document: &Html) -> bool {
    has_any_match(document, HEADING_SELECTORS) && has_any_match(document, APPLY_SELECTORS)
}

/// True when the page shows one specific posting, either because a known
/// site rule matches the URL or because the generic heuristic fires.
pub fn is_job_detail_page(hostname: &str, path: &str, document: &Html) -> bool {
    if match_site(hostname, path).is_some() {
        return true;
    }
    looks_like_job_detail(document)
}

fn has_any_match(document: &Html, selectors: &[&str]) -> bool {
    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if document.select(&selector).next().is_some() {
                return true;
            }
        }
    }
    false
}
