// src/detect/extract.rs
//
// Selector-driven field extraction. Three independent passes per page
// (title, company, location); within a pass the first selector whose
// cleaned text is non-empty wins. A selector that fails to parse is
// skipped, a pass with no match yields the empty string.
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use super::normalize::normalize_location;
use super::rules::{SelectorSet, SiteId, GENERIC_SELECTORS};
use super::JobInfo;

static TITLE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-–|•·]").expect("hard-coded separator pattern"));

static ROLE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(engineer|developer|manager|designer|analyst|intern|scientist|lead|architect|consultant|specialist)",
    )
    .expect("hard-coded keyword pattern")
});

/// Containers the generic pass scopes its selectors to, in preference order.
const CONTENT_CONTAINERS: &[&str] = &["main", "[role=\"main\"]", "#content"];

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Try selectors in priority order against `scope`; return the first
/// non-empty cleaned text. Malformed selectors are skipped.
pub fn try_selectors(scope: ElementRef<'_>, selectors: &[&str]) -> String {
    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(element) = scope.select(&selector).next() {
            let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Run the extraction pass for a classified site. LinkedIn and Indeed have
/// dedicated selector sets applied to the whole document; everything else
/// goes through the generic pass with its meta-tag fallbacks.
pub fn extract_for(site: SiteId, document: &Html) -> JobInfo {
    match site.selector_set() {
        Some(set) => extract_with_set(document, set),
        None => extract_generic(document),
    }
}

fn extract_with_set(document: &Html, set: &SelectorSet) -> JobInfo {
    let root = document.root_element();
    let job_title = try_selectors(root, set.title);
    let company = try_selectors(root, set.company);
    let location = normalize_location(&try_selectors(root, set.location));
    JobInfo {
        job_title,
        company,
        location,
    }
}

fn extract_generic(document: &Html) -> JobInfo {
    debug!("running generic extraction pass");
    let container = content_container(document);

    let mut job_title = try_selectors(container, GENERIC_SELECTORS.title);
    if job_title.is_empty() {
        job_title = title_from_social_meta(document);
    }

    let mut company = try_selectors(container, GENERIC_SELECTORS.company);
    if company.is_empty() {
        company = company_from_site_meta(document);
    }

    let location = normalize_location(&try_selectors(container, GENERIC_SELECTORS.location));

    JobInfo {
        job_title,
        company,
        location,
    }
}

/// Scope for the generic pass: main content region if one exists, else the
/// document root.
fn content_container(document: &Html) -> ElementRef<'_> {
    for raw in CONTENT_CONTAINERS {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                return element;
            }
        }
    }
    document.root_element()
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    let content = document.select(&parsed).next()?.value().attr("content")?;
    let cleaned = clean_text(content);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Social-preview titles are often "Senior X - Company - Location". Split on
/// the usual separator glyphs and pick the segment that names a role; with
/// no keyword hit take the first segment, and use a single segment whole.
fn title_from_social_meta(document: &Html) -> String {
    let Some(og_title) = meta_content(document, "meta[property=\"og:title\"]") else {
        return String::new();
    };

    let parts: Vec<&str> = TITLE_SEPARATORS
        .split(&og_title)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        several => several
            .iter()
            .find(|part| ROLE_KEYWORDS.is_match(part))
            .unwrap_or(&several[0])
            .to_string(),
    }
}

/// Site-name meta as a last-resort company guess, minus any leading `@`
/// (twitter handles).
fn company_from_site_meta(document: &Html) -> String {
    let meta = meta_content(document, "meta[property=\"og:site_name\"]")
        .or_else(|| meta_content(document, "meta[name=\"twitter:site\"]"));
    match meta {
        Some(name) => name.trim_start_matches('@').trim().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Senior\n   Engineer \t"), "Senior Engineer");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_try_selectors_first_non_empty_wins() {
        let doc = Html::parse_document(
            r#"<html><body><h2 class="empty"> </h2><h1>Backend Engineer</h1></body></html>"#,
        );
        let text = try_selectors(doc.root_element(), &["h2.empty", "h1"]);
        assert_eq!(text, "Backend Engineer");
    }

    #[test]
    fn test_try_selectors_skips_malformed_selector() {
        let doc = Html::parse_document(r#"<html><body><h1>Platform Lead</h1></body></html>"#);
        let text = try_selectors(doc.root_element(), &["h1[", "h1"]);
        assert_eq!(text, "Platform Lead");
    }

    #[test]
    fn test_linkedin_selectors() {
        let doc = Html::parse_document(
            r#"<html><body><main>
                 <h1 class="job-details-jobs-unified-top-card__job-title">Staff Rust Engineer</h1>
                 <a class="job-details-jobs-unified-top-card__company-name" href="/company/acme">Acme Corp</a>
                 <span class="jobs-unified-top-card__bullet">Berlin, Germany · Hybrid · Full-time</span>
               </main></body></html>"#,
        );
        let info = extract_for(SiteId::LinkedIn, &doc);
        assert_eq!(info.job_title, "Staff Rust Engineer");
        assert_eq!(info.company, "Acme Corp");
        assert_eq!(info.location, "Berlin, Germany");
    }

    #[test]
    fn test_indeed_selectors() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <h1 data-testid="jobTitle">Data Platform Engineer</h1>
                 <div data-testid="inlineHeader-companyName">Initech</div>
                 <div data-testid="inlineHeader-companyLocation">Austin, TX</div>
               </body></html>"#,
        );
        let info = extract_for(SiteId::Indeed, &doc);
        assert_eq!(info.job_title, "Data Platform Engineer");
        assert_eq!(info.company, "Initech");
        assert_eq!(info.location, "Austin, TX");
    }

    #[test]
    fn test_generic_pass_scopes_to_main() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <header><h1>Careers at Hooli</h1></header>
                 <main>
                   <h1 data-automation-id="jobPostingHeader">Site Reliability Engineer</h1>
                   <div data-automation-id="company">Hooli</div>
                   <div data-automation-id="jobLocation">Palo Alto, CA · On-site</div>
                 </main>
               </body></html>"#,
        );
        let info = extract_for(SiteId::Workday, &doc);
        assert_eq!(info.job_title, "Site Reliability Engineer");
        assert_eq!(info.company, "Hooli");
        assert_eq!(info.location, "Palo Alto, CA");
    }

    #[test]
    fn test_meta_fallbacks() {
        let doc = Html::parse_document(
            r#"<html><head>
                 <meta property="og:title" content="Senior Backend Engineer - Acme Corp">
                 <meta property="og:site_name" content="@AcmeCorp">
               </head><body><p>loading…</p></body></html>"#,
        );
        let info = extract_for(SiteId::Generic, &doc);
        assert_eq!(info.job_title, "Senior Backend Engineer");
        assert_eq!(info.company, "AcmeCorp");
        assert_eq!(info.location, "");
    }

    #[test]
    fn test_meta_title_without_keyword_takes_first_segment() {
        let doc = Html::parse_document(
            r#"<html><head>
                 <meta property="og:title" content="Acme Corp | Open position">
               </head><body></body></html>"#,
        );
        let info = extract_for(SiteId::Generic, &doc);
        assert_eq!(info.job_title, "Acme Corp");
    }

    #[test]
    fn test_meta_title_single_segment_used_whole() {
        let doc = Html::parse_document(
            r#"<html><head>
                 <meta property="og:title" content="Junior Accountant">
               </head><body></body></html>"#,
        );
        let info = extract_for(SiteId::Generic, &doc);
        assert_eq!(info.job_title, "Junior Accountant");
    }

    #[test]
    fn test_missing_everything_yields_empty_fields() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let info = extract_for(SiteId::Generic, &doc);
        assert_eq!(info, JobInfo::default());
    }
}
