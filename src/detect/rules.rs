// src/detect/rules.rs
//
// Static per-site matching rules and selector tables. The selector lists are
// maintained by inspecting real pages and will drift as those sites change
// their markup; ordering within each list is the tie-break policy (most
// structural first, bare tags last) and must be preserved.
use regex::Regex;
use std::sync::LazyLock;

/// Job boards and applicant tracking systems the detector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteId {
    LinkedIn,
    Indeed,
    Greenhouse,
    Lever,
    Workday,
    Ashby,
    SmartRecruiters,
    Icims,
    Taleo,
    Generic,
}

/// Path half of a site matcher, paired with a hostname substring check.
pub enum PathPattern {
    Any,
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    Matches(Regex),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Any => true,
            PathPattern::Contains(fragment) => path.contains(fragment),
            PathPattern::ContainsAny(fragments) => fragments.iter().any(|f| path.contains(f)),
            PathPattern::Matches(re) => re.is_match(path),
        }
    }
}

/// One entry of the site table: hostname substring + path pattern.
pub struct SiteRule {
    pub id: SiteId,
    pub host: &'static str,
    pub path: PathPattern,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hard-coded path pattern")
}

/// Site rules, consulted in order; first match wins.
pub static SITE_RULES: LazyLock<Vec<SiteRule>> = LazyLock::new(|| {
    vec![
        SiteRule {
            id: SiteId::LinkedIn,
            host: "linkedin.com",
            path: PathPattern::Contains("/jobs/view/"),
        },
        SiteRule {
            id: SiteId::Indeed,
            host: "indeed.",
            path: PathPattern::ContainsAny(&["/viewjob", "/rc/clk"]),
        },
        SiteRule {
            id: SiteId::Greenhouse,
            host: "greenhouse.io",
            path: PathPattern::Matches(re(r"/jobs/\d+")),
        },
        SiteRule {
            id: SiteId::Lever,
            host: "lever.co",
            path: PathPattern::Contains("/jobs/"),
        },
        SiteRule {
            id: SiteId::Workday,
            host: "myworkdayjobs.com",
            path: PathPattern::Any,
        },
        // Workday tenant hosts like company.wd5.myworkdayjobs.com sometimes
        // surface under bare "wd" subdomains.
        SiteRule {
            id: SiteId::Workday,
            host: "wd",
            path: PathPattern::Contains("job"),
        },
        SiteRule {
            id: SiteId::Ashby,
            host: "ashbyhq.com",
            path: PathPattern::Matches(re(r"/job/\w+")),
        },
        SiteRule {
            id: SiteId::SmartRecruiters,
            host: "smartrecruiters.com",
            path: PathPattern::Contains("/job/"),
        },
        SiteRule {
            id: SiteId::Icims,
            host: "icims.com",
            path: PathPattern::Matches(re(r"jobs/\d+")),
        },
        SiteRule {
            id: SiteId::Taleo,
            host: "taleo.net",
            path: PathPattern::Matches(re(r"jobdetail\.")),
        },
    ]
});

/// Prioritized selector lists for one extraction pass per field.
pub struct SelectorSet {
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
}

pub static LINKEDIN_SELECTORS: SelectorSet = SelectorSet {
    title: &[
        "h1.job-details-jobs-unified-top-card__job-title",
        "h1.jobs-unified-top-card__job-title",
        "h1[data-test-id=\"job-details-jobs-unified-top-card__job-title\"]",
        "main h1",
        "div.jobs-unified-top-card h1",
        "div.jobs-details-top-card__job-title--container h1",
        "h1[class*=\"job-title\"]",
    ],
    company: &[
        "a.job-details-jobs-unified-top-card__company-name",
        ".job-details-jobs-unified-top-card__company-name a",
        ".jobs-unified-top-card__company-name a",
        "[data-test-id=\"job-details-jobs-unified-top-card__company-name\"]",
        "a[href*=\"/company/\"] span",
        "a[href*=\"/company/\"]",
        "span.jobs-unified-top-card__company-name",
        "div[class*=\"company-name\"]",
    ],
    location: &[
        "[data-test-id=\"job-details-jobs-unified-top-card__primary-description\"]",
        ".jobs-unified-top-card__primary-description",
        ".jobs-unified-top-card__bullet",
        "span.jobs-unified-top-card__workplace-type",
        "span.jobs-unified-top-card__location",
        "li.jobs-unified-top-card__job-insight span",
        "span[class*=\"job-location\"]",
        "div[class*=\"job-location\"]",
    ],
};

pub static INDEED_SELECTORS: SelectorSet = SelectorSet {
    title: &[
        "h1[data-testid=\"jobTitle\"]",
        "h1[data-testid=\"job-title\"]",
        "h1.jobsearch-JobInfoHeader-title",
        "h1.jobTitle",
        "h1[class*=\"jobTitle\"]",
        "h1",
    ],
    company: &[
        "[data-testid=\"inlineHeader-companyName\"]",
        ".jobsearch-CompanyInfoWithoutHeaderImage div[data-company-name]",
        ".jobsearch-CompanyInfoWithoutHeaderImage .jobsearch-InlineCompanyRating div:first-child",
        ".jobsearch-InlineCompanyRating div:first-child",
        ".jobsearch-CompanyInfoContainer a",
        ".companyName",
    ],
    location: &[
        "[data-testid=\"inlineHeader-companyLocation\"]",
        "[data-testid=\"jobLocation\"]",
        ".jobsearch-CompanyInfoWithoutHeaderImage div:nth-child(2)",
        ".jobsearch-JobInfoHeader-subtitle > div:last-child",
        ".jobsearch-CompanyInfoWithReview div:nth-child(2)",
    ],
};

/// Selectors for the generic pass, scoped to the main content container.
/// Covers Workday automation ids, schema.org microdata, and common class
/// names used by company career pages.
pub static GENERIC_SELECTORS: SelectorSet = SelectorSet {
    title: &[
        "main h1",
        "h1[data-automation-id=\"jobPostingHeader\"]",
        "h1[data-testid=\"jobTitle\"]",
        "h1[itemprop=\"title\"]",
        "h1[class*=\"job-title\"]",
        "h1[class*=\"jobTitle\"]",
        "h1",
    ],
    company: &[
        "[data-automation-id=\"company\"]",
        "[itemprop=\"hiringOrganization\"] [itemprop=\"name\"]",
        "[itemprop=\"hiringOrganization\"]",
        ".company span",
        ".company",
        "a.company",
        "header [class*=\"company\"]",
        "header [class*=\"employer\"]",
    ],
    location: &[
        "[data-automation-id=\"jobLocation\"]",
        "[data-testid=\"job-location\"]",
        "[itemprop=\"jobLocation\"] [itemprop=\"addressLocality\"]",
        "[itemprop=\"jobLocation\"]",
        ".job-location",
        ".location",
        ".jobLocation",
        "li[class*=\"location\"]",
    ],
};

impl SiteId {
    /// Dedicated selector set for this site, if it has one. The ATS hosts
    /// share the generic pass, which also gets the meta-tag fallbacks.
    pub fn selector_set(self) -> Option<&'static SelectorSet> {
        match self {
            SiteId::LinkedIn => Some(&LINKEDIN_SELECTORS),
            SiteId::Indeed => Some(&INDEED_SELECTORS),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_pattern_matches() {
        assert!(PathPattern::Any.matches("/whatever"));
        assert!(PathPattern::Contains("/jobs/view/").matches("/jobs/view/12345"));
        assert!(!PathPattern::Contains("/jobs/view/").matches("/jobs/search"));
        assert!(PathPattern::ContainsAny(&["/viewjob", "/rc/clk"]).matches("/rc/clk?jk=abc"));
        assert!(PathPattern::Matches(re(r"/jobs/\d+")).matches("/acme/jobs/987654"));
        assert!(!PathPattern::Matches(re(r"/jobs/\d+")).matches("/acme/jobs/senior-engineer"));
    }

    #[test]
    fn test_rule_table_ends_before_generic() {
        // Generic is not a table entry; it is the fallback the classifier
        // applies when no rule matches.
        assert!(SITE_RULES.iter().all(|rule| rule.id != SiteId::Generic));
    }

    #[test]
    fn test_selector_set_dispatch() {
        assert!(SiteId::LinkedIn.selector_set().is_some());
        assert!(SiteId::Indeed.selector_set().is_some());
        assert!(SiteId::Greenhouse.selector_set().is_none());
        assert!(SiteId::Generic.selector_set().is_none());
    }
}
