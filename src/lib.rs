// src/lib.rs
//
// jobscout: best-effort job-posting detection for pages hosted elsewhere.
// The detector classifies a page as a job detail page (or not), extracts
// {job_title, company, location} through prioritized selector lists, and
// keeps the result fresh while the page mutates underneath it.
pub mod config;
pub mod detect;
pub mod fetch;
pub mod page;

pub use config::DetectorConfig;
pub use detect::{Detector, DetectorHandle, JobInfo, Request, Response, SiteId};
pub use fetch::{FetchedPage, PageFetcher};
pub use page::{PageHost, PageSnapshot};
