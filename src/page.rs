// src/page.rs
//
// The detector does not own the page it inspects; it reads it through this
// abstraction. Production backs onto a fetched document, tests use fakes
// with interior mutability to simulate a mutating page.

/// One consistent read of the hosting page.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub hostname: String,
    pub path: String,
    pub html: String,
}

/// Read access to the current document and location. `href` must be cheap;
/// it is consulted on every mutation notification to tell navigation apart
/// from in-page rendering.
pub trait PageHost: Send + Sync + 'static {
    fn href(&self) -> String;
    fn snapshot(&self) -> PageSnapshot;
}
