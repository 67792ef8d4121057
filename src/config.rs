// src/config.rs
use std::time::Duration;

/// Timing knobs for the detection orchestrator. Defaults mirror how long a
/// job board typically takes to finish rendering its posting card: longer
/// after navigation, shorter after in-page mutations, and a bounded wait
/// for on-demand queries.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Debounce after a DOM mutation burst.
    pub mutation_debounce: Duration,
    /// Debounce after the URL changes (SPA navigation needs to settle).
    pub url_change_debounce: Duration,
    /// Debounce for ad hoc detection requests.
    pub adhoc_debounce: Duration,
    /// How often a pending query re-reads the detector state.
    pub poll_interval: Duration,
    /// Upper bound on how long a query may wait for a non-empty result.
    pub max_wait: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mutation_debounce: Duration::from_millis(800),
            url_change_debounce: Duration::from_millis(700),
            adhoc_debounce: Duration::from_millis(500),
            poll_interval: Duration::from_millis(250),
            max_wait: Duration::from_millis(1500),
        }
    }
}

impl DetectorConfig {
    pub fn with_mutation_debounce(mut self, delay: Duration) -> Self {
        self.mutation_debounce = delay;
        self
    }

    pub fn with_url_change_debounce(mut self, delay: Duration) -> Self {
        self.url_change_debounce = delay;
        self
    }

    pub fn with_adhoc_debounce(mut self, delay: Duration) -> Self {
        self.adhoc_debounce = delay;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }
}
