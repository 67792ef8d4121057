// src/detect/orchestrator.rs
//
// Event loop tying the classifier, extractors and normalizer together.
// One task owns all detector state; mutation notifications and queries
// arrive over a channel, so no locking is needed and `scraper::Html`
// (which is not Send) never crosses an await point.
use scraper::Html;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info};

use super::{classifier, extract, JobInfo, Request, Response, SiteId};
use crate::config::DetectorConfig;
use crate::page::PageHost;

/// Last computed result and the URL it was computed for. Owned by the
/// orchestrator task; queries read it through the channel, never directly.
#[derive(Debug, Clone, Default)]
pub struct DetectorState {
    pub info: JobInfo,
    pub last_url: String,
}

/// Cancellable scheduled-run handle. Scheduling replaces any pending
/// deadline, so at most one run is ever pending.
struct Debounce {
    deadline: Option<Instant>,
}

impl Debounce {
    fn new() -> Self {
        Self { deadline: None }
    }

    fn schedule(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn clear(&mut self) {
        self.deadline = None;
    }

    fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

enum Event {
    /// The host page's DOM changed under us.
    Mutation,
    /// Ad hoc request to re-run detection after the usual debounce.
    Detect,
    /// On-demand query; answered within the configured max wait.
    Query(oneshot::Sender<JobInfo>),
}

struct PendingQuery {
    expires: Instant,
    reply: oneshot::Sender<JobInfo>,
}

/// Handle for talking to a spawned detector. Cloneable; dropping every
/// clone shuts the detector task down.
#[derive(Clone)]
pub struct DetectorHandle {
    events: mpsc::Sender<Event>,
}

impl DetectorHandle {
    /// Tell the detector the page mutated. Cheap and non-blocking; bursts
    /// collapse into a single debounced pass.
    pub fn notify_mutation(&self) {
        let _ = self.events.try_send(Event::Mutation);
    }

    /// Schedule a detection pass without waiting for a mutation.
    pub fn request_detect(&self) {
        let _ = self.events.try_send(Event::Detect);
    }

    /// Best-effort job info, resolved as soon as a title or company is
    /// known, or after the configured max wait with whatever is stored.
    /// Never hangs; a dead detector yields the empty JobInfo.
    pub async fn job_info(&self) -> JobInfo {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.events.send(Event::Query(reply_tx)).await.is_err() {
            return JobInfo::default();
        }
        reply_rx.await.unwrap_or_default()
    }

    /// Wire-protocol adapter for the submission UI.
    pub async fn handle_request(&self, request: Request) -> Response {
        match request {
            Request::GetJobInfo => Response {
                job_info: self.job_info().await,
            },
        }
    }
}

/// Debounced page observer. Spawn one per page; state lives for the page's
/// lifetime and dies with the handle.
pub struct Detector {
    host: Arc<dyn PageHost>,
    config: DetectorConfig,
    state: DetectorState,
    debounce: Debounce,
    pending: Vec<PendingQuery>,
    next_poll: Option<Instant>,
    events: mpsc::Receiver<Event>,
}

impl Detector {
    pub fn spawn(host: Arc<dyn PageHost>, config: DetectorConfig) -> DetectorHandle {
        let (tx, rx) = mpsc::channel(64);
        let last_url = host.href();
        let detector = Detector {
            host,
            config,
            state: DetectorState {
                info: JobInfo::default(),
                last_url,
            },
            debounce: Debounce::new(),
            pending: Vec::new(),
            next_poll: None,
            events: rx,
        };
        tokio::spawn(detector.run());
        DetectorHandle { events: tx }
    }

    async fn run(mut self) {
        info!("detector attached to {}", self.state.last_url);
        // Initial pass once the page has had a moment to render.
        self.debounce.schedule(self.config.mutation_debounce);

        loop {
            let debounce_at = self.debounce.deadline();
            let poll_at = self.next_poll;

            tokio::select! {
                event = self.events.recv() => match event {
                    Some(Event::Mutation) => self.on_mutation(),
                    Some(Event::Detect) => self.debounce.schedule(self.config.adhoc_debounce),
                    Some(Event::Query(reply)) => self.on_query(reply),
                    None => break,
                },
                _ = sleep_until_opt(debounce_at), if debounce_at.is_some() => {
                    self.debounce.clear();
                    self.run_pass();
                    self.flush_queries();
                }
                _ = sleep_until_opt(poll_at), if poll_at.is_some() => {
                    self.next_poll = None;
                    self.flush_queries();
                }
            }
        }

        debug!("detector channel closed, shutting down");
    }

    fn on_mutation(&mut self) {
        let href = self.host.href();
        if href != self.state.last_url {
            debug!("url changed: {} -> {}", self.state.last_url, href);
            self.state.last_url = href;
            self.debounce.schedule(self.config.url_change_debounce);
        } else {
            self.debounce.schedule(self.config.mutation_debounce);
        }
    }

    fn on_query(&mut self, reply: oneshot::Sender<JobInfo>) {
        // Force one pass right away instead of waiting out the debounce;
        // the passive path keeps its own schedule.
        self.run_pass();

        if self.state.info.has_identity() {
            let _ = reply.send(self.state.info.clone());
            return;
        }

        self.pending.push(PendingQuery {
            expires: Instant::now() + self.config.max_wait,
            reply,
        });
        self.schedule_poll();
    }

    /// One full Detecting pass: snapshot, classify, extract, store. The
    /// stored JobInfo is overwritten wholesale, never merged.
    fn run_pass(&mut self) {
        let snapshot = self.host.snapshot();
        let document = Html::parse_document(&snapshot.html);

        if !classifier::is_job_detail_page(&snapshot.hostname, &snapshot.path, &document) {
            debug!("{}{} is not a job detail page", snapshot.hostname, snapshot.path);
            self.state.info = JobInfo::default();
        } else {
            let site = classifier::match_site(&snapshot.hostname, &snapshot.path)
                .unwrap_or(SiteId::Generic);
            let info = extract::extract_for(site, &document);
            if info.has_identity() {
                info!(
                    "detected job: {:?} at {:?} ({:?})",
                    info.job_title, info.company, info.location
                );
            }
            self.state.info = info;
        }

        self.state.last_url = snapshot.url;
    }

    /// Answer pending queries that are satisfied or out of time.
    fn flush_queries(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let info = self.state.info.clone();
        if info.has_identity() {
            for query in self.pending.drain(..) {
                let _ = query.reply.send(info.clone());
            }
        } else {
            let now = Instant::now();
            let mut still_waiting = Vec::new();
            for query in self.pending.drain(..) {
                if query.expires <= now {
                    let _ = query.reply.send(info.clone());
                } else {
                    still_waiting.push(query);
                }
            }
            self.pending = still_waiting;
        }

        if self.pending.is_empty() {
            self.next_poll = None;
        } else {
            self.schedule_poll();
        }
    }

    fn schedule_poll(&mut self) {
        self.next_poll = Some(Instant::now() + self.config.poll_interval);
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
