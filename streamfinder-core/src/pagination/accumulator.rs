use std::collections::HashSet;
use std::sync::Arc;

use streamfinder_model::{MediaIdentity, MediaSummary, ResultPage};
use tracing::{debug, warn};

use crate::gateway::GatewayError;
use crate::query::{FetchKey, RequestSpec};

/// Identifies one issued fetch. A resolution is applied only if its ticket is
/// the one the accumulator is currently waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    key: FetchKey,
    page: u32,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn request(&self) -> RequestSpec {
        self.key.request_for(self.page)
    }

    pub fn is_continuation(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    /// No fetch key established
    Idle,
    /// A page is in flight for the current key
    Loading { page: u32 },
    /// Nothing in flight; more pages may or may not exist
    Settled,
    /// The last fetch failed. Only re-establishing the key recovers.
    Failed { cause: Arc<GatewayError> },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }
}

/// Outcome of [`PageAccumulator::resolve`].
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The page was merged; `appended` counts items not seen before
    Applied { appended: usize },
    Failed(Arc<GatewayError>),
    /// The ticket no longer matches; nothing changed
    Stale,
}

/// Items gathered for one fetch key, in first-seen order with no duplicate
/// `(id, kind)` identities.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedResultSet {
    items: Vec<MediaSummary>,
    seen: HashSet<MediaIdentity>,
    next_cursor: Option<u32>,
    last_page: Option<u32>,
    total_pages: u32,
    total_results: u64,
}

impl AccumulatedResultSet {
    pub fn items(&self) -> &[MediaSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page to request next, absent once the source is exhausted.
    pub fn next_cursor(&self) -> Option<u32> {
        self.next_cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.last_page.is_some() && self.next_cursor.is_none()
    }

    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    fn merge(&mut self, page: ResultPage) -> usize {
        self.next_cursor = page.next_page();
        self.last_page = Some(page.page_number);
        self.total_pages = page.total_pages;
        self.total_results = page.total_results;

        let before = self.items.len();
        for item in page.items {
            if self.seen.insert(item.identity()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }
}

/// Multi-page fetch orchestration for a single active fetch key.
///
/// Fetching is split in three steps so callers control the I/O: a ticket is
/// issued ([`establish`](Self::establish) or
/// [`request_more`](Self::request_more)), the caller performs the fetch, and
/// the result is handed back through [`resolve`](Self::resolve). At most one
/// ticket is outstanding at a time.
#[derive(Debug)]
pub struct PageAccumulator {
    key: Option<FetchKey>,
    state: LoadState,
    results: AccumulatedResultSet,
    in_flight: Option<u64>,
    issued: u64,
}

impl Default for PageAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self {
            key: None,
            state: LoadState::Idle,
            results: AccumulatedResultSet::default(),
            in_flight: None,
            issued: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn results(&self) -> &AccumulatedResultSet {
        &self.results
    }

    pub fn key(&self) -> Option<&FetchKey> {
        self.key.as_ref()
    }

    /// Makes `request`'s fetch key the active one and issues page 1 of it.
    ///
    /// The page carried by `request` is ignored; accumulation always starts
    /// from the first page. Returns `None` when the key is already active and
    /// not failed. A new key discards the previous results and orphans any
    /// in-flight ticket.
    pub fn establish(&mut self, request: &RequestSpec) -> Option<FetchTicket> {
        let key = request.fetch_key();
        if self.key.as_ref() == Some(&key) && !self.state.is_failed() {
            debug!("fetch key unchanged; keeping accumulated results");
            return None;
        }

        if let Some(orphan) = self.in_flight.take() {
            debug!(token = orphan, "fetch key changed while a page was in flight");
        }
        self.key = Some(key.clone());
        self.results = AccumulatedResultSet::default();
        Some(self.issue(key, 1))
    }

    /// Issues the next page if the accumulator is settled and not exhausted.
    /// Otherwise does nothing.
    pub fn request_more(&mut self) -> Option<FetchTicket> {
        let (LoadState::Settled, Some(key), Some(page)) =
            (&self.state, &self.key, self.results.next_cursor)
        else {
            debug!(state = ?self.state, "continuation ignored");
            return None;
        };
        let key = key.clone();
        Some(self.issue(key, page))
    }

    /// Applies a fetch outcome if `ticket` is still the outstanding one.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<ResultPage, GatewayError>,
    ) -> Resolution {
        if self.in_flight != Some(ticket.token) || self.key.as_ref() != Some(&ticket.key) {
            debug!(token = ticket.token, page = ticket.page, "discarding stale response");
            return Resolution::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                let page_number = page.page_number;
                let appended = self.results.merge(page);
                debug!(
                    page = page_number,
                    appended,
                    total = self.results.len(),
                    next = ?self.results.next_cursor,
                    "page merged"
                );
                self.state = LoadState::Settled;
                Resolution::Applied { appended }
            }
            Err(err) => {
                warn!(page = ticket.page, error = %err, "page fetch failed");
                let cause = Arc::new(err);
                self.state = LoadState::Failed {
                    cause: Arc::clone(&cause),
                };
                Resolution::Failed(cause)
            }
        }
    }

    /// Back to `Idle`, dropping the key and results.
    pub fn reset(&mut self) {
        *self = Self {
            issued: self.issued,
            ..Self::new()
        };
    }

    fn issue(&mut self, key: FetchKey, page: u32) -> FetchTicket {
        self.issued += 1;
        let page = page.max(1);
        self.in_flight = Some(self.issued);
        self.state = LoadState::Loading { page };
        debug!(token = self.issued, page, "issuing fetch");
        FetchTicket {
            token: self.issued,
            key,
            page,
        }
    }
}
