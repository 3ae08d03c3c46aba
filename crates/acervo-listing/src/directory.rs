//! Paginated, append-as-you-scroll directory state.
//!
//! Every fetch is tagged with a [`RequestToken`]. A response is applied only
//! if its token is still the one in flight; a reload issues a new token, so
//! answers to superseded parameters are dropped. Only one page request is in
//! flight at a time.

use crate::error::{Error, Result};
use acervo_content::StaffMember;
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, warn};

/// One page of results and the total the source reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Something with a stable identity, used to de-duplicate appended pages.
pub trait DirectoryItem {
    fn key(&self) -> String;
}

impl DirectoryItem for StaffMember {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Source of directory pages.
pub trait PageFetcher {
    type Item: DirectoryItem;
    type Params: Clone;

    /// Fetch 1-based `page` of `limit` rows.
    fn fetch_page(
        &self,
        params: &Self::Params,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<Self::Item>>> + Send;
}

/// Identifies one issued fetch. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// First page after a reload
    Initial,
    /// A further page
    Incremental,
}

/// A fetch the caller must perform and hand back to [`DirectoryController::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest<P> {
    pub token: RequestToken,
    pub page: u32,
    pub params: P,
}

/// Outcome of applying a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A newer request superseded this one; nothing changed
    Stale,
    /// The page was appended; `added` excludes duplicates
    Appended { added: usize },
    /// The fetch failed; accumulated items are kept
    Failed,
}

pub struct DirectoryController<F: PageFetcher> {
    fetcher: F,
    params: F::Params,
    limit: u32,
    items: Vec<F::Item>,
    seen: HashSet<String>,
    total: u64,
    fetched: u64,
    next_page: u32,
    has_more: bool,
    phase: Phase,
    issued: u64,
    in_flight: Option<RequestToken>,
    last_error: Option<String>,
}

impl<F: PageFetcher> DirectoryController<F> {
    pub fn new(fetcher: F, params: F::Params, limit: u32) -> Self {
        Self {
            fetcher,
            params,
            limit: limit.max(1),
            items: Vec::new(),
            seen: HashSet::new(),
            total: 0,
            fetched: 0,
            next_page: 1,
            has_more: true,
            phase: Phase::Idle,
            issued: 0,
            in_flight: None,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<F::Item> {
        self.items
    }

    pub fn params(&self) -> &F::Params {
        &self.params
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of the page the next `load_more` would fetch.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn issue(&mut self, phase: Phase) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);
        self.phase = phase;
        token
    }

    /// Discard accumulated results and request page 1 for `params`.
    ///
    /// Supersedes any request already in flight.
    pub fn begin_reload(&mut self, params: F::Params) -> PendingRequest<F::Params> {
        self.params = params;
        self.items.clear();
        self.seen.clear();
        self.total = 0;
        self.fetched = 0;
        self.next_page = 1;
        self.has_more = true;
        self.last_error = None;
        let token = self.issue(Phase::Initial);
        PendingRequest { token, page: 1, params: self.params.clone() }
    }

    /// Request the next page, unless exhausted or a request is already in flight.
    pub fn begin_load_more(&mut self) -> Option<PendingRequest<F::Params>> {
        if !self.has_more || self.in_flight.is_some() {
            return None;
        }
        let token = self.issue(Phase::Incremental);
        Some(PendingRequest { token, page: self.next_page, params: self.params.clone() })
    }

    /// Apply the response to `request`, unless a newer request superseded it.
    pub fn apply(
        &mut self,
        request: PendingRequest<F::Params>,
        result: Result<Page<F::Item>>,
    ) -> Applied {
        if self.in_flight != Some(request.token) {
            debug!(token = request.token.0, "dropping stale directory page");
            return Applied::Stale;
        }
        self.in_flight = None;
        self.phase = Phase::Idle;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!(page = request.page, error = %e, "directory page failed");
                self.last_error = Some(e.to_string());
                return Applied::Failed;
            }
        };

        let received = page.items.len();
        self.total = page.total;
        self.fetched += received as u64;
        let mut added = 0;
        for item in page.items {
            if self.seen.insert(item.key()) {
                self.items.push(item);
                added += 1;
            }
        }
        self.next_page = request.page + 1;
        self.has_more = received >= self.limit as usize && self.fetched < self.total;
        self.last_error = None;
        debug!(page = request.page, received, added, total = self.total, "directory page applied");
        Applied::Appended { added }
    }

    /// Reset and fetch the first page for `params`.
    pub async fn reload(&mut self, params: F::Params) -> Applied {
        let request = self.begin_reload(params);
        let result = self.fetcher.fetch_page(&request.params, request.page, self.limit).await;
        self.apply(request, result)
    }

    /// Fetch and append the next page. `None` when there is nothing to do.
    pub async fn load_more(&mut self) -> Option<Applied> {
        let request = self.begin_load_more()?;
        let result = self.fetcher.fetch_page(&request.params, request.page, self.limit).await;
        Some(self.apply(request, result))
    }

    /// Reload, then keep appending until `pages` pages are loaded or the source is exhausted.
    pub async fn load_pages(&mut self, params: F::Params, pages: u32) -> Result<()> {
        if let Applied::Failed = self.reload(params).await {
            return Err(Error::Fetch(self.last_error.clone().unwrap_or_default()));
        }
        while self.next_page <= pages {
            match self.load_more().await {
                None => break,
                Some(Applied::Failed) => {
                    return Err(Error::Fetch(self.last_error.clone().unwrap_or_default()));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
