use crate::api::models::{Listing, Recipe};
use crate::browser::query::{BrowseQuery, FilterField, PageLimit, RetrievalQuery, SearchFilters};
use crate::browser::status::{DisplayStatus, Mode};
use crate::Result;
use serde::Serialize;
use tracing::{debug, warn};

/// Handle for one issued request. Only the most recently issued ticket may
/// change state when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    query: RetrievalQuery,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &RetrievalQuery {
        &self.query
    }
}

/// Result of handing a response back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

/// Pagination controls as the display should draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
}

/// Owns pagination, filters and the current item set, and decides which
/// request a user action turns into.
#[derive(Debug, Clone)]
pub struct RetrievalController {
    mode: Mode,
    page: u32,
    limit: PageLimit,
    filters: SearchFilters,
    total: u64,
    status: DisplayStatus,
    items: Vec<Recipe>,
    last_error: Option<String>,
    last_query: Option<RetrievalQuery>,
    latest_seq: u64,
    pending: Option<u64>,
}

impl Default for RetrievalController {
    fn default() -> Self {
        Self::new(PageLimit::default())
    }
}

impl RetrievalController {
    pub fn new(limit: PageLimit) -> Self {
        Self {
            mode: Mode::Browse,
            page: 1,
            limit,
            filters: SearchFilters::default(),
            total: 0,
            status: DisplayStatus::Idle,
            items: Vec::new(),
            last_error: None,
            last_query: None,
            latest_seq: 0,
            pending: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> PageLimit {
        self.limit
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn status(&self) -> DisplayStatus {
        self.status
    }

    pub fn items(&self) -> &[Recipe] {
        &self.items
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Edit one filter field. Nothing is requested until `search` runs.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    fn issue(&mut self, query: RetrievalQuery) -> RequestTicket {
        self.latest_seq += 1;
        self.pending = Some(self.latest_seq);
        self.status = DisplayStatus::Loading;
        self.last_query = Some(query.clone());
        debug!("Issuing request #{}: {:?}", self.latest_seq, query);

        RequestTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Switch to browse mode and request `page` (pages start at 1).
    pub fn load_page(&mut self, page: u32) -> RequestTicket {
        self.mode = Mode::Browse;
        self.page = page.max(1);
        self.issue(RetrievalQuery::Browse(BrowseQuery {
            page: self.page,
            limit: self.limit,
        }))
    }

    /// Search with the non-empty filters, or fall back to the first catalog
    /// page when every filter is blank.
    pub fn search(&mut self) -> RequestTicket {
        match self.filters.to_query() {
            Some(query) => {
                self.mode = Mode::Search;
                self.issue(RetrievalQuery::Search(query))
            }
            None => self.load_page(1),
        }
    }

    /// Blank every filter and go back to the first catalog page.
    pub fn clear_filters(&mut self) -> RequestTicket {
        self.filters.clear();
        self.load_page(1)
    }

    /// Change rows per page. Browse mode reloads from page 1; an active search
    /// is left alone and the new limit applies to the next browse load.
    pub fn set_limit(&mut self, limit: PageLimit) -> Option<RequestTicket> {
        self.limit = limit;
        self.page = 1;
        match self.mode {
            Mode::Browse => Some(self.load_page(1)),
            Mode::Search => None,
        }
    }

    /// Re-issue the last request, e.g. after an error.
    pub fn reload(&mut self) -> Option<RequestTicket> {
        match self.last_query.clone()? {
            RetrievalQuery::Browse(_) => Some(self.load_page(self.page)),
            RetrievalQuery::Search(query) => {
                self.mode = Mode::Search;
                Some(self.issue(RetrievalQuery::Search(query)))
            }
        }
    }

    /// `ceil(total / limit)`; only meaningful in browse mode.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit.get()));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    fn paginated(&self) -> bool {
        self.mode == Mode::Browse && self.total_pages() > 1
    }

    /// Whether the control is enabled. Boundary controls are disabled rather
    /// than clamped.
    pub fn can_navigate(&self, nav: PageNav) -> bool {
        if !self.paginated() {
            return false;
        }
        match nav {
            PageNav::First | PageNav::Previous => self.page > 1,
            PageNav::Next | PageNav::Last => self.page < self.total_pages(),
        }
    }

    /// Move to another page. Returns `None` when the control is disabled.
    pub fn navigate(&mut self, nav: PageNav) -> Option<RequestTicket> {
        if !self.can_navigate(nav) {
            debug!("Ignoring {:?}: control disabled on page {}", nav, self.page);
            return None;
        }

        let total_pages = self.total_pages();
        let target = match nav {
            PageNav::First => 1,
            PageNav::Previous => self.page - 1,
            PageNav::Next => self.page + 1,
            PageNav::Last => total_pages,
        }
        .clamp(1, total_pages);

        Some(self.load_page(target))
    }

    /// Pagination controls, present only for a loaded multi-page browse result.
    pub fn pagination(&self) -> Option<PaginationView> {
        if !self.paginated() || self.status != DisplayStatus::Loaded {
            return None;
        }

        Some(PaginationView {
            page: self.page,
            total_pages: self.total_pages(),
            total: self.total,
            first_enabled: self.can_navigate(PageNav::First),
            previous_enabled: self.can_navigate(PageNav::Previous),
            next_enabled: self.can_navigate(PageNav::Next),
            last_enabled: self.can_navigate(PageNav::Last),
        })
    }

    /// Classify the outcome of `ticket` into the display status. Responses to
    /// superseded tickets are discarded.
    pub fn complete(&mut self, ticket: &RequestTicket, outcome: Result<Listing>) -> Completion {
        if ticket.seq != self.latest_seq || self.pending != Some(ticket.seq) {
            debug!(
                "Discarding response to request #{} (latest is #{})",
                ticket.seq, self.latest_seq
            );
            return Completion::Stale;
        }
        self.pending = None;

        let mode = match ticket.query {
            RetrievalQuery::Browse(_) => Mode::Browse,
            RetrievalQuery::Search(_) => Mode::Search,
        };

        match outcome {
            Ok(listing) => {
                let count = listing.items.len();
                self.total = match mode {
                    Mode::Browse => listing.total.unwrap_or(count as u64),
                    Mode::Search => count as u64,
                };
                self.items = listing.items;
                self.status = DisplayStatus::for_success(mode, count);
                self.last_error = None;
                debug!(
                    "Request #{} completed: {} ({} items, total {})",
                    ticket.seq, self.status, count, self.total
                );
            }
            Err(e) => {
                warn!("Request #{} failed: {}", ticket.seq, e.log_safe());
                self.items.clear();
                self.total = 0;
                self.status = DisplayStatus::Error;
                self.last_error = Some(e.log_safe());
            }
        }

        Completion::Applied
    }
}
