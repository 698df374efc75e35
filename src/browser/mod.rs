pub mod controller;
pub mod query;
pub mod selection;
pub mod status;

pub use controller::{Completion, PageNav, PaginationView, RequestTicket, RetrievalController};
pub use query::{FilterField, PageLimit, RetrievalQuery, SearchFilters};
pub use selection::{SelectionPolicy, SelectionState};
pub use status::{DisplayStatus, Mode};

use crate::api::models::{Recipe, RecipeId};
use crate::api::RecipeSource;
use crate::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Read-only view of everything the display needs.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub status: DisplayStatus,
    pub mode: Mode,
    pub items: &'a [Recipe],
    pub total: u64,
    pub page: u32,
    pub limit: PageLimit,
    pub total_pages: u32,
    pub pagination: Option<PaginationView>,
    pub selected_id: Option<RecipeId>,
    pub selected: Option<&'a Recipe>,
    pub expanded: bool,
    pub filters: &'a SearchFilters,
    pub last_error: Option<&'a str>,
}

/// Couples a `RecipeSource` with the retrieval and selection state. Each
/// operation issues at most one request and awaits it before returning.
pub struct RecipeBrowser<S> {
    source: S,
    retrieval: RetrievalController,
    selection: SelectionState,
}

impl<S: RecipeSource> RecipeBrowser<S> {
    pub fn new(source: S, limit: PageLimit, policy: SelectionPolicy) -> Self {
        Self {
            source,
            retrieval: RetrievalController::new(limit),
            selection: SelectionState::new(policy),
        }
    }

    pub fn retrieval(&self) -> &RetrievalController {
        &self.retrieval
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            status: self.retrieval.status(),
            mode: self.retrieval.mode(),
            items: self.retrieval.items(),
            total: self.retrieval.total(),
            page: self.retrieval.page(),
            limit: self.retrieval.limit(),
            total_pages: self.retrieval.total_pages(),
            pagination: self.retrieval.pagination(),
            selected_id: self.selection.selected_id(),
            selected: self.selection.selected(),
            expanded: self.selection.expanded(),
            filters: self.retrieval.filters(),
            last_error: self.retrieval.last_error(),
        }
    }

    async fn run(&mut self, ticket: RequestTicket) -> DisplayStatus {
        let outcome = self.source.fetch(ticket.query()).await;
        if self.retrieval.complete(&ticket, outcome) == Completion::Applied {
            self.selection.reconcile(self.retrieval.items());
        }
        self.retrieval.status()
    }

    pub async fn load_page(&mut self, page: u32) -> DisplayStatus {
        let ticket = self.retrieval.load_page(page);
        self.run(ticket).await
    }

    pub async fn search(&mut self) -> DisplayStatus {
        let ticket = self.retrieval.search();
        self.run(ticket).await
    }

    /// Blank the filters, drop the selection and reload the first page.
    pub async fn clear_filters(&mut self) -> DisplayStatus {
        self.selection.deselect();
        let ticket = self.retrieval.clear_filters();
        self.run(ticket).await
    }

    pub async fn set_limit(&mut self, limit: PageLimit) -> DisplayStatus {
        match self.retrieval.set_limit(limit) {
            Some(ticket) => self.run(ticket).await,
            None => self.retrieval.status(),
        }
    }

    /// Returns `None` when the control is disabled and nothing was requested.
    pub async fn navigate(&mut self, nav: PageNav) -> Option<DisplayStatus> {
        let ticket = self.retrieval.navigate(nav)?;
        Some(self.run(ticket).await)
    }

    pub async fn reload(&mut self) -> Option<DisplayStatus> {
        let ticket = self.retrieval.reload()?;
        Some(self.run(ticket).await)
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.retrieval.set_filter(field, value);
    }

    /// Focus the recipe with `id` from the current items.
    pub fn select(&mut self, id: RecipeId) -> Result<&Recipe> {
        let recipe = self
            .retrieval
            .items()
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("Recipe {id} is not in the current list")))?;
        debug!("Selected recipe {}", id);
        self.selection.select(recipe);
        Ok(recipe)
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    pub fn toggle_expanded(&mut self) -> bool {
        self.selection.toggle_expanded()
    }
}
