//! Page/filter orchestration over the catalog fetchers.
//!
//! [`PageController`] owns all page-lifetime state: the page position, the
//! active and staged filters, the startup-populated filter options, the
//! current product list, and the loading phase. The fetchers stay stateless;
//! the controller applies their structured results to its own state.
//!
//! # Fetch cycle and stale-response protection
//!
//! A cycle is `begin_refresh` → ID outcome via `apply_ids` → detail outcome
//! via `apply_details` / `fail_details`. `begin_refresh` bumps a generation
//! counter and snapshots the page and filter into a [`LoadTicket`]; apply
//! methods ignore tickets from superseded cycles, so a slow in-flight
//! response can never overwrite the state of a cycle started after it.
//! [`PageController::refresh`] composes one whole cycle for callers that
//! await it end to end.

use tracing::{debug, warn};

use crate::catalog::{
    FilterCriteria, FilterOptions, IdPage, Product, ProductId, fetch_details, fetch_filter_options,
    fetch_ids,
};
use crate::client::{ApiClient, ApiError};

/// Where the controller is in a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No fetch in flight.
    #[default]
    Idle,
    /// Waiting on the ID page.
    LoadingIds,
    /// IDs arrived; waiting on product details.
    LoadingDetails,
}

/// Current page position and the page count of the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageState {
    /// Zero-based index of the page being viewed.
    pub current_page: u32,
    /// Number of pages the active query spans (0 until the first fetch).
    pub total_pages: u32,
}

/// Snapshot handed out by [`PageController::begin_refresh`], identifying one
/// fetch cycle and the page/filter it was started for.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    /// Page index this cycle fetches.
    pub page: u32,
    /// Filter criteria this cycle fetches under.
    pub filter: FilterCriteria,
}

/// Owns page, filter, and product-list state; orchestrates fetch cycles.
#[derive(Debug, Default)]
pub struct PageController {
    page: PageState,
    active_filter: FilterCriteria,
    staged_filter: FilterCriteria,
    filter_options: FilterOptions,
    products: Vec<Product>,
    phase: LoadPhase,
    generation: u64,
}

impl PageController {
    /// Creates a controller at page 0 with no filter and no products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    /// The current product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Current page position and page count.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Current loading phase.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True while a fetch cycle is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Idle
    }

    /// The startup-populated filter options.
    #[must_use]
    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    /// The committed filter the current query runs under.
    #[must_use]
    pub fn active_filter(&self) -> &FilterCriteria {
        &self.active_filter
    }

    /// The staged filter edits not yet committed.
    #[must_use]
    pub fn staged_filter(&self) -> &FilterCriteria {
        &self.staged_filter
    }

    // ==================== Pagination ====================

    /// Steps back one page; no-op at page 0.
    pub fn previous_page(&mut self) {
        self.page.current_page = self.page.current_page.saturating_sub(1);
    }

    /// Steps forward one page. No internal ceiling: consumers gate the
    /// action on [`has_next_page`](Self::has_next_page).
    pub fn next_page(&mut self) {
        self.page.current_page += 1;
    }

    /// True when pages remain beyond the current one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page.current_page + 1 < self.page.total_pages
    }

    // ==================== Filter staging ====================

    /// Stages a product-name constraint (`None` clears it).
    pub fn stage_product(&mut self, value: Option<String>) {
        self.staged_filter.product = value;
    }

    /// Stages a price constraint (`None` clears it).
    pub fn stage_price(&mut self, value: Option<f64>) {
        self.staged_filter.price = value;
    }

    /// Stages a brand constraint (`None` clears it).
    pub fn stage_brand(&mut self, value: Option<String>) {
        self.staged_filter.brand = value;
    }

    /// Commits the staged filter as the active one and rewinds to page 0.
    /// The caller follows up with a refresh.
    pub fn commit_staged_filter(&mut self) {
        self.active_filter = self.staged_filter.clone();
        self.page.current_page = 0;
    }

    /// Clears both active and staged filters and rewinds to page 0.
    pub fn reset_filter(&mut self) {
        self.active_filter = FilterCriteria::default();
        self.staged_filter = FilterCriteria::default();
        self.page.current_page = 0;
    }

    // ==================== Fetch cycle ====================

    /// Starts a fetch cycle: supersedes any cycle still in flight, enters
    /// `LoadingIds`, and snapshots the page and active filter.
    pub fn begin_refresh(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = LoadPhase::LoadingIds;
        LoadTicket {
            generation: self.generation,
            page: self.page.current_page,
            filter: self.active_filter.clone(),
        }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies the ID-fetch outcome of a cycle and returns the IDs still to
    /// be resolved (empty when the cycle is over).
    ///
    /// An `Err` outcome degrades to an empty page: the failure is logged,
    /// the product list cleared, and the page count left as it was. An empty
    /// ID list ends the cycle the same way minus the log. Stale tickets are
    /// discarded without touching state.
    pub fn apply_ids(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<IdPage, ApiError>,
    ) -> Vec<ProductId> {
        if !self.is_current(ticket) {
            debug!(page = ticket.page, "discarding superseded id page");
            return Vec::new();
        }

        match outcome {
            Ok(id_page) => {
                self.page.total_pages = id_page.total_pages;
                if id_page.ids.is_empty() {
                    self.products.clear();
                    self.phase = LoadPhase::Idle;
                    Vec::new()
                } else {
                    self.phase = LoadPhase::LoadingDetails;
                    id_page.ids
                }
            }
            Err(error) => {
                warn!(page = ticket.page, error = %error, "id fetch failed; showing empty page");
                self.products.clear();
                self.phase = LoadPhase::Idle;
                Vec::new()
            }
        }
    }

    /// Installs a cycle's resolved products wholesale and returns to `Idle`.
    /// Stale tickets are discarded without touching state.
    pub fn apply_details(&mut self, ticket: &LoadTicket, products: Vec<Product>) {
        if !self.is_current(ticket) {
            debug!(page = ticket.page, "discarding superseded product details");
            return;
        }
        self.products = products;
        self.phase = LoadPhase::Idle;
    }

    /// Records a failed detail fetch. Loading state must reach `Idle` on
    /// every exit path, so the phase is cleared here; the previous product
    /// list stays as it was. Stale tickets leave the newer cycle's phase
    /// alone.
    pub fn fail_details(&mut self, ticket: &LoadTicket) {
        if self.is_current(ticket) {
            self.phase = LoadPhase::Idle;
        }
    }

    /// Runs one full fetch cycle against the client.
    ///
    /// ID-fetch failure is absorbed (empty page); detail-fetch failure is
    /// returned to the caller after the phase has been restored to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of an exhausted detail fetch.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let ticket = self.begin_refresh();
        let outcome = fetch_ids(client, ticket.page, &ticket.filter).await;
        let ids = self.apply_ids(&ticket, outcome);
        if ids.is_empty() {
            return Ok(());
        }

        match fetch_details(client, &ids).await {
            Ok(products) => {
                self.apply_details(&ticket, products);
                Ok(())
            }
            Err(error) => {
                self.fail_details(&ticket);
                Err(error)
            }
        }
    }

    /// One-shot startup populate of the filter options. Per-field failures
    /// degrade to empty lists inside the fetch.
    pub async fn load_filter_options(&mut self, client: &ApiClient) {
        self.filter_options = fetch_filter_options(client).await;
    }
}
