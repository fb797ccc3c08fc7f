//! # Inventory Controller
//!
//! Backs the "Estoque" screen: one fetch on mount, then local search.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load() ──► GET /carros ──► records ──┐                                 │
//! │                                       ├──► filter_listings ──► visible  │
//! │  set_search(term) ──────────► term ───┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use nextcar_api::RemoteApi;
use nextcar_core::search::filter_listings;
use nextcar_core::{ListingCard, ListingRecord};
use tracing::{debug, info};

use super::{lock, LoadingFlag};
use crate::error::{AppError, AppResult};
use crate::notice;

#[derive(Debug, Default)]
struct InventoryState {
    records: Vec<ListingRecord>,
    term: String,
    visible: Vec<ListingRecord>,
}

impl InventoryState {
    fn refilter(&mut self) {
        self.visible = filter_listings(&self.records, &self.term);
    }
}

pub struct InventoryController {
    api: Arc<dyn RemoteApi>,
    state: Mutex<InventoryState>,
    loading: LoadingFlag,
}

impl InventoryController {
    /// Starts in the loading state until the first fetch settles.
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        InventoryController {
            api,
            state: Mutex::new(InventoryState::default()),
            loading: LoadingFlag::new(true),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Fetches every listing. On failure the previous records stay.
    pub async fn load(&self) -> AppResult<usize> {
        let _guard = self.loading.hold();

        let records = self.api.list_listings().await.map_err(|e| {
            AppError::from_client(e, notice::INVENTORY_REJECTED, notice::INVENTORY_UNREACHABLE)
        })?;

        let count = records.len();
        let mut state = lock(&self.state);
        state.records = records;
        state.refilter();
        info!(count, visible = state.visible.len(), "Inventory loaded");
        Ok(count)
    }

    /// Updates the search term. Never fetches.
    pub fn set_search(&self, term: &str) {
        let mut state = lock(&self.state);
        state.term = term.to_string();
        state.refilter();
        debug!(term = %state.term, visible = state.visible.len(), "Search updated");
    }

    pub fn search_term(&self) -> String {
        lock(&self.state).term.clone()
    }

    pub fn visible(&self) -> Vec<ListingRecord> {
        lock(&self.state).visible.clone()
    }

    /// Cards for the visible records, in order.
    pub fn cards(&self) -> Vec<ListingCard> {
        lock(&self.state)
            .visible
            .iter()
            .enumerate()
            .map(|(position, record)| ListingCard::from_record(record, position))
            .collect()
    }

    /// Text shown in place of the list when nothing matches.
    pub fn empty_text(&self) -> Option<&'static str> {
        if !self.is_loading() && lock(&self.state).visible.is_empty() {
            Some(notice::INVENTORY_EMPTY)
        } else {
            None
        }
    }
}
