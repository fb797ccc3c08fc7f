//! # Navigation State
//!
//! Route stack shared by every screen.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Tabs ┬─ Home ─────── "VER ESTOQUE" ──► Estoque                       │
//! │        ├─ Anuncie  (guarded: needs a token)                            │
//! │        └─ Estoque                                                       │
//! │                                                                         │
//! │   Login ──── "CADASTRAR" ──► Register ──── success ──► Login           │
//! │     │                                                                   │
//! │     └──── success ──► reset(Tabs(Home))                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Bottom tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    Home,
    Anuncie,
    Estoque,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Anuncie, Tab::Estoque];

    /// Tab bar caption.
    pub const fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Anuncie => "Anuncie",
            Tab::Estoque => "Estoque",
        }
    }
}

/// A screen on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "screen", content = "tab", rename_all = "camelCase")]
pub enum Route {
    Tabs(Tab),
    Login,
    Register,
}

/// Route stack. The bottom entry is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Arc<Mutex<Vec<Route>>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on the Home tab.
    pub fn new() -> Self {
        Navigator {
            stack: Arc::new(Mutex::new(vec![Route::Tabs(Tab::Home)])),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        // Routes are plain values; a panic elsewhere cannot leave them torn.
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, route: Route) {
        tracing::debug!(?route, "Navigate");
        self.lock().push(route);
    }

    /// Swaps the top entry, so "back" skips the current screen.
    pub fn replace(&self, route: Route) {
        tracing::debug!(?route, "Navigate (replace)");
        let mut stack = self.lock();
        stack.pop();
        stack.push(route);
    }

    /// Pops the top entry. Returns false at the root.
    /// Drops the whole stack and starts over at `route`.
    pub fn reset(&self, route: Route) {
        tracing::debug!(?route, "Navigate (reset)");
        let mut stack = self.lock();
        stack.clear();
        stack.push(route);
    }

    pub fn back(&self) -> bool {
        let mut stack = self.lock();
        if stack.len() > 1 {
            stack.pop();
            true
        } else {
            false
        }
    }

    /// Selects a tab in place when tabs are showing; pushes the tab shell
    /// otherwise.
    pub fn switch_tab(&self, tab: Tab) {
        let mut stack = self.lock();
        match stack.last_mut() {
            Some(Route::Tabs(current)) => *current = tab,
            _ => stack.push(Route::Tabs(tab)),
        }
    }

    pub fn current(&self) -> Route {
        self.lock()
            .last()
            .copied()
            .unwrap_or(Route::Tabs(Tab::Home))
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    pub fn depth(&self) -> usize {
        self.lock().len()
    }
}
