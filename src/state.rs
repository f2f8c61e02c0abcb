//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! orchestrator owns the instance list and selection; the drop surface keeps
//! only visual flags (drag highlight, grid); the toast log buffers
//! notifications until the next response carries them to the browser.
//!
//! SESSIONS
//! ========
//! The process hosts a single editing session. Selection, the drag highlight
//! and the pending toasts are held once per process and every `AppState`
//! clone shares them, so two browser tabs see each other's selection and one
//! tab's response may carry toasts raised by the other. Running one editor
//! per process (one user, one tab) is the supported deployment; the stored
//! components themselves are safe to share through the store.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::editor::canvas::DropSurface;
use crate::services::notify::ToastLog;
use crate::services::orchestrator::Orchestrator;
use crate::store::ComponentStore;

/// Clone is required by Axum; every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<Orchestrator>,
    pub surface: Arc<RwLock<DropSurface>>,
    pub toasts: Arc<ToastLog>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ComponentStore>, toast_history: usize) -> Self {
        let toasts = Arc::new(ToastLog::new(toast_history));
        let editor = Arc::new(Orchestrator::new(store, toasts.clone()));
        Self { editor, surface: Arc::new(RwLock::new(DropSurface::new())), toasts }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
