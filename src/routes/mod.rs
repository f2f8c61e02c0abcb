//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor is rendered on the server. `/` serves the full page; the
//! `/api` endpoints take raw browser events (drops, clicks, form edits),
//! route them through the drop surface and orchestrator, and answer with the
//! re-rendered editor body plus any pending toasts. The browser script and
//! stylesheet are served from `/static`.

pub mod editor;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(editor::page))
        .route("/api/components", get(editor::list_components))
        .route("/api/components/{id}", delete(editor::delete_component))
        .route("/api/components/{id}/edit", post(editor::edit_component))
        .route("/api/canvas/dragover", post(editor::drag_over))
        .route("/api/canvas/dragleave", post(editor::drag_leave))
        .route("/api/canvas/drop", post(editor::drop_component))
        .route("/api/canvas/grid", post(editor::toggle_grid))
        .route("/api/select/{id}", post(editor::select_component))
        .route("/api/deselect", post(editor::deselect))
        .route("/api/reload", post(editor::reload))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
