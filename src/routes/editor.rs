//! Editor routes: browser events in, re-rendered editor out.
//!
//! DESIGN
//! ======
//! Handlers stay thin: decode the event, hand it to the drop surface or the
//! orchestrator, then answer with `EditorResponse`. Store failures are not
//! HTTP errors; the orchestrator has already turned them into toasts, so the
//! response is a normal re-render carrying an error toast. Only requests that
//! can never succeed (unknown id, unknown field) get a 4xx.

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use serde::{Deserialize, Serialize};

use crate::editor::canvas::{self, DropEffect, DropEvent, SelectionRequest};
use crate::editor::inspector::{self, EditError, PropertyEdit};
use crate::editor::page;
use crate::services::notify::Toast;
use crate::services::orchestrator::{EditorError, Workspace};
use crate::state::AppState;

// =============================================================================
// PAYLOADS
// =============================================================================

/// Re-rendered editor body plus toasts raised since the last response.
#[derive(Debug, Serialize)]
pub struct EditorResponse {
    pub html: String,
    pub toasts: Vec<Toast>,
}

#[derive(Debug, Serialize)]
pub struct SurfaceFlags {
    pub dragging: bool,
    pub accept: bool,
}

/// One inspector control changed: field wire name and its raw form value.
#[derive(Debug, Deserialize)]
pub struct EditBody {
    pub field: String,
    pub value: String,
}

async fn respond(state: &AppState) -> EditorResponse {
    let workspace = state.editor.snapshot().await;
    let html = page::render_body(&workspace, &*state.surface.read().await);
    EditorResponse { html, toasts: state.toasts.drain() }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /`: full editor page.
pub async fn page(State(state): State<AppState>) -> Html<String> {
    let workspace = state.editor.snapshot().await;
    let surface = state.surface.read().await.clone();
    Html(page::render_document(&workspace, &surface, &state.toasts.drain()))
}

/// `GET /api/components`: list and selection snapshot.
pub async fn list_components(State(state): State<AppState>) -> Json<Workspace> {
    Json(state.editor.snapshot().await)
}

/// `POST /api/canvas/dragover`
pub async fn drag_over(State(state): State<AppState>) -> Json<SurfaceFlags> {
    let mut surface = state.surface.write().await;
    let accept = surface.on_drag_over() == DropEffect::Accept;
    Json(SurfaceFlags { dragging: surface.dragging, accept })
}

/// `POST /api/canvas/dragleave`
pub async fn drag_leave(State(state): State<AppState>) -> Json<SurfaceFlags> {
    let mut surface = state.surface.write().await;
    surface.on_drag_leave();
    Json(SurfaceFlags { dragging: surface.dragging, accept: false })
}

/// `POST /api/canvas/drop`: create an instance where the payload landed.
pub async fn drop_component(State(state): State<AppState>, Json(event): Json<DropEvent>) -> Json<EditorResponse> {
    let new = state.surface.write().await.on_drop(&event);
    if let Some(new) = new {
        // Failure is already reported as a toast.
        let _ = state.editor.add(new).await;
    }
    Json(respond(&state).await)
}

/// `POST /api/canvas/grid`
pub async fn toggle_grid(State(state): State<AppState>) -> Json<EditorResponse> {
    state.surface.write().await.toggle_grid();
    Json(respond(&state).await)
}

/// `POST /api/select/:id`: instance click.
pub async fn select_component(State(state): State<AppState>, Path(id): Path<String>) -> Json<EditorResponse> {
    let request = canvas::click_instance(&state.editor.snapshot().await.instances, &id);
    apply_selection(&state, request).await;
    Json(respond(&state).await)
}

/// `POST /api/deselect`: background click.
pub async fn deselect(State(state): State<AppState>) -> Json<EditorResponse> {
    apply_selection(&state, canvas::click_background()).await;
    Json(respond(&state).await)
}

async fn apply_selection(state: &AppState, request: SelectionRequest) {
    match request {
        SelectionRequest::Select(id) => {
            state.editor.select(&id).await;
        }
        SelectionRequest::Clear => state.editor.deselect().await,
        SelectionRequest::None => {}
    }
}

/// `POST /api/components/:id/edit`: overwrite one property and persist the
/// full bag.
pub async fn edit_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EditBody>,
) -> Result<Json<EditorResponse>, StatusCode> {
    let edit = PropertyEdit::parse(&body.field, &body.value).map_err(edit_error_to_status)?;
    let current = state
        .editor
        .snapshot()
        .await
        .get(&id)
        .map(|inst| inst.properties.clone())
        .ok_or(StatusCode::NOT_FOUND)?;

    let next = inspector::apply_edit(&current, edit);
    match state.editor.update(&id, next).await {
        Err(EditorError::NotInWorkspace(_)) => return Err(StatusCode::NOT_FOUND),
        Err(EditorError::Store(_)) | Ok(_) => {}
    }
    Ok(Json(respond(&state).await))
}

/// `DELETE /api/components/:id`
pub async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EditorResponse>, StatusCode> {
    match state.editor.delete(&id).await {
        Err(EditorError::NotInWorkspace(_)) => return Err(StatusCode::NOT_FOUND),
        Err(EditorError::Store(_)) | Ok(()) => {}
    }
    Ok(Json(respond(&state).await))
}

/// `POST /api/reload`: refetch everything from the store.
pub async fn reload(State(state): State<AppState>) -> Json<EditorResponse> {
    let _ = state.editor.load().await;
    Json(respond(&state).await)
}

pub(crate) fn edit_error_to_status(err: EditError) -> StatusCode {
    match err {
        EditError::UnknownField(_) | EditError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
    }
}
