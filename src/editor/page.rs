//! Editor page: the three panels composed for one workspace snapshot, and
//! the document shell around them.

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

use leptos::prelude::*;

use super::canvas::{DropSurface, PreviewPane};
use super::inspector::{InspectorPanel, inspect};
use super::palette::Palette;
use super::render_html;
use crate::services::notify::Toast;
use crate::services::orchestrator::Workspace;

/// Palette, device canvas, and inspector for one consistent snapshot.
#[component]
pub fn EditorBody(workspace: Workspace, surface: DropSurface) -> impl IntoView {
    let state = inspect(workspace.selected_instance());
    let Workspace { instances, selected } = workspace;

    view! {
        <div id="app" class="editor">
            <Palette />
            <PreviewPane surface=surface instances=instances selected=selected />
            <InspectorPanel state=state />
        </div>
    }
}

/// Full page. Toasts raised before first paint (e.g. a failed initial load)
/// ride along in `data-pending` for the script to show.
#[component]
pub fn EditorDocument(workspace: Workspace, surface: DropSurface, pending: Vec<Toast>) -> impl IntoView {
    let pending = serde_json::to_string(&pending).unwrap_or_else(|_| "[]".to_owned());

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Mockboard"</title>
                <link rel="stylesheet" href="/static/editor.css" />
            </head>
            <body>
                <EditorBody workspace=workspace surface=surface />
                <div id="toasts" class="toasts" data-pending=pending></div>
                <script src="/static/editor.js" defer=true></script>
            </body>
        </html>
    }
}

/// Editor body as HTML, for in-place swaps after an event.
#[must_use]
pub fn render_body(workspace: &Workspace, surface: &DropSurface) -> String {
    let (workspace, surface) = (workspace.clone(), surface.clone());
    render_html(move || view! { <EditorBody workspace=workspace surface=surface /> })
}

/// Complete HTML document for the first paint.
#[must_use]
pub fn render_document(workspace: &Workspace, surface: &DropSurface, pending: &[Toast]) -> String {
    let (workspace, surface, pending) = (workspace.clone(), surface.clone(), pending.to_vec());
    render_html(move || view! { <EditorDocument workspace=workspace surface=surface pending=pending /> })
}
