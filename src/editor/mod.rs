//! Editor views: property schema, palette, drop surface, renderer, inspector.
//!
//! ARCHITECTURE
//! ============
//! Everything here is synchronous and side-effect free apart from the drop
//! surface's visual flags. Mutations of the instance list go through
//! `services::orchestrator`; these modules only describe what to create and
//! how to draw it. Views are leptos components rendered to HTML on the server.

pub mod canvas;
pub mod inspector;
pub mod page;
pub mod palette;
pub mod render;
pub mod widget;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

/// Render a view to an HTML string inside a fresh reactive owner.
pub fn render_html<V>(view: impl FnOnce() -> V) -> String
where
    V: IntoView,
{
    Owner::new().with(|| view().to_html())
}
