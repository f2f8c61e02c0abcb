//! Drop surface: turns drag/drop and click gestures into editor requests.
//!
//! DESIGN
//! ======
//! The surface never touches the instance list. A drop yields a
//! `NewInstance` for the orchestrator to persist; clicks yield a
//! `SelectionRequest`. The only state kept here is visual: the
//! "is-dragging" highlight and the grid toggle.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::palette::DragPayload;
use super::render::{InstanceView, px};
use super::widget::{Instance, NewInstance, Position, Properties, WidgetKind};

pub const DEVICE_WIDTH: f64 = 360.0;
pub const DEVICE_HEIGHT: f64 = 640.0;

/// Raw drop event as reported by the host: payload plus pointer and
/// surface origin in the same (viewport) coordinate space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    #[serde(default)]
    pub payload: DragPayload,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub surface_left: f64,
    pub surface_top: f64,
}

impl DropEvent {
    /// Pointer position relative to the surface's top-left corner.
    #[must_use]
    pub fn local_position(&self) -> Position {
        Position { x: self.pointer_x - self.surface_left, y: self.pointer_y - self.surface_top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Accept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    Select(String),
    Clear,
    None,
}

#[derive(Debug, Clone, Default)]
pub struct DropSurface {
    pub dragging: bool,
    pub show_grid: bool,
}

impl DropSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_drag_over(&mut self) -> DropEffect {
        self.dragging = true;
        DropEffect::Accept
    }

    pub fn on_drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Build the instance a drop should create, or `None` when the payload
    /// carries no widget type.
    pub fn on_drop(&mut self, event: &DropEvent) -> Option<NewInstance> {
        self.dragging = false;
        let Some(tag) = event.payload.widget_type() else {
            debug!("drop ignored: payload has no widget type");
            return None;
        };
        let kind = WidgetKind::parse(tag);
        let properties = Properties::defaults_for(&kind);
        Some(NewInstance { kind, position: event.local_position(), properties })
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    /// Classes of the device frame for the current visual flags.
    #[must_use]
    pub fn device_class(&self) -> String {
        let mut class = String::from("device");
        if self.show_grid {
            class.push_str(" grid");
        }
        if self.dragging {
            class.push_str(" dragging");
        }
        class
    }
}

/// Preview column: grid toggle plus the device frame with every instance in
/// stored order.
#[component]
pub fn PreviewPane(surface: DropSurface, instances: Vec<Instance>, selected: Option<String>) -> impl IntoView {
    let frame_style = format!("width:{};height:{}", px(DEVICE_WIDTH), px(DEVICE_HEIGHT));
    let placed = instances
        .into_iter()
        .map(|instance| {
            let is_selected = selected.as_deref() == Some(instance.id.as_str());
            view! { <InstanceView instance=instance selected=is_selected /> }
        })
        .collect_view();

    view! {
        <main class="preview">
            <div class="preview-controls">
                <label class="grid-toggle">
                    <input type="checkbox" id="grid-toggle" checked=surface.show_grid />
                    " Show Grid"
                </label>
            </div>
            <div id="drop-surface" class=surface.device_class() style=frame_style>
                <div class="device-notch">
                    <div class="device-speaker"></div>
                </div>
                <div class="device-content">{placed}</div>
                <div class="device-home">
                    <div class="home-button-round"></div>
                    <div class="home-button-square"></div>
                    <div class="home-button-round"></div>
                </div>
            </div>
        </main>
    }
}

/// Resolve a click on an instance to a selection request.
#[must_use]
pub fn click_instance(instances: &[Instance], id: &str) -> SelectionRequest {
    if instances.iter().any(|inst| inst.id == id) {
        SelectionRequest::Select(id.to_owned())
    } else {
        SelectionRequest::None
    }
}

#[must_use]
pub fn click_background() -> SelectionRequest {
    SelectionRequest::Clear
}
