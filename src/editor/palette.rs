//! Widget palette: the static catalog of draggable widget types.

#[cfg(test)]
#[path = "palette_test.rs"]
mod tests;

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Key under which a drag source stores the widget type.
pub const DRAG_PAYLOAD_KEY: &str = "componentType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const ENTRIES: &[PaletteEntry] = &[
    PaletteEntry { id: "button", kind: "button", label: "Button", icon: "square" },
    PaletteEntry { id: "text", kind: "text", label: "Text", icon: "type" },
    PaletteEntry { id: "heading", kind: "heading", label: "Heading", icon: "heading" },
    PaletteEntry { id: "paragraph", kind: "paragraph", label: "Paragraph", icon: "pilcrow" },
    PaletteEntry { id: "quote", kind: "quote", label: "Quote", icon: "quote" },
    PaletteEntry { id: "image", kind: "image", label: "Image", icon: "image" },
    PaletteEntry { id: "checkbox", kind: "checkbox", label: "CheckBox", icon: "check-square" },
    PaletteEntry { id: "radio", kind: "radio", label: "Radio", icon: "circle-dot" },
    PaletteEntry { id: "link", kind: "link", label: "Link", icon: "link" },
    PaletteEntry { id: "datepicker", kind: "datepicker", label: "DatePicker", icon: "calendar" },
    PaletteEntry { id: "listview", kind: "listview", label: "ListView", icon: "list" },
    PaletteEntry { id: "label", kind: "label", label: "Label", icon: "align-left" },
    PaletteEntry { id: "password", kind: "password", label: "Password", icon: "lock" },
    PaletteEntry { id: "slider", kind: "slider", label: "Slider", icon: "sliders" },
    PaletteEntry { id: "timer", kind: "timer", label: "TimePicker", icon: "timer" },
    PaletteEntry { id: "webview", kind: "webview", label: "WebViewer", icon: "globe" },
];

/// Ordered catalog with duplicate ids removed (first occurrence wins).
#[must_use]
pub fn catalog() -> Vec<PaletteEntry> {
    dedup_by_id(ENTRIES)
}

fn dedup_by_id(entries: &[PaletteEntry]) -> Vec<PaletteEntry> {
    let mut seen = HashSet::new();
    entries.iter().copied().filter(|e| seen.insert(e.id)).collect()
}

/// Cross-boundary drag data: string keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragPayload(pub HashMap<String, String>);

impl DragPayload {
    /// Widget type carried by the payload, if present and non-blank.
    #[must_use]
    pub fn widget_type(&self) -> Option<&str> {
        self.0
            .get(DRAG_PAYLOAD_KEY)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Payload a drag source emits when `entry` starts dragging.
#[must_use]
pub fn drag_start(entry: &PaletteEntry) -> DragPayload {
    let mut data = HashMap::new();
    data.insert(DRAG_PAYLOAD_KEY.to_owned(), entry.kind.to_owned());
    DragPayload(data)
}

/// Drag data for `entry` as the JSON object the browser copies onto the
/// drag event.
#[must_use]
pub fn drag_payload_json(entry: &PaletteEntry) -> String {
    serde_json::to_string(&drag_start(entry)).unwrap_or_else(|_| "{}".to_owned())
}

/// "Components" side panel with one draggable card per catalog entry.
#[component]
pub fn Palette() -> impl IntoView {
    let cards = catalog()
        .into_iter()
        .map(|entry| {
            view! {
                <div
                    class="palette-card"
                    draggable="true"
                    data-palette-id=entry.id
                    data-drag-payload=drag_payload_json(&entry)
                >
                    <i class=format!("icon icon-{}", entry.icon)></i>
                    <span class="palette-label">{entry.label}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <aside class="panel palette">
            <div class="panel-header">
                <h2>"Components"</h2>
            </div>
            <div class="palette-grid">{cards}</div>
        </aside>
    }
}
