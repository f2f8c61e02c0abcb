//! Property schema: placed instances, their positions, and the property bag.
//!
//! DESIGN
//! ======
//! `Properties` is the persisted, flat bag. Every field is optional and
//! absent fields stay absent on the wire, so a stored bag is exactly what the
//! inspector last sent. `Widget` is the typed view the renderer dispatches on:
//! each known kind carries only the fields it reads, and unrecognised tags
//! survive as `Unknown` so persisted rows from newer palettes still render.

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a placed instance.
pub type InstanceId = String;

pub const DEFAULT_SLIDER_VALUE: f64 = 50.0;
pub const DEFAULT_SIZE: &str = "auto";
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_HREF: &str = "#";

// =============================================================================
// KIND
// =============================================================================

/// Widget type tag. Serialized as the bare string stored in the `type` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetKind {
    Button,
    Text,
    Heading,
    Paragraph,
    Quote,
    Checkbox,
    Radio,
    Slider,
    Image,
    Link,
    DatePicker,
    ListView,
    Label,
    Password,
    WebView,
    Timer,
    /// A tag this build does not know. Kept verbatim.
    Unknown(String),
}

impl WidgetKind {
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "button" => Self::Button,
            "text" => Self::Text,
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "quote" => Self::Quote,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "slider" => Self::Slider,
            "image" => Self::Image,
            "link" => Self::Link,
            "datepicker" => Self::DatePicker,
            "listview" => Self::ListView,
            "label" => Self::Label,
            "password" => Self::Password,
            "webview" => Self::WebView,
            "timer" => Self::Timer,
            other => Self::Unknown(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "button",
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Quote => "quote",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Slider => "slider",
            Self::Image => "image",
            Self::Link => "link",
            Self::DatePicker => "datepicker",
            Self::ListView => "listview",
            Self::Label => "label",
            Self::Password => "password",
            Self::WebView => "webview",
            Self::Timer => "timer",
            Self::Unknown(tag) => tag,
        }
    }

    /// Text seeded into a freshly dropped instance, if the kind shows any.
    #[must_use]
    pub fn default_text(&self) -> Option<&'static str> {
        match self {
            Self::Button => Some("Button"),
            Self::Text => Some("Text"),
            Self::Heading => Some("Heading"),
            Self::Paragraph => Some("Paragraph"),
            Self::Quote => Some("Quote"),
            Self::Checkbox => Some("Checkbox"),
            Self::Radio => Some("Option One"),
            Self::Link => Some("Link"),
            Self::Label => Some("Label"),
            Self::Password => Some("Password"),
            _ => None,
        }
    }
}

impl From<String> for WidgetKind {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<WidgetKind> for String {
    fn from(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Unknown(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// POSITION / PROPERTIES / INSTANCE
// =============================================================================

/// Canvas-local pixel coordinates of an instance's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Editable attributes of an instance. Updates always replace the whole bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Properties {
    /// Property bag attached to a newly dropped instance of `kind`.
    #[must_use]
    pub fn defaults_for(kind: &WidgetKind) -> Self {
        let mut props = Self {
            text: kind.default_text().map(str::to_owned),
            width: Some(DEFAULT_SIZE.to_owned()),
            height: Some(DEFAULT_SIZE.to_owned()),
            font_size: Some(DEFAULT_FONT_SIZE),
            background_color: Some(DEFAULT_BACKGROUND.to_owned()),
            text_color: Some(DEFAULT_TEXT_COLOR.to_owned()),
            enabled: Some(true),
            visible: Some(true),
            ..Self::default()
        };
        match kind {
            WidgetKind::Checkbox => props.checked = Some(false),
            WidgetKind::Slider => props.value = Some(DEFAULT_SLIDER_VALUE),
            WidgetKind::Link => props.href = Some(DEFAULT_HREF.to_owned()),
            _ => {}
        }
        props
    }

    #[must_use]
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    #[must_use]
    pub fn slider_value(&self) -> f64 {
        self.value.unwrap_or(DEFAULT_SLIDER_VALUE).clamp(0.0, 100.0)
    }

    /// Shared styling with every default resolved.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        Appearance {
            width: css_length(self.width.as_deref()),
            height: css_length(self.height.as_deref()),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            background_color: css_color(self.background_color.as_deref(), DEFAULT_BACKGROUND),
            text_color: css_color(self.text_color.as_deref(), DEFAULT_TEXT_COLOR),
            enabled: self.is_enabled(),
            visible: self.is_visible(),
        }
    }
}

// =============================================================================
// SANITIZING
// =============================================================================
//
// Property values end up inside a `style` attribute or an `href`. Anything
// that could escape its declaration or run script falls back to the default.

const LENGTH_UNITS: &[&str] = &["px", "%", "em", "rem", "vw", "vh"];
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// `auto`, or a non-negative number with an optional CSS unit (bare numbers
/// are pixels).
fn css_length(raw: Option<&str>) -> String {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_SIZE.to_owned();
    };
    if value == DEFAULT_SIZE {
        return value.to_owned();
    }
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let numeric = number.parse::<f64>().is_ok_and(f64::is_finite);
    match (numeric, unit) {
        (true, "") => format!("{number}px"),
        (true, unit) if LENGTH_UNITS.contains(&unit) => value.to_owned(),
        _ => DEFAULT_SIZE.to_owned(),
    }
}

/// Hex, named, or functional colors; no declaration separators.
fn css_color(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(v)
            if !v.is_empty()
                && v.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ')) =>
        {
            v.to_owned()
        }
        _ => default.to_owned(),
    }
}

/// Relative targets pass through; absolute ones need a navigation scheme.
fn safe_href(raw: Option<&str>) -> String {
    let Some(href) = raw.map(str::trim).filter(|h| !h.is_empty()) else {
        return DEFAULT_HREF.to_owned();
    };
    match href.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if href[end..].starts_with(':') => {
            let scheme = href[..end].to_ascii_lowercase();
            if SAFE_SCHEMES.contains(&scheme.as_str()) {
                href.to_owned()
            } else {
                DEFAULT_HREF.to_owned()
            }
        }
        _ => href.to_owned(),
    }
}

/// Resolved styling common to every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub width: String,
    pub height: String,
    pub font_size: f64,
    pub background_color: String,
    pub text_color: String,
    pub enabled: bool,
    pub visible: bool,
}

/// A placed widget as stored remotely and mirrored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub position: Position,
    #[serde(default)]
    pub properties: Properties,
}

/// An instance before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstance {
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub position: Position,
    pub properties: Properties,
}

impl NewInstance {
    #[must_use]
    pub fn with_id(self, id: InstanceId) -> Instance {
        Instance { id, kind: self.kind, position: self.position, properties: self.properties }
    }
}

// =============================================================================
// TYPED VIEW
// =============================================================================

/// Per-kind view of an instance carrying only the fields that kind renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Button { text: String },
    Text { text: String },
    Heading { text: String },
    Paragraph { text: String },
    Quote { text: String },
    Checkbox { checked: bool, text: String },
    Radio { text: String },
    Slider { value: f64 },
    Image,
    Link { text: String, href: String },
    DatePicker,
    ListView,
    Label { text: String },
    Password { text: String },
    WebView,
    Timer,
    Unknown { tag: String },
}

impl Widget {
    #[must_use]
    pub fn from_instance(instance: &Instance) -> Self {
        let props = &instance.properties;
        let text = || props.text_or_empty().to_owned();
        match &instance.kind {
            WidgetKind::Button => Self::Button { text: text() },
            WidgetKind::Text => Self::Text { text: text() },
            WidgetKind::Heading => Self::Heading { text: text() },
            WidgetKind::Paragraph => Self::Paragraph { text: text() },
            WidgetKind::Quote => Self::Quote { text: text() },
            WidgetKind::Checkbox => Self::Checkbox { checked: props.checked.unwrap_or(false), text: text() },
            WidgetKind::Radio => Self::Radio { text: text() },
            WidgetKind::Slider => Self::Slider { value: props.slider_value() },
            WidgetKind::Image => Self::Image,
            WidgetKind::Link => Self::Link {
                text: text(),
                href: safe_href(props.href.as_deref()),
            },
            WidgetKind::DatePicker => Self::DatePicker,
            WidgetKind::ListView => Self::ListView,
            WidgetKind::Label => Self::Label { text: text() },
            WidgetKind::Password => Self::Password { text: text() },
            WidgetKind::WebView => Self::WebView,
            WidgetKind::Timer => Self::Timer,
            WidgetKind::Unknown(tag) => Self::Unknown { tag: tag.clone() },
        }
    }
}
