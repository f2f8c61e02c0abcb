//! Properties inspector: edit form for the selected instance.
//!
//! ARCHITECTURE
//! ============
//! Every edit is a single-field `PropertyEdit`, but what leaves this module
//! is always the complete merged bag from `apply_edit`. The orchestrator's
//! update replaces the stored bag wholesale, so a partial bag here would
//! silently erase fields.

#[cfg(test)]
#[path = "inspector_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use super::widget::{
    DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE, DEFAULT_HREF, DEFAULT_SIZE, DEFAULT_TEXT_COLOR, Instance, InstanceId,
    Properties, WidgetKind,
};

pub const EMPTY_MESSAGE: &str = "Select a component to edit its properties";

/// Length tokens offered for width and height.
pub const SIZE_CHOICES: &[(&str, &str)] =
    &[("auto", "Auto"), ("100%", "Full"), ("50%", "Half"), ("200px", "200px"), ("300px", "300px")];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown property: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Editable property, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Text,
    Href,
    FontSize,
    Width,
    Height,
    Enabled,
    Visible,
    BackgroundColor,
    TextColor,
    Checked,
    Value,
}

impl FieldKey {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Href => "href",
            Self::FontSize => "fontSize",
            Self::Width => "width",
            Self::Height => "height",
            Self::Enabled => "enabled",
            Self::Visible => "visible",
            Self::BackgroundColor => "backgroundColor",
            Self::TextColor => "textColor",
            Self::Checked => "checked",
            Self::Value => "value",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "text" => Self::Text,
            "href" => Self::Href,
            "fontSize" => Self::FontSize,
            "width" => Self::Width,
            "height" => Self::Height,
            "enabled" => Self::Enabled,
            "visible" => Self::Visible,
            "backgroundColor" => Self::BackgroundColor,
            "textColor" => Self::TextColor,
            "checked" => Self::Checked,
            "value" => Self::Value,
            _ => return None,
        })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Href => "URL",
            Self::FontSize => "Font Size",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::Enabled => "Enabled",
            Self::Visible => "Visible",
            Self::BackgroundColor => "Background Color",
            Self::TextColor => "Text Color",
            Self::Checked => "Checked",
            Self::Value => "Value",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput,
    UrlInput,
    Number { min: Option<f64>, max: Option<f64>, unit: Option<&'static str> },
    Choice(Vec<(String, String)>),
    Toggle,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: FieldKey,
    pub control: Control,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InspectorView {
    Empty,
    Editing { id: InstanceId, kind: WidgetKind, fields: Vec<Field> },
}

impl InspectorView {
    #[cfg(test)]
    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<&Field> {
        match self {
            Self::Empty => None,
            Self::Editing { fields, .. } => fields.iter().find(|f| f.key == key),
        }
    }
}

/// One field overwritten with a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Text(String),
    Href(String),
    FontSize(f64),
    Width(String),
    Height(String),
    Enabled(bool),
    Visible(bool),
    BackgroundColor(String),
    TextColor(String),
    Checked(bool),
    Value(f64),
}

impl PropertyEdit {
    /// Parse a raw form value for the field named `field`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for names outside the schema and
    /// `InvalidValue` when a numeric or boolean field cannot be parsed.
    pub fn parse(field: &str, raw: &str) -> Result<Self, EditError> {
        let key = FieldKey::parse(field).ok_or_else(|| EditError::UnknownField(field.to_owned()))?;
        let invalid = || EditError::InvalidValue { field: key.wire_name(), value: raw.to_owned() };
        Ok(match key {
            FieldKey::Text => Self::Text(raw.to_owned()),
            FieldKey::Href => Self::Href(raw.to_owned()),
            FieldKey::Width => Self::Width(raw.to_owned()),
            FieldKey::Height => Self::Height(raw.to_owned()),
            FieldKey::BackgroundColor => Self::BackgroundColor(raw.to_owned()),
            FieldKey::TextColor => Self::TextColor(raw.to_owned()),
            FieldKey::FontSize => Self::FontSize(parse_number(raw).ok_or_else(invalid)?),
            FieldKey::Value => Self::Value(parse_number(raw).ok_or_else(invalid)?.clamp(0.0, 100.0)),
            FieldKey::Enabled => Self::Enabled(parse_bool(raw).ok_or_else(invalid)?),
            FieldKey::Visible => Self::Visible(parse_bool(raw).ok_or_else(invalid)?),
            FieldKey::Checked => Self::Checked(parse_bool(raw).ok_or_else(invalid)?),
        })
    }
}

/// Blank input counts as zero, matching a cleared number field.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

// =============================================================================
// MERGE
// =============================================================================

/// Full property bag with exactly one field replaced.
#[must_use]
pub fn apply_edit(current: &Properties, edit: PropertyEdit) -> Properties {
    let mut next = current.clone();
    match edit {
        PropertyEdit::Text(v) => next.text = Some(v),
        PropertyEdit::Href(v) => next.href = Some(v),
        PropertyEdit::FontSize(v) => next.font_size = Some(v),
        PropertyEdit::Width(v) => next.width = Some(v),
        PropertyEdit::Height(v) => next.height = Some(v),
        PropertyEdit::Enabled(v) => next.enabled = Some(v),
        PropertyEdit::Visible(v) => next.visible = Some(v),
        PropertyEdit::BackgroundColor(v) => next.background_color = Some(v),
        PropertyEdit::TextColor(v) => next.text_color = Some(v),
        PropertyEdit::Checked(v) => next.checked = Some(v),
        PropertyEdit::Value(v) => next.value = Some(v),
    }
    next
}

// =============================================================================
// VIEW
// =============================================================================

/// Build the inspector state for the current selection.
#[must_use]
pub fn inspect(selected: Option<&Instance>) -> InspectorView {
    let Some(instance) = selected else {
        return InspectorView::Empty;
    };
    let props = &instance.properties;
    let text = |v: Option<&String>, default: &str| FieldValue::Text(v.map_or_else(|| default.to_owned(), Clone::clone));

    let mut fields = vec![Field {
        key: FieldKey::Text,
        control: Control::TextInput,
        value: text(props.text.as_ref(), ""),
    }];
    if instance.kind == WidgetKind::Link {
        fields.push(Field { key: FieldKey::Href, control: Control::UrlInput, value: text(props.href.as_ref(), DEFAULT_HREF) });
    }
    fields.push(Field {
        key: FieldKey::FontSize,
        control: Control::Number { min: Some(1.0), max: None, unit: Some("px") },
        value: FieldValue::Number(props.font_size.unwrap_or(DEFAULT_FONT_SIZE)),
    });
    for (key, current) in [(FieldKey::Width, props.width.as_deref()), (FieldKey::Height, props.height.as_deref())] {
        let current = current.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_SIZE);
        fields.push(Field { key, control: Control::Choice(size_choices(current)), value: FieldValue::Text(current.to_owned()) });
    }
    fields.push(Field { key: FieldKey::Enabled, control: Control::Toggle, value: FieldValue::Bool(props.is_enabled()) });
    fields.push(Field { key: FieldKey::Visible, control: Control::Toggle, value: FieldValue::Bool(props.is_visible()) });
    match instance.kind {
        WidgetKind::Checkbox => fields.push(Field {
            key: FieldKey::Checked,
            control: Control::Toggle,
            value: FieldValue::Bool(props.checked.unwrap_or(false)),
        }),
        WidgetKind::Slider => fields.push(Field {
            key: FieldKey::Value,
            control: Control::Number { min: Some(0.0), max: Some(100.0), unit: None },
            value: FieldValue::Number(props.slider_value()),
        }),
        _ => {}
    }
    fields.push(Field {
        key: FieldKey::BackgroundColor,
        control: Control::Color,
        value: text(props.background_color.as_ref(), DEFAULT_BACKGROUND),
    });
    fields.push(Field {
        key: FieldKey::TextColor,
        control: Control::Color,
        value: text(props.text_color.as_ref(), DEFAULT_TEXT_COLOR),
    });

    InspectorView::Editing { id: instance.id.clone(), kind: instance.kind.clone(), fields }
}

/// Size choices, with a persisted custom token appended so it stays selectable.
fn size_choices(current: &str) -> Vec<(String, String)> {
    let mut choices: Vec<(String, String)> =
        SIZE_CHOICES.iter().map(|(v, l)| ((*v).to_owned(), (*l).to_owned())).collect();
    if !choices.iter().any(|(v, _)| v == current) {
        choices.push((current.to_owned(), current.to_owned()));
    }
    choices
}

/// Properties side panel: the empty-state message, or the edit form for the
/// selected instance.
#[component]
pub fn InspectorPanel(state: InspectorView) -> impl IntoView {
    let body = match state {
        InspectorView::Empty => view! { <div class="inspector-empty">{EMPTY_MESSAGE}</div> }.into_any(),
        InspectorView::Editing { id, kind, fields } => {
            let form_id = id.clone();
            view! {
            <p class="muted">{kind.as_str().to_owned()}</p>
            <form class="inspector-form" data-instance-id=form_id>
                {fields.into_iter().map(field_row).collect_view()}
                <div class="inspector-actions">
                    <button type="button" id="delete-component" class="destructive" data-instance-id=id>
                        "Delete Component"
                    </button>
                </div>
            </form>
            }
            .into_any()
        }
    };

    view! {
        <aside class="panel inspector">
            <div class="panel-header">
                <h2>"Properties"</h2>
            </div>
            {body}
        </aside>
    }
}

fn field_row(field: Field) -> AnyView {
    let name = field.key.wire_name();
    let input_id = format!("field-{name}");
    let label = view! { <label for=input_id.clone()>{field.key.label()}</label> };

    match (field.control, field.value) {
        (Control::Toggle, FieldValue::Bool(on)) => view! {
            <div class="field toggle">
                {label}
                <input type="checkbox" id=input_id data-field=name checked=on />
            </div>
        }
        .into_any(),
        (Control::Number { min, max, unit }, FieldValue::Number(n)) => view! {
            <div class="field">
                {label}
                <input
                    type="number"
                    id=input_id
                    data-field=name
                    value=n.to_string()
                    min=min.map(|v| v.to_string())
                    max=max.map(|v| v.to_string())
                />
                {unit.map(|unit| view! { <span class="muted">{unit}</span> })}
            </div>
        }
        .into_any(),
        (Control::Choice(choices), FieldValue::Text(current)) => {
            let options = choices
                .into_iter()
                .map(|(value, text)| {
                    let selected = value == current;
                    view! { <option value=value selected=selected>{text}</option> }
                })
                .collect_view();
            view! {
                <div class="field">
                    {label}
                    <select id=input_id data-field=name>{options}</select>
                </div>
            }
            .into_any()
        }
        (Control::Color, FieldValue::Text(current)) => view! {
            <div class="field">
                {label}
                <input type="color" data-field=name value=current.clone() />
                <input type="text" id=input_id data-field=name value=current.clone() placeholder=current />
            </div>
        }
        .into_any(),
        (Control::UrlInput, FieldValue::Text(current)) => view! {
            <div class="field">
                {label}
                <input type="url" id=input_id data-field=name value=current />
            </div>
        }
        .into_any(),
        (_, value) => view! {
            <div class="field">
                {label}
                <input type="text" id=input_id data-field=name value=display_value(&value) />
            </div>
        }
        .into_any(),
    }
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Bool(b) => b.to_string(),
    }
}
