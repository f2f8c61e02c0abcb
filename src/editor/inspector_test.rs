use leptos::prelude::*;

use super::*;
use crate::editor::render_html;
use crate::editor::widget::Position;

fn selected(kind: WidgetKind, properties: Properties) -> Instance {
    Instance { id: "sel-1".into(), kind, position: Position { x: 1.0, y: 2.0 }, properties }
}

fn keys(view: &InspectorView) -> Vec<FieldKey> {
    match view {
        InspectorView::Empty => Vec::new(),
        InspectorView::Editing { fields, .. } => fields.iter().map(|f| f.key).collect(),
    }
}

#[test]
fn no_selection_has_no_fields() {
    let state = inspect(None);
    assert_eq!(state, InspectorView::Empty);
    let html = render_html(move || view! { <InspectorPanel state=state /> });
    assert!(html.contains(EMPTY_MESSAGE));
    assert!(!html.contains("data-field"));
}

#[test]
fn fields_follow_panel_order() {
    let view = inspect(Some(&selected(WidgetKind::Button, Properties::default())));
    assert_eq!(
        keys(&view),
        vec![
            FieldKey::Text,
            FieldKey::FontSize,
            FieldKey::Width,
            FieldKey::Height,
            FieldKey::Enabled,
            FieldKey::Visible,
            FieldKey::BackgroundColor,
            FieldKey::TextColor,
        ]
    );
}

#[test]
fn url_field_only_for_links() {
    let link = inspect(Some(&selected(WidgetKind::Link, Properties::default())));
    assert_eq!(keys(&link)[1], FieldKey::Href);
    assert_eq!(link.field(FieldKey::Href).unwrap().value, FieldValue::Text("#".into()));

    let button = inspect(Some(&selected(WidgetKind::Button, Properties::default())));
    assert!(button.field(FieldKey::Href).is_none());
}

#[test]
fn kind_specific_fields_for_checkbox_and_slider() {
    let checkbox = inspect(Some(&selected(WidgetKind::Checkbox, Properties::default())));
    assert_eq!(checkbox.field(FieldKey::Checked).unwrap().value, FieldValue::Bool(false));
    let slider = inspect(Some(&selected(WidgetKind::Slider, Properties::default())));
    assert_eq!(slider.field(FieldKey::Value).unwrap().value, FieldValue::Number(50.0));
}

#[test]
fn field_values_show_defaults_for_missing_properties() {
    let view = inspect(Some(&selected(WidgetKind::Text, Properties::default())));
    assert_eq!(view.field(FieldKey::Text).unwrap().value, FieldValue::Text(String::new()));
    assert_eq!(view.field(FieldKey::FontSize).unwrap().value, FieldValue::Number(14.0));
    assert_eq!(view.field(FieldKey::Width).unwrap().value, FieldValue::Text("auto".into()));
    assert_eq!(view.field(FieldKey::Enabled).unwrap().value, FieldValue::Bool(true));
    assert_eq!(view.field(FieldKey::BackgroundColor).unwrap().value, FieldValue::Text("#ffffff".into()));
    assert_eq!(view.field(FieldKey::TextColor).unwrap().value, FieldValue::Text("#000000".into()));
}

#[test]
fn custom_size_token_stays_selectable() {
    let props = Properties { width: Some("123px".into()), ..Properties::default() };
    let view = inspect(Some(&selected(WidgetKind::Image, props)));
    let Control::Choice(choices) = &view.field(FieldKey::Width).unwrap().control else {
        panic!("width should be a choice");
    };
    assert_eq!(choices.len(), SIZE_CHOICES.len() + 1);
    assert_eq!(choices.last().unwrap().0, "123px");
}

#[test]
fn apply_edit_overwrites_exactly_one_field() {
    let current = Properties::defaults_for(&WidgetKind::Button);
    let next = apply_edit(&current, PropertyEdit::Visible(false));
    assert_eq!(next.visible, Some(false));
    assert_eq!(Properties { visible: current.visible, ..next.clone() }, current);
    assert_eq!(next.enabled, Some(true));
}

#[test]
fn apply_edit_leaves_absent_fields_absent() {
    let current = Properties { text: Some("a".into()), ..Properties::default() };
    let next = apply_edit(&current, PropertyEdit::FontSize(20.0));
    assert_eq!(next, Properties { text: Some("a".into()), font_size: Some(20.0), ..Properties::default() });
}

#[test]
fn parse_edit_handles_each_value_shape() {
    assert_eq!(PropertyEdit::parse("text", "Hello").unwrap(), PropertyEdit::Text("Hello".into()));
    assert_eq!(PropertyEdit::parse("fontSize", "18").unwrap(), PropertyEdit::FontSize(18.0));
    assert_eq!(PropertyEdit::parse("fontSize", "").unwrap(), PropertyEdit::FontSize(0.0));
    assert_eq!(PropertyEdit::parse("visible", "false").unwrap(), PropertyEdit::Visible(false));
    assert_eq!(PropertyEdit::parse("enabled", "on").unwrap(), PropertyEdit::Enabled(true));
    assert_eq!(PropertyEdit::parse("value", "140").unwrap(), PropertyEdit::Value(100.0));
    assert_eq!(PropertyEdit::parse("width", "50%").unwrap(), PropertyEdit::Width("50%".into()));
}

#[test]
fn parse_edit_rejects_bad_input() {
    assert_eq!(PropertyEdit::parse("zIndex", "3"), Err(EditError::UnknownField("zIndex".into())));
    assert!(matches!(
        PropertyEdit::parse("fontSize", "big"),
        Err(EditError::InvalidValue { field: "fontSize", .. })
    ));
    assert!(matches!(PropertyEdit::parse("checked", "maybe"), Err(EditError::InvalidValue { .. })));
}

#[test]
fn rendered_form_binds_fields_and_delete() {
    let state = inspect(Some(&selected(WidgetKind::Link, Properties::defaults_for(&WidgetKind::Link))));
    let html = render_html(move || view! { <InspectorPanel state=state /> });
    assert!(html.contains("data-field=\"href\""));
    assert!(html.contains("data-field=\"visible\""));
    assert!(html.contains("id=\"delete-component\""));
    assert!(html.contains("data-instance-id=\"sel-1\""));
    assert!(html.contains("<p class=\"muted\">link</p>"));
    assert!(!html.contains(EMPTY_MESSAGE));
}

#[test]
fn size_choice_marks_current_option() {
    let props = Properties { width: Some("50%".into()), ..Properties::defaults_for(&WidgetKind::Button) };
    let state = inspect(Some(&selected(WidgetKind::Button, props)));
    let html = render_html(move || view! { <InspectorPanel state=state /> });
    assert!(html.contains("<option value=\"50%\" selected"));
    assert_eq!(html.matches(" selected").count(), 1);
}
