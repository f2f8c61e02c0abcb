use std::collections::HashMap;

use super::*;
use crate::editor::canvas::DropSurface;
use crate::editor::palette::{DRAG_PAYLOAD_KEY, DragPayload};
use crate::editor::widget::{Position, WidgetKind};
use crate::services::notify::ToastLevel;
use crate::state::test_helpers::{dummy_instance, seeded_app_state, test_app_state};

fn drop_event(widget_type: &str, x: f64, y: f64) -> DropEvent {
    let mut data = HashMap::new();
    data.insert(DRAG_PAYLOAD_KEY.to_owned(), widget_type.to_owned());
    DropEvent { payload: DragPayload(data), pointer_x: x + 200.0, pointer_y: y + 100.0, surface_left: 200.0, surface_top: 100.0 }
}

fn edit(field: &str, value: &str) -> Json<EditBody> {
    Json(EditBody { field: field.into(), value: value.into() })
}

#[test]
fn edit_error_to_status_maps_bad_request() {
    assert_eq!(edit_error_to_status(EditError::UnknownField("color".into())), StatusCode::BAD_REQUEST);
    assert_eq!(
        edit_error_to_status(EditError::InvalidValue { field: "fontSize", value: "big".into() }),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn rendered_body_contains_all_three_panels() {
    let workspace = Workspace { instances: vec![dummy_instance("a", WidgetKind::Button)], selected: Some("a".into()) };
    let html = page::render_body(&workspace, &DropSurface::new());
    assert!(html.contains("Components"));
    assert!(html.contains("id=\"drop-surface\""));
    assert!(html.contains("data-instance-id=\"a\""));
    assert!(html.contains("id=\"delete-component\""));
}

#[tokio::test]
async fn page_is_a_full_document() {
    let Html(body) = page(State(test_app_state())).await;
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("/static/editor.js"));
    assert!(body.contains("id=\"drop-surface\""));
    assert!(body.contains("data-pending=\"[]\""));
}

#[tokio::test]
async fn drop_creates_selected_instance_with_defaults() {
    let state = test_app_state();
    let Json(resp) = drop_component(State(state.clone()), Json(drop_event("button", 40.0, 60.0))).await;

    let ws = state.editor.snapshot().await;
    assert_eq!(ws.instances.len(), 1);
    let created = &ws.instances[0];
    assert_eq!(created.kind, WidgetKind::Button);
    assert_eq!(created.position, Position { x: 40.0, y: 60.0 });
    assert_eq!(created.properties.text.as_deref(), Some("Button"));
    assert_eq!(created.properties.font_size, Some(14.0));
    assert_eq!(created.properties.width.as_deref(), Some("auto"));
    assert_eq!(ws.selected.as_deref(), Some(created.id.as_str()));

    assert!(resp.html.contains(&format!("data-instance-id=\"{}\"", created.id)));
    assert_eq!(resp.toasts, vec![Toast::success("Component added successfully")]);
    assert!(!state.surface.read().await.dragging);
}

#[tokio::test]
async fn drop_without_type_is_a_no_op() {
    let state = test_app_state();
    let Json(resp) = drop_component(State(state.clone()), Json(drop_event("  ", 1.0, 1.0))).await;
    assert!(state.editor.snapshot().await.instances.is_empty());
    assert!(resp.toasts.is_empty());

    let empty = DropEvent { payload: DragPayload::default(), ..drop_event("x", 0.0, 0.0) };
    let _ = drop_component(State(state.clone()), Json(empty)).await;
    assert!(state.editor.snapshot().await.instances.is_empty());
}

#[tokio::test]
async fn drag_over_and_leave_toggle_highlight() {
    let state = test_app_state();
    let Json(flags) = drag_over(State(state.clone())).await;
    assert!(flags.dragging);
    assert!(flags.accept);

    let Json(flags) = drag_leave(State(state.clone())).await;
    assert!(!flags.dragging);
}

#[tokio::test]
async fn grid_toggle_adds_grid_class() {
    let state = test_app_state();
    let Json(resp) = toggle_grid(State(state.clone())).await;
    assert!(state.surface.read().await.show_grid);
    assert!(resp.html.contains("class=\"device grid\""));
}

#[tokio::test]
async fn select_known_id_and_ignore_unknown() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Text)]).await;

    let _ = select_component(State(state.clone()), Path("zzz".into())).await;
    assert_eq!(state.editor.snapshot().await.selected, None);

    let Json(resp) = select_component(State(state.clone()), Path("a".into())).await;
    assert_eq!(state.editor.snapshot().await.selected.as_deref(), Some("a"));
    assert!(resp.html.contains("data-field=\"text\""));

    let Json(resp) = deselect(State(state.clone())).await;
    assert_eq!(state.editor.snapshot().await.selected, None);
    assert!(resp.html.contains(inspector::EMPTY_MESSAGE));
}

#[tokio::test]
async fn edit_merges_single_field_into_full_bag() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Button)]).await;

    let Json(resp) = edit_component(State(state.clone()), Path("a".into()), edit("text", "Tap me")).await.unwrap();
    let ws = state.editor.snapshot().await;
    let props = &ws.get("a").unwrap().properties;
    assert_eq!(props.text.as_deref(), Some("Tap me"));
    assert_eq!(props.font_size, Some(14.0));
    assert_eq!(resp.toasts, vec![Toast::success("Properties updated successfully")]);
}

#[tokio::test]
async fn edit_visible_false_dims_instance() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Button)]).await;
    let Json(resp) = edit_component(State(state.clone()), Path("a".into()), edit("visible", "false")).await.unwrap();
    assert!(resp.html.contains("opacity:0.5"));
    assert!(resp.html.contains("pointer-events:auto"));
}

#[tokio::test]
async fn edit_rejects_unknown_id_and_bad_input() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Button)]).await;

    let err = edit_component(State(state.clone()), Path("nope".into()), edit("text", "x")).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);

    let err = edit_component(State(state.clone()), Path("a".into()), edit("shadow", "x")).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);

    let err = edit_component(State(state.clone()), Path("a".into()), edit("fontSize", "huge")).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_and_returns_to_empty_inspector() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Button), dummy_instance("b", WidgetKind::Text)]).await;
    let _ = select_component(State(state.clone()), Path("a".into())).await;

    let Json(resp) = delete_component(State(state.clone()), Path("a".into())).await.unwrap();
    let ws = state.editor.snapshot().await;
    assert_eq!(ws.instances.len(), 1);
    assert_eq!(ws.selected, None);
    assert!(resp.html.contains(inspector::EMPTY_MESSAGE));
    assert_eq!(resp.toasts, vec![Toast::success("Component deleted successfully")]);

    let err = delete_component(State(state.clone()), Path("a".into())).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_picks_up_rows_and_clears_selection() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Button)]).await;
    let _ = select_component(State(state.clone()), Path("a".into())).await;

    let Json(resp) = reload(State(state.clone())).await;
    let ws = state.editor.snapshot().await;
    assert_eq!(ws.instances.len(), 1);
    assert_eq!(ws.selected, None);
    assert!(resp.toasts.iter().all(|t| t.level != ToastLevel::Error));
}

#[tokio::test]
async fn list_components_returns_snapshot() {
    let state = seeded_app_state(vec![dummy_instance("a", WidgetKind::Slider)]).await;
    let Json(ws) = list_components(State(state)).await;
    assert_eq!(ws.instances[0].id, "a");
    let json = serde_json::to_value(&ws).unwrap();
    assert_eq!(json["instances"][0]["type"], "slider");
    assert!(json["selected"].is_null());
}
