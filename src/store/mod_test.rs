use super::*;

#[test]
fn decode_position_accepts_structured_value() {
    let pos = decode_position(&serde_json::json!({ "x": 10, "y": 20 })).unwrap();
    assert_eq!(pos, Position { x: 10.0, y: 20.0 });
}

#[test]
fn decode_position_accepts_string_encoded_value() {
    let structured = decode_position(&serde_json::json!({ "x": 10, "y": 20 })).unwrap();
    let encoded = decode_position(&serde_json::json!("{\"x\":10,\"y\":20}")).unwrap();
    assert_eq!(structured, encoded);
}

#[test]
fn decode_position_keeps_fractional_coordinates() {
    let pos = decode_position(&serde_json::json!("{\"x\":12.5,\"y\":-3.25}")).unwrap();
    assert_eq!(pos, Position { x: 12.5, y: -3.25 });
}

#[test]
fn decode_position_rejects_garbage() {
    assert!(matches!(decode_position(&serde_json::json!("not json")), Err(StoreError::Decode(_))));
    assert!(matches!(decode_position(&serde_json::json!(42)), Err(StoreError::Decode(_))));
    assert!(matches!(decode_position(&serde_json::json!({ "x": 1 })), Err(StoreError::Decode(_))));
    assert!(matches!(
        decode_position(&serde_json::json!("\"{\\\"x\\\":1,\\\"y\\\":2}\"")),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn decode_properties_treats_null_as_empty() {
    assert_eq!(decode_properties(&serde_json::Value::Null).unwrap(), Properties::default());
}

#[test]
fn decode_properties_reads_camel_case_bag() {
    let props = decode_properties(&serde_json::json!({
        "text": "Hi",
        "fontSize": 18,
        "backgroundColor": "#ff0000",
        "visible": false,
        "legacyField": "ignored"
    }))
    .unwrap();
    assert_eq!(props.text.as_deref(), Some("Hi"));
    assert_eq!(props.font_size, Some(18.0));
    assert_eq!(props.background_color.as_deref(), Some("#ff0000"));
    assert_eq!(props.visible, Some(false));
}

#[test]
fn decode_properties_rejects_mistyped_field() {
    let result = decode_properties(&serde_json::json!({ "fontSize": "huge" }));
    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[test]
fn instance_from_row_reads_supabase_shape() {
    let row = serde_json::json!({
        "id": "6f1c",
        "type": "slider",
        "position": "{\"x\":5,\"y\":6}",
        "properties": { "value": 30 },
        "created_at": "2024-01-01T00:00:00Z"
    });
    let inst = instance_from_row(&row).unwrap();
    assert_eq!(inst.id, "6f1c");
    assert_eq!(inst.kind, WidgetKind::Slider);
    assert_eq!(inst.position, Position { x: 5.0, y: 6.0 });
    assert_eq!(inst.properties.value, Some(30.0));
}

#[test]
fn instance_from_row_requires_id_type_and_position() {
    assert!(instance_from_row(&serde_json::json!({ "type": "text", "position": {"x":0,"y":0} })).is_err());
    assert!(instance_from_row(&serde_json::json!({ "id": "a", "position": {"x":0,"y":0} })).is_err());
    assert!(instance_from_row(&serde_json::json!({ "id": "a", "type": "text" })).is_err());
}

#[test]
fn instance_from_row_missing_properties_is_empty_bag() {
    let inst = instance_from_row(&serde_json::json!({
        "id": 7,
        "type": "radio",
        "position": { "x": 0, "y": 0 }
    }))
    .unwrap();
    assert_eq!(inst.id, "7");
    assert_eq!(inst.properties, Properties::default());
}
