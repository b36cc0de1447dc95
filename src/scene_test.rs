#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn parse(value: serde_json::Value) -> SceneItem {
    serde_json::from_value(value).unwrap()
}

fn rect(id: &str) -> SceneItem {
    SceneItem::Rectangle(RectangleItem {
        id: id.into(),
        x: None,
        y: None,
        width: None,
        height: None,
        props: PropMap::new(),
    })
}

fn container(id: &str, children: Vec<SceneItem>) -> SceneItem {
    SceneItem::Container(ContainerItem { id: id.into(), x: None, y: None, children, props: PropMap::new() })
}

// =============================================================
// Deserialization
// =============================================================

#[test]
fn parse_text_item() {
    let item = parse(json!({ "id": "111", "type": "text", "text": "Hello" }));
    let SceneItem::Text(text) = item else {
        panic!("expected text item");
    };
    assert_eq!(text.id, "111");
    assert_eq!(text.text, "Hello");
    assert!(text.x.is_none());
    assert!(text.props.is_empty());
}

#[test]
fn parse_rectangle_item() {
    let item = parse(json!({ "id": "222", "type": "rectangle", "x": 100, "y": 100, "width": 200, "height": 100 }));
    assert_eq!(
        item,
        SceneItem::Rectangle(RectangleItem {
            id: "222".into(),
            x: Some(100.0),
            y: Some(100.0),
            width: Some(200.0),
            height: Some(100.0),
            props: PropMap::new(),
        })
    );
}

#[test]
fn parse_circle_item() {
    let item = parse(json!({ "id": "333", "type": "circle", "x": 300, "y": 300, "radius": 50 }));
    let SceneItem::Circle(circle) = item else {
        panic!("expected circle item");
    };
    assert_eq!(circle.radius, Some(50.0));
}

#[test]
fn parse_sprite_item() {
    let item = parse(json!({ "id": "444", "type": "sprite", "x": 400, "y": 400, "width": 100, "height": 100 }));
    let SceneItem::Sprite(sprite) = item else {
        panic!("expected sprite item");
    };
    assert_eq!(sprite.width, Some(100.0));
    assert!(sprite.texture.is_none());
}

#[test]
fn parse_container_with_nested_children() {
    let item = parse(json!({
        "id": "root",
        "type": "container",
        "children": [
            { "id": "a", "type": "rectangle" },
            { "id": "inner", "type": "container", "children": [ { "id": "b", "type": "circle" } ] },
        ],
    }));
    assert_eq!(item.children().len(), 2);
    assert_eq!(item.children()[1].children()[0].id(), Some("b"));
}

#[test]
fn parse_unknown_type_is_unknown() {
    let item = parse(json!({ "type": "unknown", "id": "x", "fill": "#fff" }));
    assert_eq!(item, SceneItem::Unknown { id: Some("x".into()) });
    assert_eq!(item.id(), Some("x"));
}

#[test]
fn parse_unknown_without_id() {
    let item = parse(json!({ "type": "hexagon" }));
    assert_eq!(item, SceneItem::Unknown { id: None });
    assert_eq!(item.id(), None);
}

#[test]
fn parse_missing_type_is_unknown() {
    assert_eq!(parse(json!({ "id": "q" })), SceneItem::Unknown { id: Some("q".into()) });
}

#[test]
fn parse_non_object_fails() {
    let result: Result<SceneItem, _> = serde_json::from_value(json!(42));
    assert!(result.is_err());
}

#[test]
fn parse_known_type_with_bad_field_fails() {
    let result: Result<SceneItem, _> = serde_json::from_value(json!({ "id": "r", "type": "rectangle", "x": "left" }));
    assert!(result.is_err());
}

#[test]
fn parse_keeps_passthrough_props() {
    let item = parse(json!({ "id": "t", "type": "text", "text": "hi", "fill": "#ff0000", "fontSize": 12 }));
    let SceneItem::Text(text) = item else {
        panic!("expected text item");
    };
    assert_eq!(text.props.get("fill"), Some(&json!("#ff0000")));
    assert_eq!(text.props.get("fontSize"), Some(&json!(12)));
    assert!(!text.props.contains_key("type"));
    assert!(!text.props.contains_key("text"));
}

#[test]
fn parse_missing_id_fails() {
    let result: Result<SceneItem, _> = serde_json::from_value(json!({ "type": "rectangle" }));
    assert!(result.is_err());
}

// =============================================================
// Props
// =============================================================

#[test]
fn props_defaults() {
    let map = PropMap::new();
    let props = Props::new(&map);
    assert_eq!(props.fill(), "#000000");
    assert_eq!(props.font_size(), 26.0);
    assert_eq!(props.font_family(), "Arial");
    assert_eq!(props.alpha(), 1.0);
    assert!(props.visible());
}

#[test]
fn props_reads_values() {
    let serde_json::Value::Object(map) = json!({ "fill": "#123456", "fontSize": 14.5, "alpha": 3.0, "visible": false })
    else {
        panic!("expected object");
    };
    let props = Props::new(&map);
    assert_eq!(props.fill(), "#123456");
    assert_eq!(props.font_size(), 14.5);
    assert_eq!(props.alpha(), 1.0);
    assert!(!props.visible());
}

// =============================================================
// flatten
// =============================================================

#[test]
fn flatten_is_depth_first_pre_order() {
    let items = vec![
        container("c1", vec![rect("r1"), container("c2", vec![rect("r2")])]),
        rect("r3"),
    ];
    let ids: Vec<_> = flatten(&items).filter_map(SceneItem::id).collect();
    assert_eq!(ids, ["c1", "r1", "c2", "r2", "r3"]);
}

#[test]
fn flatten_empty() {
    assert_eq!(flatten(&[]).count(), 0);
}

// =============================================================
// Scene
// =============================================================

#[test]
fn scene_new_accepts_unique_ids() {
    let scene = Scene::new(vec![rect("a"), container("b", vec![rect("c")])]).unwrap();
    assert_eq!(scene.items().len(), 2);
    assert_eq!(scene.len(), 3);
    assert!(!scene.is_empty());
}

#[test]
fn scene_new_rejects_duplicate_top_level() {
    let err = Scene::new(vec![rect("a"), rect("a")]).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref id) if id == "a"));
}

#[test]
fn scene_new_rejects_duplicate_nested() {
    let err = Scene::new(vec![rect("a"), container("b", vec![container("c", vec![rect("a")])])]).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref id) if id == "a"));
}

#[test]
fn scene_allows_many_unknown_items_without_ids() {
    let scene = Scene::new(vec![SceneItem::Unknown { id: None }, SceneItem::Unknown { id: None }]).unwrap();
    assert_eq!(scene.len(), 2);
}

#[test]
fn scene_rejects_id_shared_with_unknown_item() {
    let err = Scene::from_json(r#"[{"type": "unknown", "id": "x"}, {"type": "text", "id": "x"}]"#).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref id) if id == "x"));
}

#[test]
fn scene_rejects_duplicate_unknown_ids_in_container() {
    let err = Scene::from_json(
        r#"[{"type": "container", "id": "c", "children": [{"type": "star", "id": "s"}, {"type": "blob", "id": "s"}]}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref id) if id == "s"));
}

#[test]
fn scene_from_json() {
    let scene = Scene::from_json(
        r#"[
            {"id": "111", "type": "text", "text": "Hello"},
            {"id": "222", "type": "rectangle", "x": 100, "y": 100, "width": 200, "height": 100},
            {"id": "333", "type": "circle", "x": 300, "y": 300, "radius": 50},
            {"id": "444", "type": "sprite", "x": 400, "y": 400, "width": 100, "height": 100}
        ]"#,
    )
    .unwrap();
    assert_eq!(scene.len(), 4);
}

#[test]
fn scene_from_json_rejects_malformed() {
    assert!(matches!(Scene::from_json("[{"), Err(SceneError::Parse(_))));
}

#[test]
fn scene_from_json_rejects_object() {
    assert!(matches!(Scene::from_json("{}"), Err(SceneError::Parse(_))));
}

#[test]
fn scene_default_is_empty() {
    let scene = Scene::default();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
}
