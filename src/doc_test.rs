#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use serde_json::json;

use super::*;
use crate::catalog;

fn make_light(id: &str, x: f64, y: f64) -> LightSource {
    LightSource {
        id: LightId::from(id),
        x,
        y,
        intensity: 60.0,
        color: "#FFF0D9".into(),
        room: "Kitchen".into(),
        category_id: "downlights".into(),
        type_id: "round_downlight".into(),
        shape: LightShape::Round,
        width: 15.0,
        height: 15.0,
        rotation: 0.0,
        is_external: false,
    }
}

// =============================================================
// LightId
// =============================================================

#[test]
fn generated_ids_are_prefixed_and_unique() {
    let ids: HashSet<LightId> = (0..1000).map(|_| LightId::generate()).collect();
    assert_eq!(ids.len(), 1000);
    assert!(ids.iter().all(|id| id.as_str().starts_with("light-")));
}

#[test]
fn light_id_serializes_as_plain_string() {
    let id = LightId::from("light-1712345678901");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"light-1712345678901\"");
    assert_eq!(id.to_string(), "light-1712345678901");
}

// =============================================================
// AspectRatio
// =============================================================

#[test]
fn aspect_ratio_defaults_to_landscape() {
    assert_eq!(AspectRatio::default(), AspectRatio::Landscape);
}

#[test]
fn aspect_ratio_parses_and_displays() {
    for ar in [AspectRatio::Square, AspectRatio::Landscape, AspectRatio::Portrait] {
        assert_eq!(ar.to_string().parse::<AspectRatio>().unwrap(), ar);
        assert_eq!(serde_json::to_string(&ar).unwrap(), format!("\"{}\"", ar.as_str()));
    }
    assert!("panorama".parse::<AspectRatio>().is_err());
}

#[test]
fn aspect_ratio_image_sizes() {
    assert_eq!(AspectRatio::Square.image_size(), "1024x1024");
    assert_eq!(AspectRatio::Landscape.image_size(), "1536x1024");
    assert_eq!(AspectRatio::Portrait.image_size(), "1024x1536");
}

// =============================================================
// LightSource serde
// =============================================================

#[test]
fn light_serializes_with_camel_case_keys() {
    let v = serde_json::to_value(make_light("a", 10.0, 20.0)).unwrap();
    assert_eq!(v["categoryId"], "downlights");
    assert_eq!(v["typeId"], "round_downlight");
    assert_eq!(v["isExternal"], false);
    assert_eq!(v["shape"], "round");
    assert!(v.get("category_id").is_none());
}

#[test]
fn light_without_rotation_defaults_to_zero() {
    let v = json!({
        "id": "light-1",
        "x": 12.5,
        "y": 40,
        "intensity": 60,
        "color": "#FFF0D9",
        "room": "Living Room",
        "categoryId": "downlights",
        "typeId": "round_downlight",
        "shape": "round",
        "width": 15,
        "height": 15,
        "isExternal": false
    });
    let light: LightSource = serde_json::from_value(v).unwrap();
    assert_eq!(light.rotation, 0.0);
    assert_eq!(light.y, 40.0);
}

#[test]
fn clamp_position_reports_change() {
    let mut light = make_light("a", -3.0, 104.0);
    assert!(light.clamp_position());
    assert_eq!((light.x, light.y), (0.0, 100.0));
    assert!(!light.clamp_position());
}

#[test]
fn normalize_brings_every_ranged_field_into_range() {
    let mut light = make_light("a", 20.0, 30.0);
    assert!(!light.normalize());

    light.intensity = -4.0;
    light.rotation = 370.0;
    light.height = 0.25;
    assert!(light.normalize());
    assert_eq!(light.intensity, 0.0);
    assert_eq!(light.rotation, 10.0);
    assert_eq!(light.height, 1.0);
    assert_eq!((light.x, light.y), (20.0, 30.0));
}

// =============================================================
// Factory
// =============================================================

#[test]
fn create_light_copies_catalog_defaults() {
    let (cat, t) = catalog::light_type("external", "bollard").unwrap();
    let light = create_light(cat, t, 33.0, 66.0);
    assert_eq!((light.x, light.y), (33.0, 66.0));
    assert_eq!(light.category_id, "external");
    assert_eq!(light.type_id, "bollard");
    assert_eq!(light.shape, LightShape::Bollard);
    assert_eq!((light.width, light.height), (12.0, 25.0));
    assert_eq!(light.intensity, 75.0);
    assert_eq!(light.color, "#F1F6FF");
    assert!(light.is_external);
    assert_eq!(light.room, "Living Room");
    assert_eq!(light.rotation, 0.0);
}

#[test]
fn create_light_keeps_position_in_range() {
    let (cat, t) = catalog::light_type("downlights", "round_downlight").unwrap();
    for (x, y) in [(-1.0, 50.0), (50.0, 101.0), (f64::NAN, 0.0), (100.0, 0.0)] {
        let light = create_light(cat, t, x, y);
        assert!((0.0..=100.0).contains(&light.x));
        assert!((0.0..=100.0).contains(&light.y));
    }
}

#[test]
fn create_light_ids_differ_for_back_to_back_calls() {
    let (cat, t) = catalog::light_type("downlights", "round_downlight").unwrap();
    let a = create_light(cat, t, 1.0, 1.0);
    let b = create_light(cat, t, 1.0, 1.0);
    assert_ne!(a.id, b.id);
}

// =============================================================
// PartialLightSource
// =============================================================

#[test]
fn sanitized_clamps_every_field() {
    let p = PartialLightSource {
        x: Some(120.0),
        y: Some(-4.0),
        intensity: Some(250.0),
        width: Some(0.0),
        height: Some(-3.0),
        rotation: Some(-90.0),
        ..Default::default()
    }
    .sanitized();
    assert_eq!(p.x, Some(100.0));
    assert_eq!(p.y, Some(0.0));
    assert_eq!(p.intensity, Some(100.0));
    assert_eq!(p.width, Some(1.0));
    assert_eq!(p.height, Some(1.0));
    assert_eq!(p.rotation, Some(270.0));
}

#[test]
fn partial_skips_absent_fields_on_the_wire() {
    let v = serde_json::to_value(PartialLightSource::position(1.0, 2.0)).unwrap();
    assert_eq!(v, json!({ "x": 1.0, "y": 2.0 }));
}

#[test]
fn normalize_rotation_wraps() {
    assert_eq!(normalize_rotation(0.0), 0.0);
    assert_eq!(normalize_rotation(360.0), 0.0);
    assert_eq!(normalize_rotation(725.0), 5.0);
    assert_eq!(normalize_rotation(-45.0), 315.0);
    assert_eq!(normalize_rotation(f64::INFINITY), 0.0);
    assert!(normalize_rotation(-1e-20) < 360.0);
}

// =============================================================
// LightStore
// =============================================================

#[test]
fn store_keeps_insertion_order() {
    let mut store = LightStore::new();
    for id in ["c", "a", "b"] {
        store.insert(make_light(id, 0.0, 0.0));
    }
    let ids: Vec<String> = store.ids().into_iter().map(|id| id.0).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn store_insert_same_id_replaces_in_place() {
    let mut store = LightStore::new();
    store.insert(make_light("a", 0.0, 0.0));
    store.insert(make_light("b", 0.0, 0.0));
    store.insert(make_light("a", 9.0, 9.0));
    assert_eq!(store.len(), 2);
    assert_eq!(store.lights()[0].x, 9.0);
}

#[test]
fn store_remove_returns_light() {
    let mut store = LightStore::new();
    store.insert(make_light("a", 0.0, 0.0));
    let removed = store.remove(&LightId::from("a")).unwrap();
    assert_eq!(removed.id.as_str(), "a");
    assert!(store.is_empty());
    assert!(store.remove(&LightId::from("a")).is_none());
}

#[test]
fn store_apply_partial_updates_present_fields_only() {
    let mut store = LightStore::new();
    store.insert(make_light("a", 10.0, 10.0));
    let partial = PartialLightSource {
        color: Some("#73D2FF".into()),
        rotation: Some(45.0),
        ..Default::default()
    };
    assert!(store.apply_partial(&LightId::from("a"), &partial));
    let light = store.get(&LightId::from("a")).unwrap();
    assert_eq!(light.color, "#73D2FF");
    assert_eq!(light.rotation, 45.0);
    assert_eq!(light.x, 10.0);
    assert_eq!(light.room, "Kitchen");
}

#[test]
fn store_apply_partial_missing_light_returns_false() {
    let mut store = LightStore::new();
    assert!(!store.apply_partial(&LightId::from("ghost"), &PartialLightSource::position(1.0, 1.0)));
}

#[test]
fn store_load_snapshot_replaces_everything() {
    let mut store = LightStore::new();
    store.insert(make_light("old", 0.0, 0.0));
    store.load_snapshot(vec![make_light("x", 0.0, 0.0), make_light("y", 0.0, 0.0)]);
    assert!(!store.contains(&LightId::from("old")));
    assert_eq!(store.len(), 2);
    store.clear();
    assert!(store.is_empty());
}
