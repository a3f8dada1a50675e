use super::*;
use crate::catalog;
use crate::doc::create_light;

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 1000.0)
}

fn place(store: &mut LightStore, type_id: &str, x: f64, y: f64) -> LightId {
    let (cat, t) = catalog::find_type(type_id).unwrap();
    let light = create_light(cat, t, x, y);
    let id = light.id.clone();
    store.insert(light);
    id
}

#[test]
fn empty_store_hits_nothing() {
    let store = LightStore::new();
    let hit = hit_test(Point::new(500.0, 500.0), &store, &Camera::default(), viewport(), 1.0);
    assert!(hit.is_none());
}

#[test]
fn hit_at_marker_center() {
    let mut store = LightStore::new();
    let id = place(&mut store, "round_downlight", 50.0, 50.0);
    let hit = hit_test(Point::new(500.0, 500.0), &store, &Camera::default(), viewport(), 1.0);
    assert_eq!(hit, Some(id));
}

#[test]
fn miss_outside_marker() {
    let mut store = LightStore::new();
    place(&mut store, "round_downlight", 50.0, 50.0);
    // 15px marker: half extent 7.5px.
    let hit = hit_test(Point::new(509.0, 500.0), &store, &Camera::default(), viewport(), 1.0);
    assert!(hit.is_none());
}

#[test]
fn zoom_enlarges_hit_box() {
    let mut store = LightStore::new();
    let id = place(&mut store, "round_downlight", 50.0, 50.0);
    let camera = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let hit = hit_test(Point::new(509.0, 500.0), &store, &camera, viewport(), 1.0);
    assert_eq!(hit, Some(id));
}

#[test]
fn size_multiplier_enlarges_hit_box() {
    let mut store = LightStore::new();
    let id = place(&mut store, "round_downlight", 50.0, 50.0);
    let hit = hit_test(Point::new(509.0, 500.0), &store, &Camera::default(), viewport(), 2.0);
    assert_eq!(hit, Some(id));
}

#[test]
fn topmost_light_wins() {
    let mut store = LightStore::new();
    place(&mut store, "round_downlight", 50.0, 50.0);
    let top = place(&mut store, "pendant", 50.0, 50.0);
    let hit = hit_test(Point::new(500.0, 500.0), &store, &Camera::default(), viewport(), 1.0);
    assert_eq!(hit, Some(top));
}

#[test]
fn rotation_is_honored() {
    let mut store = LightStore::new();
    // 40 x 5 bar.
    let id = place(&mut store, "thin_linear", 50.0, 50.0);
    let along = Point::new(515.0, 500.0);
    let across = Point::new(500.0, 515.0);
    let camera = Camera::default();
    assert_eq!(hit_test(along, &store, &camera, viewport(), 1.0), Some(id.clone()));
    assert!(hit_test(across, &store, &camera, viewport(), 1.0).is_none());

    store.get_mut(&id).unwrap().rotation = 90.0;
    assert!(hit_test(along, &store, &camera, viewport(), 1.0).is_none());
    assert_eq!(hit_test(across, &store, &camera, viewport(), 1.0), Some(id));
}

#[test]
fn tiny_marker_gets_minimum_slop() {
    let mut store = LightStore::new();
    let id = place(&mut store, "small_downlight", 50.0, 50.0);
    // 8px * 0.2 = 1.6px marker; slop keeps a 4px half extent.
    let hit = hit_test(Point::new(503.5, 500.0), &store, &Camera::default(), viewport(), 0.2);
    assert_eq!(hit, Some(id));
}

#[test]
fn empty_viewport_hits_nothing() {
    let mut store = LightStore::new();
    place(&mut store, "round_downlight", 50.0, 50.0);
    assert!(hit_test(Point::new(0.0, 0.0), &store, &Camera::default(), Rect::default(), 1.0).is_none());
}
