//! Hit-testing pointer positions against light markers.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point, Rect};
use crate::consts::HIT_SLOP_PX;
use crate::doc::{LightId, LightSource, LightStore};
use crate::render::marker_extent;

/// Test which light (if any) has its marker under `screen_pt`.
///
/// Lights later in the store are drawn on top, so they are tested first. The
/// marker's rotation is honored; tiny markers get a minimum hit box of
/// [`HIT_SLOP_PX`] in each direction.
#[must_use]
pub fn hit_test(screen_pt: Point, store: &LightStore, camera: &Camera, viewport: Rect, size_multiplier: f64) -> Option<LightId> {
    if viewport.is_empty() {
        return None;
    }
    store
        .lights()
        .iter()
        .rev()
        .find(|light| hits_light(screen_pt, light, camera, viewport, size_multiplier))
        .map(|light| light.id.clone())
}

fn hits_light(screen_pt: Point, light: &LightSource, camera: &Camera, viewport: Rect, size_multiplier: f64) -> bool {
    let center = camera.normalized_to_screen(Point::new(light.x, light.y), viewport);
    let (w, h) = marker_extent(light, size_multiplier);
    let half_w = (w * camera.zoom / 2.0).max(HIT_SLOP_PX);
    let half_h = (h * camera.zoom / 2.0).max(HIT_SLOP_PX);

    // Rotate the pointer into the marker's local frame.
    let (sin, cos) = (-light.rotation.to_radians()).sin_cos();
    let dx = screen_pt.x - center.x;
    let dy = screen_pt.y - center.y;
    let local_x = dx * cos - dy * sin;
    let local_y = dx * sin + dy * cos;

    local_x.abs() <= half_w && local_y.abs() <= half_h
}
