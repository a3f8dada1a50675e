//! Rendering: per-shape marker geometry for the host view.
//!
//! The host draws the floor plan and one marker per light. This module decides
//! what each marker looks like; it never draws and never mutates session state.
//! Every [`LightShape`] variant maps to exactly one strategy function below, so
//! a new shape is a new variant plus a new strategy, not another branch in a
//! conditional chain.
//!
//! Geometry is expressed in marker-local pixels at zoom 1, centered on the
//! light's position. The host places the marker at [`Marker::center`], rotates
//! it by [`Marker::rotation_deg`] and scales it by [`Marker::scale`] (markers
//! live inside the zoomed layer).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point, Rect};
use crate::catalog::LightShape;
use crate::doc::{LightId, LightSource};

/// Opacity of a lit marker during playback.
const ACTIVE_OPACITY: f64 = 0.9;
/// Opacity of an idle marker.
const IDLE_OPACITY: f64 = 0.7;

/// Gap between a spike's head and its stake, in pixels.
const SPIKE_GAP_PX: f64 = 2.0;
/// Width of a spike's stake and a chandelier's stem, in pixels.
const STEM_WIDTH_PX: f64 = 2.0;
/// Bollard post width relative to the head diameter.
const BOLLARD_POST_RATIO: f64 = 0.6;
/// Horizontal margin around each chandelier bulb, in pixels.
const CHANDELIER_BULB_MARGIN_PX: f64 = 4.0;

const STAKE_FILL: &str = "#888";
const POST_FILL: &str = "#666";

/// What a marker part is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// The light's own color; the part glows.
    Light,
    /// A fixed fixture-body color; the part does not glow.
    Body(&'static str),
}

/// Outline of a marker part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    Ellipse,
    Rect { corner_radius: f64 },
}

/// One drawable piece of a marker, centered at `offset` from the marker center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPart {
    pub offset: Point,
    pub width: f64,
    pub height: f64,
    pub shape: PartShape,
    pub fill: Fill,
}

/// Box-shadow style halo around lit parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub spread: f64,
}

/// Everything the host needs to draw one light.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: LightId,
    /// Screen position of the light.
    pub center: Point,
    /// Zoom factor applied to the local geometry.
    pub scale: f64,
    pub rotation_deg: f64,
    /// Local bounding box of all parts, in pixels at zoom 1.
    pub width: f64,
    pub height: f64,
    pub parts: Vec<MarkerPart>,
    pub color: String,
    pub glow: Glow,
    pub opacity: f64,
    pub selected: bool,
    pub dragging: bool,
    /// Revealed by the animation; the host pulses active markers.
    pub active: bool,
}

/// Session-level inputs shared by every marker in a frame.
#[derive(Debug, Clone, Copy)]
pub struct MarkerContext<'a> {
    pub camera: &'a Camera,
    pub viewport: Rect,
    pub size_multiplier: f64,
    pub selected: Option<&'a LightId>,
    pub dragging: Option<&'a LightId>,
    pub active: &'a [LightId],
}

/// Local parts and bounding box for a light, before placement on screen.
struct Shape {
    width: f64,
    height: f64,
    parts: Vec<MarkerPart>,
}

/// Glow divisors `(blur, spread)` for an idle marker; halved when lit.
fn glow_divisors(shape: LightShape) -> (f64, f64) {
    match shape {
        LightShape::Round | LightShape::Square => (6.0, 12.0),
        _ => (8.0, 16.0),
    }
}

fn glow_for(light: &LightSource, active: bool) -> Glow {
    let (blur_div, spread_div) = glow_divisors(light.shape);
    let boost = if active { 2.0 } else { 1.0 };
    Glow {
        blur: light.intensity * boost / blur_div,
        spread: light.intensity * boost / spread_div,
    }
}

/// Build the marker for one light.
#[must_use]
pub fn marker_for(light: &LightSource, ctx: &MarkerContext<'_>) -> Marker {
    let shape = local_shape(light, ctx.size_multiplier);
    let active = ctx.active.contains(&light.id);
    Marker {
        id: light.id.clone(),
        center: ctx
            .camera
            .normalized_to_screen(Point::new(light.x, light.y), ctx.viewport),
        scale: ctx.camera.zoom,
        rotation_deg: light.rotation,
        width: shape.width,
        height: shape.height,
        parts: shape.parts,
        color: light.color.clone(),
        glow: glow_for(light, active),
        opacity: if active { ACTIVE_OPACITY } else { IDLE_OPACITY },
        selected: ctx.selected == Some(&light.id),
        dragging: ctx.dragging == Some(&light.id),
        active,
    }
}

/// Markers for every light, in draw order (first drawn at the bottom).
#[must_use]
pub fn markers<'a>(lights: impl IntoIterator<Item = &'a LightSource>, ctx: &MarkerContext<'_>) -> Vec<Marker> {
    lights.into_iter().map(|l| marker_for(l, ctx)).collect()
}

/// Local bounding box `(width, height)` of a light's marker at zoom 1.
#[must_use]
pub fn marker_extent(light: &LightSource, size_multiplier: f64) -> (f64, f64) {
    let shape = local_shape(light, size_multiplier);
    (shape.width, shape.height)
}

// =============================================================
// Shape dispatch
// =============================================================

fn local_shape(light: &LightSource, multiplier: f64) -> Shape {
    let w = light.width * multiplier;
    let h = light.height * multiplier;
    match light.shape {
        LightShape::Round => disc(w, h),
        LightShape::Square => tile(w, h),
        LightShape::Linear | LightShape::Track => bar(w, h, h / 2.0),
        LightShape::Rectangular => bar(w, h, 2.0),
        LightShape::Spike => spike(w, h),
        LightShape::Bollard => bollard(w, h),
        LightShape::Custom => custom(light.type_id.as_str(), w, h),
    }
}

fn single(part: MarkerPart) -> Shape {
    Shape { width: part.width, height: part.height, parts: vec![part] }
}

fn lit_part(offset: Point, width: f64, height: f64, shape: PartShape) -> MarkerPart {
    MarkerPart { offset, width, height, shape, fill: Fill::Light }
}

fn disc(w: f64, h: f64) -> Shape {
    single(lit_part(Point::new(0.0, 0.0), w, h, PartShape::Ellipse))
}

fn tile(w: f64, h: f64) -> Shape {
    single(lit_part(Point::new(0.0, 0.0), w, h, PartShape::Rect { corner_radius: 2.0 }))
}

fn bar(w: f64, h: f64, corner_radius: f64) -> Shape {
    single(lit_part(Point::new(0.0, 0.0), w, h, PartShape::Rect { corner_radius }))
}

/// Round head of diameter `w` above a thin stake of length `h`.
fn spike(w: f64, h: f64) -> Shape {
    let total = w + SPIKE_GAP_PX + h;
    let top = -total / 2.0;
    let head = lit_part(Point::new(0.0, top + w / 2.0), w, w, PartShape::Ellipse);
    let stake = MarkerPart {
        offset: Point::new(0.0, top + w + SPIKE_GAP_PX + h / 2.0),
        width: STEM_WIDTH_PX,
        height: h,
        shape: PartShape::Rect { corner_radius: 0.0 },
        fill: Fill::Body(STAKE_FILL),
    };
    Shape { width: w, height: total, parts: vec![head, stake] }
}

/// Round head of diameter `w` on a post `0.6 w` wide and `h` tall.
fn bollard(w: f64, h: f64) -> Shape {
    let total = w + h;
    let top = -total / 2.0;
    let head = lit_part(Point::new(0.0, top + w / 2.0), w, w, PartShape::Ellipse);
    let post = MarkerPart {
        offset: Point::new(0.0, top + w + h / 2.0),
        width: w * BOLLARD_POST_RATIO,
        height: h,
        shape: PartShape::Rect { corner_radius: 4.0 },
        fill: Fill::Body(POST_FILL),
    };
    Shape { width: w, height: total, parts: vec![head, post] }
}

/// Custom shapes are keyed by fixture type; unknown types fall back to a disc.
fn custom(type_id: &str, w: f64, h: f64) -> Shape {
    match type_id {
        "chandelier" => chandelier(w, h),
        "corner_linear" => corner(w, h),
        _ => disc(w, h),
    }
}

/// Stem of length `h/3` over a row of three bulbs of diameter `w/5`.
fn chandelier(w: f64, h: f64) -> Shape {
    let stem_h = h / 3.0;
    let bulb = w / 5.0;
    let pitch = bulb + 2.0 * CHANDELIER_BULB_MARGIN_PX;
    let total_h = stem_h + bulb;
    let top = -total_h / 2.0;
    let mut parts = vec![MarkerPart {
        offset: Point::new(0.0, top + stem_h / 2.0),
        width: STEM_WIDTH_PX,
        height: stem_h,
        shape: PartShape::Rect { corner_radius: 0.0 },
        fill: Fill::Body(STAKE_FILL),
    }];
    let bulb_y = top + stem_h + bulb / 2.0;
    for dx in [-pitch, 0.0, pitch] {
        parts.push(lit_part(Point::new(dx, bulb_y), bulb, bulb, PartShape::Ellipse));
    }
    Shape { width: 3.0 * pitch, height: total_h, parts }
}

/// Two bars of thickness `h/6` meeting at the top-left corner of a `w × w` box.
fn corner(w: f64, h: f64) -> Shape {
    let thickness = h / 6.0;
    let radius = h / 12.0;
    let half = w / 2.0;
    let horizontal = lit_part(
        Point::new(0.0, -half + thickness / 2.0),
        w,
        thickness,
        PartShape::Rect { corner_radius: radius },
    );
    let vertical = lit_part(
        Point::new(-half + thickness / 2.0, 0.0),
        thickness,
        w,
        PartShape::Rect { corner_radius: radius },
    );
    Shape { width: w, height: w, parts: vec![horizontal, vertical] }
}
