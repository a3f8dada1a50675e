//! Zoom/pan state and the conversions between screen pixels and the image's
//! normalized percentage space.
//!
//! The host scales the floor-plan layer about its center by `zoom` and then
//! translates it by `pan` inside that scaled frame. Because the scale is
//! anchored at the center, a pointer position must be corrected by
//! `0.5 * (1 - 1/zoom)` after the linear rescale; the term vanishes at zoom 1.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, NORMALIZED_MAX, ZOOM_STEP};

/// A point in either screen or normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the floor-plan container, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect with no area cannot map pointer positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// View state for the floor-plan layer. Never persisted.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor in `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: MIN_ZOOM }
    }
}

impl Camera {
    fn center_correction(&self) -> f64 {
        0.5 * (1.0 - 1.0 / self.zoom)
    }

    /// Convert a screen-space pointer position to normalized `[0, 100]` space.
    ///
    /// The result is not clamped: positions outside the rendered image map
    /// outside `[0, 100]`. Returns `None` when `rect` has no area.
    #[must_use]
    pub fn screen_to_normalized(&self, screen: Point, rect: Rect) -> Option<Point> {
        if rect.is_empty() {
            return None;
        }
        let correction = self.center_correction();
        Some(Point {
            x: (((screen.x - rect.left) - self.pan_x) / (rect.width * self.zoom) + correction) * NORMALIZED_MAX,
            y: (((screen.y - rect.top) - self.pan_y) / (rect.height * self.zoom) + correction) * NORMALIZED_MAX,
        })
    }

    /// Convert a normalized position back to the screen pixel where it is drawn.
    #[must_use]
    pub fn normalized_to_screen(&self, normalized: Point, rect: Rect) -> Point {
        let correction = self.center_correction();
        Point {
            x: rect.left + self.pan_x + rect.width * self.zoom * (normalized.x / NORMALIZED_MAX - correction),
            y: rect.top + self.pan_y + rect.height * self.zoom * (normalized.y / NORMALIZED_MAX - correction),
        }
    }

    /// Set the zoom factor, clamped to the allowed range.
    ///
    /// Landing on the minimum zoom recenters the view.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.zoom <= MIN_ZOOM {
            self.pan_x = 0.0;
            self.pan_y = 0.0;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Back to zoom 1 with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Panning only makes sense once the image is magnified.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// Shift the view by a raw screen-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }
}

/// Whether a normalized point lies on the image.
#[must_use]
pub fn in_bounds(p: Point) -> bool {
    (0.0..=NORMALIZED_MAX).contains(&p.x) && (0.0..=NORMALIZED_MAX).contains(&p.y)
}

/// Clamp a single normalized coordinate into `[0, 100]`.
#[must_use]
pub fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, NORMALIZED_MAX)
}
