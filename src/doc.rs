//! Document model: placed lights, sparse edits, and the ordered light store.
//!
//! This module defines the light entity (`LightSource`), a sparse-update type
//! for inspector edits (`PartialLightSource`), the store that owns every light
//! in a session (`LightStore`), and the entity factory (`create_light`).
//!
//! Insertion order is meaningful: it is the draw order, the export order and
//! the order the animation reveals lights in. The store is therefore a `Vec`,
//! not a map.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::clamp_percent;
use crate::catalog::{LightCategory, LightShape, LightType};
use crate::consts::{MAX_INTENSITY, MIN_LIGHT_DIMENSION, ROOM_TYPES};

/// Unique identifier for a placed light.
///
/// Kept as a string so project files written with older id schemes
/// (`light-<epoch ms>`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(pub String);

impl LightId {
    /// A fresh id, unique even for lights created within the same millisecond.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("light-{}", Uuid::new_v4()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LightId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Output framing of the generated floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Square,
    #[default]
    Landscape,
    Portrait,
}

impl AspectRatio {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }

    /// Pixel size requested from the image generator.
    #[must_use]
    pub fn image_size(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Landscape => "1536x1024",
            Self::Portrait => "1024x1536",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            other => Err(format!("unknown aspect ratio: {other}")),
        }
    }
}

/// A placed fixture, as held in the session and written to project files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSource {
    /// Stable for the light's lifetime.
    pub id: LightId,
    /// Horizontal position in normalized percentage space, `[0, 100]`.
    pub x: f64,
    /// Vertical position in normalized percentage space, `[0, 100]`.
    pub y: f64,
    /// 0–100.
    pub intensity: f64,
    /// Hex RGB color.
    pub color: String,
    /// Room label.
    pub room: String,
    /// Catalog category this light was created from.
    pub category_id: String,
    /// Catalog type this light was created from.
    pub type_id: String,
    pub shape: LightShape,
    /// Marker width in pixels at zoom 1.
    pub width: f64,
    /// Marker height in pixels at zoom 1.
    pub height: f64,
    /// Degrees, `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    pub is_external: bool,
}

impl LightSource {
    /// Force the position back onto the image.
    ///
    /// Returns `true` when either coordinate moved.
    #[allow(clippy::float_cmp)]
    pub fn clamp_position(&mut self) -> bool {
        let (x, y) = (clamp_percent(self.x), clamp_percent(self.y));
        let changed = x != self.x || y != self.y;
        self.x = x;
        self.y = y;
        changed
    }

    /// Bring every ranged field into range: position, intensity, size and
    /// rotation. Used on lights read from outside the editor.
    ///
    /// Returns `true` when any field changed.
    #[allow(clippy::float_cmp)]
    pub fn normalize(&mut self) -> bool {
        let moved = self.clamp_position();
        let (intensity, width, height, rotation) = (
            clamp_intensity(self.intensity),
            clamp_dimension(self.width),
            clamp_dimension(self.height),
            normalize_rotation(self.rotation),
        );
        let changed = moved
            || intensity != self.intensity
            || width != self.width
            || height != self.height
            || rotation != self.rotation;
        self.intensity = intensity;
        self.width = width;
        self.height = height;
        self.rotation = rotation;
        changed
    }
}

/// Sparse update for a light. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLightSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PartialLightSource {
    /// A position-only update.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Bring every present field into its valid range.
    ///
    /// Positions are clamped to `[0, 100]`, intensity to `[0, 100]`, sizes to at
    /// least one pixel, and rotation wrapped into `[0, 360)`.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.x = self.x.map(clamp_percent);
        self.y = self.y.map(clamp_percent);
        self.intensity = self.intensity.map(clamp_intensity);
        self.width = self.width.map(clamp_dimension);
        self.height = self.height.map(clamp_dimension);
        self.rotation = self.rotation.map(normalize_rotation);
        self
    }
}

fn clamp_intensity(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, MAX_INTENSITY)
}

fn clamp_dimension(v: f64) -> f64 {
    if v.is_nan() {
        return MIN_LIGHT_DIMENSION;
    }
    v.max(MIN_LIGHT_DIMENSION)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Build a new light from a catalog type at a normalized position.
///
/// Every default is copied from `light_type`; the room is the first room type
/// and rotation is zero. The position is clamped onto the image.
#[must_use]
pub fn create_light(category: &LightCategory, light_type: &LightType, x: f64, y: f64) -> LightSource {
    LightSource {
        id: LightId::generate(),
        x: clamp_percent(x),
        y: clamp_percent(y),
        intensity: light_type.default_intensity,
        color: light_type.default_color.to_owned(),
        room: ROOM_TYPES[0].to_owned(),
        category_id: category.id.to_owned(),
        type_id: light_type.id.to_owned(),
        shape: light_type.shape,
        width: light_type.default_width,
        height: light_type.default_height,
        rotation: 0.0,
        is_external: light_type.is_external,
    }
}

/// Ordered in-memory store of the session's lights.
#[derive(Debug, Clone, Default)]
pub struct LightStore {
    lights: Vec<LightSource>,
}

impl LightStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { lights: Vec::new() }
    }

    fn position(&self, id: &LightId) -> Option<usize> {
        self.lights.iter().position(|l| &l.id == id)
    }

    /// Append a light. A light with the same id is replaced in place, keeping its slot.
    pub fn insert(&mut self, light: LightSource) {
        match self.position(&light.id) {
            Some(idx) => self.lights[idx] = light,
            None => self.lights.push(light),
        }
    }

    /// Remove a light by id, returning it if it was present.
    pub fn remove(&mut self, id: &LightId) -> Option<LightSource> {
        let idx = self.position(id)?;
        Some(self.lights.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &LightId) -> Option<&LightSource> {
        self.lights.iter().find(|l| &l.id == id)
    }

    pub fn get_mut(&mut self, id: &LightId) -> Option<&mut LightSource> {
        self.lights.iter_mut().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &LightId) -> bool {
        self.position(id).is_some()
    }

    /// Apply a partial update to an existing light. Returns false if the light doesn't exist.
    pub fn apply_partial(&mut self, id: &LightId, partial: &PartialLightSource) -> bool {
        let Some(light) = self.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            light.x = x;
        }
        if let Some(y) = partial.y {
            light.y = y;
        }
        if let Some(intensity) = partial.intensity {
            light.intensity = intensity;
        }
        if let Some(ref color) = partial.color {
            light.color.clone_from(color);
        }
        if let Some(ref room) = partial.room {
            light.room.clone_from(room);
        }
        if let Some(w) = partial.width {
            light.width = w;
        }
        if let Some(h) = partial.height {
            light.height = h;
        }
        if let Some(r) = partial.rotation {
            light.rotation = r;
        }
        true
    }

    /// Replace all lights with a full snapshot, keeping its order.
    pub fn load_snapshot(&mut self, lights: Vec<LightSource>) {
        self.lights = lights;
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// All lights in insertion order.
    #[must_use]
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<LightId> {
        self.lights.iter().map(|l| l.id.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LightSource> {
        self.lights.iter()
    }

    /// Number of lights currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if the store contains no lights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}
