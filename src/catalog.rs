//! Static registry of fixture categories and the light types they offer.
//!
//! The catalog is immutable data. Light entities keep only `categoryId` /
//! `typeId` foreign keys and resolve them here on demand, so nothing derived
//! from the catalog is cached on a light beyond its creation-time defaults.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

/// Closed set of marker shapes. Each variant has exactly one rendering strategy
/// in [`crate::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightShape {
    /// Circular disc.
    Round,
    /// Square with slightly rounded corners.
    Square,
    /// Sharp-cornered bar (wall/floor washers).
    Rectangular,
    /// Pill-shaped profile.
    Linear,
    /// Track-mounted bar.
    Track,
    /// Ground spike: lamp head on a thin stake.
    Spike,
    /// Bollard: lamp head on a short post.
    Bollard,
    /// Type-specific composite (chandelier, corner profile).
    Custom,
}

/// A fixture type as offered in the palette. Defaults are copied onto each new light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightType {
    pub id: &'static str,
    pub name: &'static str,
    pub shape: LightShape,
    /// Marker width in pixels at zoom 1.
    pub default_width: f64,
    /// Marker height in pixels at zoom 1.
    pub default_height: f64,
    /// 0–100.
    pub default_intensity: f64,
    /// Hex RGB, e.g. `"#FFF0D9"`.
    pub default_color: &'static str,
    /// Outdoor fixture.
    pub is_external: bool,
}

/// A palette tab. Type order drives display order only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub types: &'static [LightType],
}

impl LightCategory {
    /// Look up one of this category's types by id.
    #[must_use]
    pub fn light_type(&self, type_id: &str) -> Option<&'static LightType> {
        self.types.iter().find(|t| t.id == type_id)
    }
}

const fn fixture(
    id: &'static str,
    name: &'static str,
    shape: LightShape,
    size: (f64, f64),
    intensity: f64,
    color: &'static str,
    is_external: bool,
) -> LightType {
    LightType {
        id,
        name,
        shape,
        default_width: size.0,
        default_height: size.1,
        default_intensity: intensity,
        default_color: color,
        is_external,
    }
}

static CATEGORIES: [LightCategory; 6] = [
    LightCategory {
        id: "downlights",
        name: "Downlights",
        types: &[
            fixture("round_downlight", "Round Downlight", LightShape::Round, (15.0, 15.0), 60.0, "#FFF0D9", false),
            fixture("square_downlight", "Square Downlight", LightShape::Square, (15.0, 15.0), 60.0, "#F1F6FF", false),
            fixture("small_downlight", "Small Downlight", LightShape::Round, (8.0, 8.0), 40.0, "#FFF0D9", false),
        ],
    },
    LightCategory {
        id: "spotlights",
        name: "Spotlights",
        types: &[
            fixture("round_spotlight", "Round Spotlight", LightShape::Round, (12.0, 12.0), 75.0, "#FFFFFF", false),
            fixture("track_spotlight", "Track Spotlight", LightShape::Track, (10.0, 10.0), 70.0, "#FFFFFF", false),
            fixture("adjustable_spot", "Adjustable Spot", LightShape::Round, (10.0, 10.0), 80.0, "#FFFFFF", false),
        ],
    },
    LightCategory {
        id: "linear",
        name: "Linear Profiles",
        types: &[
            fixture("thin_linear", "Thin Linear", LightShape::Linear, (40.0, 5.0), 50.0, "#FFFFFF", false),
            fixture("medium_linear", "Medium Linear", LightShape::Linear, (40.0, 8.0), 60.0, "#FFFFFF", false),
            fixture("thick_linear", "Thick Linear", LightShape::Linear, (40.0, 12.0), 70.0, "#FFFFFF", false),
            fixture("corner_linear", "Corner Linear", LightShape::Custom, (40.0, 40.0), 60.0, "#FFFFFF", false),
        ],
    },
    LightCategory {
        id: "tracks",
        name: "Magnetic Tracks",
        types: &[
            fixture("track_diffused", "Track Diffused", LightShape::Track, (50.0, 8.0), 65.0, "#FFFFFF", false),
            fixture("track_module", "Track Module", LightShape::Track, (45.0, 10.0), 70.0, "#FFFFFF", false),
            fixture("track_laser", "Laser Blade", LightShape::Track, (30.0, 15.0), 90.0, "#73D2FF", false),
        ],
    },
    LightCategory {
        id: "external",
        name: "External",
        types: &[
            fixture("spike_light", "Spike Light", LightShape::Spike, (10.0, 20.0), 80.0, "#FFD166", true),
            fixture("bollard", "Bollard Light", LightShape::Bollard, (12.0, 25.0), 75.0, "#F1F6FF", true),
            fixture("wall_washer", "Wall Washer", LightShape::Rectangular, (25.0, 10.0), 85.0, "#FFFFFF", true),
            fixture("inground", "Inground Light", LightShape::Round, (15.0, 15.0), 90.0, "#73D2FF", true),
            fixture("linear_grazer", "Linear Grazer", LightShape::Linear, (50.0, 8.0), 85.0, "#FFFFFF", true),
            fixture("floor_washer", "Floor Washer", LightShape::Rectangular, (20.0, 8.0), 75.0, "#FFF0D9", true),
        ],
    },
    LightCategory {
        id: "decorative",
        name: "Decorative",
        types: &[
            fixture("neon_flex", "Neon Flex", LightShape::Linear, (60.0, 5.0), 40.0, "#FF61D8", false),
            fixture("pendant", "Pendant Light", LightShape::Round, (14.0, 14.0), 65.0, "#FFF0D9", false),
            fixture("chandelier", "Chandelier", LightShape::Custom, (30.0, 30.0), 70.0, "#FFF0D9", false),
        ],
    },
];

/// Category selected when the editor opens.
pub const DEFAULT_CATEGORY_ID: &str = "downlights";

/// Light type selected when the editor opens.
pub const DEFAULT_TYPE_ID: &str = "round_downlight";

/// All categories in palette order.
#[must_use]
pub fn categories() -> &'static [LightCategory] {
    &CATEGORIES
}

/// Look up a category by id.
#[must_use]
pub fn category(id: &str) -> Option<&'static LightCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Resolve a `(categoryId, typeId)` pair.
#[must_use]
pub fn light_type(category_id: &str, type_id: &str) -> Option<(&'static LightCategory, &'static LightType)> {
    let category = category(category_id)?;
    let light_type = category.light_type(type_id)?;
    Some((category, light_type))
}

/// Find a type by id across all categories.
#[must_use]
pub fn find_type(type_id: &str) -> Option<(&'static LightCategory, &'static LightType)> {
    CATEGORIES
        .iter()
        .find_map(|c| c.light_type(type_id).map(|t| (c, t)))
}
