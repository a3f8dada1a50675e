//! Shared constants for the editing engine.

// ── View ────────────────────────────────────────────────────────

/// Smallest zoom factor; at this zoom the pan offset is always zero.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom increment used by the zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 0.5;

/// Upper bound of the normalized percentage space (lower bound is 0).
pub const NORMALIZED_MAX: f64 = 100.0;

// ── Markers ─────────────────────────────────────────────────────

/// Global marker size multiplier bounds and default.
pub const MIN_SIZE_MULTIPLIER: f64 = 0.2;
pub const MAX_SIZE_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_SIZE_MULTIPLIER: f64 = 1.0;

/// Minimum half-extent of a marker hit box, in screen pixels.
pub const HIT_SLOP_PX: f64 = 4.0;

/// Smallest width/height a light may be edited down to, in pixels.
pub const MIN_LIGHT_DIMENSION: f64 = 1.0;

/// Upper bound for fixture intensity.
pub const MAX_INTENSITY: f64 = 100.0;

// ── Animation ───────────────────────────────────────────────────

/// Delay between successive light reveals.
pub const REVEAL_INTERVAL_MS: u64 = 500;

/// How long the fully-lit state is held before playback ends.
pub const FINAL_HOLD_MS: u64 = 1000;

// ── Project files ───────────────────────────────────────────────

/// Version string written into exported projects.
pub const PROJECT_VERSION: &str = "1.0";

/// File extension for saved projects (without the dot).
pub const PROJECT_EXTENSION: &str = "belecure";

// ── Domain presets ──────────────────────────────────────────────

/// Room labels offered in the inspector, in display order. New lights get the first.
pub const ROOM_TYPES: [&str; 7] = [
    "Living Room",
    "Kitchen",
    "Bedroom",
    "Bathroom",
    "Hallway",
    "Office",
    "Dining Room",
];

/// Named color swatches offered in the inspector.
pub const LIGHT_COLORS: [(&str, &str); 5] = [
    ("Warm White", "#FFF0D9"),
    ("Cool White", "#F1F6FF"),
    ("Natural", "#FFFFFF"),
    ("Amber", "#FFD166"),
    ("Blue", "#73D2FF"),
];
