//! Input model: mouse buttons, keys, the palette choice, and the interaction
//! state machine.
//!
//! `InputState` is the single source of truth for which pointer gesture is in
//! progress. Because it is one enum, placing, dragging and panning are
//! mutually exclusive by construction; the engine still checks `is_idle()`
//! before entering any of them so an event arriving mid-gesture is ignored
//! rather than silently replacing the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::catalog::{self, DEFAULT_CATEGORY_ID, DEFAULT_TYPE_ID, LightCategory, LightType};
use crate::consts::DEFAULT_SIZE_MULTIPLIER;
use crate::doc::LightId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// The fixture type the next placement will create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteChoice {
    pub category_id: &'static str,
    pub type_id: &'static str,
}

impl Default for PaletteChoice {
    fn default() -> Self {
        Self { category_id: DEFAULT_CATEGORY_ID, type_id: DEFAULT_TYPE_ID }
    }
}

impl PaletteChoice {
    /// Build a choice from catalog ids. Returns `None` if the pair doesn't resolve.
    #[must_use]
    pub fn from_ids(category_id: &str, type_id: &str) -> Option<Self> {
        let (category, light_type) = catalog::light_type(category_id, type_id)?;
        Some(Self { category_id: category.id, type_id: light_type.id })
    }

    /// Resolve back to catalog entries.
    #[must_use]
    pub fn resolve(self) -> Option<(&'static LightCategory, &'static LightType)> {
        catalog::light_type(self.category_id, self.type_id)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// The id of the currently selected light, if any.
    pub selected_id: Option<LightId>,
    /// Palette selection used when placement mode is enabled.
    pub palette: PaletteChoice,
    /// Render-time scale applied to every marker. Never written to lights.
    pub size_multiplier: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_id: None,
            palette: PaletteChoice::default(),
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
        }
    }
}

/// Internal state for the interaction state machine.
///
/// Each active variant carries the gesture context needed to process the next
/// pointer event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the zoomed image.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The next click inside the image creates a light of this type.
    Placing {
        choice: PaletteChoice,
    },
    /// The user is moving an existing light.
    Dragging {
        /// Id of the light being dragged.
        id: LightId,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_placing(&self) -> bool {
        matches!(self, Self::Placing { .. })
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Id of the light under drag, if any.
    #[must_use]
    pub fn dragging_id(&self) -> Option<&LightId> {
        match self {
            Self::Dragging { id } => Some(id),
            _ => None,
        }
    }

    /// Cursor the host should show for this state.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::Idle => "default",
            Self::Panning { .. } | Self::Dragging { .. } => "grabbing",
            Self::Placing { .. } => "crosshair",
        }
    }
}
