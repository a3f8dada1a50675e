//! The design session: owns every piece of editing state and turns host
//! events into state changes plus a list of [`Action`]s for the host.
//!
//! DESIGN
//! ======
//! One `DesignSession` per open editor. The host forwards pointer, key and
//! toolbar events; each handler mutates the session synchronously and returns
//! what changed so the host can re-render. Nothing here touches a clock or the
//! network: animation time comes in through [`DesignSession::tick`] and the
//! floor-plan generation result through [`DesignSession::complete_generation`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::camera::{Camera, Point, Rect, in_bounds};
use crate::consts::{MAX_SIZE_MULTIPLIER, MIN_SIZE_MULTIPLIER};
use crate::doc::{LightId, LightSource, LightStore, PartialLightSource, create_light};
use crate::error::ErrorCode;
use crate::generate::GeneratedFloorplan;
use crate::hit::hit_test;
use crate::input::{Button, InputState, Key, PaletteChoice, UiState};
use crate::project::{self, ImageSet, Project, ProjectError};
use crate::render::{Marker, MarkerContext, markers};
use crate::sequencer::{Sequencer, SequencerEvent};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LightCreated(LightSource),
    LightUpdated { id: LightId, fields: PartialLightSource },
    LightDeleted { id: LightId },
    SelectionChanged(Option<LightId>),
    /// Placement mode switched on (`true`) or off.
    PlacementChanged(bool),
    ViewChanged(Camera),
    SetCursor(String),
    RenderNeeded,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a floor plan is already being generated")]
    GenerationInFlight,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GenerationInFlight => "E_GENERATION_IN_FLIGHT",
        }
    }

    fn retryable(&self) -> bool {
        true
    }
}

/// All editing state for one floor plan.
#[derive(Debug, Default)]
pub struct DesignSession {
    pub doc: LightStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Screen rect of the floor-plan container, as last reported by the host.
    pub viewport: Rect,
    pub images: ImageSet,
    pub sequencer: Sequencer,
    generating: bool,
    last_error: Option<String>,
}

impl DesignSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Viewport / view
    // =========================================================================

    /// Record the container's bounding rect. Called on mount and on resize.
    pub fn set_viewport(&mut self, rect: Rect) {
        self.viewport = rect;
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.camera.set_zoom(zoom);
        self.view_changed()
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_in();
        self.view_changed()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_out();
        self.view_changed()
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        self.view_changed()
    }

    fn view_changed(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.is_panning() && !self.camera.can_pan() {
            self.input = InputState::Idle;
            actions.push(Action::SetCursor(self.input.cursor().to_owned()));
        }
        actions.push(Action::ViewChanged(self.camera));
        actions.push(Action::RenderNeeded);
        actions
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Primary press: start dragging the marker under the pointer, or start
    /// panning when zoomed in. Ignored while any gesture is active.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }

        let hit = hit_test(screen_pt, &self.doc, &self.camera, self.viewport, self.ui.size_multiplier);
        if let Some(id) = hit {
            debug!(%id, "drag start");
            self.input = InputState::Dragging { id: id.clone() };
            let mut actions = self.set_selection(Some(id));
            actions.push(Action::SetCursor(self.input.cursor().to_owned()));
            actions.push(Action::RenderNeeded);
            return actions;
        }

        if self.camera.can_pan() {
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![Action::SetCursor(self.input.cursor().to_owned())];
        }

        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Dragging { id } => {
                let Some(n) = self.camera.screen_to_normalized(screen_pt, self.viewport) else {
                    return Vec::new();
                };
                // Unclamped while moving; clamped on release.
                let fields = PartialLightSource::position(n.x, n.y);
                let id = id.clone();
                if !self.doc.apply_partial(&id, &fields) {
                    return Vec::new();
                }
                vec![Action::LightUpdated { id, fields }, Action::RenderNeeded]
            }
            InputState::Panning { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                if !self.camera.can_pan() {
                    return self.end_gesture();
                }
                self.camera.pan_by(dx, dy);
                vec![Action::ViewChanged(self.camera), Action::RenderNeeded]
            }
            InputState::Idle | InputState::Placing { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_gesture()
    }

    /// Pointer left the container: same as releasing.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Dragging { id } => {
                if let Some(light) = self.doc.get_mut(&id) {
                    if light.clamp_position() {
                        let fields = PartialLightSource::position(light.x, light.y);
                        actions.push(Action::LightUpdated { id: id.clone(), fields });
                    }
                    debug!(%id, x = light.x, y = light.y, "drag end");
                }
            }
            InputState::Panning { .. } => {}
            other @ (InputState::Idle | InputState::Placing { .. }) => {
                self.input = other;
                return actions;
            }
        }
        actions.push(Action::SetCursor(self.input.cursor().to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// A click (press and release without a drag in between).
    ///
    /// In placement mode a click on the image creates a light of the palette
    /// type and leaves placement mode; a click off the image does nothing.
    /// Otherwise a click on a marker selects it.
    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        match &self.input {
            InputState::Placing { choice } => {
                let choice = *choice;
                self.place_at(screen_pt, choice)
            }
            InputState::Idle => {
                let hit = hit_test(screen_pt, &self.doc, &self.camera, self.viewport, self.ui.size_multiplier);
                match hit {
                    Some(id) => self.set_selection(Some(id)),
                    None => Vec::new(),
                }
            }
            InputState::Panning { .. } | InputState::Dragging { .. } => Vec::new(),
        }
    }

    fn place_at(&mut self, screen_pt: Point, choice: PaletteChoice) -> Vec<Action> {
        let Some(n) = self.camera.screen_to_normalized(screen_pt, self.viewport) else {
            return Vec::new();
        };
        if !in_bounds(n) {
            return Vec::new();
        }
        let Some((category, light_type)) = choice.resolve() else {
            warn!(category = choice.category_id, type_id = choice.type_id, "palette choice no longer resolves");
            return Vec::new();
        };

        let light = create_light(category, light_type, n.x, n.y);
        info!(id = %light.id, type_id = light_type.id, x = light.x, y = light.y, "light placed");
        let id = light.id.clone();
        self.doc.insert(light.clone());
        self.input = InputState::Idle;

        let mut actions = vec![Action::LightCreated(light)];
        actions.extend(self.set_selection(Some(id)));
        actions.push(Action::PlacementChanged(false));
        actions.push(Action::SetCursor(self.input.cursor().to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// `Delete`/`Backspace` remove the selected light; `Escape` leaves
    /// placement mode, or clears the selection when not placing.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_delete() {
            return self.delete_selected();
        }
        if key.is_escape() {
            if self.input.is_placing() {
                return self.cancel_placement();
            }
            return self.select(None);
        }
        Vec::new()
    }

    // =========================================================================
    // Palette / placement
    // =========================================================================

    /// Choose the fixture type for the next placement. Unknown ids are ignored.
    pub fn set_palette(&mut self, category_id: &str, type_id: &str) -> Vec<Action> {
        let Some(choice) = PaletteChoice::from_ids(category_id, type_id) else {
            warn!(category_id, type_id, "unknown palette choice");
            return Vec::new();
        };
        self.ui.palette = choice;
        if let InputState::Placing { choice: current } = &mut self.input {
            *current = choice;
        }
        Vec::new()
    }

    /// Enter placement mode. Ignored while another gesture is active.
    pub fn begin_placement(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        self.input = InputState::Placing { choice: self.ui.palette };
        vec![Action::PlacementChanged(true), Action::SetCursor(self.input.cursor().to_owned())]
    }

    pub fn cancel_placement(&mut self) -> Vec<Action> {
        if !self.input.is_placing() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::PlacementChanged(false), Action::SetCursor(self.input.cursor().to_owned())]
    }

    /// The palette's "add light" toggle.
    pub fn toggle_placement(&mut self) -> Vec<Action> {
        if self.input.is_placing() { self.cancel_placement() } else { self.begin_placement() }
    }

    // =========================================================================
    // Selection / edits
    // =========================================================================

    /// Select a light, or clear the selection with `None`. Unknown ids are ignored.
    pub fn select(&mut self, id: Option<LightId>) -> Vec<Action> {
        if let Some(ref id) = id {
            if !self.doc.contains(id) {
                return Vec::new();
            }
        }
        self.set_selection(id)
    }

    fn set_selection(&mut self, id: Option<LightId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Apply an inspector edit. Fields are brought into range first.
    pub fn update_light(&mut self, id: &LightId, fields: PartialLightSource) -> Vec<Action> {
        let fields = fields.sanitized();
        if !self.doc.apply_partial(id, &fields) {
            return Vec::new();
        }
        debug!(%id, ?fields, "light updated");
        vec![Action::LightUpdated { id: id.clone(), fields }, Action::RenderNeeded]
    }

    pub fn delete_light(&mut self, id: &LightId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        info!(%id, "light deleted");
        self.sequencer.forget(id);
        if self.input.dragging_id() == Some(id) {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::LightDeleted { id: id.clone() }];
        if self.ui.selected_id.as_ref() == Some(id) {
            actions.extend(self.set_selection(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selected_id.clone() {
            Some(id) => self.delete_light(&id),
            None => Vec::new(),
        }
    }

    /// Remove every light, keeping the images.
    pub fn clear_lights(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.doc.ids().into_iter().map(|id| Action::LightDeleted { id }).collect();
        self.drop_lights();
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn drop_lights(&mut self) {
        self.doc.clear();
        self.ui.selected_id = None;
        self.sequencer.reset();
        if self.input.dragging_id().is_some() {
            self.input = InputState::Idle;
        }
    }

    /// Global marker scale, clamped to its allowed range. Render-only.
    pub fn set_size_multiplier(&mut self, multiplier: f64) -> Vec<Action> {
        if multiplier.is_nan() {
            return Vec::new();
        }
        self.ui.size_multiplier = multiplier.clamp(MIN_SIZE_MULTIPLIER, MAX_SIZE_MULTIPLIER);
        vec![Action::RenderNeeded]
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Start the "lights on" preview. Returns `false` if already running or
    /// there are no lights.
    pub fn play_animation(&mut self, now_ms: u64) -> bool {
        let started = self.sequencer.play(self.doc.ids(), now_ms).is_some();
        if started {
            info!(lights = self.doc.len(), "animation started");
        }
        started
    }

    pub fn reset_animation(&mut self) {
        self.sequencer.reset();
    }

    /// Advance animation time. A non-empty result means the host should re-render.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SequencerEvent> {
        let events = self.sequencer.advance(now_ms);
        if events.contains(&SequencerEvent::Finished) {
            debug!("animation finished");
        }
        events
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Use an image as the floor plan directly, skipping generation.
    pub fn set_direct_image(&mut self, data_uri: String) -> Vec<Action> {
        info!("direct floor plan image set");
        self.images.generated = Some(data_uri);
        self.images.original = None;
        self.last_error = None;
        self.start_fresh()
    }

    /// Mark a generation request as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GenerationInFlight`] if one is already running.
    pub fn begin_generation(&mut self) -> Result<(), SessionError> {
        if self.generating {
            return Err(SessionError::GenerationInFlight);
        }
        info!("floor plan generation started");
        self.generating = true;
        self.last_error = None;
        Ok(())
    }

    /// Finish the in-flight generation. On failure the session keeps its
    /// previous design and only records the message.
    pub fn complete_generation(&mut self, result: Result<GeneratedFloorplan, String>) -> Vec<Action> {
        self.generating = false;
        match result {
            Ok(plan) => {
                info!(aspect_ratio = %plan.aspect_ratio, "floor plan generated");
                self.images = ImageSet {
                    generated: Some(plan.generated_image),
                    original: Some(plan.original_image),
                    aspect_ratio: plan.aspect_ratio,
                };
                self.last_error = None;
                self.start_fresh()
            }
            Err(message) => {
                warn!(error = %message, "floor plan generation failed");
                self.last_error = Some(message);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Clear lights, selection, animation and view for a new floor plan.
    fn start_fresh(&mut self) -> Vec<Action> {
        self.drop_lights();
        self.input = InputState::Idle;
        self.camera.reset();
        vec![
            Action::SelectionChanged(None),
            Action::PlacementChanged(false),
            Action::ViewChanged(self.camera),
            Action::SetCursor(self.input.cursor().to_owned()),
            Action::RenderNeeded,
        ]
    }

    /// Back to an empty editor. The viewport is kept.
    pub fn reset(&mut self) -> Vec<Action> {
        info!("session reset");
        let viewport = self.viewport;
        *self = Self { viewport, ..Self::default() };
        self.start_fresh()
    }

    // =========================================================================
    // Project files
    // =========================================================================

    /// Snapshot the design for saving.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NothingToExport`] before a floor plan exists.
    pub fn export_project(&self, timestamp: i64) -> Result<Project, ProjectError> {
        let project = project::export(&self.images, &self.doc, timestamp)?;
        info!(lights = project.light_sources.len(), "project exported");
        Ok(project)
    }

    /// Replace the session with a project read from JSON text.
    ///
    /// # Errors
    ///
    /// Any validation failure; the session is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, ProjectError> {
        let project = project::parse(text)?;
        Ok(self.load_project(project))
    }

    /// Like [`Self::import_json`], but rejects files without the project extension.
    ///
    /// # Errors
    ///
    /// Wrong extension or any validation failure; the session is left untouched.
    pub fn import_file(&mut self, name: &str, text: &str) -> Result<Vec<Action>, ProjectError> {
        let project = project::parse_file(name, text)?;
        Ok(self.load_project(project))
    }

    fn load_project(&mut self, project: Project) -> Vec<Action> {
        info!(lights = project.light_sources.len(), aspect_ratio = %project.aspect_ratio, "project imported");
        let actions = self.start_fresh();
        self.images = project.images();
        self.last_error = None;
        self.doc.load_snapshot(project.light_sources);
        actions
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn selection(&self) -> Option<&LightId> {
        self.ui.selected_id.as_ref()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn light(&self, id: &LightId) -> Option<&LightSource> {
        self.doc.get(id)
    }

    /// All lights in insertion order.
    #[must_use]
    pub fn lights(&self) -> &[LightSource] {
        self.doc.lights()
    }

    #[must_use]
    pub fn is_placing(&self) -> bool {
        self.input.is_placing()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_animating()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Message from the last failed generation, cleared by the next attempt.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.input.cursor()
    }

    /// Markers for every light, in draw order.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        let ctx = MarkerContext {
            camera: &self.camera,
            viewport: self.viewport,
            size_multiplier: self.ui.size_multiplier,
            selected: self.ui.selected_id.as_ref(),
            dragging: self.input.dragging_id(),
            active: self.sequencer.active(),
        };
        markers(self.doc.iter(), &ctx)
    }
}
