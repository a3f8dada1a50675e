//! Lighting layout editor for floor-plan images.
//!
//! This crate owns the editing engine behind the floor-plan lighting designer:
//! translating raw pointer events into light placements and drags, reconciling
//! zoom/pan with pointer coordinates, sequencing the "lights on" preview, and
//! saving/restoring whole designs as `.belecure` project files. The host view is
//! responsible only for wiring DOM events to the [`engine::DesignSession`] and
//! drawing the [`render::Marker`]s it hands back.
//!
//! A small Axum service ([`routes`]) fronts the floor-plan generation call that
//! turns an uploaded photo into a styled plan.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The design session: owns all editing state and dispatches input |
//! | [`doc`] | Light entities, the ordered light store, and the entity factory |
//! | [`catalog`] | Static registry of fixture categories and types |
//! | [`camera`] | Zoom/pan state and screen ⇄ normalized coordinate conversion |
//! | [`input`] | Input event types and the interaction state machine states |
//! | [`hit`] | Hit-testing pointer positions against light markers |
//! | [`render`] | Per-shape marker geometry for the host renderer |
//! | [`sequencer`] | Cancellable "lights on" animation timeline |
//! | [`project`] | Project file export/import |
//! | [`generate`] | Floor-plan image generation boundary and OpenAI client |
//! | [`routes`] | HTTP endpoints |
//! | [`consts`] | Shared constants (zoom limits, intervals, presets) |

pub mod camera;
pub mod catalog;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod generate;
pub mod hit;
pub mod input;
pub mod project;
pub mod render;
pub mod routes;
pub mod sequencer;
pub mod state;
