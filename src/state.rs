//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! service is stateless apart from the image generator, which is optional so
//! the server still starts (and reports 503) when no API key is configured.

use std::sync::Arc;

use crate::generate::FloorplanGenerator;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone, Default)]
pub struct AppState {
    /// Optional image generator. `None` if generator env vars are not configured.
    pub generator: Option<Arc<dyn FloorplanGenerator>>,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Option<Arc<dyn FloorplanGenerator>>) -> Self {
        Self { generator }
    }
}
