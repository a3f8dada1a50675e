//! Floor-plan generation endpoint.
//!
//! `POST /api/floorplan` takes multipart fields `file` (the photo or sketch)
//! and optional `aspectRatio`, and answers with both images as data URIs.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{info, warn};

use crate::doc::AspectRatio;
use crate::error::ErrorCode;
use crate::generate::types::parse_aspect_ratio;
use crate::generate::{FloorplanGenerator, GenerateError, GeneratedFloorplan, ImageUpload, UploadError, generate_floorplan};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FloorplanError {
    #[error("floor plan generation is not configured")]
    NotConfigured,
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl ErrorCode for FloorplanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_GENERATOR_NOT_CONFIGURED",
            Self::Upload(e) => e.error_code(),
            Self::Generate(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::NotConfigured | Self::Upload(_) => false,
            Self::Generate(e) => e.retryable(),
        }
    }
}

impl FloorplanError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Generate(
                GenerateError::ApiRequest(_) | GenerateError::ApiResponse { .. } | GenerateError::ApiParse(_),
            ) => StatusCode::BAD_GATEWAY,
            Self::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub retryable: bool,
}

impl IntoResponse for FloorplanError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.to_string(), code: self.error_code(), retryable: self.retryable() };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorplanResponse {
    pub success: bool,
    #[serde(flatten)]
    pub floorplan: GeneratedFloorplan,
}

/// The raw multipart fields, before validation.
#[derive(Debug, Default)]
pub(crate) struct FloorplanForm {
    pub file: Option<(String, String, Vec<u8>)>,
    pub aspect_ratio: Option<String>,
}

// =============================================================================
// HANDLER
// =============================================================================

pub async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FloorplanResponse>, FloorplanError> {
    let result = handle(&state, multipart).await;
    if let Err(ref e) = result {
        warn!(error = %e, code = e.error_code(), "floor plan request failed");
    }
    result
}

async fn handle(state: &AppState, multipart: Multipart) -> Result<Json<FloorplanResponse>, FloorplanError> {
    let form = read_form(multipart).await?;
    let (upload, aspect_ratio) = validate_form(form)?;
    let Some(generator) = state.generator.as_deref() else {
        return Err(FloorplanError::NotConfigured);
    };
    let floorplan = run(generator, &upload, aspect_ratio).await?;
    Ok(Json(FloorplanResponse { success: true, floorplan }))
}

pub(crate) async fn run(
    generator: &dyn FloorplanGenerator,
    upload: &ImageUpload,
    aspect_ratio: AspectRatio,
) -> Result<GeneratedFloorplan, FloorplanError> {
    let floorplan = generate_floorplan(generator, upload, aspect_ratio).await?;
    info!(aspect_ratio = %aspect_ratio, "floor plan generated");
    Ok(floorplan)
}

pub(crate) async fn read_form(mut multipart: Multipart) -> Result<FloorplanForm, UploadError> {
    let mut form = FloorplanForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("floorplan").to_owned();
                let mime = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| UploadError::Malformed(e.to_string()))?;
                form.file = Some((name, mime, bytes.to_vec()));
            }
            Some("aspectRatio") => {
                let text = field.text().await.map_err(|e| UploadError::Malformed(e.to_string()))?;
                form.aspect_ratio = Some(text);
            }
            _ => {}
        }
    }
    Ok(form)
}

pub(crate) fn validate_form(form: FloorplanForm) -> Result<(ImageUpload, AspectRatio), UploadError> {
    let Some((name, mime, bytes)) = form.file else {
        return Err(UploadError::MissingFile);
    };
    let upload = ImageUpload::new(name, mime, bytes)?;
    let aspect_ratio = parse_aspect_ratio(form.aspect_ratio.as_deref())?;
    Ok((upload, aspect_ratio))
}

#[cfg(test)]
#[path = "floorplan_test.rs"]
mod tests;
