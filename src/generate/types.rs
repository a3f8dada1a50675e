//! Generation types: uploads, results, the generator trait, and errors.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::doc::AspectRatio;
use crate::error::ErrorCode;

/// MIME types accepted for floor-plan uploads.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

// =============================================================================
// ERRORS
// =============================================================================

/// Problems with the uploaded image itself. Never retryable.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("invalid file type {0}; please upload a JPG, PNG, or WebP image")]
    UnsupportedType(String),
    #[error("unknown aspect ratio: {0}")]
    InvalidAspectRatio(String),
    #[error("malformed upload: {0}")]
    Malformed(String),
}

impl ErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile => "E_UPLOAD_MISSING_FILE",
            Self::EmptyFile => "E_UPLOAD_EMPTY",
            Self::UnsupportedType(_) => "E_UPLOAD_UNSUPPORTED_TYPE",
            Self::InvalidAspectRatio(_) => "E_UPLOAD_ASPECT_RATIO",
            Self::Malformed(_) => "E_UPLOAD_MALFORMED",
        }
    }
}

/// Errors from configuring or calling the image generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the image API failed.
    #[error("image API request failed: {0}")]
    ApiRequest(String),

    /// The image API returned a non-success HTTP status.
    #[error("image API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The image API response body could not be deserialized.
    #[error("image API response parse failed: {0}")]
    ApiParse(String),

    /// The image API answered but returned no image.
    #[error("no image data received from the image API")]
    EmptyResult,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::EmptyResult => "E_EMPTY_RESULT",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// UPLOAD / RESULT
// =============================================================================

/// A validated floor-plan photo or sketch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate an upload's type and contents.
    ///
    /// # Errors
    ///
    /// [`UploadError::UnsupportedType`] for anything but JPEG, PNG or WebP, and
    /// [`UploadError::EmptyFile`] for a zero-byte file.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let mime_type = mime_type.into();
        if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(UploadError::UnsupportedType(mime_type));
        }
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }
        Ok(Self { file_name: file_name.into(), mime_type, bytes })
    }

    /// The upload as a `data:` URI, echoed back to the editor as the original image.
    #[must_use]
    pub fn data_uri(&self) -> String {
        data_uri(&self.mime_type, &self.bytes)
    }
}

/// Encode bytes as a base64 `data:` URI.
#[must_use]
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Parse an aspect ratio form value; absent or blank means landscape.
///
/// # Errors
///
/// [`UploadError::InvalidAspectRatio`] for any other unknown value.
pub fn parse_aspect_ratio(raw: Option<&str>) -> Result<AspectRatio, UploadError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(AspectRatio::default()),
        Some(value) => value
            .parse()
            .map_err(|_| UploadError::InvalidAspectRatio(value.to_owned())),
    }
}

/// Original and generated images for one request, both as `data:` URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFloorplan {
    pub original_image: String,
    pub generated_image: String,
    pub aspect_ratio: AspectRatio,
}

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// Provider-neutral async trait for floor-plan image generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait FloorplanGenerator: Send + Sync {
    /// Restyle an uploaded floor plan.
    ///
    /// Returns the generated PNG as raw base64 (no `data:` prefix).
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the request fails or the response has no image.
    async fn edit(&self, upload: &ImageUpload, aspect_ratio: AspectRatio) -> Result<String, GenerateError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
