//! OpenAI images-edit client.
//!
//! Sends the uploaded floor plan to `/images/edits` as multipart form data and
//! returns the restyled image as base64.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use uuid::Uuid;

use super::config::GeneratorConfig;
use super::types::{FloorplanGenerator, GenerateError, ImageUpload};
use crate::doc::AspectRatio;

/// Instructions sent with every edit request.
pub const FLOORPLAN_PROMPT: &str = "\
Restyle this floor plan as a clean architectural blueprint. Keep the layout exactly as drawn: \
do not add, remove, move or resize any wall, door, window, room or other structural element.

Work out what each room is used for (bedroom, bathroom, kitchen, living room, dining area, \
office and so on), label it clearly, and add a few very small, minimal furniture pieces that \
suit that use.

Style: dark monochrome blue background, crisp white lines for walls and structure, subtle \
shadows for depth.

Above all, the whole plan must fit inside the image. Scale it down to about 70% of the canvas, \
center it, and leave a margin of at least 15% on every side so nothing is cut off.";

pub struct OpenAiImageClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiImageClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GenerateError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, model: config.model, base_url: config.base_url })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, GenerateError> {
        Self::new(GeneratorConfig::from_env()?)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_form(&self, upload: &ImageUpload, aspect_ratio: AspectRatio) -> Result<Form, GenerateError> {
        let image = Part::bytes(upload.bytes.clone())
            .file_name(format!("{}-{}", Uuid::new_v4(), upload.file_name))
            .mime_str(&upload.mime_type)
            .map_err(|e| GenerateError::ApiRequest(e.to_string()))?;
        Ok(Form::new()
            .text("model", self.model.clone())
            .text("prompt", FLOORPLAN_PROMPT)
            .text("size", aspect_ratio.image_size())
            .part("image", image))
    }
}

#[async_trait::async_trait]
impl FloorplanGenerator for OpenAiImageClient {
    async fn edit(&self, upload: &ImageUpload, aspect_ratio: AspectRatio) -> Result<String, GenerateError> {
        let form = self.build_form(upload, aspect_ratio)?;
        let url = format!("{}/images/edits", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenerateError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenerateError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(GenerateError::ApiResponse { status, body: text });
        }
        parse_edit_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct EditResponse {
    #[serde(default)]
    data: Vec<EditImage>,
}

#[derive(Deserialize)]
struct EditImage {
    b64_json: Option<String>,
}

/// Extract the first image's base64 payload from an edit response body.
pub(crate) fn parse_edit_response(text: &str) -> Result<String, GenerateError> {
    let parsed: EditResponse = serde_json::from_str(text).map_err(|e| GenerateError::ApiParse(e.to_string()))?;
    parsed
        .data
        .into_iter()
        .next()
        .and_then(|img| img.b64_json)
        .filter(|b64| !b64.is_empty())
        .ok_or(GenerateError::EmptyResult)
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
