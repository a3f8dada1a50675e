//! Floor-plan image generation boundary.
//!
//! DESIGN
//! ======
//! The editor never talks to the image API itself. An uploaded photo or
//! sketch is validated here, handed to a [`FloorplanGenerator`] and the
//! returned image wrapped as a `data:` URI alongside the echoed original.
//! `OpenAiImageClient` is the production generator; tests substitute a mock.

pub mod config;
pub mod openai;
pub mod types;

use tracing::info;

pub use openai::OpenAiImageClient;
pub use types::{FloorplanGenerator, GenerateError, GeneratedFloorplan, ImageUpload, UploadError};

use crate::doc::AspectRatio;

/// Run one generation and package the result for the editor.
///
/// # Errors
///
/// Whatever the generator returns.
pub async fn generate_floorplan(
    generator: &dyn FloorplanGenerator,
    upload: &ImageUpload,
    aspect_ratio: AspectRatio,
) -> Result<GeneratedFloorplan, GenerateError> {
    info!(
        file = %upload.file_name,
        mime = %upload.mime_type,
        bytes = upload.bytes.len(),
        size = aspect_ratio.image_size(),
        "generating floor plan"
    );
    let b64 = generator.edit(upload, aspect_ratio).await?;
    Ok(GeneratedFloorplan {
        original_image: upload.data_uri(),
        generated_image: format!("data:image/png;base64,{b64}"),
        aspect_ratio,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
