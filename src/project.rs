//! Project files: the versioned JSON document a design is saved to and restored from.
//!
//! DESIGN
//! ======
//! Import validates the raw JSON before deserializing anything, so a rejected
//! file never yields a partially-built [`Project`]. The session only swaps its
//! state in once [`parse`] has returned `Ok`, which makes import atomic.
//!
//! Positions outside `[0, 100]` in an imported file are clamped rather than
//! rejected; older exports could contain them because drags were never
//! clamped.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;
use tracing::warn;

use crate::consts::{PROJECT_EXTENSION, PROJECT_VERSION};
use crate::doc::{AspectRatio, LightSource, LightStore};
use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("project file is missing required field: {0}")]
    MissingField(&'static str),
    #[error("project field {field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("project file contains duplicate light id: {0}")]
    DuplicateLightId(String),
    #[error("not a .belecure project file: {0}")]
    WrongExtension(String),
    #[error("nothing to export: no floor plan has been generated")]
    NothingToExport,
}

impl ErrorCode for ProjectError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_PROJECT_PARSE",
            Self::MissingField(_) => "E_PROJECT_MISSING_FIELD",
            Self::InvalidField { .. } => "E_PROJECT_INVALID_FIELD",
            Self::DuplicateLightId(_) => "E_PROJECT_DUPLICATE_ID",
            Self::WrongExtension(_) => "E_PROJECT_EXTENSION",
            Self::NothingToExport => "E_NOTHING_TO_EXPORT",
        }
    }
}

/// Floor-plan images attached to a session.
///
/// Both images are opaque references (data URIs in practice).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    pub generated: Option<String>,
    pub original: Option<String>,
    pub aspect_ratio: AspectRatio,
}

/// The saved form of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub version: String,
    /// Export time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    pub generated_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_image: Option<String>,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// In insertion order.
    pub light_sources: Vec<LightSource>,
}

impl Project {
    /// Images carried by this project, in session form.
    #[must_use]
    pub fn images(&self) -> ImageSet {
        ImageSet {
            generated: Some(self.generated_image.clone()),
            original: self.original_image.clone(),
            aspect_ratio: self.aspect_ratio,
        }
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// Snapshot a session's images and lights into a project document.
///
/// # Errors
///
/// Returns [`ProjectError::NothingToExport`] when no floor plan has been generated.
pub fn export(images: &ImageSet, lights: &LightStore, timestamp: i64) -> Result<Project, ProjectError> {
    let Some(generated) = images.generated.clone() else {
        return Err(ProjectError::NothingToExport);
    };
    Ok(Project {
        version: PROJECT_VERSION.to_owned(),
        timestamp,
        generated_image: generated,
        original_image: images.original.clone(),
        aspect_ratio: images.aspect_ratio,
        light_sources: lights.lights().to_vec(),
    })
}

/// Pretty-printed JSON text for a project.
///
/// # Errors
///
/// Returns [`ProjectError::Parse`] if serialization fails.
pub fn to_json(project: &Project) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Suggested download name, e.g. `belecure-project-2025-03-14.belecure`.
#[must_use]
pub fn file_name_for(date: Date) -> String {
    format!(
        "belecure-project-{:04}-{:02}-{:02}.{PROJECT_EXTENSION}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// IMPORT
// =============================================================================

/// Parse and validate project text.
///
/// # Errors
///
/// Fails when the text is not JSON, when `version`, `generatedImage` or
/// `lightSources` is missing, when `aspectRatio` is not a known value, or when
/// two lights share an id.
pub fn parse(text: &str) -> Result<Project, ProjectError> {
    let mut value: Value = serde_json::from_str(text)?;
    let Some(obj) = value.as_object_mut() else {
        return Err(ProjectError::InvalidField { field: "project", reason: "expected a JSON object".into() });
    };

    require_text(obj.get("version"), "version")?;
    require_text(obj.get("generatedImage"), "generatedImage")?;
    match obj.get("lightSources") {
        None | Some(Value::Null) => return Err(ProjectError::MissingField("lightSources")),
        Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(ProjectError::InvalidField { field: "lightSources", reason: "expected an array".into() });
        }
    }
    match obj.get("aspectRatio") {
        Some(Value::Null) => {
            obj.remove("aspectRatio");
        }
        Some(Value::String(s)) => {
            s.parse::<AspectRatio>()
                .map_err(|reason| ProjectError::InvalidField { field: "aspectRatio", reason })?;
        }
        Some(_) => {
            return Err(ProjectError::InvalidField { field: "aspectRatio", reason: "expected a string".into() });
        }
        None => {}
    }
    if matches!(obj.get("originalImage"), Some(Value::Null)) {
        obj.remove("originalImage");
    }

    let mut project: Project = serde_json::from_value(value)?;

    let mut seen = HashSet::new();
    for light in &project.light_sources {
        if !seen.insert(light.id.as_str()) {
            return Err(ProjectError::DuplicateLightId(light.id.to_string()));
        }
    }

    for light in &mut project.light_sources {
        let (x, y, intensity, rotation) = (light.x, light.y, light.intensity, light.rotation);
        if light.normalize() {
            warn!(id = %light.id, x, y, intensity, rotation, "imported light out of range; normalized");
        }
    }

    Ok(project)
}

/// Parse a project file, checking its extension first.
///
/// # Errors
///
/// Returns [`ProjectError::WrongExtension`] for any name not ending in
/// `.belecure`, otherwise whatever [`parse`] returns.
pub fn parse_file(name: &str, text: &str) -> Result<Project, ProjectError> {
    let has_extension = std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION));
    if !has_extension {
        return Err(ProjectError::WrongExtension(name.to_owned()));
    }
    parse(text)
}

fn require_text(value: Option<&Value>, field: &'static str) -> Result<(), ProjectError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        Some(Value::String(_)) | None | Some(Value::Null) => Err(ProjectError::MissingField(field)),
        Some(_) => Err(ProjectError::InvalidField { field, reason: "expected a string".into() }),
    }
}
