//! Export/import of template collections as a versioned JSON envelope.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::template::default_version;
use crate::models::{ExportEnvelope, Platform, Template, TemplateData};

/// Error type for malformed import payloads.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Import payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Import payload must be an object with a \"templates\" array")]
    MissingTemplates,
    #[error("Template at index {index} is invalid: {reason}")]
    InvalidTemplate { index: usize, reason: String },
    #[error("Failed to serialize export: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Shape accepted for each imported template. `id` and `timestamp` are
/// ignored when present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedTemplate {
    name: String,
    platform: Platform,
    #[serde(default)]
    data: TemplateData,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default)]
    is_shared: bool,
    #[serde(default = "default_version")]
    version: String,
}

/// Serializes templates into an export envelope stamped with the current time.
pub fn export_templates(templates: &[Template]) -> Result<String, FormatError> {
    export_templates_at(templates, Utc::now())
}

/// Serializes templates into an export envelope with an explicit timestamp.
pub fn export_templates_at(
    templates: &[Template],
    exported_at: DateTime<Utc>,
) -> Result<String, FormatError> {
    let envelope = ExportEnvelope::new(templates.to_vec(), exported_at);
    serde_json::to_string_pretty(&envelope).map_err(FormatError::Serialization)
}

/// Parses an export envelope into brand-new templates.
///
/// Every template gets a fresh id and timestamp so imports never collide with
/// local templates. Any invalid entry rejects the whole payload.
pub fn import_templates(raw: &str) -> Result<Vec<Template>, FormatError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(FormatError::InvalidJson)?;

    let entries = value
        .as_object()
        .and_then(|obj| obj.get("templates"))
        .and_then(|templates| templates.as_array())
        .ok_or(FormatError::MissingTemplates)?;

    let mut imported = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let parsed = ImportedTemplate::deserialize(entry).map_err(|e| {
            FormatError::InvalidTemplate {
                index,
                reason: e.to_string(),
            }
        })?;

        if let Err(e) = shared::validation::validate_template_name(&parsed.name) {
            return Err(FormatError::InvalidTemplate {
                index,
                reason: e
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            });
        }

        imported.push(Template {
            id: shared::crypto::generate_template_id(),
            name: parsed.name,
            platform: parsed.platform,
            data: parsed.data,
            timestamp: shared::clock::now_millis(),
            description: parsed.description,
            tags: parsed.tags,
            is_favorite: parsed.is_favorite,
            is_shared: parsed.is_shared,
            version: parsed.version,
        });
    }

    tracing::debug!(count = imported.len(), "Parsed import payload");
    Ok(imported)
}
