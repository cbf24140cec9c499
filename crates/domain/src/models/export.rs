//! Portable export envelope for template collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::template::Template;

/// Format version written into every export.
pub const EXPORT_FORMAT_VERSION: &str = "2.0";

/// Versioned wrapper written to export files.
///
/// `version` is informational; imports accept any value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub templates: Vec<Template>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub total_count: usize,
}

impl ExportEnvelope {
    pub fn new(templates: Vec<Template>, exported_at: DateTime<Utc>) -> Self {
        let total_count = templates.len();
        Self {
            templates,
            exported_at,
            version: EXPORT_FORMAT_VERSION.to_string(),
            total_count,
        }
    }
}
