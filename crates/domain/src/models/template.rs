//! Template domain model.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use super::platform::Platform;

/// Version stamped on templates that do not carry one.
pub const DEFAULT_TEMPLATE_VERSION: &str = "1.0";

pub fn default_version() -> String {
    DEFAULT_TEMPLATE_VERSION.to_string()
}

/// Opaque parameter payload of a template.
///
/// Holds the JSON text exactly as it should be restored. The core never looks
/// inside; platform-aware callers decode it with [`TemplateData::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateData(String);

impl TemplateData {
    /// Wraps an already-parsed JSON value.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self(value.to_string())
    }

    /// Wraps raw JSON text, rejecting text that does not parse.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, serde_json::Error> {
        let raw = raw.into();
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        Ok(Self::from_value(&value))
    }

    /// Encodes a typed, platform-specific parameter set.
    pub fn encode<T: Serialize>(params: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(params)?;
        Ok(Self::from_value(&value))
    }

    /// Decodes into a typed, platform-specific parameter set.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::from_str(&self.0).unwrap_or(serde_json::Value::Null)
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self("{}".to_string())
    }
}

impl Serialize for TemplateData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TemplateData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// A named, saved parameter configuration scoped to one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub data: TemplateData,
    /// Milliseconds since the Unix epoch of the last save.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Template {
    /// Case-insensitive substring match on name, description and tags.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        if self.name.to_lowercase().contains(needle_lower) {
            return true;
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle_lower))
        {
            return true;
        }
        self.tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle_lower))
    }
}

/// Request to save a template into its platform namespace.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    #[validate(custom(function = "shared::validation::validate_template_name"))]
    pub name: String,

    pub platform: Platform,

    #[serde(default)]
    pub data: TemplateData,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_shared: bool,

    pub version: Option<String>,
}

impl SaveTemplateRequest {
    pub fn new(platform: Platform, name: impl Into<String>, data: TemplateData) -> Self {
        Self {
            name: name.into(),
            platform,
            data,
            description: None,
            tags: Vec::new(),
            is_shared: false,
            version: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
