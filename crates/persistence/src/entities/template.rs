//! Template entity (persisted namespace payload mapping).

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use domain::models::{Platform, Template, TemplateData, DEFAULT_TEMPLATE_VERSION};

/// Payload keys owned by the store. The parameter set never uses them.
pub const RESERVED_KEYS: [&str; 7] = [
    "id",
    "timestamp",
    "description",
    "tags",
    "isFavorite",
    "isShared",
    "version",
];

/// One template as persisted inside a namespace document.
///
/// Metadata sits next to the parameter set in the same JSON object; the
/// parameter set is everything that is not a reserved key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// Reads a timestamp written as epoch milliseconds, as a numeric string or as
/// an RFC 3339 date. Anything else reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s.trim()).ok().map(|d| d.timestamp_millis())),
        _ => None,
    })
}

/// Reserved keys present at the top level of `data`, in `RESERVED_KEYS` order.
pub fn reserved_keys_in(data: &Value) -> Vec<&'static str> {
    match data.as_object() {
        Some(map) => RESERVED_KEYS
            .into_iter()
            .filter(|key| map.contains_key(*key))
            .collect(),
        None => Vec::new(),
    }
}

impl TemplateEntity {
    /// Reads one stored payload without consuming it.
    pub fn from_payload(payload: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(payload)
    }

    /// Converts into the domain template owned by `platform` under `name`.
    ///
    /// Payloads written before ids were persisted get a deterministic id
    /// derived from `(platform, name)`. A missing timestamp reads as 0.
    pub fn into_domain(self, platform: Platform, name: &str) -> Template {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| shared::crypto::legacy_template_id(platform.as_str(), name));

        Template {
            id,
            name: name.to_string(),
            platform,
            data: TemplateData::from_value(&Value::Object(self.params)),
            timestamp: self.timestamp.unwrap_or(0),
            description: self.description,
            tags: self.tags,
            is_favorite: self.is_favorite,
            is_shared: self.is_shared,
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_TEMPLATE_VERSION.to_string()),
        }
    }

    /// Builds the payload for a domain template.
    ///
    /// Returns `None` when the template data is not a JSON object, since the
    /// parameter set shares its object with the metadata. Reserved keys inside
    /// the data are dropped.
    pub fn from_domain(template: &Template) -> Option<Self> {
        let mut params = match template.data.to_value() {
            Value::Object(map) => map,
            _ => return None,
        };
        for key in RESERVED_KEYS {
            params.remove(key);
        }

        Some(Self {
            id: Some(template.id.clone()),
            timestamp: Some(template.timestamp),
            description: template.description.clone(),
            tags: template.tags.clone(),
            is_favorite: template.is_favorite,
            is_shared: template.is_shared,
            version: Some(template.version.clone()),
            params,
        })
    }
}
