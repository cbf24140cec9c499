//! Structural view of a built tracking URL.

use serde::Serialize;

/// URLs longer than this many characters get a length warning. Inclusive: a URL
/// of exactly this length is still OK.
pub const MAX_RECOMMENDED_URL_LENGTH: usize = 2000;

/// Query key prefix that marks a UTM parameter. Case-sensitive.
pub const UTM_PREFIX: &str = "utm_";

/// Well-known ad click identifiers appended by ad platforms.
pub const CLICK_ID_KEYS: [&str; 10] = [
    "gclid", "gbraid", "wbraid", "fbclid", "msclkid", "ttclid", "li_fat_id", "twclid", "epik",
    "ScCid",
];

/// A single decoded query pair, in URL order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_utm(&self) -> bool {
        self.key.starts_with(UTM_PREFIX)
    }
}

/// Length status of a URL against [`MAX_RECOMMENDED_URL_LENGTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthStatus {
    Ok,
    Warning,
}

impl LengthStatus {
    pub fn for_length(length: usize) -> Self {
        if length <= MAX_RECOMMENDED_URL_LENGTH {
            LengthStatus::Ok
        } else {
            LengthStatus::Warning
        }
    }
}

impl std::fmt::Display for LengthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthStatus::Ok => write!(f, "ok"),
            LengthStatus::Warning => write!(f, "warning"),
        }
    }
}

/// Derived analysis of a URL. Recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUrl {
    pub protocol: String,
    pub hostname: String,
    pub pathname: String,
    pub params: Vec<QueryParam>,
    /// Character count of the whole URL string.
    pub total_length: usize,
    pub utm_params: Vec<QueryParam>,
    pub other_params: Vec<QueryParam>,
}

impl ParsedUrl {
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    pub fn status(&self) -> LengthStatus {
        LengthStatus::for_length(self.total_length)
    }

    /// Non-UTM params whose keys are known ad click identifiers.
    pub fn click_ids(&self) -> Vec<&QueryParam> {
        self.other_params
            .iter()
            .filter(|p| CLICK_ID_KEYS.contains(&p.key.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_is_utm() {
        assert!(QueryParam::new("utm_source", "a").is_utm());
        assert!(QueryParam::new("utm_", "a").is_utm());
        assert!(!QueryParam::new("UTM_source", "a").is_utm());
        assert!(!QueryParam::new("xutm_source", "a").is_utm());
        assert!(!QueryParam::new("gclid", "a").is_utm());
    }

    #[test]
    fn test_length_status_boundary() {
        assert_eq!(LengthStatus::for_length(0), LengthStatus::Ok);
        assert_eq!(LengthStatus::for_length(2000), LengthStatus::Ok);
        assert_eq!(LengthStatus::for_length(2001), LengthStatus::Warning);
    }

    #[test]
    fn test_length_status_display() {
        assert_eq!(LengthStatus::Ok.to_string(), "ok");
        assert_eq!(LengthStatus::Warning.to_string(), "warning");
    }
}
