//! Advertising platform namespaces.

use serde::{Deserialize, Serialize};

/// Suffix appended to a platform key to form its storage namespace key.
pub const NAMESPACE_SUFFIX: &str = "_templates";

/// Supported advertising platforms. Each one owns a template namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Meta,
    LinkedIn,
    TikTok,
    Twitter,
    Microsoft,
    Pinterest,
    Snapchat,
}

impl Platform {
    /// Every platform namespace, in the order they are aggregated.
    pub const ALL: [Platform; 8] = [
        Platform::Google,
        Platform::Meta,
        Platform::LinkedIn,
        Platform::TikTok,
        Platform::Twitter,
        Platform::Microsoft,
        Platform::Pinterest,
        Platform::Snapchat,
    ];

    /// Converts to storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Meta => "meta",
            Platform::LinkedIn => "linkedin",
            Platform::TikTok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::Microsoft => "microsoft",
            Platform::Pinterest => "pinterest",
            Platform::Snapchat => "snapchat",
        }
    }

    /// Parses from storage string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Key of the persisted namespace holding this platform's templates.
    pub fn namespace_key(&self) -> String {
        format!("{}{}", self.as_str(), NAMESPACE_SUFFIX)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform predicate used when filtering the aggregate. `All` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    /// Parses the UI representation: `"all"` or a platform key.
    pub fn from_str(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(PlatformFilter::All);
        }
        Platform::from_str(s).map(PlatformFilter::Only)
    }

    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(p) => *p == platform,
        }
    }
}
