use serde::Deserialize;

/// Built-in defaults; every file or environment source overrides these.
const DEFAULTS: &str = r#"
    [store]
    backend = "file"
    path = "data/templates"

    [logging]
    level = "info"
    format = "pretty"
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Which key-value store backs the template namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackend,

    /// Directory holding one JSON document per namespace (file backend).
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Byte quota; writes that would exceed it are rejected.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    /// Single-line human-readable output.
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Emit an event when a span closes, with its timing.
    #[serde(default)]
    pub span_events: bool,
}

// Default value functions
fn default_store_backend() -> StoreBackend {
    StoreBackend::File
}
fn default_store_path() -> String {
    "data/templates".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. built-in defaults
    /// 2. config/default.toml (optional)
    /// 3. config/local.toml - local overrides (optional, not in git)
    /// 4. Environment variables with UTM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("UTM").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds from the built-in defaults only, without config files or the
    /// process environment.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.store.backend == StoreBackend::File && self.store.path.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "UTM__STORE__PATH must be set for the file store backend".to_string(),
            ));
        }

        if self.store.quota_bytes == Some(0) {
            return Err(ConfigValidationError::InvalidValue(
                "store.quota_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
