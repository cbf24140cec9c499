//! Store construction and application bootstrap.

use std::fs;

use persistence::store::{FileStore, KeyValueStore, MemoryStore};

use crate::config::{Config, StoreBackend, StoreConfig};
use crate::error::ApiError;
use crate::logging::init_logging;
use crate::services::TemplateService;

/// Store selected at runtime from configuration.
pub type DynStore = Box<dyn KeyValueStore + Send>;

/// Builds the configured key-value store.
///
/// The file backend creates its directory up front so the first write does
/// not fail on a fresh install.
pub fn create_store(config: &StoreConfig) -> Result<DynStore, ApiError> {
    let store: DynStore = match config.backend {
        StoreBackend::Memory => match config.quota_bytes {
            Some(quota) => Box::new(MemoryStore::with_quota(quota)),
            None => Box::new(MemoryStore::new()),
        },
        StoreBackend::File => {
            fs::create_dir_all(&config.path).map_err(|e| {
                ApiError::Config(format!("Cannot create store directory {}: {}", config.path, e))
            })?;
            let store = FileStore::new(&config.path);
            match config.quota_bytes {
                Some(quota) => Box::new(store.with_quota(quota)),
                None => Box::new(store),
            }
        }
    };

    tracing::info!(backend = ?config.backend, path = %config.path, "Template store ready");
    Ok(store)
}

/// Configuration plus the template service built from it.
pub struct Workspace {
    pub config: Config,
    pub templates: TemplateService<DynStore>,
}

impl Workspace {
    /// Builds a workspace from an already loaded configuration.
    pub fn from_config(config: Config) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        let store = create_store(&config.store)?;
        Ok(Self {
            config,
            templates: TemplateService::new(store),
        })
    }

    /// Loads `.env`, configuration and logging, then opens the store.
    pub fn bootstrap() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config::load()?;
        init_logging(&config.logging);

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            backend = ?config.store.backend,
            "Starting UTM template workspace"
        );

        Ok(Self::from_config(config)?)
    }
}
