//! Common test utilities for integration tests.
//!
//! Helpers build services over fresh stores and seed namespaces with the raw
//! payloads older installs left behind.

// Not every helper is used by every test file.
#![allow(dead_code)]

use std::path::Path;

use domain::models::{Platform, SaveTemplateRequest, Template, TemplateData};
use persistence::store::{FileStore, KeyValueStore, MemoryStore, StoreError};
use serde_json::{json, Value};
use utm_templates_api::TemplateService;

/// Service over an empty in-memory store.
pub fn memory_service() -> TemplateService<MemoryStore> {
    TemplateService::new(MemoryStore::new())
}

/// Service over an in-memory store capped at `quota` bytes.
pub fn quota_service(quota: usize) -> TemplateService<MemoryStore> {
    TemplateService::new(MemoryStore::with_quota(quota))
}

/// Service over a file store rooted at `dir`.
pub fn file_service(dir: &Path) -> TemplateService<FileStore> {
    TemplateService::new(FileStore::new(dir))
}

/// Save request with a typical UTM parameter set for `platform`.
pub fn save_request(platform: Platform, name: &str) -> SaveTemplateRequest {
    SaveTemplateRequest::new(platform, name, utm_data(platform, name))
}

pub fn utm_data(platform: Platform, campaign: &str) -> TemplateData {
    TemplateData::from_value(&json!({
        "utm_source": platform.as_str(),
        "utm_medium": "cpc",
        "utm_campaign": campaign,
    }))
}

/// Saves each `(platform, name)` in order and returns the final snapshot.
pub fn seed<S: KeyValueStore>(
    service: &mut TemplateService<S>,
    entries: &[(Platform, &str)],
) -> Vec<Template> {
    let mut snapshot = service.load_all();
    for (platform, name) in entries {
        snapshot = service
            .save_template(&snapshot, save_request(*platform, name))
            .expect("Failed to seed template")
            .templates;
    }
    snapshot
}

/// Writes a raw namespace document, bypassing the service.
pub fn write_raw_namespace<S: KeyValueStore>(store: &mut S, platform: Platform, document: Value) {
    store
        .set(&platform.namespace_key(), &document.to_string())
        .expect("Failed to write raw namespace");
}

pub fn find<'a>(templates: &'a [Template], name: &str) -> &'a Template {
    templates
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("template {name} not in snapshot"))
}

pub fn names(templates: &[Template]) -> Vec<String> {
    let mut names: Vec<String> = templates.iter().map(|t| t.name.clone()).collect();
    names.sort();
    names
}

/// In-memory store that rejects every write to the listed namespaces.
#[derive(Debug, Default)]
pub struct RejectingStore {
    inner: MemoryStore,
    rejected: Vec<String>,
}

impl RejectingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, platform: Platform) {
        self.rejected.push(platform.namespace_key());
    }

    pub fn allow_all(&mut self) {
        self.rejected.clear();
    }
}

impl KeyValueStore for RejectingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.rejected.iter().any(|k| k == key) {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                size: value.len(),
                quota: 0,
            });
        }
        self.inner.set(key, value)
    }
}
