//! Template repository: per-platform namespace CRUD over a key-value store.

use serde_json::{Map, Value};
use thiserror::Error;

use domain::models::Platform;

use crate::entities::Namespace;
use crate::metrics::{record_write_failure, StoreTimer};
use crate::store::{KeyValueStore, StoreError};

/// Error type for template persistence.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to save {namespace}: {source}")]
    WriteRejected {
        namespace: String,
        #[source]
        source: StoreError,
    },
    #[error("Failed to serialize {namespace}: {source}")]
    Serialization {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Repository for template namespaces.
///
/// Every write replaces a whole namespace in a single store write; there is
/// no cache, so a write is visible to the next read.
#[derive(Debug, Clone)]
pub struct TemplateRepository<S> {
    store: S,
}

impl<S: KeyValueStore> TemplateRepository<S> {
    /// Creates a new TemplateRepository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a mutable reference to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Loads every entry of a platform namespace.
    ///
    /// Never fails: an absent namespace, a store read error or a document that
    /// is not a JSON object all read as empty. Individual entries that are not
    /// valid payloads are hidden from readers but kept in the returned
    /// namespace, so saving it back preserves them.
    pub fn load_namespace(&self, platform: Platform) -> Namespace {
        let key = platform.namespace_key();
        let timer = StoreTimer::new("load_namespace");
        let raw = self.store.get(&key);
        timer.record();

        let raw = match raw {
            Ok(Some(raw)) => raw,
            Ok(None) => return Namespace::new(),
            Err(e) => {
                tracing::warn!(namespace = %key, error = %e, "Failed to read namespace, treating as empty");
                return Namespace::new();
            }
        };

        let object: Map<String, Value> = match serde_json::from_str(&raw) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!(namespace = %key, error = %e, "Namespace is not a JSON object, treating as empty");
                return Namespace::new();
            }
        };

        let namespace = Namespace::from_document(object);
        if namespace.unreadable_len() > 0 {
            tracing::warn!(
                namespace = %key,
                unreadable = namespace.unreadable_len(),
                "Namespace has unreadable template payloads, preserving them"
            );
        }
        namespace
    }

    /// Replaces a whole platform namespace with a single write.
    ///
    /// On error nothing has been written.
    pub fn save_namespace(
        &mut self,
        platform: Platform,
        namespace: &Namespace,
    ) -> Result<(), PersistenceError> {
        let key = platform.namespace_key();
        let raw =
            serde_json::to_string(namespace).map_err(|source| PersistenceError::Serialization {
                namespace: key.clone(),
                source,
            })?;

        let timer = StoreTimer::new("save_namespace");
        let result = self.store.set(&key, &raw);
        timer.record();

        if let Err(source) = result {
            record_write_failure(&key);
            tracing::error!(namespace = %key, error = %source, "Store rejected namespace write");
            return Err(PersistenceError::WriteRejected {
                namespace: key,
                source,
            });
        }

        tracing::debug!(namespace = %key, entries = namespace.len(), "Saved namespace");
        Ok(())
    }

    /// Removes one entry from a namespace.
    ///
    /// Idempotent: a missing entry is a successful no-op and performs no
    /// write. Returns whether an entry was removed.
    pub fn delete_entry(&mut self, platform: Platform, name: &str) -> Result<bool, PersistenceError> {
        let mut namespace = self.load_namespace(platform);
        if namespace.remove(name).is_none() {
            return Ok(false);
        }
        self.save_namespace(platform, &namespace)?;
        Ok(true)
    }
}
