//! Persisted entity definitions.
//!
//! Entities are direct mappings to the JSON documents held by the store.

pub mod namespace;
pub mod template;

pub use namespace::Namespace;
pub use template::{reserved_keys_in, TemplateEntity, RESERVED_KEYS};
