//! Identifier and fingerprint utilities for templates.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix for ids derived from legacy payloads that carry no persisted id.
pub const LEGACY_ID_PREFIX: &str = "legacy-";

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a fresh, never-reused template id.
pub fn generate_template_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derives a stable id for a payload persisted without one.
///
/// Names are unique within a platform namespace, so `(platform, name)` is
/// enough to keep the id stable across reloads.
pub fn legacy_template_id(platform: &str, name: &str) -> String {
    let digest = sha256_hex(&format!("{}\0{}", platform, name));
    format!("{}{}", LEGACY_ID_PREFIX, &digest[..16])
}

/// Returns true if the id was derived by [`legacy_template_id`].
pub fn is_legacy_id(id: &str) -> bool {
    id.starts_with(LEGACY_ID_PREFIX)
}
