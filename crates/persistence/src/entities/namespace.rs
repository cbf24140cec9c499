//! Namespace document: every template stored for one platform.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::template::TemplateEntity;

/// Contents of one platform namespace, keyed by template name.
///
/// Entries that do not read as a [`TemplateEntity`] are kept verbatim and
/// written back unchanged, so editing one template never drops a sibling the
/// reader could not interpret.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    entries: BTreeMap<String, TemplateEntity>,
    unreadable: Map<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw namespace document into readable and opaque entries.
    pub fn from_document(document: Map<String, Value>) -> Self {
        let mut namespace = Self::new();
        for (name, payload) in document {
            match TemplateEntity::from_payload(&payload) {
                Ok(entity) => {
                    namespace.entries.insert(name, entity);
                }
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Keeping unreadable template payload as-is");
                    namespace.unreadable.insert(name, payload);
                }
            }
        }
        namespace
    }

    /// Rebuilds the raw document. A readable entry replaces an opaque one of
    /// the same name.
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut document = self.unreadable.clone();
        for (name, entity) in &self.entries {
            document.insert(name.clone(), serde_json::to_value(entity)?);
        }
        Ok(document)
    }

    pub fn get(&self, name: &str) -> Option<&TemplateEntity> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TemplateEntity> {
        self.entries.get_mut(name)
    }

    /// Stores `entity` under `name`, replacing any entry with that name.
    pub fn insert(&mut self, name: String, entity: TemplateEntity) -> Option<TemplateEntity> {
        self.unreadable.remove(&name);
        self.entries.insert(name, entity)
    }

    /// Removes a readable entry. Opaque entries are never removed.
    pub fn remove(&mut self, name: &str) -> Option<TemplateEntity> {
        self.entries.remove(name)
    }

    /// True when any entry, readable or not, uses `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name) || self.unreadable.contains_key(name)
    }

    /// Number of readable entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unreadable_len(&self) -> usize {
        self.unreadable.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TemplateEntity> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, TemplateEntity> {
        self.entries.iter_mut()
    }
}

impl IntoIterator for Namespace {
    type Item = (String, TemplateEntity);
    type IntoIter = btree_map::IntoIter<String, TemplateEntity>;

    /// Yields the readable entries only.
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_from_document_keeps_unreadable_entries() {
        let raw = json!({
            "Good": {"id": "g", "utm_source": "google"},
            "Scalar": 42,
            "BadTags": {"tags": "not-a-list"}
        });
        let namespace = Namespace::from_document(document(raw.clone()));

        assert_eq!(namespace.len(), 1);
        assert_eq!(namespace.unreadable_len(), 2);
        assert!(namespace.contains_key("Scalar"));
        assert!(namespace.get("Scalar").is_none());

        let rebuilt = Value::Object(namespace.to_document().unwrap());
        assert_eq!(rebuilt["Scalar"], raw["Scalar"]);
        assert_eq!(rebuilt["BadTags"], raw["BadTags"]);
        assert_eq!(rebuilt["Good"]["id"], "g");
    }

    #[test]
    fn test_insert_replaces_unreadable_entry() {
        let mut namespace = Namespace::from_document(document(json!({"Old": [1, 2]})));
        let entity = TemplateEntity::from_payload(&json!({"id": "n"})).unwrap();

        namespace.insert("Old".to_string(), entity);

        assert_eq!(namespace.unreadable_len(), 0);
        let rebuilt = namespace.to_document().unwrap();
        assert_eq!(rebuilt["Old"]["id"], "n");
    }

    #[test]
    fn test_remove_leaves_unreadable_entries() {
        let mut namespace = Namespace::from_document(document(json!({"Opaque": "text"})));
        assert!(namespace.remove("Opaque").is_none());
        assert!(namespace.contains_key("Opaque"));
    }
}
