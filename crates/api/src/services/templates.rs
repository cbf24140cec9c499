//! Template aggregation service.
//!
//! Unifies every platform namespace into one flat collection and is the single
//! point of mutation for presentation code. The caller owns the current
//! snapshot; each mutation writes the owning namespace first and only then
//! returns the updated snapshot. On error the caller's snapshot stays valid.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use validator::Validate;

use domain::models::{Platform, SaveTemplateRequest, Template};
use domain::services::{codec, FormatError, Selection};
use persistence::entities::{reserved_keys_in, Namespace, TemplateEntity};
use persistence::repositories::TemplateRepository;
use persistence::store::KeyValueStore;

use crate::error::ApiError;

/// Result of a best-effort bulk delete.
#[derive(Debug, Clone)]
pub struct BulkDeleteOutcome {
    /// Snapshot with every successfully deleted template removed.
    pub templates: Vec<Template>,
    /// Number of templates actually deleted.
    pub deleted: usize,
    /// Ids that were not present; not counted as successes.
    pub missing: Vec<String>,
    pub failed: Vec<BulkDeleteFailure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteFailure {
    pub id: String,
    pub error: String,
}

/// Result of saving a single template.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub template: Template,
    pub templates: Vec<Template>,
}

/// Result of importing an export file into the store.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub templates: Vec<Template>,
    /// Number of templates persisted.
    pub imported: usize,
    /// `(original name, stored name)` for imports renamed to avoid a clash.
    pub renamed: Vec<(String, String)>,
    /// Namespaces whose write was rejected; their templates were not imported.
    pub failed_platforms: Vec<Platform>,
}

/// Template aggregation and mutation service.
#[derive(Debug, Clone)]
pub struct TemplateService<S> {
    repo: TemplateRepository<S>,
}

impl<S: KeyValueStore> TemplateService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: TemplateRepository::new(store),
        }
    }

    pub fn repository(&self) -> &TemplateRepository<S> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut TemplateRepository<S> {
        &mut self.repo
    }

    /// Reads every platform namespace into one flat collection.
    ///
    /// Order follows the platform list, then template name, but callers
    /// should sort explicitly. Ids that collide are kept only once.
    pub fn load_all(&self) -> Vec<Template> {
        let mut seen = HashSet::new();
        let mut templates = Vec::new();

        for platform in Platform::ALL {
            for (name, entity) in self.repo.load_namespace(platform) {
                let template = entity.into_domain(platform, &name);
                if !seen.insert(template.id.clone()) {
                    tracing::warn!(
                        id = %template.id,
                        platform = %platform,
                        name = %name,
                        "Duplicate template id, skipping"
                    );
                    continue;
                }
                templates.push(template);
            }
        }

        tracing::debug!(count = templates.len(), "Loaded template aggregate");
        templates
    }

    /// Creates a template, or re-saves the one already stored under the same
    /// name in its platform namespace.
    ///
    /// A re-save keeps the stored id and favorite flag and refreshes the
    /// timestamp and payload.
    pub fn save_template(
        &mut self,
        snapshot: &[Template],
        request: SaveTemplateRequest,
    ) -> Result<SaveOutcome, ApiError> {
        request.validate()?;

        let platform = request.platform;
        let name = request.name.trim().to_string();
        let mut namespace = self.repo.load_namespace(platform);

        let (id, is_favorite) = match namespace.get(&name) {
            Some(existing) => {
                let existing = existing.clone().into_domain(platform, &name);
                (existing.id, existing.is_favorite)
            }
            None => (shared::crypto::generate_template_id(), false),
        };

        let template = Template {
            id,
            name: name.clone(),
            platform,
            data: request.data,
            timestamp: shared::clock::now_millis(),
            description: request.description.filter(|d| !d.trim().is_empty()),
            tags: request.tags.iter().map(|t| t.trim().to_string()).collect(),
            is_favorite,
            is_shared: request.is_shared,
            version: request
                .version
                .unwrap_or_else(domain::models::template::default_version),
        };

        let entity = TemplateEntity::from_domain(&template).ok_or_else(|| {
            ApiError::Validation("Template data must be a JSON object".to_string())
        })?;
        namespace.insert(name, entity);
        self.write_namespace(platform, namespace)?;

        tracing::info!(id = %template.id, platform = %platform, "Saved template");

        let mut templates: Vec<Template> = snapshot
            .iter()
            .filter(|t| t.id != template.id)
            .cloned()
            .collect();
        templates.push(template.clone());

        Ok(SaveOutcome {
            template,
            templates,
        })
    }

    /// Flips the favorite flag of a template.
    ///
    /// A no-op when the id is not in the snapshot or its namespace entry no
    /// longer exists.
    pub fn toggle_favorite(
        &mut self,
        snapshot: &[Template],
        id: &str,
    ) -> Result<Vec<Template>, ApiError> {
        let Some(template) = snapshot.iter().find(|t| t.id == id) else {
            return Ok(snapshot.to_vec());
        };

        let platform = template.platform;
        let mut namespace = self.repo.load_namespace(platform);
        let Some(entity) = find_entry(&mut namespace, platform, template) else {
            tracing::debug!(id = %id, "Template missing from namespace, nothing to toggle");
            return Ok(snapshot.to_vec());
        };

        let is_favorite = !entity.is_favorite;
        entity.is_favorite = is_favorite;
        self.write_namespace(platform, namespace)?;

        Ok(snapshot
            .iter()
            .map(|t| {
                let mut t = t.clone();
                if t.id == id {
                    t.is_favorite = is_favorite;
                }
                t
            })
            .collect())
    }

    /// Deletes a template. Deleting an id that is not present is a no-op.
    pub fn delete(&mut self, snapshot: &[Template], id: &str) -> Result<Vec<Template>, ApiError> {
        if self.delete_one(snapshot, id)? {
            Ok(without(snapshot, id))
        } else {
            Ok(snapshot.to_vec())
        }
    }

    /// Deletes every id independently.
    ///
    /// A failure on one id does not stop the others; nothing is rolled back.
    /// `deleted` counts only templates that existed and were removed.
    pub fn bulk_delete(&mut self, snapshot: &[Template], ids: &HashSet<String>) -> BulkDeleteOutcome {
        let mut ordered: Vec<&String> = ids.iter().collect();
        ordered.sort();

        let mut templates = snapshot.to_vec();
        let mut deleted = 0;
        let mut missing = Vec::new();
        let mut failed = Vec::new();

        for id in ordered {
            match self.delete_one(&templates, id) {
                Ok(true) => {
                    templates.retain(|t| &t.id != id);
                    deleted += 1;
                }
                Ok(false) => missing.push(id.clone()),
                Err(e) => failed.push(BulkDeleteFailure {
                    id: id.clone(),
                    error: e.to_string(),
                }),
            }
        }

        tracing::info!(
            requested = ids.len(),
            deleted,
            missing = missing.len(),
            failed = failed.len(),
            "Bulk delete finished"
        );

        BulkDeleteOutcome {
            templates,
            deleted,
            missing,
            failed,
        }
    }

    /// Serializes the given templates into an export envelope.
    pub fn export(&self, templates: &[Template]) -> Result<String, ApiError> {
        Ok(codec::export_templates(templates)?)
    }

    /// Exports only the selected templates of a snapshot.
    pub fn export_selected(
        &self,
        snapshot: &[Template],
        selection: &Selection,
    ) -> Result<String, ApiError> {
        let selected: Vec<Template> = snapshot
            .iter()
            .filter(|t| selection.is_selected(&t.id))
            .cloned()
            .collect();
        self.export(&selected)
    }

    /// Parses an export file and persists every template as a new entry.
    ///
    /// Malformed payloads are rejected before anything is written, including
    /// data that is not an object or that uses a key the store reserves for
    /// metadata. Names that already exist in the target namespace get a
    /// numeric suffix instead of overwriting. Each platform namespace is
    /// written once; a rejected write drops that platform's templates and is
    /// reported in the outcome.
    pub fn import(&mut self, snapshot: &[Template], raw: &str) -> Result<ImportOutcome, ApiError> {
        let parsed = codec::import_templates(raw)?;

        let mut by_platform: BTreeMap<Platform, Vec<(Template, TemplateEntity)>> = BTreeMap::new();
        for (index, template) in parsed.into_iter().enumerate() {
            let reserved = reserved_keys_in(&template.data.to_value());
            if !reserved.is_empty() {
                return Err(FormatError::InvalidTemplate {
                    index,
                    reason: format!("data uses reserved keys: {}", reserved.join(", ")),
                }
                .into());
            }
            let entity = TemplateEntity::from_domain(&template).ok_or_else(|| {
                FormatError::InvalidTemplate {
                    index,
                    reason: "data must be a JSON object".to_string(),
                }
            })?;
            by_platform
                .entry(template.platform)
                .or_default()
                .push((template, entity));
        }

        let mut templates = snapshot.to_vec();
        let mut imported = 0;
        let mut renamed = Vec::new();
        let mut failed_platforms = Vec::new();

        for (platform, entries) in by_platform {
            let mut namespace = self.repo.load_namespace(platform);
            let mut added = Vec::with_capacity(entries.len());
            let mut platform_renames = Vec::new();

            for (mut template, entity) in entries {
                let stored_name = unique_name(&namespace, &template.name);
                if stored_name != template.name {
                    platform_renames.push((template.name.clone(), stored_name.clone()));
                    template.name = stored_name.clone();
                }
                namespace.insert(stored_name, entity);
                added.push(template);
            }

            match self.write_namespace(platform, namespace) {
                Ok(()) => {
                    imported += added.len();
                    templates.extend(added);
                    renamed.extend(platform_renames);
                }
                Err(e) => {
                    tracing::error!(platform = %platform, error = %e, "Import write rejected");
                    failed_platforms.push(platform);
                }
            }
        }

        tracing::info!(
            imported,
            renamed = renamed.len(),
            failed_platforms = failed_platforms.len(),
            "Import finished"
        );

        Ok(ImportOutcome {
            templates,
            imported,
            renamed,
            failed_platforms,
        })
    }

    /// Removes a template from its namespace. Returns false when there was
    /// nothing to remove.
    fn delete_one(&mut self, snapshot: &[Template], id: &str) -> Result<bool, ApiError> {
        let Some(template) = snapshot.iter().find(|t| t.id == id) else {
            return Ok(false);
        };

        let platform = template.platform;
        let mut namespace = self.repo.load_namespace(platform);
        if find_entry(&mut namespace, platform, template).is_none() {
            return Ok(false);
        }

        namespace.remove(&template.name);
        self.write_namespace(platform, namespace)?;
        tracing::info!(id = %id, platform = %platform, "Deleted template");
        Ok(true)
    }

    /// Writes a namespace, persisting derived ids of legacy entries first.
    fn write_namespace(&mut self, platform: Platform, mut namespace: Namespace) -> Result<(), ApiError> {
        for (name, entity) in namespace.iter_mut() {
            if entity.id.as_deref().map_or(true, str::is_empty) {
                entity.id = Some(shared::crypto::legacy_template_id(platform.as_str(), name));
            }
        }
        self.repo.save_namespace(platform, &namespace)?;
        Ok(())
    }
}

/// Finds the namespace entry backing `template`, checking that it is still
/// the same template and not a newer one saved under the same name.
fn find_entry<'a>(
    namespace: &'a mut Namespace,
    platform: Platform,
    template: &Template,
) -> Option<&'a mut TemplateEntity> {
    let entity = namespace.get_mut(&template.name)?;
    let stored_id = entity
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| shared::crypto::legacy_template_id(platform.as_str(), &template.name));
    (stored_id == template.id).then_some(entity)
}

fn without(snapshot: &[Template], id: &str) -> Vec<Template> {
    snapshot.iter().filter(|t| t.id != id).cloned().collect()
}

/// First free name: `name`, then `name (2)`, `name (3)`, ...
fn unique_name(namespace: &Namespace, name: &str) -> String {
    if !namespace.contains_key(name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", name, n))
        .find(|candidate| !namespace.contains_key(candidate))
        .unwrap_or_else(|| name.to_string())
}
