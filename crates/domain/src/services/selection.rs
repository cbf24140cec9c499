//! Bulk-selection state over the aggregate.

use std::collections::HashSet;

use crate::models::Template;

/// Set of selected template ids.
///
/// Selection is not pruned when filters change; call [`Selection::retain_visible`]
/// with the new filtered view to drop ids that are no longer shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects every template in the current filtered view, replacing the
    /// previous selection.
    pub fn select_all(view: &[Template]) -> Self {
        Self {
            ids: view.iter().map(|t| t.id.clone()).collect(),
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Flips membership of a single id.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Drops ids that are not part of `view`.
    pub fn retain_visible(&mut self, view: &[Template]) {
        let visible: HashSet<&str> = view.iter().map(|t| t.id.as_str()).collect();
        self.ids.retain(|id| visible.contains(id.as_str()));
    }

    /// True when `view` is non-empty and every template in it is selected.
    pub fn all_selected(&self, view: &[Template]) -> bool {
        !view.is_empty() && view.iter().all(|t| self.ids.contains(&t.id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, TemplateData};

    fn template(id: &str) -> Template {
        Template {
            id: id.to_string(),
            name: format!("Template {}", id),
            platform: Platform::Google,
            data: TemplateData::default(),
            timestamp: 0,
            description: None,
            tags: Vec::new(),
            is_favorite: false,
            is_shared: false,
            version: "1.0".to_string(),
        }
    }

    #[test]
    fn test_select_all_and_clear() {
        let view = vec![template("a"), template("b")];
        let mut selection = Selection::select_all(&view);
        assert_eq!(selection.len(), 2);
        assert!(selection.all_selected(&view));

        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.all_selected(&view));
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        selection.toggle("a");
        assert!(selection.is_selected("a"));
        selection.toggle("a");
        assert!(!selection.is_selected("a"));
    }

    #[test]
    fn test_stale_ids_survive_until_retained() {
        let all = vec![template("a"), template("b"), template("c")];
        let mut selection = Selection::select_all(&all);

        // Filter narrows the view; nothing is dropped yet
        let narrowed = vec![template("b")];
        assert_eq!(selection.len(), 3);

        selection.retain_visible(&narrowed);
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected("b"));
        assert!(!selection.is_selected("a"));
    }

    #[test]
    fn test_all_selected_empty_view() {
        let selection = Selection::new();
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn test_from_iterator() {
        let selection: Selection = ["x".to_string(), "y".to_string()].into_iter().collect();
        assert_eq!(selection.len(), 2);
    }
}
