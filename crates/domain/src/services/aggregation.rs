//! Filtering and sorting of the aggregated template collection.
//!
//! Every function here takes a snapshot and returns a new one; the caller owns
//! the current aggregate and threads it through load, filter, sort and select.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{PlatformFilter, Template};

/// Conjunctive filter over the aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Case-insensitive substring over name, description and tags. Empty matches all.
    pub search_term: String,
    pub platform: PlatformFilter,
    pub favorites_only: bool,
}

impl TemplateFilter {
    pub fn matches(&self, template: &Template) -> bool {
        let needle = self.search_term.to_lowercase();
        self.matches_with_needle(template, &needle)
    }

    fn matches_with_needle(&self, template: &Template, needle_lower: &str) -> bool {
        template.matches_search(needle_lower)
            && self.platform.matches(template.platform)
            && (!self.favorites_only || template.is_favorite)
    }
}

/// Sort key for the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Platform,
    #[default]
    Date,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite direction, as when a column header is clicked again.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Returns the templates matching every predicate of `filter`, in input order.
pub fn filter_templates(templates: &[Template], filter: &TemplateFilter) -> Vec<Template> {
    let needle = filter.search_term.to_lowercase();
    templates
        .iter()
        .filter(|t| filter.matches_with_needle(t, &needle))
        .cloned()
        .collect()
}

/// Returns the templates sorted by `key`. Equal keys keep their input order in
/// both directions.
pub fn sort_templates(templates: &[Template], key: SortKey, order: SortOrder) -> Vec<Template> {
    let mut sorted = templates.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by(a: &Template, b: &Template, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Platform => compare_text(a.platform.as_str(), b.platform.as_str()),
        SortKey::Date => a.timestamp.cmp(&b.timestamp),
    }
}

/// Human-facing text ordering: case-insensitive first, then by exact text so
/// "apple" and "Apple" still get a deterministic order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter plus sort, as held by the browsing view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    pub filter: TemplateFilter,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl TemplateQuery {
    /// Filters then sorts a snapshot of the aggregate.
    pub fn apply(&self, templates: &[Template]) -> Vec<Template> {
        let filtered = filter_templates(templates, &self.filter);
        sort_templates(&filtered, self.sort, self.order)
    }

    /// Selects `key`, flipping direction when it is already the active key.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort == key {
            self.order = self.order.toggled();
        } else {
            self.sort = key;
            self.order = SortOrder::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, TemplateData};

    fn template(id: &str, name: &str, platform: Platform, timestamp: i64) -> Template {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            platform,
            data: TemplateData::default(),
            timestamp,
            description: None,
            tags: Vec::new(),
            is_favorite: false,
            is_shared: false,
            version: "1.0".to_string(),
        }
    }

    fn ids(templates: &[Template]) -> Vec<&str> {
        templates.iter().map(|t| t.id.as_str()).collect()
    }

    fn fixture() -> Vec<Template> {
        let mut a = template("a", "Spring Sale", Platform::Google, 300);
        a.is_favorite = true;
        a.tags = vec!["Seasonal".to_string()];

        let mut b = template("b", "brand awareness", Platform::Meta, 100);
        b.description = Some("Always-on spring creative".to_string());

        let mut c = template("c", "Retargeting", Platform::Google, 200);
        c.is_favorite = true;

        let d = template("d", "Launch", Platform::TikTok, 400);
        vec![a, b, c, d]
    }

    // Filter tests
    #[test]
    fn test_filter_empty_matches_all() {
        let all = fixture();
        let result = filter_templates(&all, &TemplateFilter::default());
        assert_eq!(result, all);
    }

    #[test]
    fn test_filter_search_name_description_tags() {
        let all = fixture();
        let by_term = |term: &str| -> Vec<String> {
            let filter = TemplateFilter {
                search_term: term.to_string(),
                ..Default::default()
            };
            let result = filter_templates(&all, &filter);
            result.into_iter().map(|t| t.id).collect()
        };

        assert_eq!(by_term("SPRING"), vec!["a", "b"]);
        assert_eq!(by_term("seasonal"), vec!["a"]);
        assert_eq!(by_term("nothing-here"), Vec::<String>::new());
    }

    #[test]
    fn test_filter_platform_and_favorites() {
        let all = fixture();
        let filter = TemplateFilter {
            platform: PlatformFilter::Only(Platform::Google),
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_templates(&all, &filter)), vec!["a", "c"]);

        let filter = TemplateFilter {
            platform: PlatformFilter::Only(Platform::Meta),
            favorites_only: true,
            ..Default::default()
        };
        assert!(filter_templates(&all, &filter).is_empty());
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let all = fixture();
        let filters = [
            TemplateFilter {
                search_term: "s".to_string(),
                platform: PlatformFilter::Only(Platform::Google),
                favorites_only: false,
            },
            TemplateFilter {
                search_term: "spring".to_string(),
                platform: PlatformFilter::All,
                favorites_only: true,
            },
            TemplateFilter {
                search_term: "".to_string(),
                platform: PlatformFilter::Only(Platform::TikTok),
                favorites_only: true,
            },
        ];

        for filter in &filters {
            let result = filter_templates(&all, filter);
            for t in &result {
                assert!(filter.matches(t));
            }
            let expected = all.iter().filter(|t| filter.matches(t)).count();
            assert_eq!(result.len(), expected);
        }
    }

    // Sort tests
    #[test]
    fn test_sort_by_date() {
        let all = fixture();
        assert_eq!(
            ids(&sort_templates(&all, SortKey::Date, SortOrder::Asc)),
            vec!["b", "c", "a", "d"]
        );
        assert_eq!(
            ids(&sort_templates(&all, SortKey::Date, SortOrder::Desc)),
            vec!["d", "a", "c", "b"]
        );
    }

    #[test]
    fn test_sort_date_desc_is_reverse_of_asc() {
        let all = fixture();
        let asc = sort_templates(&all, SortKey::Date, SortOrder::Asc);
        let mut desc = sort_templates(&all, SortKey::Date, SortOrder::Desc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let all = fixture();
        assert_eq!(
            ids(&sort_templates(&all, SortKey::Name, SortOrder::Asc)),
            vec!["b", "d", "c", "a"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let all = fixture();
        // a and c share Google; their relative order must survive both directions
        let asc = sort_templates(&all, SortKey::Platform, SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["a", "c", "b", "d"]);

        let desc = sort_templates(&all, SortKey::Platform, SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_repeated_sorts_do_not_shuffle_ties() {
        let mut all = fixture();
        for t in &mut all {
            t.timestamp = 1;
        }
        let once = sort_templates(&all, SortKey::Date, SortOrder::Desc);
        let twice = sort_templates(&once, SortKey::Date, SortOrder::Desc);
        assert_eq!(ids(&once), ids(&all));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_apply_filters_then_sorts() {
        let all = fixture();
        let query = TemplateQuery {
            filter: TemplateFilter {
                favorites_only: true,
                ..Default::default()
            },
            sort: SortKey::Date,
            order: SortOrder::Asc,
        };
        assert_eq!(ids(&query.apply(&all)), vec!["c", "a"]);
    }

    #[test]
    fn test_query_sort_by_toggles_direction() {
        let mut query = TemplateQuery::default();
        assert_eq!(query.sort, SortKey::Date);
        assert_eq!(query.order, SortOrder::Desc);

        query.sort_by(SortKey::Date);
        assert_eq!(query.order, SortOrder::Asc);

        query.sort_by(SortKey::Name);
        assert_eq!(query.sort, SortKey::Name);
        assert_eq!(query.order, SortOrder::Asc);

        query.sort_by(SortKey::Name);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_sort_key_serialization() {
        assert_eq!(serde_json::to_string(&SortKey::Platform).unwrap(), "\"platform\"");
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, SortOrder::Asc);
    }
}
