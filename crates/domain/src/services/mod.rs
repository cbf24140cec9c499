//! Domain services for UTM templates.
//!
//! Services contain logic that operates on domain models. None of them touch
//! persistence; they take snapshots and return new ones.

pub mod aggregation;
pub mod analyzer;
pub mod codec;
pub mod selection;

pub use aggregation::{
    filter_templates, sort_templates, SortKey, SortOrder, TemplateFilter, TemplateQuery,
};
pub use analyzer::{analyze, compose_url};
pub use codec::{export_templates, export_templates_at, import_templates, FormatError};
pub use selection::Selection;
