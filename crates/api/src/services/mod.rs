//! Store-backed services.

pub mod templates;

pub use templates::{
    BulkDeleteFailure, BulkDeleteOutcome, ImportOutcome, SaveOutcome, TemplateService,
};
