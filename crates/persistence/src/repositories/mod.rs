//! Repository implementations for store operations.

pub mod template;

pub use template::{PersistenceError, TemplateRepository};
