//! Functional interface over the UTM template store.
//!
//! Presentation code loads the aggregate with [`TemplateService::load_all`],
//! derives its views with the pure query helpers, and routes every mutation
//! back through the service.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;

pub use app::{create_store, DynStore, Workspace};
pub use domain::services::{analyze, compose_url};
pub use error::ApiError;
pub use services::TemplateService;
