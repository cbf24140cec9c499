//! Domain layer for the UTM template workspace.
//!
//! This crate contains:
//! - Domain models (Template, Platform, ParsedUrl, ExportEnvelope)
//! - Pure services: URL analysis, aggregation (filter, sort, selection),
//!   export/import codec
//! - Domain error types

pub mod models;
pub mod services;
