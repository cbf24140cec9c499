//! Persistence layer for the UTM template workspace.
//!
//! This crate contains:
//! - The synchronous key-value store boundary and its backends
//! - Entity definitions (persisted payload mappings)
//! - Repository implementations

pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;
