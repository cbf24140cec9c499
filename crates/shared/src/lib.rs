//! Shared utilities and common types for the UTM template workspace.
//!
//! This crate provides common functionality used across all other crates:
//! - Template id generation and legacy id derivation
//! - Monotonic save timestamps
//! - Common validation logic

pub mod clock;
pub mod crypto;
pub mod validation;
