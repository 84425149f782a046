//! Natural-language query translation.
//!
//! This module provides:
//! - The core request/response data model
//! - Deterministic classification of query text (simple vs compound)
//! - Structured SQL construction against the fixed four-table schema

pub mod builder;
pub mod classifier;
pub mod types;

pub use builder::*;
pub use classifier::*;
pub use types::*;
