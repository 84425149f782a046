//! Capability trait definitions.

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::query::{NormalizedQuery, ResultSet};

/// Converts any user query into a canonicalized English rendering with
/// detected language, style, and intent. Not assumed deterministic; a
/// malformed response is a failure, handled by the caller's fallback.
#[async_trait]
pub trait Normalizer: Send + Sync {
    async fn normalize(&self, text: &str) -> Result<NormalizedQuery, CapabilityError>;
}

/// Generates SQL for compound queries, constrained by the fixed four-table
/// schema and its join/aggregation rules.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, query: &str) -> Result<String, CapabilityError>;
}

/// Produces a bullet-structured textual explanation of a result set.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, query: &str, results: &ResultSet) -> Result<String, CapabilityError>;
}

/// Adapts an English answer back into the user's style and language.
/// Numeric literals in the input must be preserved verbatim.
#[async_trait]
pub trait Formatter: Send + Sync {
    async fn format(
        &self,
        answer: &str,
        style: &str,
        language_code: &str,
    ) -> Result<String, CapabilityError>;
}
