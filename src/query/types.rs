//! Types for the answer pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Normalized Query
// ============================================================================

/// Detected intent of a user query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Small talk directed at the bot itself.
    Personal,
    /// A real data question.
    #[default]
    Business,
}

/// Canonicalized English rendering of a user query plus detected
/// language, style, and intent. Produced once per request and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    /// One-line clean English version of the query.
    pub english_text: String,
    /// BCP47/ISO639-1 code of the original query, or "unknown".
    pub language_code: String,
    /// Detected style: english, hindi, hinglish, or a language name.
    pub style: String,
    /// Detected intent of the query.
    pub intent: IntentKind,
}

impl NormalizedQuery {
    /// Fallback used when the normalizer capability fails: the raw text is
    /// carried forward unchanged and the pipeline continues.
    pub fn fallback(raw: &str) -> Self {
        Self {
            english_text: raw.to_string(),
            language_code: "unknown".to_string(),
            style: "english".to_string(),
            intent: IntentKind::Business,
        }
    }
}

// ============================================================================
// Result Set
// ============================================================================

/// A single store-native value.
///
/// `Decimal` only exists between the executor and the sanitizer; sanitized
/// result sets carry `Float` in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

/// Columns and rows returned by the executor, in store-native order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    /// An empty result set with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Final Answer
// ============================================================================

/// Terminal response of the pipeline. Exactly one of `final_answer` and
/// `message` is set in a completed response; `results` is present whenever
/// execution succeeded, independent of the explanation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FinalAnswer {
    /// A successful answer with its backing results.
    pub fn answered(results: ResultSet, final_answer: String) -> Self {
        Self {
            results: Some(results),
            final_answer: Some(final_answer),
            message: None,
        }
    }

    /// No data matched the query. `results` carries the (empty) result set
    /// when execution ran, and is `None` when no query was ever executed.
    pub fn not_found(results: Option<ResultSet>) -> Self {
        Self {
            results,
            final_answer: None,
            message: Some("data not found".to_string()),
        }
    }

    /// Terminal failure with a user-facing message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            results: None,
            final_answer: None,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Stage Outcome
// ============================================================================

/// Outcome of a single pipeline stage.
///
/// Every stage resolves to one of these; no stage raises an error across
/// the pipeline boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage succeeded.
    Ok(T),
    /// The stage failed but produced a usable fallback; the pipeline
    /// continues.
    Degraded(T),
    /// The pipeline cannot continue; the message becomes the final answer.
    Abort(String),
}
