//! Deterministic analysis of query text.
//!
//! Classifies a normalized English query as simple or compound and extracts
//! the year, place, and parameter signals the simple-path SQL builder needs.
//! Vague or ambiguous text still yields a best-effort result, never an error.

use std::sync::LazyLock;

use regex::Regex;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20)\d{2}").expect("valid year regex"));

static PLACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][A-Za-z]+").expect("valid place regex"));

/// Keywords that mark a query as a comparison. "and" counts only as a
/// standalone conjunction token, the rest by containment.
const COMPARISON_KEYWORDS: [&str; 4] = ["compare", "versus", "vs", "between"];

// ============================================================================
// Query Shape
// ============================================================================

/// Whether a query can be answered by the deterministic single-place,
/// single-parameter SQL template or needs generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    Simple,
    Compound,
}

/// Classify query text as simple or compound.
pub fn classify(text: &str) -> QueryShape {
    let lower = text.to_lowercase();
    let has_keyword = COMPARISON_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let has_conjunction = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == "and");

    if has_keyword || has_conjunction {
        QueryShape::Compound
    } else {
        QueryShape::Simple
    }
}

// ============================================================================
// Signal Extraction
// ============================================================================

/// Year condition detected in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    /// No year mentioned: all years.
    All,
    /// Exactly one year mentioned.
    Single(i32),
    /// Two or more years mentioned: the first two in document order.
    Range(i32, i32),
}

/// Extract the year condition from query text.
pub fn extract_years(text: &str) -> YearFilter {
    let mut years = YEAR_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok());

    match (years.next(), years.next()) {
        (None, _) => YearFilter::All,
        (Some(y), None) => YearFilter::Single(y),
        (Some(a), Some(b)) => YearFilter::Range(a, b),
    }
}

/// Extract a candidate place name: the first capitalized word token.
pub fn extract_place(text: &str) -> Option<&str> {
    PLACE_PATTERN.find(text).map(|m| m.as_str())
}

/// Map query keywords to a parameter name, first match in priority order.
/// "level" outranks "water" so that "water level" resolves to
/// Groundwater Level. Queries with no parameter keyword fall back to
/// Groundwater Level, never to "no parameter".
pub fn match_parameter(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("level") {
        "Groundwater Level"
    } else if lower.contains("recharge") || lower.contains("water") {
        "Water Recharged"
    } else if lower.contains("rainfall") {
        "Rainfall"
    } else if lower.contains("exploit") || lower.contains("extraction") {
        "Exploitation"
    } else {
        "Groundwater Level"
    }
}
