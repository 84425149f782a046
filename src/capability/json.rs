//! JSON recovery for capability responses.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CapabilityError;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON object regex"));

/// Extract a JSON object from raw model output, tolerating surrounding
/// noise. Tries a direct parse first, then the outermost brace span.
pub fn extract_json(raw: &str) -> Result<serde_json::Value, CapabilityError> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }

    JSON_OBJECT
        .find(raw)
        .and_then(|m| serde_json::from_str(m.as_str()).ok())
        .ok_or_else(|| {
            CapabilityError::MalformedResponse(format!("could not parse JSON from: {raw}"))
        })
}
