//! Response sanitizing for code generation output
//!
//! The model is asked for bare JSON but frequently wraps it in a Markdown
//! fence. Decoding failures never become errors: the caller gets a
//! diagnostic payload with both the raw and cleaned text instead.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Opening fence the model puts around JSON output
pub const FENCE_OPEN: &str = "```json";

/// Closing fence
pub const FENCE_CLOSE: &str = "```";

/// Error tag carried by the diagnostic payload
pub const PARSE_ERROR: &str = "Failed to parse AI response as JSON";

/// Outcome of sanitizing a code generation response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SanitizedResponse {
    /// The decoded document, exactly as the model produced it
    Parsed(Value),
    /// Decoding failed
    Unparsed {
        error: String,
        raw_response: String,
        cleaned_response: String,
    },
}

impl SanitizedResponse {
    pub fn is_parsed(&self) -> bool {
        matches!(self, SanitizedResponse::Parsed(_))
    }
}

/// Remove an optional ```` ```json ```` / ```` ``` ```` wrapper
pub fn strip_json_fence(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix(FENCE_OPEN) {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix(FENCE_CLOSE) {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Strip fences and decode the model output
pub fn sanitize_code_response(raw: &str) -> SanitizedResponse {
    let cleaned = strip_json_fence(raw);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => SanitizedResponse::Parsed(value),
        Err(e) => {
            warn!(error = %e, raw_chars = raw.len(), "AI response is not valid JSON");
            SanitizedResponse::Unparsed {
                error: PARSE_ERROR.to_string(),
                raw_response: raw.to_string(),
                cleaned_response: cleaned.to_string(),
            }
        }
    }
}
