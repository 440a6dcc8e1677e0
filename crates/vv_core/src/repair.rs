use serde_json::Value;
use tracing::debug;

use crate::error::{excerpt, AppError};

const EXCERPT_CHARS: usize = 500;

/// Candidate JSON inside freeform model text: from the first `{` to the last `}`.
///
/// Prose and code fences around the object are dropped. When the braces are missing or
/// out of order the whole text is returned and the parser reports the failure.
pub fn extract_json_candidate(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    }
}

/// Parse freeform model text that should contain exactly one JSON object.
pub fn parse_freeform_json(raw: &str) -> Result<Value, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::new(
            "MODEL_RESPONSE_EMPTY",
            "The AI model returned an empty response.",
        ));
    }
    let candidate = extract_json_candidate(raw);
    if candidate.len() != raw.trim().len() {
        debug!(
            raw_len = raw.len(),
            candidate_len = candidate.len(),
            "stripped text around JSON object"
        );
    }
    serde_json::from_str(candidate).map_err(|e| {
        AppError::new(
            "MODEL_OUTPUT_INVALID_JSON",
            "The AI model returned an invalid JSON format.",
        )
        .with_details(format!("{e}; content={}", excerpt(candidate, EXCERPT_CHARS)))
    })
}

/// Parse model text produced under native structured output (no repair).
pub fn parse_native_json(raw: &str) -> Result<Value, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::new(
            "MODEL_RESPONSE_EMPTY",
            "The AI model returned an empty response.",
        ));
    }
    serde_json::from_str(raw).map_err(|e| {
        AppError::new(
            "MODEL_OUTPUT_INVALID_JSON",
            "The AI model returned an invalid JSON format.",
        )
        .with_details(format!("{e}; content={}", excerpt(raw, EXCERPT_CHARS)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_fences() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_candidate(raw), "{\"a\": 1}");
    }

    #[test]
    fn reversed_braces_fall_back_to_whole_text() {
        assert_eq!(extract_json_candidate("} nope {"), "} nope {");
    }
}
