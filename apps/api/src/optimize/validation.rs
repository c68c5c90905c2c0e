use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::llm_client::json_span::extract_json_object;
use crate::optimize::models::OptimizationResult;

/// How much of a malformed reply goes into the log.
const LOGGED_REPLY_CHARS: usize = 500;

/// Top-level fields without which a result is useless to the caller.
const REQUIRED_FIELDS: [&str; 3] = ["score", "optimized", "audit"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Failed to parse optimization results. Please try again.")]
    Unparseable,

    #[error("Incomplete optimization results. Please try again.")]
    Incomplete,
}

/// Parses the model's reply into an `OptimizationResult`.
///
/// Prose around the JSON object is tolerated. A field counts as present when it
/// exists and is not `null`, so a score of `0` is valid. Nested fields are not
/// checked and nothing is coerced.
pub fn validate_response(raw: &str) -> Result<OptimizationResult, ValidationError> {
    let text = raw.trim();

    let parsed = extract_json_object(text)
        .map_err(|e| e.to_string())
        .and_then(|span| serde_json::from_str::<Value>(span).map_err(|e| e.to_string()));

    let value = match parsed {
        Ok(value) => value,
        Err(reason) => {
            error!("JSON parse error: {reason}");
            error!("Raw response: {}", preview(text));
            return Err(ValidationError::Unparseable);
        }
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        error!("Optimization result missing fields: {missing:?}");
        return Err(ValidationError::Incomplete);
    }

    Ok(OptimizationResult::new(value))
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(LOGGED_REPLY_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMPLETE: &str = r#"{
        "score": 80,
        "original": {"headline": "PM", "about": "I manage products."},
        "audit": [{"category": "Headline", "status": "warn", "feedback": "Too generic"}],
        "optimized": {"headline": "h", "about": "a", "experience": "e", "resumeSummary": "r"}
    }"#;

    #[test]
    fn test_complete_result_passes_unchanged() {
        let result = validate_response(COMPLETE).unwrap();
        let expected: Value = serde_json::from_str(COMPLETE).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), expected);
    }

    #[test]
    fn test_wrapper_prose_ignored() {
        let raw = r#"Here is the result: { "score": 80, "optimized": {"headline": "x"}, "audit": [] } Thanks!"#;
        let result = validate_response(raw).unwrap();
        assert_eq!(result.score(), Some(80.0));
    }

    #[test]
    fn test_fenced_reply_accepted() {
        let raw = format!("```json\n{COMPLETE}\n```");
        assert!(validate_response(&raw).is_ok());
    }

    #[test]
    fn test_no_json_is_unparseable() {
        let err = validate_response("Sorry, I can't do that.").unwrap_err();
        assert!(matches!(err, ValidationError::Unparseable));
    }

    #[test]
    fn test_malformed_json_is_unparseable() {
        let err = validate_response("{\"score\": 80, \"audit\": [,]}").unwrap_err();
        assert!(matches!(err, ValidationError::Unparseable));
    }

    #[test]
    fn test_missing_audit_is_incomplete() {
        let err = validate_response(r#"{"score": 80, "optimized": {}}"#).unwrap_err();
        assert!(matches!(err, ValidationError::Incomplete));
    }

    #[test]
    fn test_null_optimized_is_incomplete() {
        let raw = json!({"score": 80, "optimized": null, "audit": []}).to_string();
        assert!(matches!(
            validate_response(&raw),
            Err(ValidationError::Incomplete)
        ));
    }

    #[test]
    fn test_zero_score_is_valid() {
        let raw = json!({"score": 0, "optimized": {}, "audit": []}).to_string();
        let result = validate_response(&raw).unwrap();
        assert_eq!(result.score(), Some(0.0));
    }

    #[test]
    fn test_nested_fields_not_checked() {
        // Only top-level presence is enforced.
        let raw = json!({"score": 55, "optimized": {}, "audit": []}).to_string();
        assert!(validate_response(&raw).is_ok());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "ü".repeat(LOGGED_REPLY_CHARS + 10);
        assert_eq!(preview(&long).chars().count(), LOGGED_REPLY_CHARS);
    }
}
