//! Locates the JSON object embedded in free-form model output.
//!
//! Models sometimes wrap the payload in prose or code fences. The span is
//! taken greedily from the first `{` to the last `}` of the trimmed text.
//!
//! Known failure modes:
//! - prose *between* two objects, or a stray `}` after the payload, is pulled
//!   into the span and the caller's parse fails;
//! - a `{` in leading prose moves the span start before the real payload.
//!
//! No brace balancing is attempted; the caller decides what a parse failure means.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonSpanError {
    #[error("No JSON object found in response")]
    NoObjectStart,

    #[error("JSON object is not closed")]
    NoObjectEnd,
}

/// Returns the greedy `{ … }` span of `text`, or why there is none.
pub fn extract_json_object(text: &str) -> Result<&str, JsonSpanError> {
    let text = text.trim();
    let start = text.find('{').ok_or(JsonSpanError::NoObjectStart)?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or(JsonSpanError::NoObjectEnd)?;
    Ok(&text[start..=end])
}
