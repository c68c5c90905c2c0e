//! Axum route handler for the profile optimization endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::optimize::extract::extract_content;
use crate::optimize::models::{OptimizationResult, OptimizeRequest, ProfileInput};
use crate::optimize::prompts::build_prompt;
use crate::optimize::validation::validate_response;
use crate::state::AppState;

/// POST /api/optimize
///
/// Configuration is checked before the body is looked at. Every failure is
/// terminal for the request.
pub async fn handle_optimize(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizationResult>, AppError> {
    let model = state
        .llm
        .clone()
        .ok_or_else(|| AppError::Configuration("ANTHROPIC_API_KEY is not set".to_string()))?;

    let Json(request) = payload?;
    let input = ProfileInput::from(request);

    let content = extract_content(&input, &state.http).await?;
    info!(
        provenance = ?content.provenance,
        chars = content.text.chars().count(),
        target_role = input.target_role.as_deref().unwrap_or("-"),
        "Profile content extracted"
    );

    let prompt = build_prompt(&content.text, input.target_role.as_deref());
    let reply = model.complete(prompt.system, &prompt.user).await?;

    let result = validate_response(&reply)?;
    info!(
        score = ?result.score(),
        audit_entries = result.audit_statuses().len(),
        "Profile optimization complete"
    );

    Ok(Json(result))
}
