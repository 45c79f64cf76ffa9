//! AI endpoints

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::ai;
use crate::prompts::PromptKind;
use crate::sanitizer::SanitizedResponse;

use super::{ApiError, AppState};

/// Request body shared by the three AI endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancePromptResponse {
    #[serde(rename = "enhancedPrompt")]
    pub enhanced_prompt: String,
}

/// `POST /api/ai-chat`
pub async fn ai_chat(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(prompt_chars = request.prompt.len(), "AI chat request");

    let result = ai::chat(state.generator.as_ref(), &request.prompt)
        .await
        .map_err(|e| ApiError::with_context(PromptKind::Chat.error_context(), e))?;

    Ok(Json(ChatResponse { result }))
}

/// `POST /api/enhance-prompt`
pub async fn enhance_prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<EnhancePromptResponse>, ApiError> {
    info!(prompt_chars = request.prompt.len(), "Enhance prompt request");

    let enhanced_prompt = ai::enhance_prompt(state.generator.as_ref(), &request.prompt)
        .await
        .map_err(|e| ApiError::with_context(PromptKind::Enhance.error_context(), e))?;

    Ok(Json(EnhancePromptResponse { enhanced_prompt }))
}

/// `POST /api/gen-ai-code`
///
/// Undecodable model output is still a 200 carrying the diagnostic payload.
pub async fn generate_code(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<SanitizedResponse>, ApiError> {
    info!(prompt_chars = request.prompt.len(), "Code generation request");

    let response = ai::generate_code(state.generator.as_ref(), &request.prompt)
        .await
        .map_err(|e| ApiError::with_context(PromptKind::CodeGeneration.error_context(), e))?;

    Ok(Json(response))
}
