//! AI commands: chat, prompt enhancement, code generation
//!
//! Each command composes its prompt from the fixed templates, makes exactly
//! one call to the text generator, and post-processes the result.

use tracing::{debug, info};

use crate::error::Result;
use crate::llm::TextGenerator;
use crate::prompts::PromptKind;
use crate::sanitizer::{SanitizedResponse, sanitize_code_response};

/// Run one prompt of the given kind and return the raw model text
pub async fn run_prompt(
    generator: &dyn TextGenerator,
    kind: PromptKind,
    user_prompt: &str,
) -> Result<String> {
    let full_prompt = kind.build(user_prompt);
    let config = kind.generation_config();

    debug!(
        kind = ?kind,
        prompt_chars = full_prompt.len(),
        max_output_tokens = config.max_output_tokens,
        "Dispatching prompt"
    );

    let text = generator.generate(&full_prompt, &config).await?;
    info!(kind = ?kind, response_chars = text.len(), "Received model response");
    Ok(text)
}

/// Conversational reply, returned verbatim
pub async fn chat(generator: &dyn TextGenerator, prompt: &str) -> Result<String> {
    run_prompt(generator, PromptKind::Chat, prompt).await
}

/// Rewritten prompt, trimmed
pub async fn enhance_prompt(generator: &dyn TextGenerator, prompt: &str) -> Result<String> {
    let text = run_prompt(generator, PromptKind::Enhance, prompt).await?;
    Ok(text.trim().to_string())
}

/// Generated project as decoded JSON, or a diagnostic payload if decoding fails
pub async fn generate_code(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<SanitizedResponse> {
    let text = run_prompt(generator, PromptKind::CodeGeneration, prompt).await?;
    Ok(sanitize_code_response(&text))
}
