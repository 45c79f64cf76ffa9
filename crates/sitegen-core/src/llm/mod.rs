//! LLM integration - Gemini generateContent API
//!
//! This module provides:
//! - The `TextGenerator` seam the HTTP layer depends on
//! - A Gemini HTTP client implementing it
//! - Request/response types for the generateContent endpoint
//! - Sampling configuration presets

mod client;
mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::{GeminiClient, GeminiClientBuilder};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

/// Anything that turns a prompt into generated text
///
/// Each call is independent: no retries, batching, or caching happen behind it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` using the given sampling configuration
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}
