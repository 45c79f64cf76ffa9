//! Sitegen Core Library
//!
//! This crate provides the backend functionality for Sitegen, including:
//! - Prompt templates and sampling presets for the three AI operations
//! - LLM integration (Gemini generateContent API)
//! - Response sanitizing for structured code generation output
//! - Project persistence (single JSON document on disk)
//! - Deployment (file materialization + external build script)
//! - HTTP API (axum router)

pub mod api;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod llm;
pub mod prompts;
pub mod sanitizer;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commands::project::{Project, ProjectRepository};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::llm::{GenerationConfig, TextGenerator};
}
