//! Commands invoked by the HTTP layer
//!
//! - `project`: project record and repository seam
//! - `ai`: chat, prompt enhancement, and code generation
//! - `deploy`: project deployment

pub mod ai;
pub mod deploy;
pub mod project;
