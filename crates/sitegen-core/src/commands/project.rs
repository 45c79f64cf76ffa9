//! Project management
//!
//! Provides the project record, request payloads, and the repository seam
//! the HTTP layer talks to.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::Result;

/// Generated files keyed by path (`"/App.js"`); values are usually `{"code": "..."}`
pub type ProjectFiles = BTreeMap<String, Value>;

/// A persisted prompt + generated file bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier, immutable
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Prompt the files were generated from
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub files: ProjectFiles,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Create project request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub files: ProjectFiles,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub files: Option<ProjectFiles>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl UpdateProjectRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.prompt.is_none()
            && self.files.is_none()
            && self.thumbnail.is_none()
    }
}

impl Project {
    /// Create a new project with a fresh id; `created_at == updated_at`
    pub fn new(request: CreateProjectRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            prompt: request.prompt,
            files: request.files,
            created_at: now,
            updated_at: now,
            thumbnail: request.thumbnail,
        }
    }

    /// Overwrite the provided fields and refresh `updated_at`
    pub fn apply_update(&mut self, update: UpdateProjectRequest) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(prompt) = update.prompt {
            self.prompt = prompt;
        }
        if let Some(files) = update.files {
            self.files = files;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = Some(thumbnail);
        }
        self.updated_at = Utc::now();
    }
}

/// Storage seam for projects
///
/// `get`, `update`, and `delete` fail with `Error::ProjectNotFound` for an
/// unknown id.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List all projects in storage order
    async fn list(&self) -> Result<Vec<Project>>;

    /// Get a project by ID
    async fn get(&self, id: &str) -> Result<Project>;

    /// Create and persist a new project
    async fn create(&self, request: CreateProjectRequest) -> Result<Project>;

    /// Apply a partial update
    async fn update(&self, id: &str, update: UpdateProjectRequest) -> Result<Project>;

    /// Remove a project, returning the removed record
    async fn delete(&self, id: &str) -> Result<Project>;
}
