//! JSON document project store
//!
//! The whole collection lives in one pretty-printed JSON array. Every
//! mutation loads the full document, changes it in memory, and rewrites the
//! file. A mutex serialises those cycles within one repository instance;
//! other processes (or other instances pointed at the same file) are not
//! coordinated with, and the last full rewrite wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::commands::project::{
    CreateProjectRequest, Project, ProjectRepository, UpdateProjectRequest,
};
use crate::error::{Error, Result};

/// Project repository backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileProjectRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProjectRepository {
    /// Create a repository for the given file; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection; a missing or empty file is an empty collection
    pub async fn load_snapshot(&self) -> Result<Vec<Project>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::StorageError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            Error::StorageError(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Overwrite the file with the given collection
    pub async fn persist_snapshot(&self, projects: &[Project]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        // Readers never see a half-written document
        let contents = serde_json::to_string_pretty(projects)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents).await.map_err(|e| {
            Error::StorageError(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        fs::rename(&staging, &self.path).await.map_err(|e| {
            Error::StorageError(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), count = projects.len(), "Persisted projects");
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for JsonFileProjectRepository {
    async fn list(&self) -> Result<Vec<Project>> {
        self.load_snapshot().await
    }

    async fn get(&self, id: &str) -> Result<Project> {
        self.load_snapshot()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    async fn create(&self, request: CreateProjectRequest) -> Result<Project> {
        let _guard = self.write_lock.lock().await;

        let mut projects = self.load_snapshot().await?;
        let project = Project::new(request);
        projects.push(project.clone());
        self.persist_snapshot(&projects).await?;

        info!(project_id = %project.id, title = %project.title, "Created project");
        Ok(project)
    }

    async fn update(&self, id: &str, update: UpdateProjectRequest) -> Result<Project> {
        let _guard = self.write_lock.lock().await;

        let mut projects = self.load_snapshot().await?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))?;

        project.apply_update(update);
        let updated = project.clone();
        self.persist_snapshot(&projects).await?;

        info!(project_id = %id, "Updated project");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Project> {
        let _guard = self.write_lock.lock().await;

        let mut projects = self.load_snapshot().await?;
        let index = projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))?;

        let removed = projects.remove(index);
        self.persist_snapshot(&projects).await?;

        info!(project_id = %id, "Deleted project");
        Ok(removed)
    }
}
