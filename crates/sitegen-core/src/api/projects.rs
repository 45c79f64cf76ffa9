//! Project CRUD endpoints

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use crate::commands::project::{CreateProjectRequest, Project, UpdateProjectRequest};

use super::{ApiError, AppState};

/// Response body of `DELETE /api/projects/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    pub message: String,
    pub project: Project,
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.projects.list().await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.get(&id).await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.create(request).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.update(&id, update).await?))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProjectResponse>, ApiError> {
    let project = state.projects.delete(&id).await?;
    Ok(Json(DeleteProjectResponse {
        message: "Project deleted successfully".to_string(),
        project,
    }))
}
