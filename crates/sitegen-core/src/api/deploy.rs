//! Deployment endpoint

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::commands::deploy;
use crate::deploy::DeploymentResult;

use super::{ApiError, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRequest {
    pub project_id: String,
}

/// `POST /api/deploy-project`
pub async fn deploy_project(
    State(state): State<AppState>,
    Json(request): Json<DeployRequest>,
) -> Result<Json<DeploymentResult>, ApiError> {
    let result = deploy::deploy_project(
        state.projects.as_ref(),
        state.deployer.as_ref(),
        &request.project_id,
    )
    .await
    .map_err(ApiError::deployment)?;

    Ok(Json(result))
}
