//! Deploy command

use tracing::info;

use crate::commands::project::ProjectRepository;
use crate::deploy::{Deployer, DeploymentResult};
use crate::error::Result;

/// Look up a project and deploy it
///
/// Unknown ids fail with `Error::ProjectNotFound` before anything touches disk.
pub async fn deploy_project(
    projects: &dyn ProjectRepository,
    deployer: &Deployer,
    project_id: &str,
) -> Result<DeploymentResult> {
    let project = projects.get(project_id).await?;
    info!(project_id = %project.id, files = project.files.len(), "Deploying project");
    deployer.deploy(&project).await
}
