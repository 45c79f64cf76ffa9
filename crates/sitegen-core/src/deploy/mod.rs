//! Deployment
//!
//! Materializes a project's files under `<root_dir>/<project id>`, fills in
//! default build scaffolding, and runs the external build script. Nothing
//! about a deployment is persisted; the response is synthesized.

mod build;
mod materialize;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::project::Project;
use crate::config::DeployConfig;
use crate::error::Result;

pub use build::{BuildOutput, run_build};
pub use materialize::{
    PACKAGE_JSON, VITE_CONFIG, VITE_CONFIG_NAMES, default_package_json, file_content,
    materialize_files, relative_path,
};

/// Response body of a successful deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub success: bool,
    pub url: String,
    pub deployment_id: String,
    pub message: String,
}

/// Deploys projects according to a `DeployConfig`
#[derive(Debug, Clone)]
pub struct Deployer {
    config: DeployConfig,
}

impl Deployer {
    pub fn new(config: DeployConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Directory the project is materialized into
    pub fn target_dir(&self, project_id: &str) -> PathBuf {
        self.config.project_dir(project_id)
    }

    /// Materialize and build; any failure aborts the deployment
    pub async fn deploy(&self, project: &Project) -> Result<DeploymentResult> {
        let target = self.target_dir(&project.id);

        materialize_files(&target, &project.files).await?;
        run_build(&self.config.build_script, &project.id, self.config.timeout()).await?;

        let url = self.config.url_for(&project.id);
        info!(project_id = %project.id, url = %url, "Project deployed");

        Ok(DeploymentResult {
            success: true,
            url,
            deployment_id: project.id.clone(),
            message: "Project deployed successfully".to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::commands::project::{CreateProjectRequest, ProjectFiles};
    use crate::error::Error;
    use serde_json::json;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn deployer(dir: &TempDir, script_body: &str) -> Deployer {
        let script = dir.path().join("build.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", script_body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        Deployer::new(DeployConfig {
            root_dir: dir.path().join("deployments"),
            build_script: script,
            timeout_secs: 10,
            url_template: "http://{id}.sites.test".to_string(),
        })
    }

    fn project() -> Project {
        let mut files = ProjectFiles::new();
        files.insert("/App.js".to_string(), json!({"code": "x"}));
        Project::new(CreateProjectRequest {
            title: "demo".to_string(),
            files,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_deploy_success() {
        let dir = TempDir::new().unwrap();
        let deployer = deployer(&dir, "exit 0");
        let project = project();

        let result = deployer.deploy(&project).await.unwrap();

        assert!(result.success);
        assert_eq!(result.deployment_id, project.id);
        assert_eq!(result.url, format!("http://{}.sites.test", project.id));

        let target = deployer.target_dir(&project.id);
        assert_eq!(std::fs::read_to_string(target.join("App.js")).unwrap(), "x");
        assert!(target.join(PACKAGE_JSON).exists());
        assert!(target.join(VITE_CONFIG).exists());
    }

    #[tokio::test]
    async fn test_deploy_build_failure() {
        let dir = TempDir::new().unwrap();
        let deployer = deployer(&dir, "echo 'vite: not found' >&2\nexit 127");

        let err = deployer.deploy(&project()).await.unwrap_err();

        assert!(matches!(err, Error::BuildFailed { .. }));
        assert!(err.to_string().contains("vite: not found"));
    }
}
