//! External build script invocation

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Captured output of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `script <project_id>` and wait at most `timeout`
///
/// A non-zero exit is `Error::BuildFailed` carrying stderr; exceeding the
/// bound kills the child and yields `Error::BuildTimeout`.
pub async fn run_build(script: &Path, project_id: &str, timeout: Duration) -> Result<BuildOutput> {
    info!(script = %script.display(), project_id = %project_id, "Starting build");

    let child = Command::new(script)
        .arg(project_id)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            Error::DeployFailed(format!(
                "Failed to start build script {}: {}",
                script.display(),
                e
            ))
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(project_id = %project_id, timeout_secs = timeout.as_secs(), "Build timed out");
            return Err(Error::BuildTimeout(timeout.as_secs()));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        warn!(project_id = %project_id, status = %output.status, "Build failed");
        return Err(Error::BuildFailed {
            status: output.status.to_string(),
            stderr,
        });
    }

    info!(project_id = %project_id, "Build finished");
    Ok(BuildOutput { stdout, stderr })
}
