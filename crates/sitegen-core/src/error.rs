//! Error types for Sitegen

use thiserror::Error;

/// Result type alias using Sitegen's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sitegen error types
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Project not found")]
    ProjectNotFound(String),

    // Network errors (E100-E199)
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("LLM API error: {0}")]
    LLMError(String),

    // Storage errors (E400-E499)
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Deployment errors (E500-E599)
    #[error("Deployment failed: {0}")]
    DeployFailed(String),

    #[error("Build failed ({status}): {stderr}")]
    BuildFailed { status: String, stderr: String },

    #[error("Build timed out after {0} seconds")]
    BuildTimeout(u64),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "E002",
            Self::NetworkError(_) => "E100",
            Self::LLMError(_) => "E101",
            Self::StorageError(_) => "E400",
            Self::Serialization(_) => "E401",
            Self::DeployFailed(_) => "E500",
            Self::BuildFailed { .. } => "E501",
            Self::BuildTimeout(_) => "E502",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ProjectNotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }

    /// Whether this error means the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_not_found() {
        let error = Error::ProjectNotFound("abc".to_string());
        assert_eq!(error.code(), "E002");
        assert_eq!(error.status_code(), 404);
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Project not found");
    }

    #[test]
    fn test_llm_error_is_internal() {
        let error = Error::LLMError("quota exceeded".to_string());
        assert_eq!(error.code(), "E101");
        assert_eq!(error.status_code(), 500);
        assert!(error.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_build_errors() {
        let failed = Error::BuildFailed {
            status: "exit status: 1".to_string(),
            stderr: "npm ERR!".to_string(),
        };
        assert_eq!(failed.code(), "E501");
        assert!(failed.to_string().contains("npm ERR!"));

        let timeout = Error::BuildTimeout(300);
        assert_eq!(timeout.code(), "E502");
        assert_eq!(timeout.to_string(), "Build timed out after 300 seconds");
        assert_eq!(timeout.status_code(), 500);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let error = Error::InvalidInput("path escapes target".to_string());
        assert_eq!(error.status_code(), 400);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io.into();
        assert_eq!(error.code(), "E9999");
        assert!(error.to_string().contains("denied"));
    }
}
