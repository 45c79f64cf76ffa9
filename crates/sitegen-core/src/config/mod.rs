//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the generative AI credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SITEGEN_CONFIG_DIR";

/// Sitegen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer (the frontend)
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Never persisted; only accepted so that a key written into the file is rejected
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Request timeout; `None` leaves AI calls unbounded
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON document holding every project record
    pub projects_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Deployments are materialized under `<root_dir>/<project id>`
    pub root_dir: PathBuf,
    /// External build script, invoked with the project id as its only argument
    pub build_script: PathBuf,
    pub timeout_secs: u64,
    /// Public URL pattern; `{id}` is replaced by the project id
    pub url_template: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash-exp".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            projects_file: PathBuf::from("projects.json"),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/var/www/sitegen/deployments"),
            build_script: PathBuf::from("/opt/sitegen/build.sh"),
            timeout_secs: 300,
            url_template: "http://{id}.sites.localhost".to_string(),
        }
    }
}

impl LlmConfig {
    pub fn resolved_api_key(&self) -> anyhow::Result<Option<String>> {
        self.enforce_env_only()?;

        Ok(env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()))
    }

    /// Resolve the API key, failing when it is not set
    pub fn require_api_key(&self) -> anyhow::Result<String> {
        self.resolved_api_key()?
            .ok_or_else(|| anyhow!("{} environment variable is required", API_KEY_ENV))
    }

    pub fn redacted_api_key(&self) -> anyhow::Result<Option<String>> {
        self.resolved_api_key().map(|opt| opt.map(|key| redact(&key)))
    }

    pub fn enforce_env_only(&self) -> anyhow::Result<()> {
        if self.api_key.is_some() {
            return Err(anyhow!(
                "API keys must be provided via the {} environment variable, not stored in configuration",
                API_KEY_ENV
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl DeployConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory a project is materialized into
    pub fn project_dir(&self, project_id: &str) -> PathBuf {
        self.root_dir.join(project_id)
    }

    /// Public URL of a deployed project
    pub fn url_for(&self, project_id: &str) -> String {
        self.url_template.replace("{id}", project_id)
    }
}

/// Keep only the last four characters
fn redact(key: &str) -> String {
    match key.char_indices().nth_back(3) {
        Some((start, _)) if start > 0 => format!("***{}", &key[start..]),
        _ => "***".to_string(),
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("sitegen")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config = Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.llm.enforce_env_only()?;

        if self.deploy.timeout_secs == 0 {
            return Err(anyhow!("deploy.timeout_secs must be greater than zero"));
        }
        if !self.deploy.url_template.contains("{id}") {
            return Err(anyhow!("deploy.url_template must contain the {{id}} placeholder"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "server.host" => Ok(self.server.host.clone()),
            "server.port" => Ok(self.server.port.to_string()),
            "server.allowed_origins" => Ok(self.server.allowed_origins.join(", ")),

            "llm.model" => Ok(self.llm.model.clone()),
            "llm.base_url" => Ok(self.llm.base_url.clone()),
            "llm.timeout_secs" => Ok(self
                .llm
                .timeout_secs
                .map(|secs| secs.to_string())
                .unwrap_or_else(|| "(unbounded)".to_string())),

            "storage.projects_file" => Ok(self.storage.projects_file.display().to_string()),

            "deploy.root_dir" => Ok(self.deploy.root_dir.display().to_string()),
            "deploy.build_script" => Ok(self.deploy.build_script.display().to_string()),
            "deploy.timeout_secs" => Ok(self.deploy.timeout_secs.to_string()),
            "deploy.url_template" => Ok(self.deploy.url_template.clone()),

            "llm.api_key" | "api_key" => match self.llm.redacted_api_key()? {
                Some(redacted) => Ok(redacted),
                None => Ok(format!("(not set - use {} env var)", API_KEY_ENV)),
            },

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `sitegen config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "server.host" => {
                self.server.host = value.to_string();
            }
            "server.port" => {
                self.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid port value: {}", value))?;
            }
            "server.allowed_origins" => {
                self.server.allowed_origins = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }

            "llm.model" => {
                self.llm.model = value.to_string();
            }
            "llm.base_url" => {
                self.llm.base_url = value.trim_end_matches('/').to_string();
            }
            "llm.timeout_secs" => {
                self.llm.timeout_secs = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid timeout_secs value: {}", value))?,
                    )
                };
            }

            "storage.projects_file" => {
                self.storage.projects_file = PathBuf::from(value);
            }

            "deploy.root_dir" => {
                self.deploy.root_dir = PathBuf::from(value);
            }
            "deploy.build_script" => {
                self.deploy.build_script = PathBuf::from(value);
            }
            "deploy.timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
                if secs == 0 {
                    return Err(anyhow!("Deploy timeout must be greater than zero"));
                }
                self.deploy.timeout_secs = secs;
            }
            "deploy.url_template" => {
                if !value.contains("{id}") {
                    return Err(anyhow!("URL template must contain the {{id}} placeholder"));
                }
                self.deploy.url_template = value.to_string();
            }

            "llm.api_key" | "api_key" => {
                return Err(anyhow!(
                    "API keys cannot be stored in configuration for security. \
                     Set the {} environment variable instead.",
                    API_KEY_ENV
                ));
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `sitegen config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = [
            "server.host",
            "server.port",
            "server.allowed_origins",
            "llm.model",
            "llm.base_url",
            "llm.timeout_secs",
            "llm.api_key",
            "storage.projects_file",
            "deploy.root_dir",
            "deploy.build_script",
            "deploy.timeout_secs",
            "deploy.url_template",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.model, "gemini-2.0-flash-exp");
        assert!(config.llm.timeout().is_none());
        assert_eq!(config.storage.projects_file, PathBuf::from("projects.json"));
        assert_eq!(config.deploy.timeout(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9001

            [deploy]
            url_template = "https://{id}.example.dev"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.deploy.url_for("abc"), "https://abc.example.dev");
        assert_eq!(config.deploy.timeout_secs, 300);
    }

    #[test]
    fn test_api_key_in_file_is_rejected() {
        let result = Config::from_toml(
            r#"
            [llm]
            api_key = "secret"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("secret".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.get("server.port").unwrap(), "8080");

        config.set("llm.timeout_secs", "60").unwrap();
        assert_eq!(config.llm.timeout(), Some(Duration::from_secs(60)));
        config.set("llm.timeout_secs", "none").unwrap();
        assert_eq!(config.get("llm.timeout_secs").unwrap(), "(unbounded)");

        config
            .set("server.allowed_origins", "http://a.test, http://b.test,")
            .unwrap();
        assert_eq!(config.server.allowed_origins.len(), 2);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not-a-port").is_err());
        assert!(config.set("deploy.timeout_secs", "0").is_err());
        assert!(config.set("deploy.url_template", "http://static").is_err());
        assert!(config.set("llm.api_key", "secret").is_err());
        assert!(config.set("unknown.key", "x").is_err());
    }

    #[test]
    fn test_list_contains_every_key() {
        let config = Config::default();
        let entries = config.list().unwrap();
        assert_eq!(entries.len(), 12);
        assert!(entries.iter().any(|(k, _)| k == "deploy.build_script"));
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("abc"), "***");
        assert_eq!(redact("abcd"), "***");
        assert_eq!(redact("abcdefgh"), "***efgh");
    }

    #[test]
    fn test_redact_multibyte_key() {
        assert_eq!(redact("ключ-абвгдx"), "***вгдx");
        assert_eq!(redact("ключ"), "***");
        assert_eq!(redact("🔑🔑🔑🔑🔑"), "***🔑🔑🔑🔑");
    }

    #[test]
    fn test_project_dir() {
        let deploy = DeployConfig::default();
        assert_eq!(
            deploy.project_dir("p1"),
            PathBuf::from("/var/www/sitegen/deployments/p1")
        );
        assert_eq!(deploy.url_for("p1"), "http://p1.sites.localhost");
    }
}
