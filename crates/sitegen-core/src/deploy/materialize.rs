//! Writing a project's file map onto disk

use std::path::{Component, Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::commands::project::ProjectFiles;
use crate::error::{Error, Result};

/// Manifest file name
pub const PACKAGE_JSON: &str = "package.json";

/// Build tool config written when none of `VITE_CONFIG_NAMES` exists
pub const VITE_CONFIG: &str = "vite.config.js";

/// Any of these counts as an existing build tool config
pub const VITE_CONFIG_NAMES: &[&str] = &["vite.config.js", "vite.config.ts", "vite.config.mjs"];

const DEFAULT_VITE_CONFIG: &str = r#"import { defineConfig } from "vite";
import react from "@vitejs/plugin-react";

export default defineConfig({
  plugins: [react()],
  build: {
    outDir: "dist",
  },
});
"#;

/// Default manifest for a React + Vite project
pub fn default_package_json() -> Value {
    json!({
        "name": "sitegen-project",
        "private": true,
        "version": "0.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0"
        },
        "devDependencies": {
            "@vitejs/plugin-react": "^4.2.0",
            "vite": "^5.0.0"
        }
    })
}

/// Text to write for one file entry
///
/// Plain strings are written as-is, `{"code": "..."}` yields the code, and
/// any other shape is written as its JSON text.
pub fn file_content(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("code") {
            Some(Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// Resolve a project file key to a path relative to the target directory
///
/// Leading separators are dropped; keys that would escape the target are rejected.
pub fn relative_path(key: &str) -> Result<PathBuf> {
    let trimmed = key.trim_start_matches(['/', '\\']);
    let mut relative = PathBuf::new();

    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidInput(format!(
                    "File path '{}' escapes the project directory",
                    key
                )));
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidInput(format!("Empty file path '{}'", key)));
    }
    Ok(relative)
}

/// Write every file under `target`, then fill in missing build scaffolding
///
/// Returns the relative paths written, defaults included.
pub async fn materialize_files(target: &Path, files: &ProjectFiles) -> Result<Vec<PathBuf>> {
    // Every key is checked before anything touches disk
    let entries = files
        .iter()
        .map(|(key, value)| Ok((relative_path(key)?, value)))
        .collect::<Result<Vec<_>>>()?;

    tokio::fs::create_dir_all(target).await.map_err(|e| {
        Error::DeployFailed(format!("Failed to create {}: {}", target.display(), e))
    })?;

    let mut written = Vec::with_capacity(entries.len() + 2);

    for (relative, value) in entries {
        write_file(target, &relative, &file_content(value)).await?;
        written.push(relative);
    }

    if !file_exists(&target.join(PACKAGE_JSON)).await? {
        let manifest = serde_json::to_string_pretty(&default_package_json())?;
        write_file(target, Path::new(PACKAGE_JSON), &manifest).await?;
        written.push(PathBuf::from(PACKAGE_JSON));
        debug!(target = %target.display(), "Wrote default package.json");
    }

    let mut has_vite_config = false;
    for name in VITE_CONFIG_NAMES {
        if file_exists(&target.join(name)).await? {
            has_vite_config = true;
            break;
        }
    }

    if !has_vite_config {
        write_file(target, Path::new(VITE_CONFIG), DEFAULT_VITE_CONFIG).await?;
        written.push(PathBuf::from(VITE_CONFIG));
        debug!(target = %target.display(), "Wrote default vite config");
    }

    info!(target = %target.display(), files = written.len(), "Materialized project files");
    Ok(written)
}

async fn file_exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| Error::DeployFailed(format!("Failed to inspect {}: {}", path.display(), e)))
}

async fn write_file(target: &Path, relative: &Path, contents: &str) -> Result<()> {
    let path = target.join(relative);

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::DeployFailed(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| Error::DeployFailed(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn files(entries: &[(&str, Value)]) -> ProjectFiles {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_file_content_shapes() {
        assert_eq!(file_content(&json!("plain")), "plain");
        assert_eq!(file_content(&json!({"code": "x"})), "x");
        assert_eq!(file_content(&json!({"code": 5})), "5");
        assert_eq!(file_content(&json!({"other": true})), r#"{"other":true}"#);
        assert_eq!(file_content(&json!(42)), "42");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("/App.js").unwrap(), PathBuf::from("App.js"));
        assert_eq!(
            relative_path("/components/Button.js").unwrap(),
            PathBuf::from("components/Button.js")
        );
        assert_eq!(relative_path("./index.css").unwrap(), PathBuf::from("index.css"));
        assert!(relative_path("/../etc/passwd").is_err());
        assert!(relative_path("a/../../b").is_err());
        assert!(relative_path("/").is_err());
    }

    #[tokio::test]
    async fn test_materialize_writes_files_and_defaults() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deploy/p1");

        let written = materialize_files(&target, &files(&[("/App.js", json!({"code": "x"}))]))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(target.join("App.js")).unwrap(), "x");

        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(target.join(PACKAGE_JSON)).unwrap())
                .unwrap();
        assert_eq!(manifest["scripts"]["build"], "vite build");

        let vite = std::fs::read_to_string(target.join(VITE_CONFIG)).unwrap();
        assert!(vite.contains("plugin-react"));
        assert!(vite.contains("outDir"));

        assert_eq!(written.len(), 3);
    }

    #[tokio::test]
    async fn test_materialize_respects_scaffolding_already_on_disk() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PACKAGE_JSON), r#"{"name": "earlier"}"#).unwrap();
        std::fs::write(dir.path().join("vite.config.mjs"), "export default {}").unwrap();

        let written = materialize_files(dir.path(), &files(&[("/App.js", json!("x"))]))
            .await
            .unwrap();

        assert_eq!(written, vec![PathBuf::from("App.js")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap(),
            r#"{"name": "earlier"}"#
        );
        assert!(!dir.path().join(VITE_CONFIG).exists());
    }

    #[tokio::test]
    async fn test_materialize_keeps_supplied_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = r#"{"name": "custom"}"#;

        materialize_files(
            dir.path(),
            &files(&[
                ("/package.json", json!({"code": manifest})),
                ("/vite.config.ts", json!("export default {}")),
            ]),
        )
        .await
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap(),
            manifest
        );
        assert!(!dir.path().join(VITE_CONFIG).exists());
    }

    #[tokio::test]
    async fn test_materialize_creates_nested_dirs_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("components");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Card.js"), "old").unwrap();

        materialize_files(
            dir.path(),
            &files(&[
                ("/components/Card.js", json!({"code": "new"})),
                ("/pages/home/Home.js", json!({"code": "home"})),
            ]),
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read_to_string(nested.join("Card.js")).unwrap(), "new");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("pages/home/Home.js")).unwrap(),
            "home"
        );
    }

    #[tokio::test]
    async fn test_materialize_rejects_escaping_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("p");

        let err = materialize_files(&target, &files(&[("/../escape.js", json!("x"))]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!dir.path().join("escape.js").exists());
        assert!(!target.exists());
    }
}
