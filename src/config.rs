//! Credential configuration
//!
//! Credentials come from a JSON config file (`{"canvas": {...}, "github": {...}}`)
//! or from the environment when no file is given.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Canvas base URL
pub const CANVAS_BASE_URL_ENV: &str = "CANVAS_BASE_URL";

/// Environment variable holding the Canvas API token
pub const CANVAS_TOKEN_ENV: &str = "CANVAS_TOKEN";

/// Environment variable holding the GitHub API token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Canvas connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Base URL of the Canvas instance (e.g., `https://canvas.example.edu`)
    pub base_url: String,
    /// Canvas API bearer token
    pub token: String,
}

/// GitHub connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API bearer token
    pub token: String,
}

/// All credentials known to the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Canvas credentials, if configured
    #[serde(default)]
    pub canvas: Option<CanvasConfig>,
    /// GitHub credentials, if configured
    #[serde(default)]
    pub github: Option<GitHubConfig>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let settings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    /// Load settings from the environment
    ///
    /// Unset or empty variables leave the corresponding section absent.
    pub fn from_env() -> Self {
        let canvas = match (
            non_empty_env(CANVAS_BASE_URL_ENV),
            non_empty_env(CANVAS_TOKEN_ENV),
        ) {
            (Some(base_url), Some(token)) => Some(CanvasConfig { base_url, token }),
            _ => None,
        };
        let github = non_empty_env(GITHUB_TOKEN_ENV).map(|token| GitHubConfig { token });

        Self { canvas, github }
    }

    /// Load from a file if given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Canvas settings, or an error if the section is absent
    pub fn canvas(&self) -> Result<&CanvasConfig> {
        self.canvas
            .as_ref()
            .ok_or_else(|| Error::config("Canvas configuration not found"))
    }

    /// GitHub settings, or an error if the section is absent
    pub fn github(&self) -> Result<&GitHubConfig> {
        self.github
            .as_ref()
            .ok_or_else(|| Error::config("GitHub configuration not found"))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"canvas": {{"base_url": "https://canvas.example.edu", "token": "secret"}}}}"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        let canvas = settings.canvas().unwrap();
        assert_eq!(canvas.base_url, "https://canvas.example.edu");
        assert_eq!(canvas.token, "secret");
        assert!(settings.github().is_err());
    }

    #[test]
    fn test_settings_missing_file() {
        let err = Settings::from_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let settings = Settings::default();
        let err = settings.canvas().unwrap_err();
        assert!(err.to_string().contains("Canvas configuration not found"));
    }
}
