use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the timesheet backend, e.g. "http://127.0.0.1:5000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Email the session acts as. `WORKLOG_EMAIL` overrides it.
    #[serde(default)]
    pub email: String,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            email: String::new(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("worklog")
            .join("config.toml"))
    }

    pub fn token_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("worklog")
            .join("token"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Load the saved bearer token from disk. Returns None if not set.
    pub fn load_token() -> Result<Option<String>> {
        let path = Self::token_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let token = std::fs::read_to_string(&path).context("Failed to read token file")?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token))
    }

    /// Save the bearer token to disk.
    pub fn save_token(token: &str) -> Result<()> {
        let path = Self::token_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, token)?;
        Ok(())
    }

    /// Delete the saved token (logout).
    pub fn clear_token() -> Result<()> {
        let path = Self::token_path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// The email the session acts as: `WORKLOG_EMAIL` wins over the file.
    pub fn effective_email(&self) -> Option<String> {
        std::env::var("WORKLOG_EMAIL")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| {
                if self.email.trim().is_empty() {
                    None
                } else {
                    Some(self.email.clone())
                }
            })
    }
}
