use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub model: String,
    pub auto_start_backend: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            auto_start_backend: true,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("could not determine the user config directory")?;
        Ok(dir.join("deskmate").join("config.toml"))
    }

    /// Load the config file, creating it with defaults on first run.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.backend_url.trim().is_empty(), "backend_url is empty");
        anyhow::ensure!(
            self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"),
            "backend_url must start with http:// or https://"
        );
        anyhow::ensure!(!self.model.trim().is_empty(), "model is empty");
        Ok(())
    }
}
