use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub store: StoreOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    /// Catalog language for titles and overviews.
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Entries shown per page of the watchlist.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// When enabled, entries carry the adding member's id and owner-scoped
    /// bulk removal is available. Entries without an owner are never touched
    /// by it either way.
    #[serde(default)]
    pub ownership_enabled: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            ownership_enabled: false,
        }
    }
}

fn default_language() -> String {
    "es-ES".to_string()
}

fn default_page_size() -> usize {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
