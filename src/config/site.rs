//! Site configuration (config.toml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RenderError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Theme directory name under `theme/`
    pub theme: String,
    pub title: String,
    pub owner: String,
    pub description: String,
    /// Number of posts per list page
    pub pagination: usize,
    /// Minify rendered HTML before writing it out
    pub minify: bool,
    /// Default Moment-style format for the `format_time` template filter
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme: String::new(),
            title: "Spook".to_string(),
            owner: String::new(),
            description: String::new(),
            pagination: 10,
            minify: false,
            date_format: "YYYY-MM-DD".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file. TOML unless the extension says YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        Ok(config)
    }

    /// Look for `config.toml`, `config.yml` or `config.yaml` in a site root
    pub fn find<P: AsRef<Path>>(root: P) -> Option<std::path::PathBuf> {
        ["config.toml", "config.yml", "config.yaml"]
            .iter()
            .map(|name| root.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Check the settings every render call depends on
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.theme.is_empty() {
            return Err(RenderError::Config(
                "no theme specified in configuration file".to_string(),
            ));
        }

        if self.pagination == 0 {
            return Err(RenderError::Config(
                "pagination must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
