//! spook: a small static site generator
//!
//! Markdown pages and posts are rendered through a Tera theme into plain
//! HTML files: a front page, paginated post lists per category and tag, and
//! one document per page and post.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod renderer;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::RenderError;
pub use generator::BuildStats;
pub use renderer::Renderer;

/// Default output directory under the site root
pub const OUTPUT_DIR: &str = "public";

/// The main Spook application
#[derive(Clone)]
pub struct Spook {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Site root
    pub base_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Theme directory
    pub theme_dir: PathBuf,
}

impl Spook {
    /// Create a new Spook instance from a site root.
    ///
    /// Reads `config.toml` (or `config.yml`) when present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();

        let config = match config::SiteConfig::find(base_dir) {
            Some(path) => config::SiteConfig::load(&path)?,
            None => {
                tracing::warn!("No config file found in {:?}, using defaults", base_dir);
                config::SiteConfig::default()
            }
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Spook instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let output_dir = base_dir.join(OUTPUT_DIR);
        let theme_dir = base_dir.join(theme::THEME_DIR).join(&config.theme);

        Self {
            config,
            base_dir,
            output_dir,
            theme_dir,
        }
    }

    /// Write the site somewhere other than `public/`
    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    /// Generate the static site
    pub fn build(&self) -> Result<BuildStats> {
        commands::build::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
