//! Theme assets - copies a theme's static files into the output directory
//!
//! Everything in the theme directory except templates is an asset:
//! stylesheets, scripts, images, fonts. Entries whose name starts with `_`
//! or `.` are skipped at any depth.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::resolver::TEMPLATE_EXT;

/// Static files of one theme
pub struct ThemeAssets {
    theme_dir: PathBuf,
}

impl ThemeAssets {
    pub fn new<P: AsRef<Path>>(theme_dir: P) -> Self {
        Self {
            theme_dir: theme_dir.as_ref().to_path_buf(),
        }
    }

    /// Relative paths of every asset, sorted
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.theme_dir.is_dir() {
            return Err(anyhow!("Theme directory not found: {:?}", self.theme_dir));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.theme_dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.theme_dir)?;
            if is_template(relative) {
                continue;
            }
            files.push(relative.to_path_buf());
        }

        Ok(files)
    }

    /// Copy every asset to the same relative path under `output_dir`.
    ///
    /// Returns the number of files copied.
    pub fn copy_to(&self, output_dir: &Path) -> Result<usize> {
        let files = self.files()?;

        for relative in &files {
            let src = self.theme_dir.join(relative);
            let dest = output_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(&src, &dest)?;
            tracing::debug!("Copied: {:?} -> {:?}", src, dest);
        }

        Ok(files.len())
    }
}

fn is_hidden(name: Option<&str>) -> bool {
    name.map(|s| s.starts_with('_') || s.starts_with('.'))
        .unwrap_or(false)
}

/// Entry templates sit at the top of the theme directory
fn is_template(relative: &Path) -> bool {
    relative.components().count() == 1
        && relative
            .to_str()
            .map(|s| s.ends_with(TEMPLATE_EXT))
            .unwrap_or(false)
}
