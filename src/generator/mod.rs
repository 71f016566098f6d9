//! Generator module - writes every document of the site to the output directory
//!
//! Output layout:
//!
//! ```text
//! index.html                          front page
//! posts/index.html                    first page of all posts
//! posts/page/<n>/index.html           every page of all posts
//! category/<name>/page/<n>/index.html category lists (plus category/<name>/index.html)
//! tag/<name>/page/<n>/index.html      tag lists (plus tag/<name>/index.html)
//! <url>/index.html                    every page and post
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ListKind, Page, Post};
use crate::renderer::Renderer;
use crate::theme::ThemeAssets;
use crate::Spook;

/// What a generation run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub lists: usize,
    pub pages: usize,
    pub posts: usize,
    pub assets: usize,
}

/// Static site generator driving the renderer
pub struct Generator {
    output_dir: PathBuf,
    theme_dir: PathBuf,
    renderer: Renderer,
}

impl Generator {
    /// Create a new generator for the loaded content
    pub fn new(spook: &Spook, pages: Vec<Page>, posts: Vec<Post>) -> Self {
        let renderer = Renderer::new(spook.config.clone(), &spook.base_dir, pages, posts);

        Self {
            output_dir: spook.output_dir.clone(),
            theme_dir: spook.theme_dir.clone(),
            renderer,
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<BuildStats> {
        fs::create_dir_all(&self.output_dir)?;

        let mut stats = BuildStats {
            assets: ThemeAssets::new(&self.theme_dir).copy_to(&self.output_dir)?,
            ..Default::default()
        };

        let mut out = Vec::new();
        self.renderer
            .render_front_page(&mut out)
            .context("Failed to render front page")?;
        self.write("index.html", &out)?;

        stats.lists += self.generate_list(ListKind::Default, "")?;
        let groups = self
            .renderer
            .categories()
            .iter()
            .map(|g| (ListKind::Category, g))
            .chain(self.renderer.tags().iter().map(|g| (ListKind::Tag, g)));
        for (kind, group) in groups {
            if !is_path_segment(&group.name) {
                tracing::warn!(
                    "Skipping {:?} list {:?}: not a valid path segment",
                    kind,
                    group.name
                );
                continue;
            }
            stats.lists += self.generate_list(kind, &group.name)?;
        }

        stats.pages = self.generate_pages()?;
        stats.posts = self.generate_posts()?;

        Ok(stats)
    }

    /// Write every page of one list; returns the number of pages written
    fn generate_list(&self, kind: ListKind, group: &str) -> Result<usize> {
        let base = kind.path(group);
        let mut page = 1;

        loop {
            let mut out = Vec::new();
            let rendered = self
                .renderer
                .render_list(kind, group, page, &mut out)
                .with_context(|| format!("Failed to render {} page {}", base, page))?;
            if rendered.is_none() {
                break;
            }

            if page == 1 {
                self.write(&format!("{}/index.html", base), &out)?;
            }
            self.write(&format!("{}/page/{}/index.html", base, page), &out)?;
            page += 1;
        }

        let written = usize::try_from(page - 1).unwrap_or_default();
        tracing::debug!("Generated {} page(s) of {}", written, base);
        Ok(written)
    }

    /// Generate standalone pages
    fn generate_pages(&self) -> Result<usize> {
        for page in self.renderer.pages() {
            let mut out = Vec::new();
            self.renderer
                .render_page(page, &mut out)
                .with_context(|| format!("Failed to render page {:?}", page.url))?;
            self.write(&format!("{}/index.html", page.url), &out)?;
        }

        Ok(self.renderer.pages().len())
    }

    /// Generate individual post pages; posts are newest first
    fn generate_posts(&self) -> Result<usize> {
        let posts = self.renderer.posts();

        for (i, post) in posts.iter().enumerate() {
            let older = posts.get(i + 1);
            let newer = i.checked_sub(1).and_then(|j| posts.get(j));

            let mut out = Vec::new();
            self.renderer
                .render_post(post, older, newer, &mut out)
                .with_context(|| format!("Failed to render post {:?}", post.url))?;
            self.write(&format!("{}/index.html", post.url), &out)?;
        }

        Ok(posts.len())
    }

    /// Write `contents` to a URL path below the output directory
    fn write(&self, url_path: &str, contents: &[u8]) -> Result<()> {
        let output_path = output_path(&self.output_dir, url_path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }

        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Group names become one directory under `category/` or `tag/`
fn is_path_segment(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Strip the leading slash so URL paths never become absolute file paths
fn output_path(output_dir: &Path, url_path: &str) -> PathBuf {
    output_dir.join(url_path.trim_start_matches('/'))
}
