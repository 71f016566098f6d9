//! Content loader - discovers pages and posts under the site root
//!
//! Every page lives in `page/<name>/_index.md` and every post in
//! `post/<name>/_index.md`. Only the metadata is read here; bodies are
//! rendered later by the renderer.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::INDEX_FILE;
use super::{FrontMatter, Page, Post};

pub const PAGE_DIR: &str = "page";
pub const POST_DIR: &str = "post";

/// Loads content from the site root
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Load all pages from `page/`, ordered by directory name
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();

        for (name, dir) in self.content_dirs(PAGE_DIR) {
            match load_page(&name, &dir) {
                Ok(page) => pages.push(page),
                Err(e) => tracing::warn!("Failed to load page {:?}: {}", dir, e),
            }
        }

        Ok(pages)
    }

    /// Load all published posts from `post/`, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for (name, dir) in self.content_dirs(POST_DIR) {
            match load_post(&name, &dir) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping draft {:?}", dir),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", dir, e),
            }
        }

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts)
    }

    /// Directories directly under `root/<kind>` that hold an index file
    fn content_dirs(&self, kind: &str) -> Vec<(String, PathBuf)> {
        let base = self.root.join(kind);
        if !base.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&base)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir() && e.path().join(INDEX_FILE).is_file())
            .filter_map(|e| {
                let name = e.file_name().to_str()?.to_string();
                Some((name, e.into_path()))
            })
            .collect()
    }
}

fn read_front_matter(dir: &Path) -> Result<(FrontMatter, Option<DateTime<FixedOffset>>)> {
    let index = dir.join(INDEX_FILE);
    let content = fs::read_to_string(&index)?;
    let (fm, _) = FrontMatter::parse(&content)?;

    let modified = fs::metadata(&index)?
        .modified()
        .ok()
        .map(|t| DateTime::<Local>::from(t).fixed_offset());

    Ok((fm, modified))
}

fn load_page(name: &str, dir: &Path) -> Result<Page> {
    let (fm, _) = read_front_matter(dir)?;

    Ok(Page {
        path: dir.to_path_buf(),
        url: format!("/{}", name),
        title: fm.title.unwrap_or_else(|| name.to_string()),
        excerpt: fm.excerpt.unwrap_or_default(),
        thumbnail: fm.thumbnail.unwrap_or_default(),
    })
}

fn load_post(name: &str, dir: &Path) -> Result<Option<Post>> {
    let (fm, modified) = read_front_matter(dir)?;
    if fm.draft {
        return Ok(None);
    }

    let created_at = fm
        .parse_created()
        .or(modified)
        .unwrap_or_else(|| Local::now().fixed_offset());
    let updated_at = fm.parse_updated().unwrap_or(created_at);

    let mut post = Post::new(
        fm.title.unwrap_or_else(|| name.to_string()),
        format!("/{}/{}", POST_DIR, name),
        created_at,
    );
    post.path = dir.to_path_buf();
    post.updated_at = updated_at;
    post.excerpt = fm.excerpt.unwrap_or_default();
    post.thumbnail = fm.thumbnail.unwrap_or_default();
    post.author = fm.author.unwrap_or_default();
    post.category = fm.category.unwrap_or_default();
    post.tags = fm.tags;

    Ok(Some(post))
}
