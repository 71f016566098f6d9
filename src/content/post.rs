//! Post, Page and Group models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Group name that stands in for the empty category in URLs
pub const UNCATEGORIZED: &str = "uncategorized";

/// A standalone page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Body file (or the directory holding `_index.md`)
    pub path: PathBuf,

    /// URL path of the rendered page
    pub url: String,

    pub title: String,

    /// Short summary shown in listings and meta tags
    pub excerpt: String,

    pub thumbnail: String,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Body file (or the directory holding `_index.md`)
    pub path: PathBuf,

    /// URL path of the rendered post
    pub url: String,

    pub title: String,

    pub excerpt: String,

    pub thumbnail: String,

    /// Empty when the post didn't name one; the site owner is used instead
    pub author: String,

    /// Empty means uncategorized
    pub category: String,

    pub tags: Vec<String>,

    pub created_at: DateTime<FixedOffset>,

    pub updated_at: DateTime<FixedOffset>,
}

impl Post {
    /// Create a post with the fields every post needs
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            path: PathBuf::new(),
            url: url.into(),
            title: title.into(),
            excerpt: String::new(),
            thumbnail: String::new(),
            author: String::new(),
            category: String::new(),
            tags: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Author to display, falling back to the site owner
    pub fn author_or<'a>(&'a self, owner: &'a str) -> &'a str {
        if self.author.is_empty() {
            owner
        } else {
            &self.author
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A category or tag, ready to be linked from a template
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub path: String,
}

impl Group {
    /// Category group. The empty category links to `/category/uncategorized`.
    pub fn category(name: &str) -> Self {
        let slug = if name.is_empty() { UNCATEGORIZED } else { name };
        Self {
            name: name.to_string(),
            path: format!("/category/{}", slug),
        }
    }

    pub fn tag(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: format!("/tag/{}", name),
        }
    }
}

/// All distinct categories used by `posts`, sorted by name
pub fn collect_categories(posts: &[Post]) -> Vec<Group> {
    let mut names: Vec<&str> = posts.iter().map(|p| p.category.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names.into_iter().map(Group::category).collect()
}

/// All distinct tags used by `posts`, sorted by name
pub fn collect_tags(posts: &[Post]) -> Vec<Group> {
    let mut names: Vec<&str> = posts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    names.sort_unstable();
    names.dedup();
    names.into_iter().map(Group::tag).collect()
}
