//! Post filtering and pagination for list pages

use serde::Serialize;

use super::post::{Post, UNCATEGORIZED};

/// Which posts a list page shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Every post
    #[default]
    Default,
    /// Posts in one category
    Category,
    /// Posts carrying one tag
    Tag,
}

impl ListKind {
    /// Canonical URL path of the list for `group`
    pub fn path(&self, group: &str) -> String {
        match self {
            ListKind::Default => "/posts".to_string(),
            ListKind::Category if group.is_empty() => format!("/category/{}", UNCATEGORIZED),
            ListKind::Category => format!("/category/{}", group),
            ListKind::Tag => format!("/tag/{}", group),
        }
    }
}

/// Select the posts a list of `kind` shows for `group`.
///
/// The category name `uncategorized` selects posts with an empty category.
pub fn filter_posts<'a>(posts: &'a [Post], kind: ListKind, group: &str) -> Vec<&'a Post> {
    match kind {
        ListKind::Default => posts.iter().collect(),
        ListKind::Category => {
            let category = if group == UNCATEGORIZED { "" } else { group };
            posts.iter().filter(|p| p.category == category).collect()
        }
        ListKind::Tag => posts.iter().filter(|p| p.has_tag(group)).collect(),
    }
}

/// Fixed-size page arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// `page_size` must be at least 1; `SiteConfig::validate` guarantees it.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Number of pages needed for `total` items; zero items need zero pages
    pub fn max_page(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Clamp a requested page number to a 1-based page, or `None` past the last page
    pub fn resolve(&self, requested: i64, total: usize) -> Option<usize> {
        let page = usize::try_from(requested.max(1)).unwrap_or(usize::MAX);
        (page <= self.max_page(total)).then_some(page)
    }

    /// The items shown on `page` (1-based), clipped to the list length
    pub fn window<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
