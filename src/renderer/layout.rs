//! View models handed to the templates
//!
//! Every view carries its own copy of the `Layout` fields; serde flattens them
//! so templates see `website_title`, `content_title`, `pages`, ... next to the
//! view-specific fields.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Group, ListKind, Page, Post};

/// Fields shared by every rendered view
#[derive(Debug, Clone, Serialize)]
pub struct Layout<'a> {
    pub website_title: &'a str,
    pub website_owner: &'a str,
    pub website_desc: &'a str,
    pub content_title: &'a str,
    pub content_desc: &'a str,
    pub content_author: &'a str,
    /// Every page, for navigation menus
    pub pages: &'a [Page],
}

/// View for `list.html` (and `frontpage.html`)
#[derive(Debug, Clone, Serialize)]
pub struct ListView<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub kind: ListKind,
    pub path: String,
    pub current_page: usize,
    pub max_page: usize,
    pub posts: Vec<&'a Post>,
    pub tags: &'a [Group],
    pub categories: &'a [Group],
}

/// View for `page.html`
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub thumbnail: &'a str,
    pub html: String,
}

/// View for `post.html`
#[derive(Debug, Clone, Serialize)]
pub struct PostView<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub created_at: String,
    pub updated_at: String,
    pub category: Group,
    pub tags: Vec<Group>,
    pub thumbnail: &'a str,
    pub html: String,
    pub older: Option<&'a Post>,
    pub newer: Option<&'a Post>,
}

/// One page window of a list, as computed by the paginator
pub struct ListWindow<'a> {
    pub kind: ListKind,
    pub group: &'a str,
    pub current_page: usize,
    pub max_page: usize,
    pub posts: Vec<&'a Post>,
}

/// Assembles view models from the site config and content lists
pub struct ViewBuilder<'a> {
    config: &'a SiteConfig,
    pages: &'a [Page],
}

impl<'a> ViewBuilder<'a> {
    pub fn new(config: &'a SiteConfig, pages: &'a [Page]) -> Self {
        Self { config, pages }
    }

    /// Base layout; only the content fields change between views
    pub fn layout(&self, title: &'a str, desc: &'a str, author: &'a str) -> Layout<'a> {
        let config = self.config;
        Layout {
            website_title: &config.title,
            website_owner: &config.owner,
            website_desc: &config.description,
            content_title: title,
            content_desc: desc,
            content_author: author,
            pages: self.pages,
        }
    }

    pub fn list(
        &self,
        window: ListWindow<'a>,
        tags: &'a [Group],
        categories: &'a [Group],
    ) -> ListView<'a> {
        let config = self.config;
        let title = match window.kind {
            ListKind::Default => config.title.as_str(),
            ListKind::Category | ListKind::Tag => window.group,
        };

        ListView {
            layout: self.layout(title, &config.description, &config.owner),
            kind: window.kind,
            path: window.kind.path(window.group),
            current_page: window.current_page,
            max_page: window.max_page,
            posts: window.posts,
            tags,
            categories,
        }
    }

    pub fn page(&self, page: &'a Page, html: String) -> PageView<'a> {
        let config = self.config;
        PageView {
            layout: self.layout(&page.title, &page.excerpt, &config.owner),
            thumbnail: &page.thumbnail,
            html,
        }
    }

    /// Post view. A post without an author is credited to the site owner.
    pub fn post(
        &self,
        post: &'a Post,
        html: String,
        older: Option<&'a Post>,
        newer: Option<&'a Post>,
    ) -> PostView<'a> {
        let config = self.config;
        let mut tags: Vec<Group> = post.tags.iter().map(|tag| Group::tag(tag)).collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        PostView {
            layout: self.layout(&post.title, &post.excerpt, post.author_or(&config.owner)),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            category: Group::category(&post.category),
            tags,
            thumbnail: &post.thumbnail,
            html,
            older,
            newer,
        }
    }
}
