//! Content module - pages, posts, front matter, markdown and list filtering

mod filter;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use filter::{filter_posts, ListKind, Paginator};
pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, INDEX_FILE};
pub use post::{collect_categories, collect_tags, Group, Page, Post, UNCATEGORIZED};
