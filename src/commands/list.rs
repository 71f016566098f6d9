//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::{collect_categories, collect_tags, filter_posts, ListKind, Post};
use crate::Spook;

/// List site content by type
pub fn run(spook: &Spook, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(&spook.base_dir);

    for line in lines(&loader, content_type)? {
        println!("{}", line);
    }

    Ok(())
}

fn lines(loader: &ContentLoader, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                lines.push(format!(
                    "  {} - {} [{}]",
                    post.created_at.format("%Y-%m-%d"),
                    post.title,
                    post.url
                ));
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            lines.push(format!("Pages ({}):", pages.len()));
            for page in pages {
                lines.push(format!("  {} [{}]", page.title, page.url));
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let tags = collect_tags(&posts);
            lines.push(format!("Tags ({}):", tags.len()));
            for tag in tags {
                lines.push(group_line(&posts, ListKind::Tag, &tag.name, &tag.path));
            }
        }
        "category" | "categories" => {
            let posts = loader.load_posts()?;
            let categories = collect_categories(&posts);
            lines.push(format!("Categories ({}):", categories.len()));
            for category in categories {
                lines.push(group_line(
                    &posts,
                    ListKind::Category,
                    &category.name,
                    &category.path,
                ));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, category",
                content_type
            );
        }
    }

    Ok(lines)
}

fn group_line(posts: &[Post], kind: ListKind, name: &str, path: &str) -> String {
    let count = filter_posts(posts, kind, name).len();
    format!("  {} ({}) [{}]", name, count, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader() -> (TempDir, ContentLoader) {
        let dir = TempDir::new().unwrap();
        for (name, front) in [
            ("a", "title: A\ndate: 2024-01-01\ntags: [rust, web]"),
            ("b", "title: B\ndate: 2024-02-01\ntags: rust\ncategory: news"),
        ] {
            let post = dir.path().join("post").join(name);
            fs::create_dir_all(&post).unwrap();
            fs::write(post.join("_index.md"), format!("---\n{}\n---\nBody\n", front)).unwrap();
        }
        let loader = ContentLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_list_posts() {
        let (_dir, loader) = loader();
        assert_eq!(
            lines(&loader, "posts").unwrap(),
            [
                "Posts (2):",
                "  2024-02-01 - B [/post/b]",
                "  2024-01-01 - A [/post/a]",
            ]
        );
    }

    #[test]
    fn test_list_groups() {
        let (_dir, loader) = loader();
        assert_eq!(
            lines(&loader, "tag").unwrap(),
            ["Tags (2):", "  rust (2) [/tag/rust]", "  web (1) [/tag/web]"]
        );
        assert_eq!(
            lines(&loader, "categories").unwrap(),
            [
                "Categories (2):",
                "   (1) [/category/uncategorized]",
                "  news (1) [/category/news]",
            ]
        );
    }

    #[test]
    fn test_unknown_type() {
        let (_dir, loader) = loader();
        assert!(lines(&loader, "route").is_err());
    }
}
