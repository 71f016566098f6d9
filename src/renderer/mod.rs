//! Renderer - turns content entries into HTML documents using the site theme
//!
//! One entry point per content kind. Each call validates the configuration,
//! resolves the theme templates, builds the view model and runs the output
//! pipeline; nothing is kept between calls.

mod layout;
mod output;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::{
    collect_categories, collect_tags, filter_posts, Group, ListKind, MarkdownRenderer, Page,
    Paginator, Post,
};
use crate::error::Result;
use crate::helpers::Helpers;
use crate::theme::{TemplateKind, TemplateSet, ThemeResolver};

pub use layout::{Layout, ListView, ListWindow, PageView, PostView, ViewBuilder};
pub use output::OutputPipeline;

/// Renders the static HTML documents of a site
pub struct Renderer {
    config: SiteConfig,
    root_dir: PathBuf,
    pages: Vec<Page>,
    posts: Vec<Post>,
    tags: Vec<Group>,
    categories: Vec<Group>,
    helpers: Helpers,
    markdown: MarkdownRenderer,
    output: OutputPipeline,
}

impl Renderer {
    /// Create a renderer for the site at `root_dir`.
    ///
    /// `posts` should already be in display order (newest first).
    pub fn new<P: AsRef<Path>>(
        config: SiteConfig,
        root_dir: P,
        pages: Vec<Page>,
        posts: Vec<Post>,
    ) -> Self {
        let tags = collect_tags(&posts);
        let categories = collect_categories(&posts);
        let helpers = Helpers::new(&config.date_format);
        let output = OutputPipeline::new(config.minify);

        Self {
            config,
            root_dir: root_dir.as_ref().to_path_buf(),
            pages,
            posts,
            tags,
            categories,
            helpers,
            markdown: MarkdownRenderer::new(),
            output,
        }
    }

    /// Override the config's `minify` setting
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.output = OutputPipeline::new(minify);
        self
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn tags(&self) -> &[Group] {
        &self.tags
    }

    pub fn categories(&self) -> &[Group] {
        &self.categories
    }

    fn paginator(&self) -> Paginator {
        Paginator::new(self.config.pagination)
    }

    fn views(&self) -> ViewBuilder<'_> {
        ViewBuilder::new(&self.config, &self.pages)
    }

    /// Validate the config and resolve the templates for `kind`
    fn templates(&self, kind: TemplateKind) -> Result<TemplateSet> {
        self.config.validate()?;
        ThemeResolver::new(&self.root_dir, &self.config.theme)?.resolve(kind)
    }

    /// Compile `templates` and run the output pipeline for `view`
    fn execute<S, W>(&self, templates: &TemplateSet, view: &S, dst: &mut W) -> Result<()>
    where
        S: serde::Serialize,
        W: Write + ?Sized,
    {
        let tera = templates.compile(&self.helpers)?;
        self.output.execute(&tera, templates.entry_name(), view, dst)
    }

    /// Render the front page: the first page of all posts.
    ///
    /// Uses `frontpage.html`, falling back to `list.html`.
    pub fn render_front_page<W: Write + ?Sized>(&self, dst: &mut W) -> Result<()> {
        let templates = self.templates(TemplateKind::FrontPage)?;

        let paginator = self.paginator();
        let posts: Vec<&Post> = paginator.window(&self.posts, 1).iter().collect();
        let window = ListWindow {
            kind: ListKind::Default,
            group: "",
            current_page: 1,
            max_page: paginator.max_page(self.posts.len()),
            posts,
        };

        let view = self.views().list(window, &self.tags, &self.categories);
        tracing::debug!("Rendering front page with {}", templates.entry_name());
        self.execute(&templates, &view, dst)
    }

    /// Render one page of a post list.
    ///
    /// Returns the number of posts in the filtered list, or `None` when
    /// `page` is past the last page; nothing is written in that case. Page
    /// numbers below 1 are treated as 1.
    pub fn render_list<W: Write + ?Sized>(
        &self,
        kind: ListKind,
        group: &str,
        page: i64,
        dst: &mut W,
    ) -> Result<Option<usize>> {
        let templates = self.templates(TemplateKind::List)?;

        let filtered = filter_posts(&self.posts, kind, group);
        let paginator = self.paginator();
        let Some(current_page) = paginator.resolve(page, filtered.len()) else {
            tracing::debug!("No page {} for {:?} list {:?}", page, kind, group);
            return Ok(None);
        };

        let window = ListWindow {
            kind,
            group,
            current_page,
            max_page: paginator.max_page(filtered.len()),
            posts: paginator.window(&filtered, current_page).to_vec(),
        };

        let view = self.views().list(window, &self.tags, &self.categories);
        tracing::debug!("Rendering {} page {} of {:?}", view.path, current_page, kind);
        self.execute(&templates, &view, dst)?;

        Ok(Some(filtered.len()))
    }

    /// Render a standalone page
    pub fn render_page<W: Write + ?Sized>(&self, page: &Page, dst: &mut W) -> Result<()> {
        let templates = self.templates(TemplateKind::Page)?;

        let html = self.markdown.render_file(&page.path)?;
        let view = self.views().page(page, html);

        tracing::debug!("Rendering page {:?}", page.url);
        self.execute(&templates, &view, dst)
    }

    /// Render a post with links to its chronological neighbours
    pub fn render_post<W: Write + ?Sized>(
        &self,
        post: &Post,
        older: Option<&Post>,
        newer: Option<&Post>,
        dst: &mut W,
    ) -> Result<()> {
        let templates = self.templates(TemplateKind::Post)?;

        let html = self.markdown.render_file(&post.path)?;
        let view = self.views().post(post, html, older, newer);

        tracing::debug!("Rendering post {:?}", post.url);
        self.execute(&templates, &view, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use chrono::{FixedOffset, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    const LIST: &str = r#"{% include "_header.html" %}
<h1>{{ content_title }}</h1>
<p class="pager">{{ path }} {{ current_page }}/{{ max_page }} next={{ current_page | add(n=1) }}</p>
<ul>{% for post in posts %}<li>{{ post.title }}</li>{% endfor %}</ul>
<nav>{% for tag in tags %}[{{ tag.name }}]{% endfor %}</nav>
"#;

    const POST: &str = r#"{% include "_header.html" %}
<h1>{{ content_title }}</h1>
<time>{{ created_at | format_time }}</time>
<span class="author">{{ content_author }}</span>
<a class="category" href="{{ category.path }}">{{ category.name }}</a>
{% for tag in tags %}<a class="tag" href="{{ tag.path }}">{{ tag.name }}</a>{% endfor %}
<!-- body -->
<article>{{ html }}</article>
{% if older %}<a class="older" href="{{ older.url }}">{{ older.title }}</a>{% endif %}
{% if newer %}<a class="newer" href="{{ newer.url }}">{{ newer.title }}</a>{% endif %}
"#;

    const PAGE: &str = r#"{% include "_header.html" %}
<h1>{{ content_title }}</h1>
<span class="author">{{ content_author }}</span>
<article>{{ html }}</article>
"#;

    struct Site {
        root: TempDir,
    }

    impl Site {
        fn new() -> Self {
            let site = Site {
                root: TempDir::new().unwrap(),
            };
            site.theme_file("_header.html", "<header>{{ website_title }}</header>");
            site.theme_file("list.html", LIST);
            site.theme_file("post.html", POST);
            site.theme_file("page.html", PAGE);
            site
        }

        fn path(&self) -> &Path {
            self.root.path()
        }

        fn theme_file(&self, name: &str, content: &str) {
            let dir = self.path().join("theme").join("plain");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(name), content).unwrap();
        }

        fn body(&self, name: &str, markdown: &str) -> PathBuf {
            let dir = self.path().join("post").join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("_index.md"), markdown).unwrap();
            dir
        }
    }

    fn config(pagination: usize) -> SiteConfig {
        SiteConfig {
            theme: "plain".to_string(),
            title: "Spooky".to_string(),
            owner: "Owner".to_string(),
            pagination,
            ..Default::default()
        }
    }

    fn post(title: &str, day: u32) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, day, 9, 0, 0)
            .unwrap();
        Post::new(title, format!("/post/{}", title.to_lowercase()), date)
    }

    /// Posts A, B, C in display order
    fn abc() -> Vec<Post> {
        vec![post("A", 3), post("B", 2), post("C", 1)]
    }

    fn render_list(
        renderer: &Renderer,
        kind: ListKind,
        group: &str,
        page: i64,
    ) -> (Option<usize>, String) {
        let mut out = Vec::new();
        let count = renderer.render_list(kind, group, page, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_pagination() {
        let site = Site::new();
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), abc());

        let (count, html) = render_list(&renderer, ListKind::Default, "", 1);
        assert_eq!(count, Some(3));
        assert!(html.contains("<li>A</li><li>B</li></ul>"));
        assert!(html.contains("/posts 1/2 next=2"));
        assert!(html.contains("<header>Spooky</header>"));
        assert!(html.contains("<h1>Spooky</h1>"));

        let (count, html) = render_list(&renderer, ListKind::Default, "", 2);
        assert_eq!(count, Some(3));
        assert!(html.contains("<ul><li>C</li></ul>"));
        assert!(html.contains("/posts 2/2"));

        let (count, html) = render_list(&renderer, ListKind::Default, "", 3);
        assert_eq!(count, None);
        assert!(html.is_empty());
    }

    #[test]
    fn test_list_low_page_numbers_show_first_page() {
        let site = Site::new();
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), abc());

        let (_, first) = render_list(&renderer, ListKind::Default, "", 1);
        for page in [0, -5] {
            let (count, html) = render_list(&renderer, ListKind::Default, "", page);
            assert_eq!(count, Some(3));
            assert_eq!(html, first);
        }
    }

    #[test]
    fn test_category_and_tag_lists() {
        let site = Site::new();
        let mut posts = abc();
        posts[0].category = "news".to_string();
        posts[1].tags = vec!["rust".to_string()];
        posts[2].tags = vec!["rust".to_string(), "web".to_string()];
        let renderer = Renderer::new(config(10), site.path(), Vec::new(), posts);

        let (count, html) = render_list(&renderer, ListKind::Category, "news", 1);
        assert_eq!(count, Some(1));
        assert!(html.contains("<h1>news</h1>"));
        assert!(html.contains("/category/news 1/1"));
        assert!(html.contains("<ul><li>A</li></ul>"));

        let (count, html) = render_list(&renderer, ListKind::Category, "uncategorized", 1);
        assert_eq!(count, Some(2));
        assert!(html.contains("/category/uncategorized 1/1"));
        assert!(html.contains("<ul><li>B</li><li>C</li></ul>"));

        let (count, html) = render_list(&renderer, ListKind::Tag, "rust", 1);
        assert_eq!(count, Some(2));
        assert!(html.contains("/tag/rust 1/1"));
        assert!(html.contains("[rust][web]"));

        let (count, html) = render_list(&renderer, ListKind::Tag, "missing", 1);
        assert_eq!(count, None);
        assert!(html.is_empty());
    }

    #[test]
    fn test_front_page_falls_back_to_list() {
        let site = Site::new();
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), abc());

        let mut front = Vec::new();
        renderer.render_front_page(&mut front).unwrap();
        let (_, list) = render_list(&renderer, ListKind::Default, "", 1);
        assert_eq!(String::from_utf8(front).unwrap(), list);
    }

    #[test]
    fn test_front_page_prefers_its_own_template() {
        let site = Site::new();
        site.theme_file(
            "frontpage.html",
            "<main>{% for post in posts %}{{ post.title }};{% endfor %}{{ max_page }}</main>",
        );
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), abc());

        let mut out = Vec::new();
        renderer.render_front_page(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<main>A;B;2</main>");
    }

    #[test]
    fn test_render_post() {
        let site = Site::new();
        let mut posts = abc();
        posts[1].path = site.body("b", "---\ntitle: B\n---\n# Heading\n\nBody of **B**.\n");
        posts[1].tags = vec!["zeta".to_string(), "alpha".to_string()];
        let renderer = Renderer::new(config(10), site.path(), Vec::new(), posts.clone());

        let mut out = Vec::new();
        renderer
            .render_post(&posts[1], Some(&posts[2]), Some(&posts[0]), &mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<h1>B</h1>"));
        assert!(html.contains("<time>2024-03-02</time>"));
        assert!(html.contains(r#"<span class="author">Owner</span>"#));
        assert!(html.contains(r#"href="/category/uncategorized""#));
        let alpha = html.find(r#"href="/tag/alpha""#).unwrap();
        let zeta = html.find(r#"href="/tag/zeta""#).unwrap();
        assert!(alpha < zeta);
        assert!(html.contains("<strong>B</strong>"));
        assert!(!html.contains("title: B"));
        assert!(html.contains(r#"<a class="older" href="/post/c">C</a>"#));
        assert!(html.contains(r#"<a class="newer" href="/post/a">A</a>"#));
    }

    #[test]
    fn test_render_post_without_neighbours() {
        let site = Site::new();
        let mut p = post("Only", 1);
        p.author = "Guest".to_string();
        p.path = site.body("only", "Just text.\n");
        let renderer = Renderer::new(config(10), site.path(), Vec::new(), vec![p.clone()]);

        let mut out = Vec::new();
        renderer.render_post(&p, None, None, &mut out).unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains(r#"<span class="author">Guest</span>"#));
        assert!(!html.contains("class=\"older\""));
        assert!(!html.contains("class=\"newer\""));
    }

    #[test]
    fn test_render_page() {
        let site = Site::new();
        let dir = site.path().join("page").join("about");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("_index.md"), "+++\ntitle = \"About\"\n+++\nHello *there*.\n").unwrap();

        let page = Page {
            path: dir,
            url: "/about".to_string(),
            title: "About".to_string(),
            ..Default::default()
        };
        let renderer = Renderer::new(config(10), site.path(), vec![page.clone()], Vec::new());

        let mut out = Vec::new();
        renderer.render_page(&page, &mut out).unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<h1>About</h1>"));
        assert!(html.contains(r#"<span class="author">Owner</span>"#));
        assert!(html.contains("<em>there</em>"));
    }

    #[test]
    fn test_repeat_renders_are_identical() {
        let site = Site::new();
        let mut posts = abc();
        posts[0].path = site.body("a", "Text with `code`.\n\n## Sub\n");
        posts[0].tags = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), posts.clone());

        let render = || {
            let mut out = Vec::new();
            renderer
                .render_post(&posts[0], Some(&posts[1]), None, &mut out)
                .unwrap();
            out
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_minified_post() {
        let site = Site::new();
        let mut p = post("Min", 1);
        p.path = site.body("min", "Some   text.\n");

        let plain = Renderer::new(config(10), site.path(), Vec::new(), vec![p.clone()]);
        let minified =
            Renderer::new(config(10), site.path(), Vec::new(), vec![p.clone()]).with_minify(true);

        let mut a = Vec::new();
        plain.render_post(&p, None, None, &mut a).unwrap();
        let mut b = Vec::new();
        minified.render_post(&p, None, None, &mut b).unwrap();

        let a = String::from_utf8(a).unwrap();
        let b = String::from_utf8(b).unwrap();
        assert!(a.contains("<!-- body -->"));
        assert!(!b.contains("<!-- body -->"));
        assert!(b.len() < a.len());
        assert!(b.contains("</article>"));
    }

    #[test]
    fn test_empty_theme_is_config_error() {
        let site = Site::new();
        let mut config = config(2);
        config.theme.clear();
        let renderer = Renderer::new(config, site.path(), Vec::new(), abc());

        let mut out = Vec::new();
        let err = renderer.render_front_page(&mut out).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_pagination_is_config_error() {
        let site = Site::new();
        let renderer = Renderer::new(config(0), site.path(), Vec::new(), abc());

        let mut out = Vec::new();
        let err = renderer
            .render_list(ListKind::Default, "", 1, &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_missing_template() {
        let site = Site::new();
        fs::remove_file(site.path().join("theme/plain/post.html")).unwrap();
        let posts = abc();
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), posts.clone());

        let mut out = Vec::new();
        let err = renderer
            .render_post(&posts[0], None, None, &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateMissing(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_body_is_io_error() {
        let site = Site::new();
        let mut p = post("Ghost", 1);
        p.path = site.path().join("post").join("ghost");
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), vec![p.clone()]);

        let mut out = Vec::new();
        let err = renderer.render_post(&p, None, None, &mut out).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_collected_groups() {
        let site = Site::new();
        let mut posts = abc();
        posts[0].tags = vec!["web".to_string(), "rust".to_string()];
        posts[1].tags = vec!["rust".to_string()];
        posts[1].category = "news".to_string();
        let renderer = Renderer::new(config(2), site.path(), Vec::new(), posts);

        let tags: Vec<&str> = renderer.tags().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(tags, ["rust", "web"]);
        let categories: Vec<&str> = renderer
            .categories()
            .iter()
            .map(|g| g.path.as_str())
            .collect();
        assert_eq!(categories, ["/category/uncategorized", "/category/news"]);
    }
}
