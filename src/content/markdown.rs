//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::frontmatter;
use crate::error::{RenderError, Result};

/// Body file looked up when a content path names a directory
pub const INDEX_FILE: &str = "_index.md";

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Create with a specific syntect highlighting theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Read a body file, strip its front matter and render it to HTML
    pub fn render_file(&self, path: &Path) -> Result<String> {
        let path = if path.is_dir() {
            path.join(INDEX_FILE)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&path).map_err(|e| RenderError::io(&path, e))?;
        tracing::debug!("Rendering markdown from {:?}", path);

        Ok(self.render(frontmatter::strip(&content)))
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<Vec<Event>> = None;
        let mut heading_ids = HeadingIds::default();
        let mut code_block: Option<Option<String>> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(lang);
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code_block_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some(vec![event]);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(mut buffered) = heading.take() {
                        buffered.push(event);
                        events.extend(heading_ids.assign(buffered));
                    }
                }
                _ => match heading.as_mut() {
                    Some(buffered) => buffered.push(event),
                    None => events.push(event),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out unique heading ids within one document
#[derive(Default)]
struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    /// Give a buffered heading (start, inline events, end) an id unless it already has one
    fn assign<'a>(&mut self, mut buffered: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let text: String = buffered
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) | Event::Code(text) => Some(&**text),
                _ => None,
            })
            .collect();

        if let Some(Event::Start(Tag::Heading { id, .. })) = buffered.first_mut() {
            if let Some(existing) = id.as_ref() {
                *self.seen.entry(existing.to_string()).or_insert(0) += 1;
            } else {
                *id = Some(CowStr::from(self.unique(&text)));
            }
        }

        buffered
    }

    fn unique(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        id
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
