//! Template resolution - finds the templates a render call needs
//!
//! A theme is a directory `theme/<name>/` holding partial templates
//! (`_header.html`, `_footer.html`, ...) and up to four entry templates:
//! `frontpage.html`, `list.html`, `page.html` and `post.html`.

use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

use crate::error::{RenderError, Result};
use crate::helpers::Helpers;

/// Directory under the site root that holds the themes
pub const THEME_DIR: &str = "theme";

/// File name prefix marking a partial template
pub const PARTIAL_PREFIX: char = '_';

/// Extension shared by every template file
pub const TEMPLATE_EXT: &str = ".html";

/// The entry template a render call invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    FrontPage,
    List,
    Page,
    Post,
}

impl TemplateKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::FrontPage => "frontpage.html",
            TemplateKind::List => "list.html",
            TemplateKind::Page => "page.html",
            TemplateKind::Post => "post.html",
        }
    }

    /// Templates tried in order; the front page falls back to the list template
    fn candidates(&self) -> &'static [TemplateKind] {
        match self {
            TemplateKind::FrontPage => &[TemplateKind::FrontPage, TemplateKind::List],
            TemplateKind::List => &[TemplateKind::List],
            TemplateKind::Page => &[TemplateKind::Page],
            TemplateKind::Post => &[TemplateKind::Post],
        }
    }
}

/// Ordered template sources for one render: partials first, entry template last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub partials: Vec<PathBuf>,
    pub entry: PathBuf,
    /// Kind actually resolved (`List` when the front page fell back)
    pub kind: TemplateKind,
}

impl TemplateSet {
    /// Name the entry template is registered under
    pub fn entry_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Every template file, in registration order
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.partials
            .iter()
            .chain(std::iter::once(&self.entry))
            .map(PathBuf::as_path)
    }

    /// Parse the templates into a fresh Tera instance with the helpers registered.
    ///
    /// Each template is named after its file name so entry templates can
    /// `{% include "_header.html" %}`.
    pub fn compile(&self, helpers: &Helpers) -> Result<Tera> {
        let mut tera = Tera::default();

        // Bodies arrive as rendered HTML and must not be escaped again
        tera.autoescape_on(vec![]);
        helpers.register(&mut tera);

        let files: Vec<(&Path, Option<String>)> = self
            .sources()
            .map(|path| (path, template_name(path)))
            .collect();
        tera.add_template_files(files)?;

        Ok(tera)
    }
}

/// Locates theme templates on disk
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    theme_dir: PathBuf,
}

impl ThemeResolver {
    /// Resolver for `root/theme/<theme>`; an empty theme name is a config error
    pub fn new(root: &Path, theme: &str) -> Result<Self> {
        if theme.is_empty() {
            return Err(RenderError::Config(
                "no theme specified in configuration file".to_string(),
            ));
        }

        Ok(Self {
            theme_dir: root.join(THEME_DIR).join(theme),
        })
    }

    pub fn theme_dir(&self) -> &Path {
        &self.theme_dir
    }

    /// All partial templates in the theme directory, sorted by file name
    pub fn partials(&self) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(&self.theme_dir).map_err(|e| RenderError::io(&self.theme_dir, e))?;

        let mut partials = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RenderError::io(&self.theme_dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let is_partial = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(is_partial_name)
                .unwrap_or(false);
            if is_partial {
                partials.push(path);
            }
        }

        partials.sort();
        Ok(partials)
    }

    /// Resolve the template set for `kind`.
    ///
    /// Fails with `TemplateMissing` when no candidate template exists.
    pub fn resolve(&self, kind: TemplateKind) -> Result<TemplateSet> {
        let found = kind
            .candidates()
            .iter()
            .map(|candidate| (*candidate, self.theme_dir.join(candidate.file_name())))
            .find(|(_, path)| path.is_file());

        let Some((resolved, entry)) = found else {
            let names: Vec<&str> = kind.candidates().iter().map(|k| k.file_name()).collect();
            return Err(RenderError::TemplateMissing(format!(
                "{} not found in {:?}",
                names.join(" or "),
                self.theme_dir
            )));
        };

        let partials = self.partials()?;
        tracing::debug!(
            "Resolved {} with {} partial(s) from {:?}",
            resolved.file_name(),
            partials.len(),
            self.theme_dir
        );

        Ok(TemplateSet {
            partials,
            entry,
            kind: resolved,
        })
    }
}

fn is_partial_name(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX) && name.ends_with(TEMPLATE_EXT)
}

fn template_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
