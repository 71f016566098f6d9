//! Output pipeline - executes a template and optionally minifies the result

use minify_html::Cfg;
use serde::Serialize;
use std::io::Write;
use tera::{Context, Tera};

use crate::error::Result;

/// Runs the entry template against a view model and writes the result
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputPipeline {
    minify: bool,
}

impl OutputPipeline {
    pub fn new(minify: bool) -> Self {
        Self { minify }
    }

    /// Render `name` into a buffer, minify if enabled, then write to `dst`.
    ///
    /// Nothing reaches `dst` unless the whole render succeeded.
    pub fn execute<S, W>(&self, tera: &Tera, name: &str, view: &S, dst: &mut W) -> Result<()>
    where
        S: Serialize,
        W: Write + ?Sized,
    {
        let context = Context::from_serialize(view)?;
        let rendered = tera.render(name, &context)?;

        if self.minify {
            let minified = minify_html::minify(rendered.as_bytes(), &conservative_cfg());
            tracing::debug!(
                "Minified {} from {} to {} bytes",
                name,
                rendered.len(),
                minified.len()
            );
            dst.write_all(&minified)?;
        } else {
            dst.write_all(rendered.as_bytes())?;
        }

        Ok(())
    }
}

/// Minifier settings that keep end tags, `<html>`/`<head>` opening tags,
/// `type="text"` on inputs and the doctype. minify-html still drops other
/// default attribute values (`type="text/javascript"`, `method="get"`) and
/// collapses whitespace in text; `<pre>` content is left alone.
fn conservative_cfg() -> Cfg {
    let mut cfg = Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_input_type_text_attr = true;
    cfg.keep_spaces_between_attributes = true;
    cfg.do_not_minify_doctype = true;
    cfg.ensure_spec_compliant_unquoted_attribute_values = true;
    cfg
}
