//! Helper functions for templates
//!
//! These are the only computed helpers themes get: numeric addition,
//! timestamp formatting and sentence truncation. They are registered as Tera
//! filters on every template set a renderer compiles.

mod date;
mod text;

use std::collections::HashMap;
use tera::{Tera, Value};

use crate::content::frontmatter::parse_date_string;

pub use date::*;
pub use text::*;

/// Filter registry handed to the template engine at compile time
#[derive(Debug, Clone)]
pub struct Helpers {
    date_format: String,
}

impl Helpers {
    /// Create a new helpers instance; `date_format` is the `format_time` default
    pub fn new(date_format: &str) -> Self {
        let date_format = if date_format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            date_format
        };

        Self {
            date_format: date_format.to_string(),
        }
    }

    /// Register `add`, `format_time` and `limit_sentence` on `tera`
    pub fn register(&self, tera: &mut Tera) {
        tera.register_filter("add", add_filter);

        let date_format = self.date_format.clone();
        tera.register_filter(
            "format_time",
            move |value: &Value, args: &HashMap<String, Value>| {
                format_time_filter(value, args, &date_format)
            },
        );

        tera.register_filter("limit_sentence", limit_sentence_filter);
    }
}

impl Default for Helpers {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

/// Tera filter: `{{ current_page | add(n=1) }}`
fn add_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let rhs = args
        .get("n")
        .ok_or_else(|| tera::Error::msg("Filter `add` expected an arg called `n`"))?;

    if let (Some(a), Some(b)) = (value.as_i64(), rhs.as_i64()) {
        return a
            .checked_add(b)
            .map(Value::from)
            .ok_or_else(|| tera::Error::msg("Filter `add` overflowed"));
    }

    match (value.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => Ok(Value::from(a + b)),
        _ => Err(tera::Error::msg(format!(
            "Filter `add` needs numbers, got {} and {}",
            value, rhs
        ))),
    }
}

/// Tera filter: `{{ created_at | format_time(format="MMMM DD, YYYY") }}`
fn format_time_filter(
    value: &Value,
    args: &HashMap<String, Value>,
    default_format: &str,
) -> tera::Result<Value> {
    let s = tera::try_get_value!("format_time", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("format_time", "format", String, val),
        None => default_format.to_string(),
    };

    let date = parse_date_string(&s)
        .ok_or_else(|| tera::Error::msg(format!("Filter `format_time` can't parse `{}`", s)))?;

    format_date(&date, &format).map(Value::String).ok_or_else(|| {
        tera::Error::msg(format!("Filter `format_time` got bad format `{}`", format))
    })
}

/// Tera filter: `{{ excerpt | limit_sentence(count=2) }}`
fn limit_sentence_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("limit_sentence", "value", String, value);
    let count = match args.get("count") {
        Some(val) => tera::try_get_value!("limit_sentence", "count", usize, val),
        None => 1,
    };

    Ok(Value::String(limit_sentence(&s, count)))
}
