//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::Write;

/// Default format for `format_time`
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> Some("2024-01-15")
/// ```
///
/// Returns `None` when the format holds a specifier chrono doesn't know.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    let items: Vec<Item> = StrftimeItems::new(&chrono_format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family so "MMMM" wins over "MM"
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
        ("SSS", "%3f"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
