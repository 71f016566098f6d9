//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Which syntax a metadata block was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    fn fence(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
            Format::Json => ";;;",
        }
    }
}

/// Split a leading metadata block off `content`.
///
/// Returns the block format, the raw metadata and the remaining body. Content
/// without a complete block comes back unchanged with no metadata.
pub fn split(content: &str) -> (Option<(Format, &str)>, &str) {
    let trimmed = content.trim_start_matches(['\u{feff}', '\n', '\r']);

    for format in [Format::Yaml, Format::Toml, Format::Json] {
        let fence = format.fence();
        let Some(rest) = trimmed.strip_prefix(fence) else {
            continue;
        };

        // The opening fence must sit on a line of its own
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            continue;
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == fence {
                let meta = &rest[..offset];
                let body = &rest[offset + line.len()..];
                return (Some((format, meta)), body.trim_start_matches(['\n', '\r']));
            }
            offset += line.len();
        }
    }

    (None, content)
}

/// Remove a leading metadata block, returning only the body
pub fn strip(content: &str) -> &str {
    split(content).1
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(alias = "description")]
    pub excerpt: Option<String>,
    #[serde(alias = "image")]
    pub thumbnail: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(alias = "date", alias = "created")]
    pub created_at: Option<String>,
    #[serde(alias = "updated")]
    pub updated_at: Option<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let (meta, body) = split(content);

        let fm = match meta {
            None => FrontMatter::default(),
            Some((_, raw)) if raw.trim().is_empty() => FrontMatter::default(),
            Some((Format::Yaml, raw)) => serde_yaml::from_str(raw)
                .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?,
            Some((Format::Toml, raw)) => Self::parse_toml(raw)?,
            Some((Format::Json, raw)) => serde_json::from_str(raw)
                .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?,
        };

        Ok((fm, body))
    }

    fn parse_toml(raw: &str) -> Result<Self> {
        let mut table: toml::Table = raw
            .parse()
            .map_err(|e| anyhow!("Failed to parse TOML front-matter: {}", e))?;

        // TOML has native datetimes; the date fields are read as text
        for (_, value) in table.iter_mut() {
            if let toml::Value::Datetime(dt) = value {
                let text = dt.to_string();
                *value = toml::Value::String(text);
            }
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| anyhow!("Invalid TOML front-matter: {}", e))
    }

    /// Parse the creation date string into a DateTime
    pub fn parse_created(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(parse_date_string)
    }

    /// Parse the updated date string into a DateTime
    pub fn parse_updated(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in various formats. Dates without an offset are UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
category: programming
tags:
  - rust
  - spook
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.category, Some("programming".to_string()));
        assert_eq!(fm.tags, vec!["rust", "spook"]);
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Toml Post"
tags = ["a", "b"]
date = 2024-03-01T08:00:00Z
+++
Body here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Toml Post".to_string()));
        assert_eq!(fm.tags, vec!["a", "b"]);
        let created = fm.parse_created().unwrap();
        assert_eq!(created.format("%Y-%m-%d").to_string(), "2024-03-01");
        assert_eq!(remaining, "Body here.\n");
    }

    #[test]
    fn test_parse_toml_native_dates() {
        let content = "+++\ndate = 2024-01-15T10:30:00Z\nupdated = 2024-02-01\n+++\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.created_at.as_deref(), Some("2024-01-15T10:30:00Z"));
        assert_eq!(
            fm.parse_created().unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
        assert_eq!(
            fm.parse_updated().unwrap().format("%Y-%m-%d").to_string(),
            "2024-02-01"
        );
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Json Post\", \"tags\": \"solo\"}\n;;;\nBody\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Json Post".to_string()));
        assert_eq!(fm.tags, vec!["solo"]);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_strip_without_metadata() {
        let content = "# Title\n\nJust markdown.";
        assert_eq!(strip(content), content);
    }

    #[test]
    fn test_strip_unterminated_block() {
        let content = "---\ntitle: nope\n\nNo closing fence.";
        assert_eq!(strip(content), content);
    }

    #[test]
    fn test_horizontal_rule_is_not_metadata() {
        // A "---" with text on the same line is not a fence
        let content = "--- not a fence\nbody\n---\n";
        assert_eq!(strip(content), content);
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date_string("2024/02/03").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-02-03");

        let dt = parse_date_string("2024-01-15T10:30:00+07:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7 * 3600);

        assert!(parse_date_string("yesterday").is_none());
    }
}
