//! Projection of repository documents into posts
//!
//! Repository field names stop here: the rest of the crate only sees
//! [`Post`] and [`PostSummary`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Post, PostSummary, Section, TextBlock};
use crate::error::{BlogError, Result};
use crate::helpers::parse_timestamp;
use crate::repository::RawDocument;

/// Data fields a listing needs, relative to the document type
pub const SUMMARY_FIELDS: [&str; 3] = ["title", "subtitle", "author"];

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    heading: Value,
    #[serde(default)]
    body: Vec<TextBlock>,
}

/// Map a full document into a [`Post`]
pub fn project(document: &RawDocument) -> Result<Post> {
    let summary = project_summary(document)?;

    let content = document
        .data
        .get("content")
        .filter(|value| !value.is_null())
        .ok_or_else(|| BlogError::malformed(&document.id, "content"))?;
    let sections: Vec<RawSection> = serde_json::from_value(content.clone())
        .map_err(|_| BlogError::malformed(&document.id, "content"))?;

    let content = sections
        .into_iter()
        .map(|section| Section {
            heading: text_value(&section.heading).unwrap_or_default(),
            body: section.body,
        })
        .collect();

    let banner = document
        .data
        .get("banner")
        .and_then(|banner| banner.get("url"))
        .and_then(Value::as_str)
        .map(String::from);

    Ok(Post {
        id: summary.id,
        slug: summary.slug,
        first_published_at: summary.first_published_at,
        last_published_at: timestamp(
            &document.id,
            document.last_publication_date.as_deref(),
            "last_publication_date",
        )?,
        title: summary.title,
        subtitle: summary.subtitle,
        author: summary.author,
        banner,
        content,
    })
}

/// Map a listing document into a [`PostSummary`]; body content is not required
pub fn project_summary(document: &RawDocument) -> Result<PostSummary> {
    let slug = document
        .uid
        .clone()
        .ok_or_else(|| BlogError::malformed(&document.id, "uid"))?;

    Ok(PostSummary {
        id: document.id.clone(),
        slug,
        title: required_text(document, "title")?,
        subtitle: text_field(&document.data, "subtitle").unwrap_or_default(),
        author: required_text(document, "author")?,
        first_published_at: timestamp(
            &document.id,
            document.first_publication_date.as_deref(),
            "first_publication_date",
        )?,
    })
}

fn required_text(document: &RawDocument, field: &'static str) -> Result<String> {
    text_field(&document.data, field).ok_or_else(|| BlogError::malformed(&document.id, field))
}

fn timestamp(id: &str, value: Option<&str>, field: &'static str) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| parse_timestamp(raw).ok_or_else(|| BlogError::malformed(id, field)))
        .transpose()
}

fn text_field(data: &Map<String, Value>, field: &str) -> Option<String> {
    data.get(field).and_then(text_value)
}

/// Key text fields are plain strings; title fields may be rich text
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(blocks) => {
            let texts: Vec<_> = blocks
                .iter()
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect();
            Some(texts.join(" "))
        }
        _ => None,
    }
}
