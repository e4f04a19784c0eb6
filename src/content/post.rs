//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post, normalized from a repository document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier assigned by the repository
    pub id: String,

    /// URL-friendly unique name (the document uid)
    pub slug: String,

    /// First publication date, `None` while still a draft
    pub first_published_at: Option<DateTime<Utc>>,

    /// Date of the most recent publication
    pub last_published_at: Option<DateTime<Utc>>,

    pub title: String,
    pub subtitle: String,
    pub author: String,

    /// Banner image URL
    pub banner: Option<String>,

    /// Body sections, in repository order
    pub content: Vec<Section>,
}

/// Lightweight projection used by listings and navigation links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub first_published_at: Option<DateTime<Utc>>,
}

/// A headed group of rich-text blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: Vec<TextBlock>,
}

/// One rich-text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Plain text of the block; empty for image and embed blocks
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Inline formatting markers, passed through untouched
    #[serde(default)]
    pub spans: Vec<serde_json::Value>,
}

/// Structural kind of a rich-text block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    Preformatted,
    ListItem,
    OrderedListItem,
    Other(String),
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "paragraph" => Self::Paragraph,
            "preformatted" => Self::Preformatted,
            "list-item" => Self::ListItem,
            "o-list-item" => Self::OrderedListItem,
            "heading1" => Self::Heading(1),
            "heading2" => Self::Heading(2),
            "heading3" => Self::Heading(3),
            "heading4" => Self::Heading(4),
            "heading5" => Self::Heading(5),
            "heading6" => Self::Heading(6),
            _ => Self::Other(name),
        }
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Paragraph => "paragraph".to_string(),
            BlockType::Heading(level) => format!("heading{}", level),
            BlockType::Preformatted => "preformatted".to_string(),
            BlockType::ListItem => "list-item".to_string(),
            BlockType::OrderedListItem => "o-list-item".to_string(),
            BlockType::Other(name) => name,
        }
    }
}
