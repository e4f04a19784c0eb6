//! Error types shared by the content core

use thiserror::Error;

pub type Result<T, E = BlogError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// Transport, status or decoding failure talking to the content repository
    #[error("Repository error: {0}")]
    Repository(String),

    /// `load_more` was called on a page whose cursor is exhausted
    #[error("No more pages to load")]
    NoMorePages,

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Malformed document {id}: missing field `{field}`")]
    MalformedDocument { id: String, field: &'static str },
}

impl BlogError {
    pub fn malformed(id: impl Into<String>, field: &'static str) -> Self {
        Self::MalformedDocument {
            id: id.into(),
            field,
        }
    }
}

impl From<reqwest::Error> for BlogError {
    fn from(err: reqwest::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

impl From<serde_json::Error> for BlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Repository(format!("invalid response body: {}", err))
    }
}
