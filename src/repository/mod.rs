//! Content repository - the headless CMS the blog reads from
//!
//! The core talks to the CMS only through [`ContentRepository::query`].
//! Two implementations ship with the crate: [`PrismicRepository`] over HTTP
//! and [`MemoryRepository`] backed by a list of documents held in process.

mod memory;
mod prismic;

pub use memory::MemoryRepository;
pub use prismic::PrismicRepository;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Page size used when a query does not set one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size the repository accepts
pub const MAX_PAGE_SIZE: usize = 100;

/// A document as returned by the repository, before projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Opaque pagination token handed out by a repository.
///
/// Only the repository that issued a cursor knows what it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a token issued by a repository implementation
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the issuing repository to interpret
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Document filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    DocumentType(String),
    DocumentId(String),
    Uid { doc_type: String, uid: String },
}

impl Predicate {
    pub fn document_type(doc_type: impl Into<String>) -> Self {
        Self::DocumentType(doc_type.into())
    }

    pub fn document_id(id: impl Into<String>) -> Self {
        Self::DocumentId(id.into())
    }

    pub fn uid(doc_type: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::Uid {
            doc_type: doc_type.into(),
            uid: uid.into(),
        }
    }

    pub fn matches(&self, document: &RawDocument) -> bool {
        match self {
            Self::DocumentType(doc_type) => &document.doc_type == doc_type,
            Self::DocumentId(id) => &document.id == id,
            Self::Uid { doc_type, uid } => {
                &document.doc_type == doc_type && document.uid.as_deref() == Some(uid.as_str())
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentType(doc_type) => write!(f, "[at(document.type, {:?})]", doc_type),
            Self::DocumentId(id) => write!(f, "[at(document.id, {:?})]", id),
            Self::Uid { doc_type, uid } => write!(f, "[at(my.{}.uid, {:?})]", doc_type, uid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort by first publication date in the given direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub direction: Direction,
}

impl Ordering {
    pub fn first_publication(direction: Direction) -> Self {
        Self { direction }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = "document.first_publication_date";
        match self.direction {
            Direction::Ascending => write!(f, "{}", field),
            Direction::Descending => write!(f, "{} desc", field),
        }
    }
}

/// A search against the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// All predicates must match
    pub predicates: Vec<Predicate>,
    /// Data fields to return, as `type.field`; empty means everything
    pub fetch: Vec<String>,
    pub page_size: Option<usize>,
    /// Resume position from a previous response
    pub cursor: Option<Cursor>,
    pub orderings: Vec<Ordering>,
    /// Only return documents ordered after this document id
    pub after: Option<String>,
}

impl Query {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
            ..Default::default()
        }
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    /// Page size clamped to what the repository accepts
    pub fn effective_page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Predicates in repository query syntax
    pub fn predicate_string(&self) -> String {
        let inner: String = self.predicates.iter().map(|p| p.to_string()).collect();
        format!("[{}]", inner)
    }

    /// Orderings in repository query syntax, `None` when unordered
    pub fn ordering_string(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let parts: Vec<_> = self.orderings.iter().map(|o| o.to_string()).collect();
        Some(format!("[{}]", parts.join(", ")))
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub results: Vec<RawDocument>,
    /// Cursor for the following page, `None` once exhausted
    pub next_page: Option<Cursor>,
}

/// Read access to the headless CMS
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Run a search and return one page of documents
    async fn query(&self, query: &Query) -> Result<QueryResponse>;

    /// Fetch a single document by its uid
    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Option<RawDocument>> {
        let query = Query::new(Predicate::uid(doc_type, uid)).page_size(1);
        let response = self.query(&query).await?;
        Ok(response.results.into_iter().next())
    }
}
