//! Previous/next post links derived from publication order

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::content::{project_summary, PostSummary, SUMMARY_FIELDS};
use crate::error::{BlogError, Result};
use crate::repository::{ContentRepository, Direction, Ordering, Predicate, Query};

/// Neighbours of a post by first publication date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjacent {
    /// Chronologically earlier post
    pub previous: Option<PostSummary>,
    /// Chronologically later post
    pub next: Option<PostSummary>,
}

pub struct AdjacentPostResolver {
    repository: Arc<dyn ContentRepository>,
    document_type: String,
}

impl AdjacentPostResolver {
    pub fn new(repository: Arc<dyn ContentRepository>, document_type: impl Into<String>) -> Self {
        Self {
            repository,
            document_type: document_type.into(),
        }
    }

    fn single_query(&self) -> Query {
        let fields = SUMMARY_FIELDS
            .iter()
            .map(|field| format!("{}.{}", self.document_type, field));
        Query::new(Predicate::document_type(&self.document_type))
            .fetch(fields)
            .page_size(1)
    }

    /// Find the posts published right before and right after `post_id`.
    ///
    /// The lookups run concurrently; any failing query fails the whole call.
    /// A neighbour that cannot be projected is logged and left out.
    pub async fn resolve_adjacent(&self, post_id: &str) -> Result<Adjacent> {
        let exists = self.exists(post_id);
        let next = self.neighbour(post_id, Direction::Ascending);
        let previous = self.neighbour(post_id, Direction::Descending);

        let (exists, next, previous) = tokio::try_join!(exists, next, previous)?;
        if !exists {
            return Err(BlogError::PostNotFound(post_id.to_string()));
        }

        tracing::debug!(
            post_id,
            previous = previous.as_ref().map(|p| p.slug.as_str()),
            next = next.as_ref().map(|p| p.slug.as_str()),
            "Resolved adjacent posts"
        );

        Ok(Adjacent { previous, next })
    }

    async fn exists(&self, post_id: &str) -> Result<bool> {
        let query = self.single_query().and(Predicate::document_id(post_id));
        let response = self.repository.query(&query).await?;
        Ok(!response.results.is_empty())
    }

    async fn neighbour(&self, post_id: &str, direction: Direction) -> Result<Option<PostSummary>> {
        let query = self
            .single_query()
            .order_by(Ordering::first_publication(direction))
            .after(post_id);
        let response = self.repository.query(&query).await?;

        let Some(document) = response.results.first() else {
            return Ok(None);
        };
        match project_summary(document) {
            Ok(summary) => Ok(Some(summary)),
            Err(e) => {
                tracing::warn!("Dropping link to neighbour {} of {}: {}", document.id, post_id, e);
                Ok(None)
            }
        }
    }
}
