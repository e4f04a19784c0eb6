//! Cursor-based pagination over the post collection

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::content::{project_summary, PostSummary, SUMMARY_FIELDS};
use crate::error::{BlogError, Result};
use crate::repository::{ContentRepository, Cursor, Predicate, Query};

/// Listing state held by a view: everything loaded so far plus where to resume.
///
/// Only ever grows; `cursor` is `None` once the collection is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub cursor: Option<Cursor>,
    pub items: Vec<PostSummary>,
}

impl Page {
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Fetches listing pages from the repository.
///
/// Callers must not run two `load_more` calls against the same page at once;
/// both would resume from the same cursor.
pub struct CursorPaginator {
    repository: Arc<dyn ContentRepository>,
    document_type: String,
    page_size: usize,
}

impl CursorPaginator {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        document_type: impl Into<String>,
        page_size: usize,
    ) -> Self {
        Self {
            repository,
            document_type: document_type.into(),
            page_size,
        }
    }

    fn listing_query(&self) -> Query {
        let fields = SUMMARY_FIELDS
            .iter()
            .map(|field| format!("{}.{}", self.document_type, field));
        Query::new(Predicate::document_type(&self.document_type))
            .fetch(fields)
            .page_size(self.page_size)
    }

    /// Fetch a single page; `None` starts from the beginning
    pub async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page> {
        let query = self.listing_query().cursor(cursor.cloned());
        let response = self.repository.query(&query).await?;

        let mut items = Vec::with_capacity(response.results.len());
        for document in &response.results {
            match project_summary(document) {
                Ok(summary) => items.push(summary),
                Err(e) => {
                    tracing::warn!("Skipping listing document {}: {}", document.id, e);
                }
            }
        }

        tracing::debug!(
            items = items.len(),
            has_more = response.next_page.is_some(),
            "Fetched listing page"
        );

        Ok(Page {
            cursor: response.next_page,
            items,
        })
    }

    /// Fetch the page after `page` and append it, returning the combined page
    pub async fn load_more(&self, page: &Page) -> Result<Page> {
        let cursor = page.cursor.as_ref().ok_or(BlogError::NoMorePages)?;
        let next = self.fetch_page(Some(cursor)).await?;

        let mut items = page.items.clone();
        items.extend(next.items);

        Ok(Page {
            cursor: next.cursor,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryRepository, RawDocument};
    use serde_json::json;

    fn document(n: usize) -> RawDocument {
        RawDocument {
            id: format!("id-{:02}", n),
            uid: Some(format!("post-{:02}", n)),
            doc_type: "post".to_string(),
            first_publication_date: Some(format!("2021-01-{:02}T10:00:00+0000", n)),
            last_publication_date: None,
            data: json!({
                "title": format!("Post {}", n),
                "subtitle": "",
                "author": "Ana",
                "content": []
            })
            .as_object()
            .unwrap()
            .clone(),
        }
    }

    fn paginator(count: usize, page_size: usize) -> CursorPaginator {
        let documents = (1..=count).map(document).collect();
        CursorPaginator::new(Arc::new(MemoryRepository::new(documents)), "post", page_size)
    }

    fn slugs(page: &Page) -> Vec<String> {
        page.items.iter().map(|p| p.slug.clone()).collect()
    }

    #[tokio::test]
    async fn test_first_page_is_newest_first() {
        let page = paginator(25, 20).fetch_page(None).await.unwrap();
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0].slug, "post-25");
        assert!(page.has_more());
    }

    #[tokio::test]
    async fn test_pages_never_exceed_page_size() {
        let paginator = paginator(7, 3);
        let mut cursor = None;
        loop {
            let page = paginator.fetch_page(cursor.as_ref()).await.unwrap();
            assert!(page.items.len() <= 3);
            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
    }

    #[tokio::test]
    async fn test_load_more_appends_and_advances() {
        let paginator = paginator(25, 20);
        let first = paginator.fetch_page(None).await.unwrap();
        let all = paginator.load_more(&first).await.unwrap();

        assert_eq!(all.items.len(), 25);
        assert_eq!(&all.items[..20], &first.items[..]);
        assert_eq!(all.items[24].slug, "post-01");
        assert!(!all.has_more());
    }

    #[tokio::test]
    async fn test_load_more_without_cursor_fails() {
        let paginator = paginator(3, 20);
        let page = paginator.fetch_page(None).await.unwrap();
        assert!(!page.has_more());

        let err = paginator.load_more(&page).await.unwrap_err();
        assert!(matches!(err, BlogError::NoMorePages));
    }

    #[tokio::test]
    async fn test_load_more_matches_independent_fetches() {
        let paginator = paginator(10, 3);

        let mut chained = paginator.fetch_page(None).await.unwrap();
        while chained.has_more() {
            chained = paginator.load_more(&chained).await.unwrap();
        }

        let mut concatenated = Vec::new();
        let mut cursor = None;
        loop {
            let page = paginator.fetch_page(cursor.as_ref()).await.unwrap();
            concatenated.extend(slugs(&page));
            cursor = page.cursor;
            if cursor.is_none() {
                break;
            }
        }

        assert_eq!(slugs(&chained), concatenated);
        assert_eq!(concatenated.len(), 10);
    }

    #[tokio::test]
    async fn test_malformed_items_are_skipped() {
        let mut documents: Vec<_> = (1..=3).map(document).collect();
        documents[1].data.remove("author");
        let paginator =
            CursorPaginator::new(Arc::new(MemoryRepository::new(documents)), "post", 20);

        let page = paginator.fetch_page(None).await.unwrap();
        assert_eq!(slugs(&page), vec!["post-03", "post-01"]);
    }
}
