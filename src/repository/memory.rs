//! In-process repository over a fixed set of documents

use async_trait::async_trait;
use std::cmp::Ordering as CmpOrdering;
use std::fs;
use std::path::Path;

use super::{
    ContentRepository, Cursor, Direction, Ordering, Query, QueryResponse, RawDocument,
};
use crate::error::{BlogError, Result};
use crate::helpers::parse_timestamp;

const CURSOR_PREFIX: &str = "offset:";

/// Serves queries from memory, mirroring the repository's search semantics.
///
/// Unordered queries return newest first. Documents sharing a publication
/// date are ordered by id, in the same direction as the first ordering, so
/// an ascending result is always the exact reverse of the descending one.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    documents: Vec<RawDocument>,
}

impl MemoryRepository {
    pub fn new(documents: Vec<RawDocument>) -> Self {
        Self { documents }
    }

    /// Parse either a bare document array or a search response with `results`
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Fixture {
            Documents(Vec<RawDocument>),
            Response { results: Vec<RawDocument> },
        }

        let documents = match serde_json::from_str(json)? {
            Fixture::Documents(documents) => documents,
            Fixture::Response { results } => results,
        };
        Ok(Self::new(documents))
    }

    /// Load documents from a JSON fixture file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let repository = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} documents from {:?}",
            repository.documents.len(),
            path.as_ref()
        );
        Ok(repository)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn sorted_matches(&self, query: &Query) -> Vec<&RawDocument> {
        let mut matches: Vec<_> = self
            .documents
            .iter()
            .filter(|doc| query.predicates.iter().all(|p| p.matches(doc)))
            .collect();

        let default_order = [Ordering::first_publication(Direction::Descending)];
        let orderings = if query.orderings.is_empty() {
            &default_order[..]
        } else {
            &query.orderings[..]
        };

        let id_direction = orderings[0].direction;
        matches.sort_by(|a, b| {
            orderings
                .iter()
                .map(|ordering| compare(a, b, ordering))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| match id_direction {
                    Direction::Ascending => a.id.cmp(&b.id),
                    Direction::Descending => a.id.cmp(&b.id).reverse(),
                })
        });
        matches
    }
}

fn compare(a: &RawDocument, b: &RawDocument, ordering: &Ordering) -> CmpOrdering {
    let key = |doc: &RawDocument| {
        doc.first_publication_date
            .as_deref()
            .and_then(parse_timestamp)
    };

    let ord = key(a).cmp(&key(b));
    match ordering.direction {
        Direction::Ascending => ord,
        Direction::Descending => ord.reverse(),
    }
}

fn project_fields(document: &RawDocument, fetch: &[String]) -> RawDocument {
    let mut document = document.clone();
    if !fetch.is_empty() {
        let prefix = format!("{}.", document.doc_type);
        document.data.retain(|field, _| {
            fetch
                .iter()
                .any(|f| f.strip_prefix(&prefix) == Some(field.as_str()))
        });
    }
    document
}

fn decode_cursor(cursor: &Cursor) -> Result<usize> {
    cursor
        .token()
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|offset| offset.parse().ok())
        .ok_or_else(|| BlogError::Repository(format!("unknown cursor: {}", cursor.token())))
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn query(&self, query: &Query) -> Result<QueryResponse> {
        let mut matches = self.sorted_matches(query);

        if let Some(after) = &query.after {
            matches = match matches.iter().position(|doc| &doc.id == after) {
                Some(pos) => matches.split_off(pos + 1),
                None => Vec::new(),
            };
        }

        let offset = match &query.cursor {
            Some(cursor) => decode_cursor(cursor)?,
            None => 0,
        };
        let page_size = query.effective_page_size();
        let end = (offset + page_size).min(matches.len());

        let results = matches
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|doc| project_fields(doc, &query.fetch))
            .collect();

        let next_page = if end < matches.len() {
            Some(Cursor::from_token(format!("{}{}", CURSOR_PREFIX, end)))
        } else {
            None
        };

        tracing::debug!(
            q = %query.predicate_string(),
            offset,
            total = matches.len(),
            "Served query from memory"
        );

        Ok(QueryResponse { results, next_page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Predicate;
    use serde_json::json;

    fn doc(id: &str, date: &str) -> RawDocument {
        RawDocument {
            id: id.to_string(),
            uid: Some(format!("post-{}", id)),
            doc_type: "post".to_string(),
            first_publication_date: Some(date.to_string()),
            last_publication_date: Some(date.to_string()),
            data: json!({"title": id, "author": "Ana", "content": []})
                .as_object()
                .unwrap()
                .clone(),
        }
    }

    fn repository() -> MemoryRepository {
        MemoryRepository::new(vec![
            doc("b", "2021-02-01T00:00:00+0000"),
            doc("a", "2021-01-01T00:00:00+0000"),
            doc("c", "2021-03-01T00:00:00+0000"),
        ])
    }

    fn ids(response: &QueryResponse) -> Vec<&str> {
        response.results.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_newest_first() {
        let query = Query::new(Predicate::document_type("post"));
        let response = repository().query(&query).await.unwrap();
        assert_eq!(ids(&response), vec!["c", "b", "a"]);
        assert!(response.next_page.is_none());
    }

    #[tokio::test]
    async fn test_cursor_pages() {
        let repo = repository();
        let query = Query::new(Predicate::document_type("post")).page_size(2);
        let first = repo.query(&query).await.unwrap();
        assert_eq!(ids(&first), vec!["c", "b"]);

        let next = query.clone().cursor(first.next_page.clone());
        let second = repo.query(&next).await.unwrap();
        assert_eq!(ids(&second), vec!["a"]);
        assert!(second.next_page.is_none());
    }

    #[tokio::test]
    async fn test_after_with_ordering() {
        let repo = repository();
        let query = Query::new(Predicate::document_type("post"))
            .order_by(Ordering::first_publication(Direction::Ascending))
            .after("a")
            .page_size(1);
        let response = repo.query(&query).await.unwrap();
        assert_eq!(ids(&response), vec!["b"]);

        let unknown = query.clone().after("zzz");
        assert!(repo.query(&unknown).await.unwrap().results.is_empty());
    }

    #[tokio::test]
    async fn test_ties_break_on_id() {
        let repo = MemoryRepository::new(vec![
            doc("y", "2021-01-01T00:00:00+0000"),
            doc("x", "2021-01-01T00:00:00+0000"),
        ]);
        let query = Query::new(Predicate::document_type("post"));
        assert_eq!(ids(&repo.query(&query).await.unwrap()), vec!["y", "x"]);

        let ascending = query.order_by(Ordering::first_publication(Direction::Ascending));
        assert_eq!(ids(&repo.query(&ascending).await.unwrap()), vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_fetch_limits_data_fields() {
        let query = Query::new(Predicate::document_type("post")).fetch(["post.title"]);
        let response = repository().query(&query).await.unwrap();
        let data = &response.results[0].data;
        assert!(data.contains_key("title"));
        assert!(!data.contains_key("author"));
    }

    #[tokio::test]
    async fn test_rejects_foreign_cursor() {
        let query = Query::new(Predicate::document_type("post"))
            .cursor(Some(Cursor::from_token("https://cms.example/next")));
        let err = repository().query(&query).await.unwrap_err();
        assert!(matches!(err, BlogError::Repository(_)));
    }

    #[tokio::test]
    async fn test_bundled_fixtures() {
        let repo = MemoryRepository::from_json(include_str!("../../fixtures/posts.json")).unwrap();
        assert_eq!(repo.len(), 3);

        let doc = repo
            .get_by_uid("post", "como-utilizar-hooks")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.id, "YFxK1BAAACIAbWvK");
        assert!(repo.get_by_uid("post", "missing").await.unwrap().is_none());
    }

    #[test]
    fn test_from_json_accepts_search_response() {
        let json = r#"{"page": 1, "results": [{"id": "a", "type": "post", "data": {}}]}"#;
        let repo = MemoryRepository::from_json(json).unwrap();
        assert_eq!(repo.len(), 1);

        let repo = MemoryRepository::from_json("[]").unwrap();
        assert!(repo.is_empty());
    }
}
