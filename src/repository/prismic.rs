//! Prismic REST API repository

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::{ContentRepository, Cursor, Query, QueryResponse, RawDocument};
use crate::config::RepositoryConfig;
use crate::error::{BlogError, Result};

/// API root response, listing the content refs
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// `documents/search` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawDocument>,
    #[serde(default)]
    next_page: Option<String>,
}

pub struct PrismicRepository {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    /// Release or preview ref; the master ref is used otherwise
    release_ref: Option<String>,
    /// Master ref, fetched from the API root on first use
    master_ref: OnceCell<String>,
}

/// Map a non-2xx response to a repository error carrying status and body
fn status_error(status: reqwest::StatusCode, body: &str) -> BlogError {
    BlogError::Repository(format!("HTTP {}: {}", status.as_u16(), body))
}

impl PrismicRepository {
    pub fn new(config: &RepositoryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            release_ref: None,
            master_ref: OnceCell::new(),
        })
    }

    /// Read content as of a release or preview ref instead of the master ref
    pub fn with_release_ref(mut self, release_ref: Option<String>) -> Self {
        self.release_ref = release_ref;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Ref that searches read from. The master ref is resolved once per
    /// repository; build a new one to pick up later publications.
    async fn content_ref(&self) -> Result<String> {
        if let Some(release_ref) = &self.release_ref {
            return Ok(release_ref.clone());
        }

        self.master_ref
            .get_or_try_init(|| self.fetch_master_ref())
            .await
            .cloned()
    }

    async fn fetch_master_ref(&self) -> Result<String> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }
        let info: ApiInfo = self.get_json(request).await?;

        let master_ref = info
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| BlogError::Repository("API did not report a master ref".to_string()))?;
        tracing::debug!(master_ref = %master_ref, "Resolved master ref");
        Ok(master_ref)
    }

    fn search_params(&self, query: &Query, content_ref: String) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ref", content_ref),
            ("q", query.predicate_string()),
            ("pageSize", query.effective_page_size().to_string()),
        ];
        if let Some(orderings) = query.ordering_string() {
            params.push(("orderings", orderings));
        }
        if let Some(after) = &query.after {
            params.push(("after", after.clone()));
        }
        if !query.fetch.is_empty() {
            params.push(("fetch", query.fetch.join(",")));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }
        params
    }

    fn follow_cursor(&self, cursor: &Cursor) -> reqwest::RequestBuilder {
        // next_page links already carry the whole query
        let request = self.client.get(cursor.token());
        match &self.access_token {
            Some(token) if !cursor.token().contains("access_token=") => {
                request.query(&[("access_token", token)])
            }
            _ => request,
        }
    }
}

#[async_trait]
impl ContentRepository for PrismicRepository {
    async fn query(&self, query: &Query) -> Result<QueryResponse> {
        let request = match &query.cursor {
            Some(cursor) => {
                tracing::debug!(cursor = cursor.token(), "Following repository cursor");
                self.follow_cursor(cursor)
            }
            None => {
                let content_ref = self.content_ref().await?;
                let params = self.search_params(query, content_ref);
                tracing::debug!(q = %query.predicate_string(), "Querying repository");
                self.client
                    .get(format!("{}/documents/search", self.endpoint))
                    .query(&params)
            }
        };

        let response: SearchResponse = self.get_json(request).await?;
        Ok(QueryResponse {
            results: response.results,
            next_page: response.next_page.map(Cursor::from_token),
        })
    }
}
