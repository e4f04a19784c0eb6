//! spacetraveling: content core for a headless-CMS backed blog
//!
//! This crate sits between a content repository (Prismic) and whatever
//! renders the blog. It pages through posts with opaque cursors, finds the
//! previous/next post by publication date, and derives read time and the
//! "edited" marker for a post.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod navigation;
pub mod pagination;
pub mod repository;

use serde::Serialize;
use std::sync::Arc;

use content::{Post, PostSummary};
use error::{BlogError, Result};
use navigation::AdjacentPostResolver;
use pagination::{CursorPaginator, Page};
use repository::ContentRepository;

/// Everything a single-post view needs, computed before rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub post: Post,
    /// Republished after first publication
    pub is_edited: bool,
    pub read_minutes: u32,
    pub previous: Option<PostSummary>,
    pub next: Option<PostSummary>,
}

/// The blog application: configuration plus the repository it reads from
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    repository: Arc<dyn ContentRepository>,
}

impl Blog {
    pub fn new(config: config::SiteConfig, repository: Arc<dyn ContentRepository>) -> Self {
        Self { config, repository }
    }

    pub fn paginator(&self) -> CursorPaginator {
        CursorPaginator::new(
            self.repository.clone(),
            &self.config.repository.document_type,
            self.config.per_page,
        )
    }

    pub fn navigator(&self) -> AdjacentPostResolver {
        AdjacentPostResolver::new(
            self.repository.clone(),
            &self.config.repository.document_type,
        )
    }

    /// First page of the home listing
    pub async fn home(&self) -> Result<Page> {
        self.paginator().fetch_page(None).await
    }

    /// Append the next page to `page`
    pub async fn load_more(&self, page: &Page) -> Result<Page> {
        self.paginator().load_more(page).await
    }

    /// Load a post by slug with its derived metadata and neighbours
    pub async fn post(&self, slug: &str) -> Result<PostView> {
        let document = self
            .repository
            .get_by_uid(&self.config.repository.document_type, slug)
            .await?
            .ok_or_else(|| BlogError::PostNotFound(slug.to_string()))?;

        let post = content::project(&document)?;
        let adjacent = self.navigator().resolve_adjacent(&post.id).await?;

        Ok(PostView {
            is_edited: helpers::is_edited(post.first_published_at, post.last_published_at),
            read_minutes: content::estimate_read_minutes(&post.content),
            previous: adjacent.previous,
            next: adjacent.next,
            post,
        })
    }

    /// Slugs of every post, for pre-rendering one page per post
    pub async fn slugs(&self) -> Result<Vec<String>> {
        let paginator = self.paginator();
        let mut page = paginator.fetch_page(None).await?;
        while page.has_more() {
            page = paginator.load_more(&page).await?;
        }
        Ok(page.items.into_iter().map(|item| item.slug).collect())
    }
}
