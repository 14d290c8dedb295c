//! Driving port for article reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Article, ArticleId, Error, UserId};

/// Article read use-cases, always scoped to the authenticated owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleQuery: Send + Sync {
    /// Fetch one owned article and record the view.
    async fn get(&self, owner: &UserId, id: ArticleId) -> Result<Article, Error>;

    /// Page through the owner's articles, newest first.
    async fn list(&self, owner: &UserId, request: PageRequest) -> Result<Page<Article>, Error>;

    /// The owner's recently viewed articles that still exist, most recent
    /// first.
    async fn recently_viewed(&self, owner: &UserId) -> Result<Vec<Article>, Error>;
}
