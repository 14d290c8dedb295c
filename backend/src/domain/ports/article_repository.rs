//! Driven port for owner-scoped article persistence.
//!
//! Every read and write takes the caller's [`UserId`]. Adapters must filter
//! on `(id, owner_id)` so an article owned by someone else behaves exactly
//! like one that does not exist.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Article, ArticleDraft, ArticleId, ArticlePatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by article repository adapters.
    pub enum ArticlePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "article repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "article repository query failed: {message}",
    }
}

/// Owner-scoped article storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert one article and return it with its assigned id.
    async fn create(
        &self,
        owner: &UserId,
        draft: &ArticleDraft,
    ) -> Result<Article, ArticlePersistenceError>;

    /// Insert all drafts in one operation, returning them in input order.
    async fn create_many(
        &self,
        owner: &UserId,
        drafts: &[ArticleDraft],
    ) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Fetch an article owned by `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Fetch whichever of `ids` exist and belong to `owner`, in any order.
    async fn find_owned_many(
        &self,
        owner: &UserId,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Apply `patch` to an owned article. `None` when no such article.
    async fn update_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Delete an owned article. `false` when nothing was deleted.
    async fn delete_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<bool, ArticlePersistenceError>;

    /// One page of the owner's articles, newest (highest id) first, plus the
    /// owner's total article count.
    async fn list_owned(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<Article>, ArticlePersistenceError>;
}
