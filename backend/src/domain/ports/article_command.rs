//! Driving port for article mutations.

use async_trait::async_trait;

use crate::domain::{Article, ArticleFields, ArticleId, Error, UserId};

/// Article write use-cases, always scoped to the authenticated owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleCommand: Send + Sync {
    /// Create one article from client-supplied fields.
    async fn create(&self, owner: &UserId, fields: ArticleFields) -> Result<Article, Error>;

    /// Create every complete item, silently skipping incomplete ones.
    async fn create_batch(
        &self,
        owner: &UserId,
        items: Vec<ArticleFields>,
    ) -> Result<Vec<Article>, Error>;

    /// Change the supplied fields of an owned article.
    async fn update(
        &self,
        owner: &UserId,
        id: ArticleId,
        fields: ArticleFields,
    ) -> Result<Article, Error>;

    /// Delete an owned article.
    async fn delete(&self, owner: &UserId, id: ArticleId) -> Result<(), Error>;
}
