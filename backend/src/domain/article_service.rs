//! Article use-cases: owner-scoped CRUD, batch creation, paging and the
//! recently viewed list.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{debug, info};

use super::persistence_errors::map_article_persistence_error;
use super::ports::{ArticleCommand, ArticleQuery, ArticleRepository};
use super::{
    Article, ArticleFields, ArticleId, ArticleValidationError, Error, RecentlyViewedTracker,
    UserId,
};

/// Message returned for absent and foreign articles alike.
pub const ARTICLE_NOT_FOUND_MESSAGE: &str = "Article not found";

/// Implements [`ArticleCommand`] and [`ArticleQuery`] over an
/// [`ArticleRepository`], recording single-article reads in a shared
/// [`RecentlyViewedTracker`].
#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    tracker: Arc<RecentlyViewedTracker>,
}

impl ArticleService {
    /// Create the service.
    pub fn new(articles: Arc<dyn ArticleRepository>, tracker: Arc<RecentlyViewedTracker>) -> Self {
        Self { articles, tracker }
    }
}

fn not_found() -> Error {
    Error::not_found(ARTICLE_NOT_FOUND_MESSAGE)
}

fn invalid(err: ArticleValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

#[async_trait]
impl ArticleCommand for ArticleService {
    async fn create(&self, owner: &UserId, fields: ArticleFields) -> Result<Article, Error> {
        let draft = fields.into_draft().map_err(invalid)?;
        let article = self
            .articles
            .create(owner, &draft)
            .await
            .map_err(map_article_persistence_error)?;
        info!(user_id = %owner, article_id = %article.id(), "article created");
        Ok(article)
    }

    async fn create_batch(
        &self,
        owner: &UserId,
        items: Vec<ArticleFields>,
    ) -> Result<Vec<Article>, Error> {
        let submitted = items.len();
        let drafts: Vec<_> = items
            .into_iter()
            .filter_map(|fields| fields.into_draft().ok())
            .collect();
        if drafts.len() < submitted {
            debug!(
                user_id = %owner,
                skipped = submitted - drafts.len(),
                "batch items without title or content skipped"
            );
        }
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let created = self
            .articles
            .create_many(owner, &drafts)
            .await
            .map_err(map_article_persistence_error)?;
        info!(user_id = %owner, created = created.len(), "article batch created");
        Ok(created)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: ArticleId,
        fields: ArticleFields,
    ) -> Result<Article, Error> {
        let patch = fields.into_patch().map_err(invalid)?;
        self.articles
            .update_owned(owner, id, &patch)
            .await
            .map_err(map_article_persistence_error)?
            .ok_or_else(not_found)
    }

    async fn delete(&self, owner: &UserId, id: ArticleId) -> Result<(), Error> {
        let deleted = self
            .articles
            .delete_owned(owner, id)
            .await
            .map_err(map_article_persistence_error)?;
        if !deleted {
            return Err(not_found());
        }
        info!(user_id = %owner, article_id = %id, "article deleted");
        Ok(())
    }
}

#[async_trait]
impl ArticleQuery for ArticleService {
    async fn get(&self, owner: &UserId, id: ArticleId) -> Result<Article, Error> {
        let article = self
            .articles
            .find_owned(owner, id)
            .await
            .map_err(map_article_persistence_error)?
            .ok_or_else(not_found)?;
        self.tracker.record_view(owner, article.id());
        Ok(article)
    }

    async fn list(&self, owner: &UserId, request: PageRequest) -> Result<Page<Article>, Error> {
        self.articles
            .list_owned(owner, request)
            .await
            .map_err(map_article_persistence_error)
    }

    async fn recently_viewed(&self, owner: &UserId) -> Result<Vec<Article>, Error> {
        let ids = self.tracker.recent(owner);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = self
            .articles
            .find_owned_many(owner, &ids)
            .await
            .map_err(map_article_persistence_error)?;
        let mut by_id: HashMap<ArticleId, Article> = found
            .into_iter()
            .map(|article| (article.id(), article))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
