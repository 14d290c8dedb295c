//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.
//!
//! Every statement filters on both `id` and `owner_id`, so another user's
//! article is indistinguishable from a missing one.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleDraft, ArticleId, ArticlePatch, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the [`ArticleRepository`] port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ArticlePersistenceError {
    map_pool_error(error, ArticlePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ArticlePersistenceError {
    map_diesel_error(
        error,
        ArticlePersistenceError::query,
        ArticlePersistenceError::connection,
    )
}

fn new_row<'a>(owner: &UserId, draft: &'a ArticleDraft) -> NewArticleRow<'a> {
    NewArticleRow {
        owner_id: *owner.as_uuid(),
        title: draft.title(),
        content: draft.content(),
    }
}

/// Convert a page request into `(limit, offset)` SQL parameters.
fn limit_offset(request: PageRequest) -> (i64, i64) {
    let limit = i64::from(request.limit());
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &ArticleDraft,
    ) -> Result<Article, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(articles::table)
            .values(&new_row(owner, draft))
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Article::from)
            .map_err(diesel_error)
    }

    async fn create_many(
        &self,
        owner: &UserId,
        drafts: &[ArticleDraft],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<NewArticleRow<'_>> =
            drafts.iter().map(|draft| new_row(owner, draft)).collect();

        // A single multi-row INSERT is atomic; ids follow VALUES order.
        let mut inserted: Vec<ArticleRow> = diesel::insert_into(articles::table)
            .values(&rows)
            .returning(ArticleRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(diesel_error)?;
        inserted.sort_by_key(|row| row.id);

        Ok(inserted.into_iter().map(Article::from).collect())
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        articles::table
            .filter(articles::id.eq(id.get()))
            .filter(articles::owner_id.eq(owner.as_uuid()))
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Article::from))
            .map_err(diesel_error)
    }

    async fn find_owned_many(
        &self,
        owner: &UserId,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        articles::table
            .filter(articles::owner_id.eq(owner.as_uuid()))
            .filter(articles::id.eq_any(raw_ids))
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Article::from).collect())
            .map_err(diesel_error)
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        // An empty changeset is a Diesel error, and also a no-op.
        if patch.is_empty() {
            return self.find_owned(owner, id).await;
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ArticleUpdate {
            title: patch.title(),
            content: patch.content(),
        };

        diesel::update(
            articles::table
                .filter(articles::id.eq(id.get()))
                .filter(articles::owner_id.eq(owner.as_uuid())),
        )
        .set(&changes)
        .returning(ArticleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map(|row| row.map(Article::from))
        .map_err(diesel_error)
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<bool, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(
            articles::table
                .filter(articles::id.eq(id.get()))
                .filter(articles::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map(|deleted| deleted > 0)
        .map_err(diesel_error)
    }

    async fn list_owned(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (limit, offset) = limit_offset(request);

        let total: i64 = articles::table
            .filter(articles::owner_id.eq(owner.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let rows: Vec<ArticleRow> = articles::table
            .filter(articles::owner_id.eq(owner.as_uuid()))
            .order(articles::id.desc())
            .limit(limit)
            .offset(offset)
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        let items = rows.into_iter().map(Article::from).collect();
        Ok(Page::new(
            items,
            u64::try_from(total).unwrap_or_default(),
            request,
        ))
    }
}
