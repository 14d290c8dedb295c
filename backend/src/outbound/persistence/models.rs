//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to domain values before returning.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Article, ArticleId, User, UserId, Username};

use super::schema::{articles, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}

/// Row struct for reading from the articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Insertable struct for creating article records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub owner_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
}

/// Changeset for partial article updates; `None` columns are left alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleUpdate<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self::new(
            ArticleId::new(row.id),
            UserId::from_uuid(row.owner_id),
            row.title,
            row.content,
        )
    }
}

impl TryFrom<UserRow> for User {
    type Error = crate::domain::UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self::new(UserId::from_uuid(row.id), Username::new(row.username)?))
    }
}
