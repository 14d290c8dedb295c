//! Article model and the validated inputs used to create or change one.
//!
//! Articles belong to exactly one owner. Titles are limited to
//! [`TITLE_MAX`] characters; content is unbounded. Neither may be blank.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum length of an article title, in characters.
pub const TITLE_MAX: usize = 200;

/// Validation errors for article drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleValidationError {
    /// A draft lacks a title or content.
    #[error("Title and content are required")]
    MissingFields,
    /// A patch supplies a blank value for a field.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The title exceeds [`TITLE_MAX`] characters.
    #[error("Title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Repository-assigned article identifier; increases with every insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(i64);

impl ArticleId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    id: ArticleId,
    owner_id: UserId,
    title: String,
    content: String,
}

impl Article {
    /// Assemble an article from stored parts.
    #[must_use]
    pub const fn new(id: ArticleId, owner_id: UserId, title: String, content: String) -> Self {
        Self {
            id,
            owner_id,
            title,
            content,
        }
    }

    /// Article identifier.
    #[must_use]
    pub const fn id(&self) -> ArticleId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Return a copy with `patch` applied; unset fields keep their value.
    #[must_use]
    pub fn patched(mut self, patch: &ArticlePatch) -> Self {
        if let Some(title) = patch.title() {
            title.clone_into(&mut self.title);
        }
        if let Some(content) = patch.content() {
            content.clone_into(&mut self.content);
        }
        self
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_title_length(title: &str) -> Result<(), ArticleValidationError> {
    if title.chars().count() > TITLE_MAX {
        return Err(ArticleValidationError::TitleTooLong { max: TITLE_MAX });
    }
    Ok(())
}

/// Raw article fields as supplied by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    /// Supplied title, if any.
    pub title: Option<String>,
    /// Supplied content, if any.
    pub content: Option<String>,
}

impl ArticleFields {
    /// Fields with both values present.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Validate as a complete new article.
    pub fn into_draft(self) -> Result<ArticleDraft, ArticleValidationError> {
        ArticleDraft::try_from_parts(self.title, self.content)
    }

    /// Validate as a partial update.
    pub fn into_patch(self) -> Result<ArticlePatch, ArticleValidationError> {
        ArticlePatch::try_new(self.title, self.content)
    }
}

/// Validated title and content for a new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    content: String,
}

impl ArticleDraft {
    /// Validate optional raw fields; missing and blank values are both
    /// rejected.
    ///
    /// # Examples
    /// ```
    /// use content_api::domain::{ArticleDraft, ArticleValidationError};
    ///
    /// let draft = ArticleDraft::try_from_parts(Some("A".into()), Some("x".into()))
    ///     .expect("valid draft");
    /// assert_eq!(draft.title(), "A");
    ///
    /// let missing = ArticleDraft::try_from_parts(Some("".into()), None);
    /// assert_eq!(missing, Err(ArticleValidationError::MissingFields));
    /// ```
    pub fn try_from_parts(
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ArticleValidationError> {
        let (Some(title), Some(content)) = (
            title.filter(|value| !is_blank(value)),
            content.filter(|value| !is_blank(value)),
        ) else {
            return Err(ArticleValidationError::MissingFields);
        };
        check_title_length(&title)?;
        Ok(Self { title, content })
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    title: Option<String>,
    content: Option<String>,
}

impl ArticlePatch {
    /// Validate a partial update. Supplied fields must not be blank.
    pub fn try_new(
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ArticleValidationError> {
        if let Some(value) = &title {
            if is_blank(value) {
                return Err(ArticleValidationError::BlankField { field: "Title" });
            }
            check_title_length(value)?;
        }
        if content.as_deref().is_some_and(is_blank) {
            return Err(ArticleValidationError::BlankField { field: "Content" });
        }
        Ok(Self { title, content })
    }

    /// Replacement title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replacement content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
