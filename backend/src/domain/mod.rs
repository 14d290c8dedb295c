//! Domain primitives, services and ports.
//!
//! Purpose: hold the content API's business rules independently of HTTP and
//! storage. Entities are immutable values; services implement the driving
//! ports in [`ports`] on top of the driven ones.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Article` and their validated inputs.
//! - `TokenService` and `AuthorizationGate`: bearer token issue/verify and
//!   request authorisation.
//! - `RecentlyViewedTracker`: bounded per-user view history.
//! - `UserAccountService` and `ArticleService`: use-case implementations.

pub mod account_service;
pub mod article;
pub mod article_service;
pub mod auth;
pub mod authorization;
pub mod error;
mod persistence_errors;
pub mod ports;
pub mod recently_viewed;
pub mod trace_id;
pub mod user;

pub use self::account_service::UserAccountService;
pub use self::article::{
    Article, ArticleDraft, ArticleFields, ArticleId, ArticlePatch, ArticleValidationError,
    TITLE_MAX,
};
pub use self::article_service::{ARTICLE_NOT_FOUND_MESSAGE, ArticleService};
pub use self::auth::{
    SESSION_TTL, SessionToken, TokenIssueError, TokenSecret, TokenService, TokenVerificationError,
};
pub use self::authorization::{AuthorizationGate, TOKEN_INVALID_MESSAGE, TOKEN_MISSING_MESSAGE};
pub use self::error::{Error, ErrorCode};
pub use self::recently_viewed::{RECENTLY_VIEWED_CAPACITY, RecentlyViewedTracker};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
