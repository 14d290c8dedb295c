//! In-process repository adapters.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives behind a mutex and is lost on restart.

mod article_repository;
mod user_repository;

pub use article_repository::InMemoryArticleRepository;
pub use user_repository::InMemoryUserRepository;
