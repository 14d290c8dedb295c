//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports (`AccountService`, `ArticleCommand`, `ArticleQuery`,
//! `RequestAuthorizer`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod article_command;
mod article_query;
mod article_repository;
mod request_authorizer;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use article_command::MockArticleCommand;
pub use article_command::ArticleCommand;
#[cfg(test)]
pub use article_query::MockArticleQuery;
pub use article_query::ArticleQuery;
#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticlePersistenceError, ArticleRepository};
#[cfg(test)]
pub use request_authorizer::MockRequestAuthorizer;
pub use request_authorizer::RequestAuthorizer;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
