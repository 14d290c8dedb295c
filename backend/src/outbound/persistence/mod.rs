//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain values. No business rules live here.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every database failure is mapped to the
//!   port's persistence error.
//!
//! # Example
//!
//! ```ignore
//! use content_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/content")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
