//! Content API library: a token-authenticated article store.
//!
//! Layout follows a hexagonal split:
//! - [`domain`]: entities, use-case services and the ports they depend on.
//! - [`inbound`]: actix-web handlers translating HTTP into port calls.
//! - [`outbound`]: PostgreSQL and in-memory repository adapters.
//! - [`middleware`]: request tracing.

pub mod app;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
