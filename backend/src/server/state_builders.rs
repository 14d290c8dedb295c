//! Selection of repository adapters for the configured storage.

use std::sync::Arc;

use tracing::warn;

use content_api::app::AppComponents;
use content_api::outbound::persistence::{DieselArticleRepository, DieselUserRepository};

use super::ServerConfig;

/// Build application components over PostgreSQL when a pool is configured,
/// otherwise over in-memory repositories.
pub(super) fn build_components(config: &ServerConfig) -> AppComponents {
    let tokens = Arc::clone(&config.tokens);
    match &config.db_pool {
        Some(pool) => AppComponents::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselArticleRepository::new(pool.clone())),
            tokens,
        ),
        None => {
            warn!("no database configured; users and articles are kept in memory");
            AppComponents::in_memory(tokens)
        }
    }
}
