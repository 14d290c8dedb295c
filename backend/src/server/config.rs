//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use content_api::domain::TokenService;
use content_api::outbound::persistence::DbPool;

/// Everything the server needs beyond its handlers.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<TokenService>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configure a server bound to `bind_addr` issuing tokens with `tokens`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<TokenService>) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
        }
    }

    /// Use PostgreSQL repositories backed by `pool` instead of in-memory
    /// storage.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
