//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, ArticleCommand, ArticleQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub articles: Arc<dyn ArticleCommand>,
    pub articles_query: Arc<dyn ArticleQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        articles: Arc<dyn ArticleCommand>,
        articles_query: Arc<dyn ArticleQuery>,
    ) -> Self {
        Self {
            accounts,
            articles,
            articles_query,
        }
    }
}
