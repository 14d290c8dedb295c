//! Composition of domain services into the HTTP adapter's dependencies.
//!
//! The binary and the integration tests both build their application from
//! [`AppComponents`], so the wiring under test is the wiring that ships.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{ArticleRepository, RequestAuthorizer, UserRepository};
use crate::domain::{
    ArticleService, AuthorizationGate, RecentlyViewedTracker, TokenService, UserAccountService,
};
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryArticleRepository, InMemoryUserRepository};

/// Everything [`crate::inbound::http::configure`] and its handlers need.
#[derive(Clone)]
pub struct AppComponents {
    /// Handler state; register with `App::app_data`.
    pub http_state: web::Data<HttpState>,
    /// Resolves bearer tokens for protected routes.
    pub authorizer: Arc<dyn RequestAuthorizer>,
}

impl AppComponents {
    /// Wire services over the given repositories.
    ///
    /// One [`RecentlyViewedTracker`] is created here and shared by every
    /// worker through the article service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        articles: Arc<dyn ArticleRepository>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let tracker = Arc::new(RecentlyViewedTracker::default());
        let article_service = Arc::new(ArticleService::new(articles, tracker));
        let accounts = Arc::new(UserAccountService::new(
            Arc::clone(&users),
            Arc::clone(&tokens),
        ));
        let authorizer = Arc::new(AuthorizationGate::new(tokens, users));

        Self {
            http_state: web::Data::new(HttpState::new(
                accounts,
                article_service.clone(),
                article_service,
            )),
            authorizer,
        }
    }

    /// Wire services over fresh in-memory repositories.
    pub fn in_memory(tokens: Arc<TokenService>) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryArticleRepository::new()),
            tokens,
        )
    }

    /// Authentication middleware for protected routes.
    pub fn bearer_auth(&self) -> BearerAuth {
        BearerAuth::new(Arc::clone(&self.authorizer))
    }
}
