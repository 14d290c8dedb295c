//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockAccountService, MockArticleCommand, MockArticleQuery, MockRequestAuthorizer,
    RequestAuthorizer,
};
use crate::domain::{Error, TOKEN_INVALID_MESSAGE, TOKEN_MISSING_MESSAGE, User, UserId, Username};

use super::state::HttpState;

/// Bearer token accepted by [`authorizer_for`].
pub const TEST_TOKEN: &str = "test-token";

/// A fixed user for handler tests.
pub fn alice() -> User {
    User::new(
        UserId::random(),
        Username::new("alice").expect("valid username"),
    )
}

/// An authorizer accepting [`TEST_TOKEN`] as `user` and rejecting anything
/// else with the production messages.
pub fn authorizer_for(user: User) -> Arc<dyn RequestAuthorizer> {
    let mut authorizer = MockRequestAuthorizer::new();
    authorizer.expect_authorize().returning(move |token| match token {
        None => Err(Error::unauthorized(TOKEN_MISSING_MESSAGE)),
        Some(token) if token == TEST_TOKEN => Ok(user.clone()),
        Some(_) => Err(Error::unauthorized(TOKEN_INVALID_MESSAGE)),
    });
    Arc::new(authorizer)
}

/// Build handler state from article mocks; account calls are unexpected.
pub fn article_state(command: MockArticleCommand, query: MockArticleQuery) -> HttpState {
    HttpState::new(
        Arc::new(MockAccountService::new()),
        Arc::new(command),
        Arc::new(query),
    )
}
