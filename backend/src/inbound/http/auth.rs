//! Bearer-token authentication for protected routes.
//!
//! [`BearerAuth`] wraps a scope, resolves the `Authorization` header through
//! a [`RequestAuthorizer`] and stores the resulting [`User`] in the request
//! extensions. Handlers take [`AuthenticatedUser`] and never see the token.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::ports::RequestAuthorizer;
use crate::domain::{Error, User, UserId};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from request headers.
///
/// The header must start with exactly `Bearer `; the token is the first
/// space-delimited word after it. Any other shape counts as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let rest = value.strip_prefix(BEARER_PREFIX)?;
    rest.split(' ')
        .next()
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Middleware factory enforcing bearer authentication.
#[derive(Clone)]
pub struct BearerAuth {
    authorizer: Arc<dyn RequestAuthorizer>,
}

impl BearerAuth {
    /// Authenticate requests through `authorizer`.
    pub fn new(authorizer: Arc<dyn RequestAuthorizer>) -> Self {
        Self { authorizer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            authorizer: Arc::clone(&self.authorizer),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    authorizer: Arc<dyn RequestAuthorizer>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authorizer = Arc::clone(&self.authorizer);

        Box::pin(async move {
            let token = bearer_token(req.headers());
            match authorizer.authorize(token).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

/// The caller resolved by [`BearerAuth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// The resolved user.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// The resolved user's id.
    pub fn id(&self) -> &UserId {
        self.0.id()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<User>().cloned();
        ready(user.map(Self).ok_or_else(|| {
            // Only reachable when a handler is mounted outside `BearerAuth`.
            error!(path = req.path(), "authenticated route missing bearer middleware");
            Error::internal("authenticated user missing from request")
        }))
    }
}
