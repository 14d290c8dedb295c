//! Account handlers: registration and token login.
//!
//! ```text
//! POST /register {"username":"alice"}
//! POST /login {"username":"alice"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned after a successful registration.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Request body for `POST /register` and `POST /login`.
///
/// A missing `username` is treated like a blank one.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UsernameRequest {
    /// Account name; surrounding whitespace is ignored.
    #[serde(default)]
    pub username: Option<String>,
}

impl UsernameRequest {
    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}

/// Body returned by `POST /register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Body returned by `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/register",
    request_body = UsernameRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing or duplicate username", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<UsernameRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.accounts.register(payload.username()).await?;
    Ok(web::Json(MessageResponse {
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

/// Exchange a registered username for a bearer token valid for 24 hours.
#[utoipa::path(
    post,
    path = "/login",
    request_body = UsernameRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 401, description = "Unknown username", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<UsernameRequest>,
) -> ApiResult<HttpResponse> {
    let token = state.accounts.login(payload.username()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: token.into_string(),
    }))
}
