//! Shared application harness for HTTP integration tests.
//!
//! Builds the same [`AppComponents`] wiring as the binary over in-memory
//! repositories, with a clock the test can move forward.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use content_api::Trace;
use content_api::app::AppComponents;
use content_api::domain::{TokenSecret, TokenService};
use content_api::inbound::http::configure;
use content_api::test_support::MutableClock;
use serde_json::{Value, json};

pub fn fixed_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::fixed())
}

/// Initialise the full application over fresh in-memory storage.
pub async fn init_app(
    clock: Arc<MutableClock>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let secret = TokenSecret::from_bytes(b"integration-test-secret-0123456789".to_vec());
    let tokens = Arc::new(TokenService::new(&secret, clock));
    let components = AppComponents::in_memory(tokens);
    let auth = components.bearer_auth();

    test::init_service(
        App::new()
            .app_data(components.http_state.clone())
            .wrap(Trace)
            .configure(move |cfg| configure(cfg, auth)),
    )
    .await
}

/// Send a JSON request, optionally authenticated, and decode the reply.
///
/// Empty bodies decode as `Value::Null`.
pub async fn call<S>(
    app: &S,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut req = match method {
        "GET" => test::TestRequest::get(),
        "POST" => test::TestRequest::post(),
        "PUT" => test::TestRequest::put(),
        "DELETE" => test::TestRequest::delete(),
        other => panic!("unsupported method {other}"),
    }
    .uri(uri);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }

    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, value)
}

/// Register `username` and return a fresh bearer token.
pub async fn sign_up<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, _) = call(app, "POST", "/register", None, Some(json!({"username": username}))).await;
    assert_eq!(status, StatusCode::OK, "register {username}");
    let (status, body) = call(app, "POST", "/login", None, Some(json!({"username": username}))).await;
    assert_eq!(status, StatusCode::OK, "login {username}");
    body["token"].as_str().expect("token string").to_owned()
}

/// Create an article and return its id.
pub async fn create_article<S>(app: &S, token: &str, title: &str, content: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        "POST",
        "/articles",
        Some(token),
        Some(json!({"title": title, "content": content})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("article id")
}
