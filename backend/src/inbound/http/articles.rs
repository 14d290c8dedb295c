//! Article handlers. Every route sits behind [`BearerAuth`] and acts on the
//! caller's own articles only.
//!
//! ```text
//! POST   /articles            {"title":"A","content":"x"}
//! POST   /articles/batch      [{"title":"A","content":"x"}, ...]
//! GET    /articles?page=1&limit=10
//! GET    /articles/{id}
//! PUT    /articles/{id}       {"title":"B"}
//! DELETE /articles/{id}
//! ```
//!
//! [`BearerAuth`]: crate::inbound::http::auth::BearerAuth

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Article, ArticleFields, ArticleId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Message for a batch body that is not a JSON array.
pub const BATCH_NOT_A_LIST_MESSAGE: &str = "Request body must be a list of articles";

/// Article as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    /// Server-assigned article id.
    pub id: i64,
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id().get(),
            title: article.title().to_owned(),
            content: article.content().to_owned(),
        }
    }
}

pub(crate) fn to_responses(articles: Vec<Article>) -> Vec<ArticleResponse> {
    articles.into_iter().map(ArticleResponse::from).collect()
}

/// Body for create and update. Both fields are optional on the wire;
/// create requires both, update applies whichever are present.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ArticleRequest {
    /// Title, at most 200 characters.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text.
    #[serde(default)]
    pub content: Option<String>,
}

impl From<ArticleRequest> for ArticleFields {
    fn from(request: ArticleRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}

/// Raw paging parameters. Values that are not integers fall back to the
/// defaults rather than failing the request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size, clamped to 1..=100 (default 10).
    pub limit: Option<String>,
}

impl ListQuery {
    fn page_request(&self) -> PageRequest {
        let parse = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok());
        PageRequest::from_raw(parse(&self.page), parse(&self.limit))
    }
}

/// One page of the caller's articles.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ArticleListResponse {
    /// Articles on this page, newest first.
    pub articles: Vec<ArticleResponse>,
    /// Number of articles the caller owns.
    pub total: u64,
    /// Effective 1-based page number.
    pub page: u32,
    /// Effective page size.
    pub limit: u32,
}

impl From<Page<Article>> for ArticleListResponse {
    fn from(page: Page<Article>) -> Self {
        let request = page.request();
        let total = page.total();
        Self {
            articles: to_responses(page.into_items()),
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }
}

/// Interpret a batch body: each JSON object contributes its string `title`
/// and `content`; anything else becomes an empty entry that validation skips.
fn batch_fields(body: Value) -> Result<Vec<ArticleFields>, Error> {
    let Value::Array(items) = body else {
        return Err(Error::invalid_request(BATCH_NOT_A_LIST_MESSAGE));
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
                ArticleFields {
                    title: text("title"),
                    content: text("content"),
                }
            }
            other => {
                debug!(kind = json_kind(&other), "batch item is not an object");
                ArticleFields::default()
            }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Create an article.
#[utoipa::path(
    post,
    path = "/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Title or content missing", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticle",
    security(("bearer" = []))
)]
#[post("")]
pub async fn create_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<HttpResponse> {
    let article = state
        .articles
        .create(user.id(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

/// Create several articles at once. Invalid entries are skipped.
#[utoipa::path(
    post,
    path = "/articles/batch",
    request_body = Vec<ArticleRequest>,
    responses(
        (status = 201, description = "Valid entries created, in input order", body = [ArticleResponse]),
        (status = 400, description = "Body is not a list", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticlesBatch",
    security(("bearer" = []))
)]
#[post("/batch")]
pub async fn create_articles_batch(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let items = batch_fields(payload.into_inner())?;
    let created = state.articles.create_batch(user.id(), items).await?;
    Ok(HttpResponse::Created().json(to_responses(created)))
}

/// List the caller's articles, newest first.
#[utoipa::path(
    get,
    path = "/articles",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of articles", body = ArticleListResponse),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["articles"],
    operation_id = "listArticles",
    security(("bearer" = []))
)]
#[get("")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<ArticleListResponse>> {
    let page = state
        .articles_query
        .list(user.id(), query.page_request())
        .await?;
    Ok(web::Json(page.into()))
}

/// Fetch one article and record the view.
#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article", body = ArticleResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Not found or not owned", body = Error)
    ),
    tags = ["articles"],
    operation_id = "getArticle",
    security(("bearer" = []))
)]
#[get("/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = ArticleId::new(path.into_inner());
    let article = state.articles_query.get(user.id(), id).await?;
    Ok(web::Json(article.into()))
}

/// Update title and/or content.
#[utoipa::path(
    put,
    path = "/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleResponse),
        (status = 400, description = "Blank field", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Not found or not owned", body = Error)
    ),
    tags = ["articles"],
    operation_id = "updateArticle",
    security(("bearer" = []))
)]
#[put("/{id}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = ArticleId::new(path.into_inner());
    let article = state
        .articles
        .update(user.id(), id, payload.into_inner().into())
        .await?;
    Ok(web::Json(article.into()))
}

/// Delete an article.
#[utoipa::path(
    delete,
    path = "/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Not found or not owned", body = Error)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle",
    security(("bearer" = []))
)]
#[delete("/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    state.articles.delete(user.id(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
