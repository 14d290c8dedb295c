//! `GET /recently_viewed`: the caller's last five viewed articles.

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::articles::{ArticleResponse, to_responses};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Recently viewed articles, most recent first. Deleted articles are
/// omitted.
#[utoipa::path(
    get,
    path = "/recently_viewed",
    responses(
        (status = 200, description = "Up to five articles, newest view first", body = [ArticleResponse]),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["articles"],
    operation_id = "recentlyViewed",
    security(("bearer" = []))
)]
#[get("")]
pub async fn recently_viewed(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ArticleResponse>>> {
    let articles = state.articles_query.recently_viewed(user.id()).await?;
    Ok(web::Json(to_responses(articles)))
}
