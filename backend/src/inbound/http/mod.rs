//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod articles;
pub mod auth;
pub mod error;
pub mod health;
pub mod recently_viewed;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;

use actix_web::web;

pub use error::ApiResult;

use self::auth::BearerAuth;

/// Register the API routes, body limits and extractor error handlers.
///
/// Account routes are public; article and recently-viewed routes are wrapped
/// in `auth`. Callers provide [`state::HttpState`] as app data and install
/// the [`Trace`](crate::Trace) middleware themselves.
pub fn configure(cfg: &mut web::ServiceConfig, auth: BearerAuth) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(accounts::register)
        .service(accounts::login)
        .service(
            web::scope("/articles")
                .wrap(auth.clone())
                .service(articles::create_articles_batch)
                .service(articles::create_article)
                .service(articles::list_articles)
                .service(articles::get_article)
                .service(articles::update_article)
                .service(articles::delete_article),
        )
        .service(
            web::scope("/recently_viewed")
                .wrap(auth)
                .service(recently_viewed::recently_viewed),
        );
}
