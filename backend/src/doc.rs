//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler in the inbound HTTP layer plus the
//! shared error schema and registers the bearer token security scheme. The
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{MessageResponse, TokenResponse, UsernameRequest};
use crate::inbound::http::articles::{ArticleListResponse, ArticleRequest, ArticleResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login, valid for 24 hours."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Content API",
        description = "Token-authenticated article storage with per-user recently viewed history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::create_articles_batch,
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::recently_viewed::recently_viewed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UsernameRequest,
        MessageResponse,
        TokenResponse,
        ArticleRequest,
        ArticleResponse,
        ArticleListResponse
    )),
    tags(
        (name = "accounts", description = "Registration and token login"),
        (name = "articles", description = "Owner-scoped article operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Structure of the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    fn article_schema_exposes_id_title_content() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let article = schemas.get("ArticleResponse").expect("ArticleResponse schema");

        for field in ["id", "title", "content"] {
            assert_object_schema_has_field(article, field);
        }
    }

    #[rstest]
    #[case("ArticleResponse", "id")]
    #[case("ArticleResponse", "title")]
    #[case("ArticleResponse", "content")]
    #[case("ArticleRequest", "title")]
    #[case("ArticleListResponse", "total")]
    #[case("ArticleListResponse", "page")]
    #[case("ArticleListResponse", "limit")]
    #[case("UsernameRequest", "username")]
    #[case("MessageResponse", "message")]
    #[case("TokenResponse", "token")]
    fn payload_fields_are_described(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(obj))) = schemas.get(schema) else {
            panic!("expected Object schema for {schema}");
        };
        let Some(RefOr::T(Schema::Object(property))) = obj.properties.get(field) else {
            panic!("expected inline property {schema}.{field}");
        };
        assert!(
            property.description.as_deref().is_some_and(|d| !d.is_empty()),
            "{schema}.{field} should carry a description"
        );
    }

    #[rstest]
    #[case("/register")]
    #[case("/login")]
    #[case("/articles")]
    #[case("/articles/batch")]
    #[case("/articles/{id}")]
    #[case("/recently_viewed")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
