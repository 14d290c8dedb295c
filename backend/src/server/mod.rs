//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_components;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use content_api::Trace;
use content_api::app::AppComponents;
#[cfg(debug_assertions)]
use content_api::doc::ApiDoc;
use content_api::inbound::http::configure;
use content_api::inbound::http::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    components: AppComponents,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let auth = components.bearer_auth();

    let app = App::new()
        .app_data(health_state)
        .app_data(components.http_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(|cfg| configure(cfg, auth));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// is flipped once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let components = build_components(&config);

    let server = HttpServer::new(move || build_app(server_health_state.clone(), components.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
