//! Content API entry-point: loads configuration, prepares storage and runs
//! the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use content_api::domain::TokenService;
use content_api::inbound::http::health::HealthState;
use content_api::inbound::http::token_config::fingerprint::secret_fingerprint;
use content_api::inbound::http::token_config::{BuildMode, token_secret_from_env};
use content_api::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use content_api::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;

    let secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("failed to load token secret")?;
    info!(fingerprint = %secret_fingerprint(&secret), "token secret loaded");
    let tokens = Arc::new(TokenService::new(&secret, Arc::new(DefaultClock)));
    drop(secret);

    let mut config = ServerConfig::new(settings.bind_addr(), tokens);
    if let Some(url) = settings.database_url() {
        run_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("failed to create database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting content API");
    create_server(health_state, config)
        .wrap_err("failed to start HTTP server")?
        .await
        .wrap_err("HTTP server terminated with an error")
}
