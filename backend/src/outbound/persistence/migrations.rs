//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to run migrations on.
    #[error("failed to connect for migrations: {message}")]
    Connect {
        /// Underlying connection error.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Underlying migration error.
        message: String,
    },
    /// The blocking migration task did not complete.
    #[error("migration task aborted: {message}")]
    Aborted {
        /// Join error description.
        message: String,
    },
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}

/// Apply all pending migrations to `database_url`.
///
/// Diesel migrations are synchronous, so the work runs on the blocking pool.
///
/// # Errors
/// Returns [`MigrationError`] when the database is unreachable or a migration
/// fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations complete");
    Ok(())
}
