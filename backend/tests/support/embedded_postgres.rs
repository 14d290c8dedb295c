//! Embedded PostgreSQL provisioning for Diesel adapter tests.
//!
//! One shared cluster serves the whole test binary. Each test receives a
//! fresh database cloned from a template that already carries the embedded
//! migrations, so tests never observe each other's rows and the schema under
//! test is the one the binary applies at startup.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use content_api::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "content_api_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// Template names carry a hash of the migrations so schema changes never
/// reuse a stale template.
fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Start (or reuse) the shared cluster, retrying transient bootstrap
/// failures.
pub fn cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= PROVISION_RETRIES => {
                return Err(format!("start shared cluster: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(PROVISION_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        tokio::runtime::Runtime::new()
            .map_err(|err| format!("migration runtime: {err}"))?
            .block_on(run_migrations(&url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }

    Ok(template_name)
}

/// Provision a temporary database cloned from the migrated template.
///
/// The database is dropped when the returned guard goes out of scope.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("exhausted retries");
    for attempt in 1..=PROVISION_RETRIES {
        let result = ensure_template_database(cluster).and_then(|template_name| {
            let db_name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(db_name.as_str(), template_name.as_str())
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match result {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}
