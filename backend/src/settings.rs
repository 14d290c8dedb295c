//! Server settings loaded via OrthoConfig.
//!
//! Values come from `CONTENT_API_*` environment variables, configuration
//! files and command-line flags, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Listener and storage settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTENT_API")]
pub struct ServerSettings {
    /// Interface to bind (default `0.0.0.0`).
    pub host: Option<IpAddr>,
    /// Port to bind (default 8080).
    pub port: Option<u16>,
    /// PostgreSQL connection URL. In-memory storage is used when unset.
    pub database_url: Option<String>,
}

impl ServerSettings {
    /// Socket address to bind, with defaults applied.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// The configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("content-api")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("CONTENT_API_HOST", None::<String>),
            ("CONTENT_API_PORT", None::<String>),
            ("CONTENT_API_DATABASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONTENT_API_HOST", Some("127.0.0.1".to_owned())),
            ("CONTENT_API_PORT", Some("9090".to_owned())),
            (
                "CONTENT_API_DATABASE_URL",
                Some("postgres://localhost/content".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/content")
        );
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("CONTENT_API_HOST", None::<String>),
            ("CONTENT_API_PORT", None::<String>),
            ("CONTENT_API_DATABASE_URL", Some("   ".to_owned())),
        ]);

        assert!(load_from_empty_args().database_url().is_none());
    }
}
