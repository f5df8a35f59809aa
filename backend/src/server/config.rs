//! HTTP server configuration object and helpers.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use backend::outbound::http::{DEFAULT_RELAY_MAX_BYTES, DEFAULT_RELAY_TIMEOUT};
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::persistence::DbPool;

use super::settings::AppSettings;

/// Upstream limits applied by the asset relay.
#[derive(Debug, Clone, Copy)]
pub struct RelayLimits {
    pub timeout: Duration,
    pub max_bytes: u64,
}

impl Default for RelayLimits {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_RELAY_TIMEOUT,
            max_bytes: DEFAULT_RELAY_MAX_BYTES,
        }
    }
}

/// Where uploads are stored and how large they may be.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_base_url: String,
    pub(crate) relay: RelayLimits,
    pub(crate) uploads: UploadLimits,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from session and listener settings.
    ///
    /// Relay limits default to the fetcher defaults; uploads default to an
    /// `uploads` directory below the working directory.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            public_base_url: format!("http://{bind_addr}"),
            relay: RelayLimits::default(),
            uploads: UploadLimits {
                dir: PathBuf::from("uploads"),
                max_bytes: 25 * 1024 * 1024,
            },
            db_pool: None,
        }
    }

    /// Build a configuration from loaded settings and session cookie policy.
    ///
    /// The database pool is left unset; callers attach one after migrations.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured bind address is invalid.
    pub fn from_settings(
        settings: &AppSettings,
        session: SessionSettings,
    ) -> Result<Self, AddrParseError> {
        let bind_addr = settings.bind_addr()?;
        Ok(
            Self::new(session.key, session.cookie_secure, session.same_site, bind_addr)
                .with_public_base_url(settings.public_base_url())
                .with_relay_limits(RelayLimits {
                    timeout: settings.relay_timeout(),
                    max_bytes: settings.relay_max_bytes(),
                })
                .with_uploads(UploadLimits {
                    dir: settings.upload_dir(),
                    max_bytes: settings.upload_max_bytes(),
                }),
        )
    }

    /// Set the public origin used in upload URLs and QR menu links.
    #[must_use]
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_relay_limits(mut self, relay: RelayLimits) -> Self {
        self.relay = relay;
        self
    }

    #[must_use]
    pub fn with_uploads(mut self, uploads: UploadLimits) -> Self {
        self.uploads = uploads;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps accounts, restaurants and menu items
    /// in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
