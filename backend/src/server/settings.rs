//! Application settings loaded via OrthoConfig.
//!
//! Every value may come from `MENU_*` environment variables, a config file or
//! the command line. Unset values fall back to the defaults below.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Runtime configuration for the menu backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENU")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Public origin used for upload URLs and QR menu links.
    pub public_base_url: Option<String>,
    /// Upstream timeout for relayed assets, in seconds.
    #[ortho_config(default = 20)]
    pub relay_timeout_secs: u64,
    /// Largest upstream body the relay buffers.
    #[ortho_config(default = 52_428_800)]
    pub relay_max_bytes: u64,
    /// Directory holding uploaded files.
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted upload body.
    #[ortho_config(default = 26_214_400)]
    pub upload_max_bytes: usize,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the public origin without a trailing slash.
    pub fn public_base_url(&self) -> &str {
        self.public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }

    pub fn relay_max_bytes(&self) -> u64 {
        self.relay_max_bytes
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    pub fn upload_max_bytes(&self) -> usize {
        self.upload_max_bytes
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size
    }
}
