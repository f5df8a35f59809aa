//! Driving port for the cross-origin asset relay.

use async_trait::async_trait;

use crate::domain::{Error, RelayedAsset};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRelay: Send + Sync {
    /// Validate `target` and fetch it once.
    ///
    /// Invalid targets fail with `invalid_request` before any network call;
    /// network failures yield `upstream_failure`. Upstream error statuses are
    /// not errors here: they come back as [`RelayedAsset::UpstreamRejected`].
    async fn relay(&self, target: &str) -> Result<RelayedAsset, Error>;
}
