//! Driven port for fetching remote assets on behalf of the relay.

use async_trait::async_trait;

use crate::domain::AssetUrl;

use super::define_port_error;

/// Remote response captured by the fetcher.
///
/// `body` always holds the complete upstream body; adapters buffer it before
/// returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

define_port_error! {
    /// Network-class failures while fetching an asset.
    pub enum AssetFetchError {
        /// The remote host did not answer before the deadline.
        Timeout { message: String } => "asset fetch timed out: {message}",
        /// DNS, connection or TLS failure before a response arrived.
        Transport { message: String } => "asset fetch transport failed: {message}",
        /// The body could not be read to completion.
        Body { message: String } => "asset body read failed: {message}",
        /// The body exceeded the configured size bound.
        TooLarge { limit: u64 } => "asset body exceeds {limit} bytes",
    }
}

/// Issues a single GET for `url` and buffers the response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &AssetUrl) -> Result<FetchedAsset, AssetFetchError>;
}
