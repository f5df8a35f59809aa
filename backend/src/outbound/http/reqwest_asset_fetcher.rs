//! Reqwest-backed asset fetcher used by the relay.
//!
//! Owns transport details only: one GET per call, the client's default
//! redirect policy, a whole-request timeout and a cap on buffered bytes.
//! Upstream statuses are reported as-is; the relay service decides what to
//! do with them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::domain::AssetUrl;
use crate::domain::ports::{AssetFetchError, AssetFetcher, FetchedAsset};

/// Default whole-request deadline.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(20);
/// Default cap on a buffered upstream body (50 MiB).
pub const DEFAULT_RELAY_MAX_BYTES: u64 = 50 * 1024 * 1024;

const USER_AGENT: &str = concat!("menu-backend-relay/", env!("CARGO_PKG_VERSION"));

/// Asset fetcher sharing one immutable `reqwest::Client` across requests.
#[derive(Clone)]
pub struct ReqwestAssetFetcher {
    client: Client,
    max_bytes: u64,
}

impl ReqwestAssetFetcher {
    /// Build a fetcher with an explicit timeout and body cap.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, max_bytes })
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

#[async_trait]
impl AssetFetcher for ReqwestAssetFetcher {
    async fn fetch(&self, url: &AssetUrl) -> Result<FetchedAsset, AssetFetchError> {
        let mut response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if response
            .content_length()
            .is_some_and(|declared| declared > self.max_bytes)
        {
            return Err(AssetFetchError::too_large(self.max_bytes));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(map_body_error)? {
            append_within_limit(&mut body, &chunk, self.max_bytes)?;
        }

        Ok(FetchedAsset {
            status,
            content_type,
            body,
        })
    }
}

fn append_within_limit(
    body: &mut Vec<u8>,
    chunk: &[u8],
    max_bytes: u64,
) -> Result<(), AssetFetchError> {
    let total = u64::try_from(body.len() + chunk.len()).unwrap_or(u64::MAX);
    if total > max_bytes {
        return Err(AssetFetchError::too_large(max_bytes));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

fn map_transport_error(error: reqwest::Error) -> AssetFetchError {
    if error.is_timeout() {
        AssetFetchError::timeout(error.to_string())
    } else {
        AssetFetchError::transport(error.to_string())
    }
}

fn map_body_error(error: reqwest::Error) -> AssetFetchError {
    if error.is_timeout() {
        AssetFetchError::timeout(error.to_string())
    } else {
        AssetFetchError::body(error.to_string())
    }
}
