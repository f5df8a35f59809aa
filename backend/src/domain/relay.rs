//! Asset relay: re-serve a remote asset same-origin.
//!
//! Browser-side 3D and image viewers cannot load textures or geometry from
//! hosts that omit permissive CORS headers. The relay fetches the asset once
//! on the server and hands the bytes back so the inbound adapter can emit
//! them with its own headers. Nothing is cached between calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{AssetFetcher, AssetRelay};
use crate::domain::{AssetUrl, Error};

/// Content type used when the upstream response does not declare one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Outcome of a relay call that reached the upstream host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayedAsset {
    /// Upstream answered 2xx; `body` is complete.
    Delivered { content_type: String, body: Vec<u8> },
    /// Upstream answered with a non-2xx status; forward it verbatim.
    UpstreamRejected { status: u16, body: Vec<u8> },
}

/// Relay service backed by an [`AssetFetcher`].
#[derive(Clone)]
pub struct AssetRelayService<F> {
    fetcher: Arc<F>,
}

impl<F> AssetRelayService<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<F> AssetRelay for AssetRelayService<F>
where
    F: AssetFetcher,
{
    async fn relay(&self, target: &str) -> Result<RelayedAsset, Error> {
        let url = AssetUrl::parse(target).map_err(|err| {
            debug!(relay_target = target, error = %err, "rejected relay target");
            Error::invalid_request(format!("invalid relay target: {err}"))
                .with_details(json!({ "field": "url", "code": "invalid_url" }))
        })?;

        let fetched = self.fetcher.fetch(&url).await.map_err(|err| {
            warn!(relay_target = %url, error = %err, "asset relay fetch failed");
            Error::upstream_failure("failed to fetch remote asset")
        })?;

        if !(200..300).contains(&fetched.status) {
            debug!(relay_target = %url, status = fetched.status, "relaying upstream error status");
            return Ok(RelayedAsset::UpstreamRejected {
                status: fetched.status,
                body: fetched.body,
            });
        }

        let content_type = fetched
            .content_type
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_owned());
        Ok(RelayedAsset::Delivered {
            content_type,
            body: fetched.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{AssetFetchError, FetchedAsset, MockAssetFetcher};
    use rstest::rstest;

    fn service(fetcher: MockAssetFetcher) -> AssetRelayService<MockAssetFetcher> {
        AssetRelayService::new(Arc::new(fetcher))
    }

    #[rstest]
    #[case("")]
    #[case("not a url")]
    #[case("ftp://example.com/model.glb")]
    #[case("file:///etc/hosts")]
    #[case("//example.com/model.glb")]
    #[case("data:text/plain,hello")]
    #[tokio::test]
    async fn rejects_non_http_targets_without_fetching(#[case] target: &str) {
        let mut fetcher = MockAssetFetcher::new();
        fetcher.expect_fetch().times(0);

        let err = service(fetcher)
            .relay(target)
            .await
            .expect_err("target must be rejected");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn delivers_body_and_upstream_content_type() {
        let mut fetcher = MockAssetFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.as_str() == "https://cdn.example.com/pizza.glb")
            .times(1)
            .return_once(|_| {
                Ok(FetchedAsset {
                    status: 200,
                    content_type: Some("model/gltf-binary".to_owned()),
                    body: vec![7; 32],
                })
            });

        let relayed = service(fetcher)
            .relay("https://cdn.example.com/pizza.glb")
            .await
            .expect("relay succeeds");

        assert_eq!(
            relayed,
            RelayedAsset::Delivered {
                content_type: "model/gltf-binary".to_owned(),
                body: vec![7; 32],
            }
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[tokio::test]
    async fn falls_back_to_octet_stream(#[case] content_type: Option<String>) {
        let mut fetcher = MockAssetFetcher::new();
        fetcher.expect_fetch().return_once(move |_| {
            Ok(FetchedAsset {
                status: 200,
                content_type,
                body: b"abc".to_vec(),
            })
        });

        let relayed = service(fetcher)
            .relay("http://example.com/a")
            .await
            .expect("relay succeeds");

        assert!(matches!(
            relayed,
            RelayedAsset::Delivered { ref content_type, .. } if content_type == FALLBACK_CONTENT_TYPE
        ));
    }

    #[rstest]
    #[case(404)]
    #[case(403)]
    #[case(502)]
    #[tokio::test]
    async fn forwards_upstream_error_status_and_body(#[case] status: u16) {
        let mut fetcher = MockAssetFetcher::new();
        fetcher.expect_fetch().return_once(move |_| {
            Ok(FetchedAsset {
                status,
                content_type: Some("text/html".to_owned()),
                body: b"<h1>nope</h1>".to_vec(),
            })
        });

        let relayed = service(fetcher)
            .relay("https://example.com/missing.glb")
            .await
            .expect("upstream errors are relayed, not raised");

        assert_eq!(
            relayed,
            RelayedAsset::UpstreamRejected {
                status,
                body: b"<h1>nope</h1>".to_vec(),
            }
        );
    }

    #[rstest]
    #[case(AssetFetchError::timeout("20s elapsed"))]
    #[case(AssetFetchError::transport("dns error"))]
    #[case(AssetFetchError::body("connection reset"))]
    #[case(AssetFetchError::too_large(10_u64))]
    #[tokio::test]
    async fn network_failures_become_upstream_failure(#[case] failure: AssetFetchError) {
        let mut fetcher = MockAssetFetcher::new();
        fetcher.expect_fetch().return_once(move |_| Err(failure));

        let err = service(fetcher)
            .relay("https://example.com/model.glb")
            .await
            .expect_err("network failure surfaces as error");

        assert_eq!(err.code(), ErrorCode::UpstreamFailure);
    }
}
