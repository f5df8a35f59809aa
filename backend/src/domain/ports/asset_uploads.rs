//! Driving port for storing and serving uploaded assets.

use async_trait::async_trait;

use crate::domain::{AssetContent, Error, StoredAsset, UploadRequest, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetUploads: Send + Sync {
    /// Largest accepted upload body in bytes.
    fn max_bytes(&self) -> usize;

    /// Store `body` under a freshly generated key.
    async fn upload(
        &self,
        uploader: &UserId,
        request: &UploadRequest,
        body: Vec<u8>,
    ) -> Result<StoredAsset, Error>;

    /// Read a stored asset by its key. Fails with `not_found` when absent.
    async fn open(&self, key: &str) -> Result<AssetContent, Error>;
}
