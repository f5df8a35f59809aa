//! Upload service implementing the [`AssetUploads`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use rand::Rng;
use tracing::info;

use crate::domain::ports::{AssetStore, AssetStoreError, AssetUploads};
use crate::domain::{AssetContent, Error, ObjectKey, StoredAsset, UploadRequest, UserId};

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 10;

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
        .collect()
}

fn map_store_error(error: AssetStoreError) -> Error {
    match error {
        AssetStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("asset store unavailable: {message}"))
        }
        AssetStoreError::Io { key, message } => {
            Error::internal(format!("asset store failed for {key}: {message}"))
        }
    }
}

#[derive(Clone)]
pub struct UploadService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    public_base_url: String,
    max_bytes: usize,
}

impl<S> UploadService<S> {
    /// `public_base_url` is the origin this server is reachable on; stored
    /// assets are served from `<public_base_url>/uploads/<key>`.
    pub fn new(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        public_base_url: impl Into<String>,
        max_bytes: usize,
    ) -> Self {
        Self {
            store,
            clock,
            public_base_url: public_base_url.into(),
            max_bytes,
        }
    }
}

#[async_trait]
impl<S> AssetUploads for UploadService<S>
where
    S: AssetStore,
{
    fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    async fn upload(
        &self,
        uploader: &UserId,
        request: &UploadRequest,
        body: Vec<u8>,
    ) -> Result<StoredAsset, Error> {
        if body.len() > self.max_bytes {
            return Err(Error::payload_too_large(format!(
                "upload exceeds {} bytes",
                self.max_bytes
            )));
        }
        if body.is_empty() {
            return Err(Error::invalid_request("upload body must not be empty"));
        }

        let key = request.object_key(self.clock.utc().timestamp_millis(), &random_suffix());
        let size = body.len();
        self.store.put(&key, body).await.map_err(map_store_error)?;
        info!(user_id = %uploader, key = %key, size, "stored uploaded asset");

        Ok(StoredAsset {
            url: format!(
                "{}/uploads/{key}",
                self.public_base_url.trim_end_matches('/')
            ),
            key: key.to_string(),
        })
    }

    async fn open(&self, key: &str) -> Result<AssetContent, Error> {
        let key = ObjectKey::parse(key)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let bytes = self
            .store
            .get(&key)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("asset {key} not found")))?;
        Ok(AssetContent {
            content_type: key.extension().content_type(),
            bytes,
        })
    }
}
