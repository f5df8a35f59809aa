//! Driven port for storing uploaded files.

use async_trait::async_trait;

use crate::domain::ObjectKey;

use super::define_port_error;

define_port_error! {
    /// Failures reported by asset store adapters.
    pub enum AssetStoreError {
        /// The backing store could not be reached or opened.
        Unavailable { message: String } => "asset store unavailable: {message}",
        /// Reading or writing an object failed.
        Io { key: String, message: String } => "asset store I/O failed for {key}: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<(), AssetStoreError>;

    /// Read the object stored under `key`, or `None` when absent.
    async fn get(&self, key: &ObjectKey) -> Result<Option<Vec<u8>>, AssetStoreError>;
}
