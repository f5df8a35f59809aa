//! Filesystem asset store confined to one capability-scoped directory.
//!
//! Every path is resolved relative to the opened root [`Dir`]; keys cannot
//! address anything outside it.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::domain::ObjectKey;
use crate::domain::ports::{AssetStore, AssetStoreError};

/// Stores uploads as plain files below a root directory.
#[derive(Clone)]
pub struct CapStdAssetStore {
    root: Arc<Dir>,
}

impl CapStdAssetStore {
    /// Create `path` if needed and open it as the store root.
    ///
    /// # Errors
    ///
    /// Returns [`AssetStoreError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetStoreError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| unavailable(path, &err))?;
        let root =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| unavailable(path, &err))?;
        Ok(Self {
            root: Arc::new(root),
        })
    }
}

fn unavailable(path: &Path, err: &std::io::Error) -> AssetStoreError {
    AssetStoreError::unavailable(format!("{}: {err}", path.display()))
}

fn io_error(key: &ObjectKey, err: &std::io::Error) -> AssetStoreError {
    AssetStoreError::io(key.as_str(), err.to_string())
}

fn write_object(root: &Dir, key: &ObjectKey, bytes: &[u8]) -> Result<(), AssetStoreError> {
    if let Some(parent) = key.parent() {
        root.create_dir_all(parent).map_err(|err| io_error(key, &err))?;
    }
    let mut file = root.create(key.as_str()).map_err(|err| io_error(key, &err))?;
    file.write_all(bytes).map_err(|err| io_error(key, &err))?;
    file.sync_all().map_err(|err| io_error(key, &err))
}

fn read_object(root: &Dir, key: &ObjectKey) -> Result<Option<Vec<u8>>, AssetStoreError> {
    match root.read(key.as_str()) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(key, &err)),
    }
}

fn join_error(err: &tokio::task::JoinError) -> AssetStoreError {
    AssetStoreError::unavailable(format!("storage task aborted: {err}"))
}

#[async_trait]
impl AssetStore for CapStdAssetStore {
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<(), AssetStoreError> {
        let root = Arc::clone(&self.root);
        let key = key.clone();
        tokio::task::spawn_blocking(move || write_object(&root, &key, &bytes))
            .await
            .map_err(|err| join_error(&err))?
    }

    async fn get(&self, key: &ObjectKey) -> Result<Option<Vec<u8>>, AssetStoreError> {
        let root = Arc::clone(&self.root);
        let key = key.clone();
        tokio::task::spawn_blocking(move || read_object(&root, &key))
            .await
            .map_err(|err| join_error(&err))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn key(raw: &str) -> ObjectKey {
        ObjectKey::parse(raw).expect("valid key")
    }

    #[rstest]
    #[tokio::test]
    async fn stores_and_reads_back_nested_objects() {
        let dir = TempDir::new().expect("tempdir");
        let store = CapStdAssetStore::open(dir.path()).expect("open store");
        let object = key("menus/1718000000000_abc123.glb");

        store.put(&object, b"glTF".to_vec()).await.expect("put");

        assert_eq!(store.get(&object).await.expect("get"), Some(b"glTF".to_vec()));
        assert!(dir.path().join("menus").join("1718000000000_abc123.glb").is_file());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_objects_read_as_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = CapStdAssetStore::open(dir.path()).expect("open store");

        let found = store.get(&key("uploads/absent.png")).await.expect("get");
        assert_eq!(found, None);
    }

    #[rstest]
    #[tokio::test]
    async fn put_replaces_existing_objects() {
        let dir = TempDir::new().expect("tempdir");
        let store = CapStdAssetStore::open(dir.path()).expect("open store");
        let object = key("uploads/logo.png");

        store.put(&object, vec![1, 2, 3]).await.expect("first put");
        store.put(&object, vec![9]).await.expect("second put");

        assert_eq!(store.get(&object).await.expect("get"), Some(vec![9]));
    }

    #[rstest]
    fn open_creates_missing_root() {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path().join("nested").join("uploads");

        CapStdAssetStore::open(&root).expect("open store");
        assert!(root.is_dir());
    }
}
