use std::path::PathBuf;

use async_trait::async_trait;

/// An object that can be used to get, put and delete blobs by key.
///
/// The store is best-effort: callers log failures and carry on rather than
/// surfacing them to the user.
#[async_trait]
pub trait BlobStorageProvider {
    async fn maybe_get(&self, key: &str) -> Result<Option<Vec<u8>>, std::io::Error>;
    async fn put(&self, key: &str, contents: Vec<u8>) -> Result<(), std::io::Error>;
    /// Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), std::io::Error>;
}

/// A [`BlobStorageProvider`] backed by a directory on local disk. Keys are
/// relative paths under the root.
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStorageProvider for LocalDisk {
    async fn maybe_get(&self, key: &str) -> Result<Option<Vec<u8>>, std::io::Error> {
        let path = self.path(key);
        if path.try_exists()? {
            Ok(Some(std::fs::read(path)?))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, key: &str, contents: Vec<u8>) -> Result<(), std::io::Error> {
        let path = self.path(key);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, contents)
    }

    async fn delete(&self, key: &str) -> Result<(), std::io::Error> {
        let path = self.path(key);
        if path.try_exists()? {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
