//! Key-value storage for the persisted session

use crate::error::{AuthError, AuthResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistent string key-value store the session lives in
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> AuthResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AuthResult<()>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AuthResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AuthResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Store keeping one file per key inside a private directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it if needed
    ///
    /// A directory created here is made private to the user. An existing
    /// directory keeps its permissions.
    pub async fn open(dir: impl Into<PathBuf>) -> AuthResult<Self> {
        let dir = dir.into();
        if dir.is_dir() {
            return Ok(Self { dir });
        }

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AuthError::storage(format!("creating {}", dir.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(&dir, perms)
                .map_err(|e| AuthError::storage("setting session dir permissions", e))?;
        }

        debug!("Created session dir {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory backing the store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> AuthResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AuthError::Internal(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let path = self.entry_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AuthError::storage(format!("reading {}", path.display()), e))?;

        Ok(Some(content))
    }

    async fn set(&self, key: &str, value: &str) -> AuthResult<()> {
        let path = self.entry_path(key)?;

        fs::write(&path, value)
            .await
            .map_err(|e| AuthError::storage(format!("writing {}", path.display()), e))?;

        // The token is a credential
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms)
                .map_err(|e| AuthError::storage("setting session file permissions", e))?;
        }

        debug!("Stored {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AuthResult<()> {
        let path = self.entry_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| AuthError::storage(format!("removing {}", path.display()), e))?;
            debug!("Removed {}", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (FileStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("session")).await.unwrap();
        (store, temp)
    }

    #[tokio::test]
    async fn file_store_set_and_get() {
        let (store, _temp) = test_store().await;

        store.set("authToken", "tok-1").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap().as_deref(), Some("tok-1"));

        store.set("authToken", "tok-2").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap().as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn file_store_missing_returns_none() {
        let (store, _temp) = test_store().await;
        assert!(store.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_remove_is_idempotent() {
        let (store, _temp) = test_store().await;

        store.set("user", "{}").await.unwrap();
        store.remove("user").await.unwrap();
        store.remove("user").await.unwrap();
        assert!(store.get("user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_rejects_path_keys() {
        let (store, _temp) = test_store().await;
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("a/b").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let (store, _temp) = test_store().await;

        store.set("authToken", "tok-1").await.unwrap();
        let mode = std::fs::metadata(store.dir().join("authToken"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_creates_private_dir() {
        use std::os::unix::fs::PermissionsExt;
        let (store, _temp) = test_store().await;

        let mode = std::fs::metadata(store.dir()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_keeps_existing_dir_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        std::fs::create_dir(&shared).unwrap();
        std::fs::set_permissions(&shared, std::fs::Permissions::from_mode(0o755)).unwrap();

        let store = FileStore::open(&shared).await.unwrap();
        store.set("authToken", "tok-1").await.unwrap();

        let mode = std::fs::metadata(&shared).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        let file_mode = std::fs::metadata(shared.join("authToken"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(file_mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set("authToken", "tok-1").await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("authToken").await.unwrap().as_deref(), Some("tok-1"));

        store.remove("authToken").await.unwrap();
        assert!(store.is_empty().await);
    }
}
