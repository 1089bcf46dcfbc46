//! Key-value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// Raw byte storage behind a [`Cache`].
///
/// Implementations must be synchronous: a `set` that returns `Ok` is durable
/// as far as the backend is concerned.
pub trait Backend: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Overwrite the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check whether `key` exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Process-local backend. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("memory store poisoned".to_string()))
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        // Write-then-rename so readers never observe a half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

/// Type-safe local store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and every clone
/// shares the same backend, so the cart and the trade session can both hold
/// a handle to one store.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn Backend>,
}

impl Cache {
    /// Wrap an arbitrary backend.
    pub fn with_backend(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open an in-memory store.
    ///
    /// # Example
    ///
    /// ```
    /// let cache = apex_cache::Cache::in_memory();
    /// cache.set("greeting", &"hello").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open a directory-backed store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist. Stored bytes that do not
    /// parse as `T` are an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw stored text, without interpreting it.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .backend
            .get(key)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Set a value, overwriting any prior value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)?;
        tracing::trace!(key, bytes = bytes.len(), "store write");
        Ok(())
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        quantity: i64,
    }

    #[test]
    fn test_memory_roundtrip() {
        let cache = Cache::in_memory();
        let items = vec![Item {
            id: "P659".into(),
            quantity: 2,
        }];
        cache.set("apex-cart", &items).unwrap();

        let loaded: Vec<Item> = cache.get("apex-cart").unwrap().unwrap();
        assert_eq!(loaded, items);
        assert!(cache.exists("apex-cart").unwrap());
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        assert!(cache.get::<Vec<Item>>("nothing").unwrap().is_none());
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_clones_share_backend() {
        let a = Cache::in_memory();
        let b = a.clone();
        a.set("k", &1).unwrap();
        assert_eq!(b.get::<i32>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_malformed_value_is_error() {
        let backend = MemoryBackend::new();
        backend.set("apex-cart", b"{not json").unwrap();
        let cache = Cache::with_backend(backend);

        let result = cache.get::<Vec<Item>>("apex-cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
        assert_eq!(cache.get_raw("apex-cart").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_delete_absent_is_ok() {
        let cache = Cache::in_memory();
        assert!(cache.delete("ghost").is_ok());
    }

    #[test]
    fn test_file_backend_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();

        let cache = Cache::open(dir.path()).unwrap();
        cache.set("apex-cart", &Vec::<Item>::new()).unwrap();
        cache.set("tradeUser", &"TRD-001").unwrap();
        drop(cache);

        let reopened = Cache::open(dir.path()).unwrap();
        assert_eq!(reopened.get_raw("apex-cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.keys().unwrap(), vec!["apex-cart", "tradeUser"]);

        reopened.delete("tradeUser").unwrap();
        assert!(!reopened.exists("tradeUser").unwrap());
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();

        assert!(matches!(
            cache.set("../escape", &1),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(cache.get::<i32>(""), Err(CacheError::InvalidKey(_))));
    }
}
