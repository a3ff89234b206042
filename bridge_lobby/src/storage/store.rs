//! Key-value store abstraction and its implementations.

use super::errors::{StorageError, StorageResult};
use fs4::fs_std::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::RwLock,
};

/// Trait for the persistence collaborator.
///
/// Values are opaque strings; callers own the encoding. Implementations must
/// be shareable between every component of one session.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Store `value` under `key` only if the current value still equals
    /// `expected` (`None` meaning absent).
    ///
    /// The comparison and the write happen as one atomic step with respect to
    /// every other writer of the store.
    ///
    /// # Returns
    ///
    /// * `StorageResult<bool>` - `false` if the stored value differed and
    ///   nothing was written
    fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StorageResult<bool>;
}

/// Read and decode a JSON record
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON record
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// In-memory store for tests and single-process use
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StorageResult<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if entries.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }
}

/// File-backed store: one JSON file per key under a data directory.
///
/// Several client processes pointed at the same directory share state.
/// Writes go to a temporary file that is renamed over the target, so a
/// reader sees either the old or the new value, never a partial one. Every
/// write holds an exclusive OS lock on a `<key>.lock` file next to the
/// record, which makes `compare_and_set` atomic across processes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    ///
    /// # Errors
    ///
    /// * `StorageError::Io` - Directory could not be created
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }

    /// Block until this process holds the write lock for `key`. The lock is
    /// released when the returned file is dropped.
    fn lock_key(&self, key: &str) -> StorageResult<File> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.dir.join(format!("{}.lock", file_stem(key))))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn read_path(path: &Path) -> StorageResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn replace_path(target: &Path, value: &str) -> StorageResult<()> {
        let tmp = target.with_extension(format!("tmp-{}", uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::read_path(&self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _lock = self.lock_key(key)?;
        Self::replace_path(&self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _lock = self.lock_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StorageResult<bool> {
        let _lock = self.lock_key(key)?;
        let target = self.path_for(key);
        if Self::read_path(&target)?.as_deref() != expected {
            return Ok(false);
        }
        Self::replace_path(&target, value)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn temp_dir(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}", prefix, uuid::Uuid::new_v4().simple()))
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        seats: Vec<Option<String>>,
    }

    #[test]
    fn test_memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing twice is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_memory_store_compare_and_set() {
        let store = MemoryStore::new();
        assert!(store.compare_and_set("k", None, "v1").unwrap());
        // Key now exists, so an "absent" expectation is stale
        assert!(!store.compare_and_set("k", None, "v2").unwrap());
        assert!(!store.compare_and_set("k", Some("v0"), "v2").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

        assert!(store.compare_and_set("k", Some("v1"), "v2").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let record = Record {
            name: "Table 1".to_string(),
            seats: vec![Some("alice".to_string()), None],
        };

        write_json(&store, "rec", &record).unwrap();
        let loaded: Option<Record> = read_json(&store, "rec").unwrap();
        assert_eq!(loaded, Some(record));

        let missing: Option<Record> = read_json(&store, "nope").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_json_corrupted() {
        let store = MemoryStore::new();
        store.set("rec", "{not json").unwrap();
        let result: StorageResult<Option<Record>> = read_json(&store, "rec");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir("file_store_roundtrip");
        let store = FileStore::open(&dir).unwrap();

        assert_eq!(store.get("bridge_tables").unwrap(), None);
        store.set("bridge_tables", "[]").unwrap();
        assert_eq!(store.get("bridge_tables").unwrap().as_deref(), Some("[]"));

        // A second handle on the same directory sees the same data
        let other = FileStore::open(&dir).unwrap();
        assert_eq!(other.get("bridge_tables").unwrap().as_deref(), Some("[]"));

        store.remove("bridge_tables").unwrap();
        assert_eq!(other.get("bridge_tables").unwrap(), None);
        store.remove("bridge_tables").unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = temp_dir("file_store_tmp");
        let store = FileStore::open(&dir).unwrap();
        store.set("lastDeckColor", "\"red\"").unwrap();
        store.set("lastDeckColor", "\"blue\"").unwrap();

        let mut names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["lastDeckColor.json".to_string(), "lastDeckColor.lock".to_string()]
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_compare_and_set() {
        let dir = temp_dir("file_store_cas");
        let store = FileStore::open(&dir).unwrap();
        let other = FileStore::open(&dir).unwrap();

        assert!(store.compare_and_set("bridge_tables", None, "[1]").unwrap());
        assert!(!other.compare_and_set("bridge_tables", None, "[2]").unwrap());
        assert!(other.compare_and_set("bridge_tables", Some("[1]"), "[2]").unwrap());
        assert!(!store.compare_and_set("bridge_tables", Some("[1]"), "[3]").unwrap());
        assert_eq!(store.get("bridge_tables").unwrap().as_deref(), Some("[2]"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_concurrent_writers_serialize() {
        let dir = temp_dir("file_store_threads");
        FileStore::open(&dir).unwrap().set("counter", "0").unwrap();

        // Each thread increments through compare_and_set, retrying on a lost race
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = FileStore::open(&dir).unwrap();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        loop {
                            let current = store.get("counter").unwrap().unwrap();
                            let next = (current.parse::<u32>().unwrap() + 1).to_string();
                            if store
                                .compare_and_set("counter", Some(current.as_str()), &next)
                                .unwrap()
                            {
                                break;
                            }
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("100"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = temp_dir("file_store_keys");
        let store = FileStore::open(&dir).unwrap();
        store.set("../escape", "x").unwrap();
        assert!(dir.join("___escape.json").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
