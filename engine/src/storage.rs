//! Storage port and the adapters shipped with the engine.
//!
//! The store never touches a global: it is handed something implementing
//! [`Storage`] and owns it for its lifetime. Each store reads and writes a
//! single key, and values are whole serialized collections.

use crate::error::{Error, Result};
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A synchronous string key-value store.
pub trait Storage {
    /// Read the value under `key`. `None` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// In-memory storage that counts its traffic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    reads: Cell<usize>,
    writes: usize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with a value already under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.into(), value.into());
        storage
    }

    /// Peek at a value without counting a read.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of reads performed so far.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Reset both counters.
    pub fn reset_counts(&mut self) {
        self.reads.set(0);
        self.writes = 0;
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whether `key` is safe to use as a file name: non-empty ASCII letters,
/// digits, `_` and `-`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Directory-backed storage: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so readers see either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened file storage");
        Ok(Self { root })
    }

    /// Directory holding the files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the value for `key`.
    ///
    /// Keys outside the [`is_valid_key`] alphabet are rejected so a key can
    /// never name a file outside the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(Error::Storage(format!("invalid storage key {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_read_absent() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("dogs").unwrap(), None);
    }

    #[test]
    fn memory_write_then_read() {
        let mut storage = MemoryStorage::new();
        storage.write("dogs", "[]").unwrap();
        assert_eq!(storage.read("dogs").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn memory_keys_are_independent() {
        let mut storage = MemoryStorage::with_value("dogs", "1");
        storage.write("books", "2").unwrap();
        assert_eq!(storage.get("dogs"), Some("1"));
        assert_eq!(storage.get("books"), Some("2"));
    }

    #[test]
    fn memory_reset_counts() {
        let mut storage = MemoryStorage::new();
        storage.write("k", "v").unwrap();
        storage.read("k").unwrap();
        assert_eq!(storage.read_count(), 1);

        storage.reset_counts();
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.read_count(), 0);
    }

    #[test]
    fn storage_through_mut_ref() {
        let mut storage = MemoryStorage::new();
        {
            let mut borrowed = &mut storage;
            Storage::write(&mut borrowed, "k", "v").unwrap();
        }
        assert_eq!(storage.get("k"), Some("v"));
    }

    #[test]
    fn file_read_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.read("dogs").unwrap(), None);
    }

    #[test]
    fn file_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();

        storage.write("dogs", r#"{"nextId":1,"items":[]}"#).unwrap();
        storage.write("dogs", r#"{"nextId":2,"items":[]}"#).unwrap();

        assert_eq!(
            storage.read("dogs").unwrap().as_deref(),
            Some(r#"{"nextId":2,"items":[]}"#)
        );
        assert!(storage.path_for("dogs").unwrap().exists());
        assert!(!dir.path().join(".dogs.json.tmp").exists());
    }

    #[test]
    fn file_rejects_keys_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data");
        let mut storage = FileStorage::open(&root).unwrap();
        std::fs::write(dir.path().join("x.json"), "secret").unwrap();

        for key in ["../x", "a/b", "", ".hidden", "dogs.json"] {
            assert!(matches!(storage.read(key), Err(Error::Storage(_))), "{key}");
            assert!(storage.write(key, "{}").is_err(), "{key}");
        }
        assert_eq!(std::fs::read_to_string(dir.path().join("x.json")).unwrap(), "secret");
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn valid_keys() {
        assert!(is_valid_key("dogs"));
        assert!(is_valid_key("my_books-2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc"));
        assert!(!is_valid_key("a b"));
    }

    #[test]
    fn file_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.root(), nested.as_path());
    }
}
