//! Durable key-value storage for ledger snapshots.
//!
//! The ledger persists each collection as one JSON document under a fixed
//! key (see [`SnapshotKey`]). Backends only move opaque strings around:
//!
//! - [`FileStorage`] keeps one `<key>.json` file per key in a directory.
//! - [`MemoryStorage`] keeps everything in a shared in-process map.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::ResultEngine;

/// Logical keys the ledger writes under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Members,
    Expenses,
    Prices,
}

impl SnapshotKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SnapshotKey::Members => "members",
            SnapshotKey::Expenses => "expenses",
            SnapshotKey::Prices => "prices",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string key-value store.
///
/// `read` returns `Ok(None)` for a key that was never written.
pub trait Storage: fmt::Debug {
    fn read(&self, key: &str) -> ResultEngine<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> ResultEngine<()>;
}

/// Stores every key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> ResultEngine<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map, like every tab of a browser
/// sharing one local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw content stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Writes a raw value, bypassing the ledger (seeding, corruption tests).
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.to_string(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.read("members").unwrap(), None);
    }

    #[test]
    fn file_storage_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));
        storage.write("members", "[]").unwrap();
        storage.write("expenses", "[1]").unwrap();

        assert!(dir.path().join("data/members.json").is_file());
        assert_eq!(storage.read("expenses").unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("data/members.json.tmp").exists());
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();
        handle.write("prices", "{}").unwrap();
        assert_eq!(storage.get("prices").as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);
    }
}
