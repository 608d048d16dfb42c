//! Keyed document storage for metadata

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::RwLock;
use tempfile::NamedTempFile;

/// Small keyed store holding serialized documents
pub trait KvStore {
    /// Value stored under `key`, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// One `{key}.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSystemKvStore {
    dir: PathBuf,
}

impl FileSystemKvStore {
    pub fn new(dir: PathBuf) -> Self {
        FileSystemKvStore { dir }
    }

    /// Path of the file backing `key`
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileSystemKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write to a sibling temp file, then rename over the target
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process key-value storage
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "kv store lock poisoned"))?;
        values.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

impl<K: KvStore + ?Sized> KvStore for &K {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).set(key, bytes)
    }
}

impl<K: KvStore + ?Sized> KvStore for Box<K> {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).set(key, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filesystem_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemKvStore::new(temp.path().join("kv"));

        assert!(store.get("entries").is_none());

        store.set("entries", b"[]").unwrap();
        assert_eq!(store.get("entries").unwrap(), b"[]");
        assert!(temp.path().join("kv/entries.json").exists());

        store.set("entries", b"[1]").unwrap();
        assert_eq!(store.get("entries").unwrap(), b"[1]");
    }

    #[test]
    fn test_filesystem_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemKvStore::new(temp.path().to_path_buf());
        store.set("a", b"1").unwrap();
        store.set("a", b"2").unwrap();

        let files: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        assert!(store.get("k").is_none());
        store.set("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), b"v");
    }
}
