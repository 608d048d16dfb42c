//! File system layout of a diary root

use crate::error::{DaybookError, Result};
use crate::infrastructure::config::DAYBOOK_DIR;
use crate::infrastructure::{Config, FileSystemBlobStore, FileSystemKvStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory (relative to the root) holding photo payloads
pub const PHOTOS_DIR: &str = "photos";

/// Directory (relative to the root) holding metadata documents
const KV_DIR: &str = "kv";

/// Abstract access to a diary root
pub trait DiaryRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .daybook/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .daybook/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .daybook directory exists
    fn is_initialized(&self) -> bool;

    /// Create .daybook directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of DiaryRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the diary root.
    /// Checks DAYBOOK_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("DAYBOOK_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_daybook_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(DaybookError::Config(format!(
                "DAYBOOK_ROOT is set to '{}' but no .daybook directory found. \
                Run 'daybook init' in that directory or unset DAYBOOK_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the diary root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_daybook_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| DaybookError::NotDaybookDirectory(start.to_path_buf()))
    }

    fn has_daybook_dir(path: &Path) -> bool {
        path.join(DAYBOOK_DIR).is_dir()
    }

    /// Blob store backed by the photos directory
    pub fn blob_store(&self) -> FileSystemBlobStore {
        FileSystemBlobStore::new(self.root.join(PHOTOS_DIR))
    }

    /// Key-value store backed by .daybook/kv
    pub fn kv_store(&self) -> FileSystemKvStore {
        FileSystemKvStore::new(self.root.join(DAYBOOK_DIR).join(KV_DIR))
    }
}

impl DiaryRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_daybook_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let daybook_dir = self.root.join(DAYBOOK_DIR);

        if daybook_dir.exists() {
            return Err(DaybookError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&daybook_dir)?;
        fs::create_dir_all(daybook_dir.join(KV_DIR))?;
        fs::create_dir_all(self.root.join(PHOTOS_DIR))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{BlobStore, KvStore};
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_layout() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();

        assert!(repo.is_initialized());
        assert!(temp.path().join(".daybook/kv").is_dir());
        assert!(temp.path().join("photos").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        let nested = temp.path().join("photos/2025/trip");
        fs::create_dir_all(&nested).unwrap();

        let found = FileSystemRepository::discover_from(&nested).unwrap();
        assert_eq!(found.root(), temp.path());
    }

    #[test]
    fn test_discover_from_uninitialized_fails() {
        let temp = TempDir::new().unwrap();
        match FileSystemRepository::discover_from(temp.path()) {
            Err(DaybookError::NotDaybookDirectory(path)) => assert_eq!(path, temp.path()),
            other => panic!("Expected NotDaybookDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_stores_live_under_root() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        repo.blob_store().write("x.jpg", b"1").unwrap();
        repo.kv_store().set("entries", b"[]").unwrap();

        assert!(temp.path().join("photos/x.jpg").exists());
        assert!(temp.path().join(".daybook/kv/entries.json").exists());
    }
}
