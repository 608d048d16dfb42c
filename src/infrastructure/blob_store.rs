//! Named binary payload storage

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

/// Storage for opaque named payloads (the photos)
pub trait BlobStore {
    /// Write `bytes` under `name`, replacing any previous payload
    fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()>;

    /// Read the payload stored under `name`; `None` if it is missing or unreadable
    fn read(&self, name: &str) -> Option<Vec<u8>>;

    /// Remove the payload stored under `name`
    fn delete(&self, name: &str) -> io::Result<()>;
}

/// One file per blob inside a directory
#[derive(Debug, Clone)]
pub struct FileSystemBlobStore {
    dir: PathBuf,
}

impl FileSystemBlobStore {
    pub fn new(dir: PathBuf) -> Self {
        FileSystemBlobStore { dir }
    }

    fn path_for(&self, name: &str) -> io::Result<PathBuf> {
        // Names are generated ids; refuse anything that could escape the directory
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid blob name: {:?}", name),
            ));
        }
        Ok(self.dir.join(name))
    }
}

impl BlobStore for FileSystemBlobStore {
    fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(name)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(path, bytes)
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.path_for(name).ok()?;
        fs::read(path).ok()
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.path_for(name)?)
    }
}

/// In-process blob storage
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all stored blobs, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.blobs.read() {
            Ok(blobs) => blobs.keys().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
        };
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read(name).is_some()
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "blob store lock poisoned")
}

impl BlobStore for MemoryBlobStore {
    fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.read().ok()?.get(name).cloned()
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).write(name, bytes)
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        (**self).read(name)
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        (**self).delete(name)
    }
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn write(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).write(name, bytes)
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        (**self).read(name)
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        (**self).delete(name)
    }
}
