//! Infrastructure layer - External I/O and persistence

pub mod blob_store;
pub mod config;
pub mod imaging;
pub mod kv_store;
pub mod repository;

pub use blob_store::{BlobStore, FileSystemBlobStore, MemoryBlobStore};
pub use config::Config;
pub use kv_store::{FileSystemKvStore, KvStore, MemoryKvStore};
pub use repository::{DiaryRepository, FileSystemRepository};
