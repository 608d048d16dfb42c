//! daybook - Calendar diary
//!
//! Keeps at most one photo and note per calendar day. Photos are stored as
//! individual JPEG blobs, entry metadata as one JSON document, and months are
//! laid out on a fixed six-week grid for display.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{DiaryStore, StoreOptions};
pub use error::DaybookError;
