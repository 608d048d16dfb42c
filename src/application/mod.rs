//! Application layer - Use cases and orchestration

pub mod diary_store;
pub mod entry_service;
pub mod init;
pub mod listeners;
pub mod manage_config;
pub mod month_view;

pub use diary_store::{DiaryStore, StoreOptions, METADATA_KEY};
pub use entry_service::{open_diary, resolve_day, EntryService, FileSystemDiary};
pub use listeners::{ChangeListener, DiaryChange, ListenerRegistry};
pub use manage_config::ConfigService;
pub use month_view::MonthView;
