//! Error types for daybook

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daybook
#[derive(Debug, Error)]
pub enum DaybookError {
    /// The image payload could not be written. Nothing was changed.
    #[error("Failed to store image '{blob_name}': {source}")]
    StorageWriteFailed {
        blob_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory collection changed but the metadata document is stale.
    #[error("Entry saved in memory but metadata could not be persisted: {0}")]
    MetadataPersistFailed(#[source] std::io::Error),

    #[error("Could not encode image: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("No entry for {0}")]
    EntryNotFound(NaiveDate),

    #[error("Not a daybook directory: {0}")]
    NotDaybookDirectory(PathBuf),

    #[error("Invalid day reference: {0}")]
    InvalidDayReference(String),

    #[error("Invalid month reference: {0}")]
    InvalidMonthReference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DaybookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DaybookError::NotDaybookDirectory(_) => 2,
            DaybookError::InvalidDayReference(_) | DaybookError::InvalidMonthReference(_) => 3,
            DaybookError::EntryNotFound(_) => 4,
            DaybookError::StorageWriteFailed { .. } => 5,
            DaybookError::MetadataPersistFailed(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DaybookError::NotDaybookDirectory(path) => {
                format!(
                    "Not a daybook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'daybook init' in this directory to create a new diary\n\
                    • Navigate to an existing daybook directory\n\
                    • Set DAYBOOK_ROOT environment variable to your diary path",
                    path.display()
                )
            }
            DaybookError::InvalidDayReference(input) => {
                format!(
                    "Invalid day reference: '{}'\n\n\
                    Valid day references:\n\
                    • today, yesterday, tomorrow\n\
                    • YYYY-MM-DD (e.g., 2025-03-10)\n\
                    • DD-MM-YYYY (e.g., 10-03-2025)\n\n\
                    Examples:\n\
                    daybook add today photo.png\n\
                    daybook show 2025-03-10",
                    input
                )
            }
            DaybookError::InvalidMonthReference(input) => {
                format!(
                    "Invalid month reference: '{}'\n\n\
                    Valid month references:\n\
                    • this, last, next\n\
                    • YYYY-MM (e.g., 2024-02)\n\
                    • MM-YYYY (e.g., 02-2024)",
                    input
                )
            }
            DaybookError::EntryNotFound(day) => {
                format!(
                    "No entry for {}\n\n\
                    Suggestions:\n\
                    • Use 'daybook month' to see which days have entries\n\
                    • Add one with 'daybook add {} <image>'",
                    day, day
                )
            }
            DaybookError::MetadataPersistFailed(_) => {
                format!(
                    "{}\n\n\
                    The change is lost when this process exits.\n\
                    Check free space and permissions of .daybook/kv, then run the command again.",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DaybookError
pub type Result<T> = std::result::Result<T, DaybookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_daybook_directory_suggestion() {
        let err = DaybookError::NotDaybookDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("daybook init"));
        assert!(msg.contains("DAYBOOK_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_invalid_day_reference_examples() {
        let err = DaybookError::InvalidDayReference("someday".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'someday'"));
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("daybook show 2025-03-10"));
    }

    #[test]
    fn test_entry_not_found_mentions_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let msg = DaybookError::EntryNotFound(day).display_with_suggestions();
        assert!(msg.contains("No entry for 2025-03-10"));
        assert!(msg.contains("daybook add 2025-03-10"));
    }

    #[test]
    fn test_exit_codes_are_distinct_for_store_failures() {
        let write = DaybookError::StorageWriteFailed {
            blob_name: "a.jpg".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let persist =
            DaybookError::MetadataPersistFailed(io::Error::new(io::ErrorKind::Other, "read-only"));
        assert_eq!(write.exit_code(), 5);
        assert_eq!(persist.exit_code(), 6);
        assert_eq!(DaybookError::Config("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = DaybookError::Config("bad value".to_string());
        assert_eq!(err.display_with_suggestions(), "Configuration error: bad value");
    }
}
