//! The per-day media store
//!
//! Holds at most one [`Entry`] per calendar day. Image payloads go to a
//! [`BlobStore`], one blob per entry; the entry collection is mirrored to a
//! [`KvStore`] as a single JSON document under [`METADATA_KEY`].
//!
//! The in-memory collection is the source of truth for the lifetime of the
//! store. Blobs referenced by the last successfully persisted document are
//! never deleted, so the durable copy stays readable after a failed persist.

use crate::application::listeners::{ChangeListener, DiaryChange, ListenerRegistry};
use crate::domain::calendar::first_of_month;
use crate::domain::{CalendarDay, Entry};
use crate::error::{DaybookError, Result};
use crate::infrastructure::config::{MAX_PERSIST_ATTEMPTS, MAX_PERSIST_BACKOFF_MS};
use crate::infrastructure::{imaging, BlobStore, Config, KvStore};
use chrono::{Datelike, NaiveDate};
use std::io;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Key under which the entry collection is stored
pub const METADATA_KEY: &str = "entries";

/// Longest single sleep between persist attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Tuning for metadata persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Total attempts at writing the metadata document (at least 1)
    pub persist_attempts: u32,
    /// Delay before the first retry, doubled after each failure
    pub persist_backoff: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions::from(&Config::new())
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        StoreOptions {
            persist_attempts: config.persist_attempts.clamp(1, MAX_PERSIST_ATTEMPTS),
            persist_backoff: Duration::from_millis(
                config.persist_backoff_ms.min(MAX_PERSIST_BACKOFF_MS),
            ),
        }
    }
}

pub struct DiaryStore<B, K> {
    blobs: B,
    kv: K,
    entries: Vec<Entry>,
    options: StoreOptions,
    listeners: ListenerRegistry,
}

impl<B: BlobStore, K: KvStore> DiaryStore<B, K> {
    /// Open a store, loading the persisted collection.
    ///
    /// A missing or corrupt metadata document loads as an empty collection.
    pub fn open(blobs: B, kv: K, options: StoreOptions) -> Self {
        let entries = load_entries(&kv);
        info!(entries = entries.len(), "diary store opened");
        DiaryStore {
            blobs,
            kv,
            entries,
            options,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Register a listener fired after every change to the collection
    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: ChangeListener + 'static,
    {
        self.listeners.register(listener);
    }

    /// All entries, in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry stored for the calendar day of `day`
    pub fn find(&self, day: impl CalendarDay) -> Option<&Entry> {
        let day = day.calendar_day();
        self.entries.iter().find(|e| e.day == day)
    }

    /// Entries falling in the month of `reference`, oldest first
    pub fn entries_in_month(&self, reference: NaiveDate) -> Vec<&Entry> {
        let first = first_of_month(reference);
        let mut found: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.day.year() == first.year() && e.day.month() == first.month())
            .collect();
        found.sort_by_key(|e| e.day);
        found
    }

    /// Raw payload of a blob; `None` when it is missing
    pub fn load_image(&self, blob_name: &str) -> Option<Vec<u8>> {
        let bytes = self.blobs.read(blob_name);
        if bytes.is_none() {
            debug!(blob = blob_name, "image blob missing");
        }
        bytes
    }

    /// Payload of the image stored for `day`
    pub fn image_for(&self, day: impl CalendarDay) -> Option<Vec<u8>> {
        let entry = self.find(day)?;
        self.load_image(&entry.blob_name)
    }

    /// Store `image` and `note` for the calendar day of `day`, replacing any
    /// entry already stored for that day.
    ///
    /// The image is re-encoded as JPEG before it is written. If the blob write
    /// fails nothing changes. If only the metadata write fails, the new entry
    /// stays in memory and `MetadataPersistFailed` is returned.
    pub fn upsert(&mut self, image: &[u8], day: impl CalendarDay, note: &str) -> Result<Entry> {
        let day = day.calendar_day();
        let payload = imaging::encode_jpeg(image)?;

        let entry = Entry::new(day, note);
        self.blobs
            .write(&entry.blob_name, &payload)
            .map_err(|source| DaybookError::StorageWriteFailed {
                blob_name: entry.blob_name.clone(),
                source,
            })?;
        debug!(%day, blob = %entry.blob_name, bytes = payload.len(), "image stored");

        let replaced = self.take_entry(day);
        self.entries.push(entry.clone());

        let persisted = self.persist();
        if let Some(old) = &replaced {
            if persisted.is_ok() {
                self.discard_blob(&old.blob_name);
            }
        }

        self.listeners.notify(
            &DiaryChange::Upserted {
                entry: entry.clone(),
                replaced,
            },
            &self.entries,
        );

        persisted.map_err(DaybookError::MetadataPersistFailed)?;
        Ok(entry)
    }

    /// Remove the entry for the calendar day of `day`.
    ///
    /// Returns the removed entry, or `None` (without touching storage) when
    /// the day was empty.
    pub fn delete(&mut self, day: impl CalendarDay) -> Result<Option<Entry>> {
        let day = day.calendar_day();
        let Some(removed) = self.take_entry(day) else {
            debug!(%day, "nothing to delete");
            return Ok(None);
        };

        let persisted = self.persist();
        if persisted.is_ok() {
            self.discard_blob(&removed.blob_name);
        }

        self.listeners
            .notify(&DiaryChange::Deleted(removed.clone()), &self.entries);

        persisted.map_err(DaybookError::MetadataPersistFailed)?;
        Ok(Some(removed))
    }

    fn take_entry(&mut self, day: NaiveDate) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.day == day)?;
        Some(self.entries.remove(index))
    }

    /// Best-effort blob removal; a leftover blob is unreferenced and harmless
    fn discard_blob(&self, blob_name: &str) {
        if let Err(e) = self.blobs.delete(blob_name) {
            warn!(blob = blob_name, error = %e, "failed to delete image blob");
        }
    }

    fn persist(&self) -> io::Result<()> {
        let document = serde_json::to_vec(&self.entries)?;
        let attempts = self.options.persist_attempts.clamp(1, MAX_PERSIST_ATTEMPTS);
        let mut delay = self.options.persist_backoff.min(MAX_RETRY_DELAY);

        for attempt in 1..attempts {
            match self.kv.set(METADATA_KEY, &document) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(attempt, error = %e, "metadata persist failed, retrying");
                    thread::sleep(delay);
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
            }
        }

        self.kv.set(METADATA_KEY, &document).map_err(|e| {
            warn!(attempts, error = %e, "metadata persist failed");
            e
        })
    }
}

fn load_entries<K: KvStore>(kv: &K) -> Vec<Entry> {
    let Some(bytes) = kv.get(METADATA_KEY) else {
        return Vec::new();
    };

    match serde_json::from_slice::<Vec<Entry>>(&bytes) {
        Ok(records) => collapse_duplicate_days(records),
        Err(e) => {
            warn!(error = %e, "metadata document unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Keep the last record for each day
fn collapse_duplicate_days(records: Vec<Entry>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(index) = entries.iter().position(|e| e.day == record.day) {
            warn!(day = %record.day, "duplicate day in metadata, keeping the later record");
            entries.remove(index);
        }
        entries.push(record);
    }
    entries
}
