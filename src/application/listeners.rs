//! Change notifications fired by the diary store

use crate::domain::Entry;
use crate::error::Result;
use tracing::warn;

/// What happened to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiaryChange {
    /// An entry was created, or replaced the previous entry for its day
    Upserted {
        entry: Entry,
        replaced: Option<Entry>,
    },
    /// The entry for a day was removed
    Deleted(Entry),
}

/// Observer of in-memory collection changes
pub trait ChangeListener: Send {
    /// Called after the in-memory collection changed.
    /// `entries` is the full collection after the change.
    fn on_change(&self, change: &DiaryChange, entries: &[Entry]) -> Result<()>;

    /// Human-readable name for this listener
    fn name(&self) -> &str;
}

/// Registry of change listeners
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn register<L>(&mut self, listener: L)
    where
        L: ChangeListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch a change to every listener; failures are logged and skipped
    pub fn notify(&self, change: &DiaryChange, entries: &[Entry]) {
        for listener in &self.listeners {
            if let Err(e) = listener.on_change(change, entries) {
                warn!(listener = listener.name(), error = %e, "change listener failed");
            }
        }
    }
}
