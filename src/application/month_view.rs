//! Month grid annotated with stored entries

use crate::application::diary_store::DiaryStore;
use crate::domain::calendar::{self, first_of_month};
use crate::domain::DayCell;
use crate::infrastructure::{BlobStore, KvStore};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Grid of one month plus the days that hold an entry
#[derive(Debug, Clone)]
pub struct MonthView {
    pub first: NaiveDate,
    pub cells: Vec<DayCell>,
    entry_days: HashSet<NaiveDate>,
}

impl MonthView {
    /// Build the view for the month containing `reference`.
    ///
    /// Padding cells are marked too when their day holds an entry.
    pub fn build<B: BlobStore, K: KvStore>(store: &DiaryStore<B, K>, reference: NaiveDate) -> Self {
        let cells = calendar::generate(reference);
        let entry_days = cells
            .iter()
            .filter(|cell| store.find(cell.date).is_some())
            .map(|cell| cell.date)
            .collect();

        MonthView {
            first: first_of_month(reference),
            cells,
            entry_days,
        }
    }

    pub fn has_entry(&self, cell: &DayCell) -> bool {
        self.entry_days.contains(&cell.date)
    }

    /// Number of in-month days holding an entry
    pub fn filled_days(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.is_in_current_month && self.has_entry(cell))
            .count()
    }
}
