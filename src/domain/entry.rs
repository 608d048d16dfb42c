//! Diary entries and calendar-day normalization

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extension of every stored image payload
pub const BLOB_EXTENSION: &str = "jpg";

/// One day's diary record: a photo reference plus a note
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub day: NaiveDate,
    pub blob_name: String,
    pub note: String,
}

impl Entry {
    /// Create an entry with a fresh id for the given day
    pub fn new(day: NaiveDate, note: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        Entry {
            id,
            day,
            blob_name: blob_name_for(id),
            note: note.into(),
        }
    }
}

/// Blob name under which an entry's image is stored
pub fn blob_name_for(id: Uuid) -> String {
    format!("{}.{}", id, BLOB_EXTENSION)
}

/// Anything that can be reduced to a calendar day in the local calendar.
///
/// Two values denote the same day-slot when their `calendar_day` is equal;
/// the time of day never matters.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.with_timezone(&Local).date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_new_entry_derives_blob_name_from_id() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let entry = Entry::new(day, "trip");
        assert_eq!(entry.blob_name, format!("{}.jpg", entry.id));
        assert_eq!(entry.note, "trip");
        assert_eq!(entry.day, day);
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_ne!(Entry::new(day, "").id, Entry::new(day, "").id);
    }

    #[test]
    fn test_naive_datetime_drops_time() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let morning = day.and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap());
        let night = day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(morning.calendar_day(), night.calendar_day());
        assert_eq!(night.calendar_day(), day);
    }

    #[test]
    fn test_local_datetime_uses_local_calendar() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let noon = Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap();
        assert_eq!(noon.calendar_day(), day);
    }

    #[test]
    fn test_serializes_with_camel_case_blob_name() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let entry = Entry::new(day, "trip");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["day"], "2025-03-10");
        assert_eq!(json["blobName"], entry.blob_name.as_str());
        assert_eq!(json["note"], "trip");
        assert_eq!(json["id"], entry.id.to_string());
    }
}
