//! Domain layer - Calendar logic and diary models

pub mod calendar;
pub mod entry;
pub mod reference;

pub use calendar::DayCell;
pub use entry::{CalendarDay, Entry};
pub use reference::{DayReference, MonthReference};
