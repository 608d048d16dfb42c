//! Day and month references typed on the command line

use crate::domain::calendar::{first_of_month, shift_month};
use crate::error::{DaybookError, Result};
use chrono::{Duration, NaiveDate};

/// A day typed by the user, resolved against a base date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayReference {
    Today,
    Yesterday,
    Tomorrow,
    Specific(NaiveDate),
}

impl DayReference {
    /// Parse a day reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DayReference::Today),
            "yesterday" => Ok(DayReference::Yesterday),
            "tomorrow" => Ok(DayReference::Tomorrow),
            _ => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(&normalized, "%d-%m-%Y"))
                .map(DayReference::Specific)
                .map_err(|_| DaybookError::InvalidDayReference(input.to_string())),
        }
    }

    /// Resolve to an actual date
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayReference::Today => today,
            DayReference::Yesterday => today - Duration::days(1),
            DayReference::Tomorrow => today + Duration::days(1),
            DayReference::Specific(date) => *date,
        }
    }
}

/// A month typed by the user; resolves to the first day of that month
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthReference {
    /// Month containing the base date
    Current,
    /// Offset in months from the base date's month
    Relative(i32),
    /// Specific month, stored as its first day
    Specific(NaiveDate),
}

impl MonthReference {
    /// Parse a month reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "this" | "now" | "current" => Ok(MonthReference::Current),
            "last" | "prev" | "previous" => Ok(MonthReference::Relative(-1)),
            "next" => Ok(MonthReference::Relative(1)),
            _ => {
                // YYYY-MM or MM-YYYY; chrono needs a day to build a date
                NaiveDate::parse_from_str(&format!("{}-01", normalized), "%Y-%m-%d")
                    .or_else(|_| {
                        NaiveDate::parse_from_str(&format!("01-{}", normalized), "%d-%m-%Y")
                    })
                    .map(MonthReference::Specific)
                    .map_err(|_| DaybookError::InvalidMonthReference(input.to_string()))
            }
        }
    }

    /// Resolve to the first day of the referenced month
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            MonthReference::Current => first_of_month(today),
            MonthReference::Relative(months) => shift_month(first_of_month(today), *months),
            MonthReference::Specific(first) => *first,
        }
    }
}
