//! Month grid generation for the calendar view

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Number of cells in a month grid (six Sunday-first weeks)
pub const GRID_CELLS: usize = 42;

/// Column headers, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One position in the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Label shown in the cell (1-31)
    pub day_of_month: u32,
    /// Date this cell stands for, possibly in the previous or next month
    pub date: NaiveDate,
    /// False for padding cells
    pub is_in_current_month: bool,
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Number of days in the given month, leap years included.
///
/// `None` when `year`/`month` do not name a representable month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    match first.checked_add_months(Months::new(1)) {
        Some(next) => Some((next - first).num_days() as u32),
        // December of the last representable year
        None => Some(31),
    }
}

/// Move `date` by whole months, clamping the day to the target month's length.
///
/// Returns `date` unchanged if the result would leave chrono's supported range.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Build the 42-cell grid for the month containing `reference`.
///
/// Cells run oldest first, Sunday first. A month that starts on Sunday gets no
/// leading padding; the trailing run always fills the grid to 42 cells.
/// Months whose grid would cross chrono's date range are replaced by the
/// nearest month whose full grid fits.
pub fn generate(reference: NaiveDate) -> Vec<DayCell> {
    let mut first = first_of_month(reference);
    let start = loop {
        match grid_start(first) {
            Ok(start) => break start,
            Err(RangeEdge::Min) => first = shift_month(first, 1),
            Err(RangeEdge::Max) => first = shift_month(first, -1),
        }
    };

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            day_of_month: date.day(),
            date,
            is_in_current_month: date.year() == first.year() && date.month() == first.month(),
        })
        .collect()
}

/// Side of chrono's date range a grid would cross
enum RangeEdge {
    Min,
    Max,
}

/// First cell of the grid starting the month `first`, if all 42 cells exist
fn grid_start(first: NaiveDate) -> Result<NaiveDate, RangeEdge> {
    let leading = i64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_signed(Duration::days(leading))
        .ok_or(RangeEdge::Min)?;
    start
        .checked_add_signed(Duration::days(GRID_CELLS as i64 - 1))
        .ok_or(RangeEdge::Max)?;
    Ok(start)
}

/// Split a grid into its rows of seven cells
pub fn weeks(cells: &[DayCell]) -> impl Iterator<Item = &[DayCell]> {
    cells.chunks(7)
}
