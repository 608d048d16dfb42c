//! Output formatting utilities

use crate::application::MonthView;
use crate::domain::calendar::{weeks, WEEKDAY_LABELS};
use crate::domain::Entry;

/// Format the month grid.
///
/// In-month days are right-aligned numbers, padding days sit in parentheses,
/// and days holding an entry carry a `*`.
pub fn format_month(view: &MonthView) -> String {
    let mut output = format!("{}\n", view.first.format("%B %Y"));

    let header: Vec<String> = WEEKDAY_LABELS.iter().map(|l| format!("{:>5}", l)).collect();
    output.push_str(header.join("").trim_end());
    output.push('\n');

    for week in weeks(&view.cells) {
        let mut line = String::new();
        for cell in week {
            let mark = if view.has_entry(cell) { "*" } else { " " };
            let label = if cell.is_in_current_month {
                format!("{}{}", cell.day_of_month, mark)
            } else {
                format!("({}){}", cell.day_of_month, mark)
            };
            line.push_str(&format!("{:>5}", label));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Format one entry for display
pub fn format_entry(entry: &Entry) -> String {
    let note = if entry.note.is_empty() {
        "(no note)"
    } else {
        entry.note.as_str()
    };
    format!(
        "{}\nphoto: {}\nnote:  {}\n",
        entry.day.format("%A, %B %d, %Y"),
        entry.blob_name,
        note
    )
}

/// Format a list of entries, one per line
pub fn format_entry_list(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let first_line = entry.note.lines().next().unwrap_or("");
        output.push_str(&format!("{}  {}\n", entry.day.format("%Y-%m-%d"), first_line));
    }
    output
}
