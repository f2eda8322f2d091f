/// Utility functions for formatting timestamps and exporting history
use std::fmt::Write;
use time::{format_description, OffsetDateTime};

use crate::detection::SleepHistory;

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Render the bounded history as CSV, oldest minute first
///
/// One `rescored,raw` row per minute using the report value codes
/// (1 awake, 0 asleep, -1 unoccupied).
pub fn history_csv(history: &SleepHistory) -> String {
    let mut csv = String::from("rescored,raw\n");
    for (rescored, raw) in history.rescored().iter().zip(history.raw().iter()) {
        // Writing to a String cannot fail
        let _ = writeln!(csv, "{},{}", rescored.code(), raw.code());
    }
    csv
}
