// Utility helpers for date parsing and console number formatting.
//
// This module centralizes the "dirty" date handling so the rest of the code
// can assume clean, typed calendar values.
use chrono::{DateTime, Duration, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// Convert a spreadsheet serial day-count into a calendar date.
///
/// Excel stores dates as days since its epoch; `1899-12-30` is the epoch that
/// maps serial numbers to the calendar dates spreadsheet tools display. Any
/// fractional time-of-day part is truncated. Negative or non-finite serials
/// are rejected.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(days))
}

/// Parse a date-typed string cell while being forgiving about the formats
/// that show up in real spreadsheet exports.
///
/// Accepts ISO dates (`2024-01-15`), slash dates (`2024/01/15`, `01/15/2024`)
/// and full RFC 3339 timestamps (time-of-day is discarded). Returns `None`
/// for anything that cannot be safely parsed.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
