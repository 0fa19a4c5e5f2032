// Row normalization: one raw spreadsheet row in, one `LetterRecord` out, or
// `None` if the row is unusable. Rejections are silent; the pipeline just
// skips the row.
use crate::types::{LetterRecord, MONTH_NAMES};
use crate::util::{parse_date_str, serial_to_date};
use calamine::{Data, DataType};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

// Accepted header spellings per logical field, in priority order. Lookup is
// a case-sensitive exact match; the first alias holding a usable value wins.
pub const DATE_COLUMNS: [&str; 3] = ["Requested Date", "RequestedDate", "Date"];
pub const COUNTRY_COLUMNS: [&str; 3] = ["Country Name", "Country", "CountryName"];
pub const REGION_COLUMNS: [&str; 1] = ["Region"];
pub const LETTER_ID_COLUMNS: [&str; 3] = ["Letter ID", "LetterId", "ID"];

/// A cell counts as missing when it is empty, a whitespace-only string,
/// numeric zero, boolean false, or a spreadsheet error value.
fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        Data::Float(n) => *n == 0.0,
        Data::Int(n) => *n == 0,
        Data::Bool(b) => !b,
        _ => false,
    }
}

/// Ordered alias lookup: the first alias whose cell holds a usable value
/// wins. An alias bound to a missing value falls through to the next one.
fn resolve<'a>(row: &'a HashMap<String, Data>, aliases: &[&str]) -> Option<&'a Data> {
    for alias in aliases {
        if let Some(cell) = row.get(*alias) {
            if !is_missing(cell) {
                return Some(cell);
            }
        }
    }
    None
}

/// Coerce any cell to its trimmed string form.
fn cell_text(cell: &Data) -> String {
    cell.as_string()
        .unwrap_or_else(|| format!("{}", cell))
        .trim()
        .to_string()
}

/// Convert a date cell to a plain calendar date.
///
/// Numeric cells are spreadsheet serial day-counts; string cells go through
/// general date-string parsing; cells calamine already typed as dates are
/// taken as-is (time-of-day dropped).
fn cell_to_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Float(n) => serial_to_date(*n),
        Data::Int(n) => serial_to_date(*n as f64),
        Data::String(s) => parse_date_str(s),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

/// Normalize one header-keyed row into a `LetterRecord`.
///
/// Returns `None` when the date, country or region is missing or the date
/// cannot be converted. `next_generated_id` is the run-local counter used to
/// mint placeholder letter ids for rows without one.
pub fn normalize_row(
    row: &HashMap<String, Data>,
    next_generated_id: &mut usize,
) -> Option<LetterRecord> {
    let date_cell = resolve(row, &DATE_COLUMNS)?;
    let country_cell = resolve(row, &COUNTRY_COLUMNS)?;
    let region_cell = resolve(row, &REGION_COLUMNS)?;

    let requested_date = cell_to_date(date_cell)?;
    let country = cell_text(country_cell);
    let region = cell_text(region_cell);
    if country.is_empty() || region.is_empty() {
        return None;
    }

    let letter_id = match resolve(row, &LETTER_ID_COLUMNS) {
        Some(cell) => cell_text(cell),
        None => {
            *next_generated_id += 1;
            format!("generated-{}", next_generated_id)
        }
    };

    let month = requested_date.month0();
    Some(LetterRecord {
        requested_date,
        country,
        region,
        letter_id,
        month,
        year: requested_date.year(),
        month_name: MONTH_NAMES[month as usize].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, Data)]) -> HashMap<String, Data> {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn normalize(cells: &[(&str, Data)]) -> Option<LetterRecord> {
        let mut counter = 0;
        normalize_row(&row(cells), &mut counter)
    }

    #[test]
    fn accepts_a_complete_row() {
        let rec = normalize(&[
            ("Requested Date", Data::String("2024-01-15".into())),
            ("Country Name", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
            ("Letter ID", Data::String("L-001".into())),
        ])
        .unwrap();
        assert_eq!(rec.requested_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(rec.country, "UAE");
        assert_eq!(rec.region, "MEA");
        assert_eq!(rec.letter_id, "L-001");
        assert_eq!((rec.month, rec.year), (0, 2024));
        assert_eq!(rec.month_name, "Jan");
    }

    #[test]
    fn column_aliases_resolve_in_priority_order() {
        // Each alias alone resolves to the same field.
        for date_col in DATE_COLUMNS {
            for country_col in COUNTRY_COLUMNS {
                let rec = normalize(&[
                    (date_col, Data::String("2024-03-02".into())),
                    (country_col, Data::String("Egypt".into())),
                    ("Region", Data::String("MEA".into())),
                ])
                .unwrap();
                assert_eq!(rec.country, "Egypt");
                assert_eq!(rec.year, 2024);
            }
        }
        // When two aliases are present, the higher-priority one wins.
        let rec = normalize(&[
            ("Requested Date", Data::String("2024-03-02".into())),
            ("Country Name", Data::String("Egypt".into())),
            ("Country", Data::String("France".into())),
            ("Region", Data::String("MEA".into())),
        ])
        .unwrap();
        assert_eq!(rec.country, "Egypt");
    }

    #[test]
    fn empty_alias_falls_through_to_the_next_one() {
        let rec = normalize(&[
            ("Requested Date", Data::String("  ".into())),
            ("Date", Data::String("2024-03-02".into())),
            ("Country", Data::String("Egypt".into())),
            ("Region", Data::String("MEA".into())),
        ])
        .unwrap();
        assert_eq!(rec.year, 2024);
    }

    #[test]
    fn rejects_rows_missing_required_fields() {
        // No region column at all.
        assert!(normalize(&[
            ("Date", Data::String("2024-01-15".into())),
            ("Country", Data::String("UAE".into())),
        ])
        .is_none());
        // Region present but blank.
        assert!(normalize(&[
            ("Date", Data::String("2024-01-15".into())),
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("   ".into())),
        ])
        .is_none());
        // No usable date.
        assert!(normalize(&[
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
        ])
        .is_none());
    }

    #[test]
    fn rejects_unparseable_date_strings() {
        assert!(normalize(&[
            ("Date", Data::String("sometime soon".into())),
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
        ])
        .is_none());
    }

    #[test]
    fn converts_serial_date_cells() {
        let rec = normalize(&[
            ("Date", Data::Float(45306.0)),
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
        ])
        .unwrap();
        assert_eq!(rec.requested_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(rec.month_name, "Jan");
    }

    #[test]
    fn trims_country_and_region() {
        let rec = normalize(&[
            ("Date", Data::String("2024-01-15".into())),
            ("Country", Data::String("  UAE ".into())),
            ("Region", Data::String(" MEA  ".into())),
        ])
        .unwrap();
        assert_eq!(rec.country, "UAE");
        assert_eq!(rec.region, "MEA");
    }

    #[test]
    fn numeric_letter_ids_keep_their_string_form() {
        let rec = normalize(&[
            ("Date", Data::String("2024-01-15".into())),
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
            ("ID", Data::Float(1042.0)),
        ])
        .unwrap();
        assert_eq!(rec.letter_id, "1042");
    }

    #[test]
    fn generated_letter_ids_are_unique_within_a_run() {
        let cells = [
            ("Date", Data::String("2024-01-15".into())),
            ("Country", Data::String("UAE".into())),
            ("Region", Data::String("MEA".into())),
        ];
        let mut counter = 0;
        let a = normalize_row(&row(&cells), &mut counter).unwrap();
        let b = normalize_row(&row(&cells), &mut counter).unwrap();
        assert_ne!(a.letter_id, b.letter_id);
    }

    #[test]
    fn derived_fields_stay_consistent_with_the_date() {
        for (date, month, name) in [
            ("2024-01-01", 0, "Jan"),
            ("2024-06-30", 5, "Jun"),
            ("2023-12-25", 11, "Dec"),
        ] {
            let rec = normalize(&[
                ("Date", Data::String(date.into())),
                ("Country", Data::String("UAE".into())),
                ("Region", Data::String("MEA".into())),
            ])
            .unwrap();
            assert_eq!(rec.month, month);
            assert_eq!(rec.month_name, name);
            assert_eq!(rec.month_name, MONTH_NAMES[rec.month as usize]);
            assert_eq!(rec.month, rec.requested_date.month0());
            assert_eq!(rec.year, rec.requested_date.year());
        }
    }
}
