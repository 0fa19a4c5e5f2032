// Spreadsheet ingestion: whole file into memory, first worksheet decoded
// into header-keyed rows, every row through the normalizer, survivors
// collected in source order into a `Dataset`.
use crate::normalize::normalize_row;
use crate::types::Dataset;
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse spreadsheet ({0}); please check the file format")]
    Parse(String),
}

/// Row-level diagnostics for one ingestion run, printed to the console after
/// a load. `skipped` counts rows the normalizer dropped.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept: usize,
    pub skipped: usize,
}

/// Ingest a spreadsheet file from disk.
///
/// An unreadable file is a `Read` error; a readable file that is not a valid
/// spreadsheet container is a `Parse` error. A file that parses but yields
/// zero records is NOT an error here: the caller decides how to treat an
/// empty result.
pub fn ingest_file(path: &Path) -> Result<(Dataset, LoadReport), IngestError> {
    let bytes = std::fs::read(path)?;
    ingest_bytes(bytes)
}

/// Ingest from an in-memory buffer (`.xlsx` or `.xls`, auto-detected).
pub fn ingest_bytes(bytes: Vec<u8>) -> Result<(Dataset, LoadReport), IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| IngestError::Parse(e.to_string()))?;
    // First worksheet only; later sheets are ignored.
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Parse("no worksheet found".to_string()))?
        .map_err(|e| IngestError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let mut headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| {
                cell.as_string()
                    .unwrap_or_else(|| format!("{}", cell))
                    .trim()
                    .to_string()
            })
            .collect(),
        None => Vec::new(),
    };
    // Duplicate header names: the first column wins; later columns with the
    // same name are ignored (spreadsheet exporters suffix them instead).
    let mut seen: HashSet<String> = HashSet::new();
    for header in headers.iter_mut() {
        if !header.is_empty() && !seen.insert(header.clone()) {
            header.clear();
        }
    }

    let mut records = Vec::new();
    let mut total_rows = 0usize;
    let mut next_generated_id = 0usize;
    for data_row in rows {
        total_rows += 1;
        let mut keyed: HashMap<String, Data> = HashMap::new();
        for (header, cell) in headers.iter().zip(data_row.iter()) {
            if header.is_empty() || matches!(cell, Data::Empty) {
                continue;
            }
            keyed.insert(header.clone(), cell.clone());
        }
        if let Some(record) = normalize_row(&keyed, &mut next_generated_id) {
            records.push(record);
        }
    }

    let kept = records.len();
    let report = LoadReport {
        total_rows,
        kept,
        skipped: total_rows - kept,
    };
    Ok((Dataset::from_records(records), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;

    #[test]
    fn ingests_the_first_worksheet_with_header_keyed_rows() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // Headers carry stray whitespace on purpose.
        sheet.write_string(0, 0, " Requested Date ").unwrap();
        sheet.write_string(0, 1, "Country Name").unwrap();
        sheet.write_string(0, 2, "Region").unwrap();
        sheet.write_string(0, 3, "Letter ID").unwrap();
        sheet.write_string(1, 0, "2024-01-15").unwrap();
        sheet.write_string(1, 1, "UAE").unwrap();
        sheet.write_string(1, 2, "MEA").unwrap();
        sheet.write_string(1, 3, "L001").unwrap();
        // Serial-encoded date, no letter id cell.
        sheet.write_number(2, 0, 45337.0).unwrap();
        sheet.write_string(2, 1, "Egypt").unwrap();
        sheet.write_string(2, 2, "MEA").unwrap();
        // Region cell left empty: row is skipped.
        sheet.write_string(3, 0, "2024-03-05").unwrap();
        sheet.write_string(3, 1, "Qatar").unwrap();
        // A second worksheet that must be ignored entirely.
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "Date").unwrap();
        second.write_string(0, 1, "Country").unwrap();
        second.write_string(0, 2, "Region").unwrap();
        second.write_string(1, 0, "1999-01-01").unwrap();
        second.write_string(1, 1, "Nowhere").unwrap();
        second.write_string(1, 2, "Nowhere").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let (dataset, report) = ingest_bytes(bytes).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.kept, 2);
        assert_eq!(report.skipped, 1);
        // Records keep source-row order.
        assert_eq!(dataset.records[0].letter_id, "L001");
        assert_eq!(dataset.records[0].country, "UAE");
        assert_eq!(dataset.records[1].country, "Egypt");
        assert_eq!(
            dataset.records[1].requested_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
        assert!(dataset.records[1].letter_id.starts_with("generated-"));
        // The ignored sheet's 1999 row never made it in.
        assert_eq!(dataset.years, vec![2024]);
    }

    #[test]
    fn duplicate_headers_keep_the_first_column() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["Date", "Date", "Country", "Region"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        // First Date column valid: the duplicate's garbage is ignored.
        sheet.write_string(1, 0, "2024-01-15").unwrap();
        sheet.write_string(1, 1, "not a date").unwrap();
        sheet.write_string(1, 2, "UAE").unwrap();
        sheet.write_string(1, 3, "MEA").unwrap();
        // Valid value only in the duplicate column: the row is rejected.
        sheet.write_string(2, 0, "not a date").unwrap();
        sheet.write_string(2, 1, "2024-01-15").unwrap();
        sheet.write_string(2, 2, "UAE").unwrap();
        sheet.write_string(2, 3, "MEA").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let (dataset, report) = ingest_bytes(bytes).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.kept, 1);
        assert_eq!(
            dataset.records[0].requested_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ingest_file(Path::new("/nonexistent/letters.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::Read(_)));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error_with_a_format_hint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a spreadsheet").unwrap();
        let err = ingest_file(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
        assert!(err.to_string().contains("check the file format"));
    }

    #[test]
    fn empty_buffer_is_a_parse_error() {
        let err = ingest_bytes(Vec::new()).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }
}
