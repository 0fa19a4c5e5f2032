// Sample workbook generation so the dashboard can be tried without real
// data: 36 letter requests across four regions and two years.
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

pub const SAMPLE_FILE: &str = "AutoReport_Sample_Data.xlsx";

const HEADERS: [&str; 4] = ["Requested Date", "Country Name", "Region", "Letter ID"];

const SAMPLE_ROWS: [(&str, &str, &str, &str); 36] = [
    // MEA
    ("2024-01-15", "UAE", "MEA", "L001"),
    ("2024-01-20", "UAE", "MEA", "L002"),
    ("2024-02-10", "UAE", "MEA", "L003"),
    ("2024-02-25", "Saudi Arabia", "MEA", "L004"),
    ("2024-03-05", "Egypt", "MEA", "L005"),
    ("2024-03-12", "UAE", "MEA", "L006"),
    ("2024-04-08", "Qatar", "MEA", "L007"),
    ("2024-04-18", "Kuwait", "MEA", "L008"),
    ("2024-05-02", "UAE", "MEA", "L009"),
    ("2024-05-15", "Saudi Arabia", "MEA", "L010"),
    // APAC
    ("2024-01-10", "Singapore", "APAC", "L011"),
    ("2024-01-25", "India", "APAC", "L012"),
    ("2024-02-14", "Australia", "APAC", "L013"),
    ("2024-02-28", "Singapore", "APAC", "L014"),
    ("2024-03-10", "India", "APAC", "L015"),
    ("2024-03-22", "Japan", "APAC", "L016"),
    ("2024-04-05", "Singapore", "APAC", "L017"),
    ("2024-04-20", "Australia", "APAC", "L018"),
    // EMEA
    ("2024-01-12", "UK", "EMEA", "L019"),
    ("2024-01-28", "Germany", "EMEA", "L020"),
    ("2024-02-08", "France", "EMEA", "L021"),
    ("2024-02-22", "UK", "EMEA", "L022"),
    ("2024-03-15", "Germany", "EMEA", "L023"),
    ("2024-03-28", "Spain", "EMEA", "L024"),
    // Americas
    ("2024-01-18", "USA", "Americas", "L025"),
    ("2024-01-30", "Canada", "Americas", "L026"),
    ("2024-02-12", "USA", "Americas", "L027"),
    ("2024-02-26", "Brazil", "Americas", "L028"),
    ("2024-03-08", "USA", "Americas", "L029"),
    ("2024-03-20", "Mexico", "Americas", "L030"),
    // 2025
    ("2025-01-10", "UAE", "MEA", "L031"),
    ("2025-01-20", "Singapore", "APAC", "L032"),
    ("2025-01-25", "UK", "EMEA", "L033"),
    ("2025-02-05", "USA", "Americas", "L034"),
    ("2025-02-15", "India", "APAC", "L035"),
    ("2025-03-10", "Germany", "EMEA", "L036"),
];

/// Write the sample spreadsheet to `path`. The file uses the primary column
/// spellings and ingests with zero skipped rows.
pub fn write_sample_workbook(path: impl AsRef<Path>) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Letters Data")?;
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (row, (date, country, region, letter_id)) in SAMPLE_ROWS.iter().enumerate() {
        let row = (row + 1) as u32;
        worksheet.write_string(row, 0, *date)?;
        worksheet.write_string(row, 1, *country)?;
        worksheet.write_string(row, 2, *region)?;
        worksheet.write_string(row, 3, *letter_id)?;
    }
    workbook.save(path)?;
    Ok(())
}
