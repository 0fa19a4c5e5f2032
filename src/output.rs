use crate::types::{CountryCount, MonthlyData};
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use tabled::{builder::Builder, settings::Style, Table};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Render the monthly chart data as a markdown table with one column per
/// country. Columns are the union of countries across all twelve months;
/// cells without a count stay blank rather than showing a zero.
pub fn monthly_table(monthly: &[MonthlyData]) -> String {
    let mut countries: BTreeSet<&str> = BTreeSet::new();
    for entry in monthly {
        countries.extend(entry.counts.keys().map(String::as_str));
    }

    let mut builder = Builder::default();
    let mut header = vec!["Month".to_string()];
    header.extend(countries.iter().map(|c| c.to_string()));
    builder.push_record(header);
    for entry in monthly {
        let mut row = vec![entry.month.to_string()];
        for country in &countries {
            row.push(
                entry
                    .counts
                    .get(*country)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            );
        }
        builder.push_record(row);
    }
    builder.build().with(Style::markdown()).to_string()
}

/// Render the country breakdown as a markdown table, truncated to the top
/// `max_rows` countries for console display.
pub fn breakdown_table(rows: &[CountryCount], max_rows: usize) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let slice: Vec<CountryCount> = rows.iter().take(max_rows).cloned().collect();
    Table::new(slice).with(Style::markdown()).to_string()
}
