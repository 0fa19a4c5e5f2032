use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tabled::Tabled;

/// Three-letter month abbreviations, indexed by 0-based month number.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One normalized letter request. Only rows with a parseable date, a
/// non-empty country and a non-empty region become records; `month`, `year`
/// and `month_name` are always derived from `requested_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRecord {
    pub requested_date: NaiveDate,
    pub country: String,
    pub region: String,
    pub letter_id: String,
    /// 0-based month number (0 = January).
    pub month: u32,
    pub year: i32,
    pub month_name: String,
}

/// The full output of one ingestion run: the record list in source-row order
/// plus the sorted distinct-value indexes the dashboard filters are built
/// from. Immutable once constructed; a new upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub records: Vec<LetterRecord>,
    /// Distinct years, sorted descending (newest first).
    pub years: Vec<i32>,
    /// Distinct regions, sorted ascending.
    pub regions: Vec<String>,
    /// Distinct countries, sorted ascending.
    pub countries: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from normalized records, deriving the distinct-value
    /// indexes and stamping the construction time.
    pub fn from_records(records: Vec<LetterRecord>) -> Self {
        let mut years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        years.sort_by(|a, b| b.cmp(a));
        let regions: Vec<String> = records
            .iter()
            .map(|r| r.region.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let countries: Vec<String> = records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Dataset {
            records,
            years,
            regions,
            countries,
            last_updated: Utc::now(),
        }
    }
}

/// One calendar month of chart data: the month shell always exists, the
/// country map only carries countries that actually occurred that month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    pub month: &'static str,
    pub month_number: u32,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct CountryCount {
    #[serde(rename = "country")]
    #[tabled(rename = "Country")]
    pub country: String,
    #[serde(rename = "count")]
    #[tabled(rename = "Letters")]
    pub count: u64,
}
