// Chart aggregations over an immutable record list. All functions here are
// pure: same records and scope in, same aggregates out.
use crate::types::{CountryCount, LetterRecord, MonthlyData, MONTH_NAMES};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Shared scope step, applied in fixed order: year equality, then region
/// membership, then country membership. An empty selection means "no filter
/// on this dimension".
fn scoped<'a>(
    records: &'a [LetterRecord],
    year: i32,
    regions: &[String],
    countries: &[String],
) -> Vec<&'a LetterRecord> {
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| regions.is_empty() || regions.iter().any(|s| s == &r.region))
        .filter(|r| countries.is_empty() || countries.iter().any(|s| s == &r.country))
        .collect()
}

/// Per-month country counts for one year, as twelve entries (months 0-11 in
/// ascending order). Months with no matching records keep their shell entry
/// with an empty country map; zero counts are never synthesized.
pub fn monthly_data_for_year(
    records: &[LetterRecord],
    year: i32,
    regions: &[String],
    countries: &[String],
) -> Vec<MonthlyData> {
    let mut by_month: HashMap<u32, BTreeMap<String, u64>> = HashMap::new();
    for r in scoped(records, year, regions, countries) {
        *by_month
            .entry(r.month)
            .or_default()
            .entry(r.country.clone())
            .or_insert(0) += 1;
    }
    (0..12u32)
        .map(|month| MonthlyData {
            month: MONTH_NAMES[month as usize],
            month_number: month,
            counts: by_month.remove(&month).unwrap_or_default(),
        })
        .collect()
}

/// Total scoped record count for one year. Returns 0 for a year absent from
/// the records; "no data for year" messaging is a presentation concern.
pub fn total_for_year(
    records: &[LetterRecord],
    year: i32,
    regions: &[String],
    countries: &[String],
) -> usize {
    scoped(records, year, regions, countries).len()
}

/// Per-country counts for one year, sorted by count descending. Ties keep
/// the order countries were first encountered in the scoped records.
pub fn country_breakdown_for_year(
    records: &[LetterRecord],
    year: i32,
    regions: &[String],
    countries: &[String],
) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, (usize, u64)> = HashMap::new();
    let mut next_seen = 0usize;
    for r in scoped(records, year, regions, countries) {
        let entry = counts.entry(r.country.as_str()).or_insert_with(|| {
            let first_seen = next_seen;
            next_seen += 1;
            (first_seen, 0)
        });
        entry.1 += 1;
    }
    let mut rows: Vec<(usize, &str, u64)> = counts
        .into_iter()
        .map(|(country, (first_seen, count))| (first_seen, country, count))
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    rows.into_iter()
        .map(|(_, country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect()
}

/// Distinct sorted countries belonging to the selected regions, over the
/// WHOLE record set (not year-scoped). An empty selection returns every
/// country.
pub fn countries_for_regions(records: &[LetterRecord], regions: &[String]) -> Vec<String> {
    let mut countries: BTreeSet<&str> = BTreeSet::new();
    for r in records {
        if regions.is_empty() || regions.iter().any(|s| s == &r.region) {
            countries.insert(r.country.as_str());
        }
    }
    countries.into_iter().map(str::to_string).collect()
}
