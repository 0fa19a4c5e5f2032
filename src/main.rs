// Entry point and high-level CLI flow.
//
// The console menu drives the whole pipeline:
// - Option [1] loads a spreadsheet of letter requests, printing diagnostics.
// - Option [2] renders the year-scoped dashboard aggregates and exports them.
// - Options [3]-[5] talk to the dataset store (publish / fetch / clear),
//   gated by the shared admin password on writes and deletes.
// - Option [6] writes a sample spreadsheet for trying the dashboard out.
mod aggregate;
mod ingest;
mod normalize;
mod output;
mod sample;
mod store;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use store::{DatasetStore, JsonFileStore, StoreError};
use types::Dataset;

const STORE_PATH: &str = "dashboard_data.json";

// Simple in-memory app state so we only ingest the spreadsheet once but can
// query the dashboard and publish multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Dataset>,
}

/// Shared admin secret for store writes/deletes, injected via environment
/// with the deployment default as fallback.
fn admin_secret() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "LetterEase2024".to_string())
}

fn file_store() -> JsonFileStore {
    JsonFileStore::new(STORE_PATH, admin_secret())
}

/// Print a prompt and read a single trimmed line of input.
fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Read a single line of input after printing the common "Enter choice:"
/// prompt used by the main menu.
fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Parse a comma-separated multi-select input into a filter list. An empty
/// input means "no filter on this dimension".
fn parse_filter_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Handle option [1]: ingest a spreadsheet file into the active dataset.
///
/// A file that parses but produces zero valid records is rejected here, at
/// the caller level; the previous dataset stays active in that case.
fn handle_load() {
    let path = prompt("Path to spreadsheet (.xlsx/.xls): ");
    if path.is_empty() {
        println!("No path given.\n");
        return;
    }
    match ingest::ingest_file(Path::new(&path)) {
        Ok((dataset, report)) => {
            if dataset.records.is_empty() {
                println!(
                    "Error: No valid letter records found in the file. \
                     Please check the column names and try again.\n"
                );
                return;
            }
            println!(
                "Processing spreadsheet... ({} rows read, {} letter records kept)",
                util::format_int(report.total_rows as i64),
                util::format_int(report.kept as i64)
            );
            if report.skipped > 0 {
                println!(
                    "Note: {} rows skipped (missing date/country/region or unparseable date).",
                    util::format_int(report.skipped as i64)
                );
            }
            println!(
                "Dataset covers {} years, {} regions, {} countries.\n",
                dataset.years.len(),
                dataset.regions.len(),
                dataset.countries.len()
            );
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(dataset);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: render the dashboard aggregates for one year under the
/// chosen region/country filters, and export them as report files.
fn handle_dashboard() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load a spreadsheet first (option 1).\n");
        return;
    };

    println!(
        "Available years: {}",
        data.years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let year: i32 = match prompt("Year: ").parse() {
        Ok(y) => y,
        Err(_) => {
            println!("Invalid year.\n");
            return;
        }
    };

    println!("Available regions: {}", data.regions.join(", "));
    let regions = parse_filter_list(&prompt("Regions (comma-separated, empty for all): "));

    let selectable = aggregate::countries_for_regions(&data.records, &regions);
    println!("Available countries: {}", selectable.join(", "));
    let countries = parse_filter_list(&prompt("Countries (comma-separated, empty for all): "));

    let total = aggregate::total_for_year(&data.records, year, &regions, &countries);
    if total == 0 {
        println!("There is no data available for the year {}.\n", year);
        return;
    }

    println!("\nMonthly Letter Requests — {}\n", year);
    let monthly = aggregate::monthly_data_for_year(&data.records, year, &regions, &countries);
    println!("{}\n", output::monthly_table(&monthly));
    let monthly_file = format!("monthly_data_{}.json", year);
    if let Err(e) = output::write_json(&monthly_file, &monthly) {
        eprintln!("Write error: {}", e);
    }
    println!("(Monthly chart data exported to {})\n", monthly_file);

    println!(
        "Total letter requests in {}: {}\n",
        year,
        util::format_int(total as i64)
    );

    println!("Country Breakdown — {}\n", year);
    let breakdown = aggregate::country_breakdown_for_year(&data.records, year, &regions, &countries);
    println!("{}\n", output::breakdown_table(&breakdown, 15));
    let breakdown_file = format!("country_breakdown_{}.csv", year);
    if let Err(e) = output::write_csv(&breakdown_file, &breakdown) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full breakdown exported to {})\n", breakdown_file);
}

/// Handle option [3]: publish the active dataset to the store.
fn handle_publish() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load a spreadsheet first (option 1).\n");
        return;
    };
    let password = prompt("Admin password: ");
    match file_store().put(&data, &password) {
        Ok(()) => println!(
            "Published {} records to {}.\n",
            util::format_int(data.records.len() as i64),
            STORE_PATH
        ),
        Err(StoreError::Unauthorized) => println!("Unauthorized: wrong admin password.\n"),
        Err(e) => eprintln!("Publish failed: {}\n", e),
    }
}

/// Handle option [4]: fetch whatever is currently stored and summarize it.
fn handle_fetch() {
    match file_store().get() {
        Ok(Some(dataset)) => {
            println!(
                "Stored dataset: {} records, years {:?}, last updated {}.\n",
                util::format_int(dataset.records.len() as i64),
                dataset.years,
                dataset.last_updated.to_rfc3339()
            );
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(dataset);
        }
        Ok(None) => println!("No data stored.\n"),
        Err(e) => eprintln!("Fetch failed: {}\n", e),
    }
}

/// Handle option [5]: clear the stored dataset.
fn handle_clear() {
    let password = prompt("Admin password: ");
    match file_store().delete(&password) {
        Ok(()) => println!("Stored dataset cleared.\n"),
        Err(StoreError::Unauthorized) => println!("Unauthorized: wrong admin password.\n"),
        Err(e) => eprintln!("Clear failed: {}\n", e),
    }
}

/// Handle option [6]: write the bundled sample spreadsheet.
fn handle_sample() {
    match sample::write_sample_workbook(sample::SAMPLE_FILE) {
        Ok(()) => println!(
            "Sample spreadsheet written to {}. Load it with option 1.\n",
            sample::SAMPLE_FILE
        ),
        Err(e) => eprintln!("Failed to write sample spreadsheet: {}\n", e),
    }
}

fn main() {
    loop {
        println!("Letter Request Dashboard");
        println!("[1] Load spreadsheet");
        println!("[2] View dashboard");
        println!("[3] Publish dataset");
        println!("[4] Fetch stored dataset");
        println!("[5] Clear stored dataset");
        println!("[6] Generate sample spreadsheet");
        println!("[7] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => handle_dashboard(),
            "3" => handle_publish(),
            "4" => handle_fetch(),
            "5" => handle_clear(),
            "6" => handle_sample(),
            "7" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-7.\n"),
        }
    }
}
