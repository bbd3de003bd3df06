#![cfg(not(tarpaulin_include))]

use roster_filter::app;
use roster_filter::render::RenderMode;

/// Main entry point for the web service
///
/// Starts the roster processing server. The bind address can be supplied as
/// the first argument; `--csv` switches the download endpoint from the
/// two-sheet workbook to the plain filtered CSV.
///
/// # Arguments
/// * `[addr]` - Bind address (default `0.0.0.0:8000`)
/// * `--csv` - Return the filtered CSV instead of the XLSX workbook
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut addr = String::from("0.0.0.0:8000");
    let mut mode = RenderMode::Xlsx;

    for arg in std::env::args().skip(1) {
        if arg == "--csv" {
            mode = RenderMode::Csv;
        } else {
            addr = arg;
        }
    }

    app::run(&addr, mode).await
}
