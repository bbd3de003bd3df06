#![cfg(not(tarpaulin_include))]

use std::env;
use std::fs;

use roster_filter::columns::ColumnMap;
use roster_filter::encoding::decode_upload;
use roster_filter::render::{RenderMode, render};
use roster_filter::roster::Roster;

/// One-shot converter: run the same filter pipeline the server runs, but
/// file to file. The output format follows the output extension.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.csv> <output.csv|output.xlsx>", args[0]);
        return Ok(());
    }

    let input = &args[1];
    let output = &args[2];

    let mode = match output.rsplit('.').next() {
        Some("csv") => RenderMode::Csv,
        Some("xlsx") => RenderMode::Xlsx,
        _ => {
            eprintln!("Error: output must end in .csv or .xlsx");
            return Ok(());
        }
    };

    let raw = fs::read(input)?;
    let (text, encoding) = decode_upload(&raw);
    println!("Read {} with {} encoding", input, encoding);

    let roster = Roster::parse(&text)?;
    let resolved = ColumnMap::default_layout().resolve(roster.headers());
    let filtered = roster.extract(&resolved)?;

    let artifact = render(mode, &roster, &filtered)?;
    fs::write(output, &artifact.bytes)?;

    println!("Filtered file created: {}", output);
    Ok(())
}
