use std::fs;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::ProcessError;
use crate::roster::{Filtered, Roster};

/// Which artifact a deployment hands back: the bare filtered CSV, or a
/// workbook with the filtered view alongside the untouched original rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Csv,
    Xlsx,
}

/// A rendered download: bytes plus the headers the response needs.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub content_type: &'static str,
}

/// Render the filtered table as CSV bytes.
///
/// Empty cells come out as empty fields, not quoted placeholders.
pub fn to_csv(filtered: &Filtered) -> Result<Vec<u8>, ProcessError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(&filtered.headers)?;
        for row in &filtered.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Render a two-sheet workbook: `Filtered` with the four extracted columns,
/// `Original` with every source column for operator cross-reference.
pub fn to_workbook(roster: &Roster, filtered: &Filtered) -> Result<Vec<u8>, ProcessError> {
    let mut workbook = Workbook::new();

    let mut sheet = Worksheet::new();
    sheet.set_name("Filtered")?;
    write_table(&mut sheet, &filtered.headers, &filtered.rows)?;
    workbook.push_worksheet(sheet);

    let mut sheet = Worksheet::new();
    sheet.set_name("Original")?;
    write_table(&mut sheet, roster.headers(), roster.rows())?;
    workbook.push_worksheet(sheet);

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

fn write_table(
    sheet: &mut Worksheet,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<(), ProcessError> {
    for (c, header) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, header)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string((r + 1) as u32, c as u16, value)?;
        }
    }
    Ok(())
}

/// Render the artifact for the configured mode.
pub fn render(
    mode: RenderMode,
    roster: &Roster,
    filtered: &Filtered,
) -> Result<Artifact, ProcessError> {
    match mode {
        RenderMode::Csv => Ok(Artifact {
            bytes: to_csv(filtered)?,
            filename: "Filtered.csv",
            content_type: "text/csv",
        }),
        RenderMode::Xlsx => Ok(Artifact {
            bytes: to_workbook(roster, filtered)?,
            filename: "Student_Data_Processed.xlsx",
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }),
    }
}

/// Stage artifact bytes through a named temp file and read them back.
///
/// The file is created, written, re-read and removed inside this call; the
/// guard removes it on the error paths too, so a request never leaves a
/// transient artifact behind.
pub fn spool_through_disk(dir: &Path, bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut spool = tempfile::Builder::new()
        .prefix("roster-filter-")
        .tempfile_in(dir)?;

    spool.write_all(bytes)?;
    spool.flush()?;

    fs::read(spool.path())
}
