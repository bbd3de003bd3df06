#![cfg(not(tarpaulin_include))]

use roster_filter::columns::ColumnMap;
use roster_filter::encoding::{SourceEncoding, decode_upload};
use roster_filter::render::{RenderMode, render};
use roster_filter::roster::Roster;

// Build a 20-column export in the documented misaligned layout
fn sample_export() -> String {
    let mut header: Vec<String> = (1..=20).map(|i| format!("H{}", i)).collect();
    header[6] = "Mobile Phone".to_string();
    header[15] = "Gender".to_string();
    header[19] = "Authorized to Pickup".to_string();
    header[18] = "Parent Pickup".to_string();

    let mut alice = vec![String::new(); 20];
    alice[6] = "Alice".to_string();
    alice[15] = "A".to_string();
    alice[19] = "Yes".to_string();
    alice[18] = "No".to_string();

    let mut bob = vec![String::new(); 20];
    bob[6] = "Bob".to_string();
    bob[19] = "No".to_string();
    bob[18] = "Yes".to_string();

    format!(
        "{}\n{}\n{}\n",
        header.join(","),
        alice.join(","),
        bob.join(",")
    )
}

fn test_decode_chain() {
    println!("\n====== Testing encoding fallback chain ======");

    let (_, encoding) = decode_upload(sample_export().as_bytes());
    assert_eq!(encoding, SourceEncoding::Utf8);
    println!("✓ Plain UTF-8 decoded");

    let mut with_bom = vec![0xEF, 0xBB, 0xBF];
    with_bom.extend_from_slice(sample_export().as_bytes());
    let (text, encoding) = decode_upload(&with_bom);
    assert_eq!(encoding, SourceEncoding::Utf8Bom);
    assert_eq!(text, sample_export());
    println!("✓ BOM stripped and decoded as utf-8-sig");

    let (text, encoding) = decode_upload(b"Schedule Nam\xe9\nx\n");
    assert_eq!(encoding, SourceEncoding::Latin1);
    assert!(text.starts_with("Schedule Nam\u{e9}"));
    println!("✓ Latin-1 fallback decoded");
}

fn test_filter_pipeline() {
    println!("\n====== Testing filter pipeline ======");

    let (text, _) = decode_upload(sample_export().as_bytes());
    let roster = Roster::parse(&text).unwrap();
    assert_eq!(roster.width(), 20);
    println!("✓ Parsed {} columns", roster.width());

    let resolved = ColumnMap::default_layout().resolve(roster.headers());
    let filtered = roster.extract(&resolved).unwrap();

    assert_eq!(
        filtered.headers,
        vec!["Student", "Grade", "Photo Release", "Parent Pickup"]
    );
    assert_eq!(filtered.rows[0], vec!["Alice", "A", "Yes", "No"]);
    assert_eq!(filtered.rows[1], vec!["Bob", "", "No", "Yes"]);
    println!("✓ Extracted documented scenario, empty grade preserved");
}

fn test_render_modes() {
    println!("\n====== Testing render modes ======");

    let roster = Roster::parse(&sample_export()).unwrap();
    let resolved = ColumnMap::default_layout().resolve(roster.headers());
    let filtered = roster.extract(&resolved).unwrap();

    let csv = render(RenderMode::Csv, &roster, &filtered).unwrap();
    assert_eq!(csv.filename, "Filtered.csv");
    let text = String::from_utf8(csv.bytes).unwrap();
    assert!(text.starts_with("Student,Grade,Photo Release,Parent Pickup\n"));
    println!("✓ CSV artifact rendered");

    let xlsx = render(RenderMode::Xlsx, &roster, &filtered).unwrap();
    assert_eq!(xlsx.filename, "Student_Data_Processed.xlsx");
    assert_eq!(&xlsx.bytes[..2], b"PK");
    println!("✓ XLSX artifact rendered ({} bytes)", xlsx.bytes.len());
}

fn test_narrow_input_fails() {
    println!("\n====== Testing narrow input ======");

    let roster = Roster::parse("a,b,c\n1,2,3\n").unwrap();
    let resolved = ColumnMap::default_layout().resolve(roster.headers());
    assert!(roster.extract(&resolved).is_err());
    println!("✓ 3-column input rejected");
}

fn main() {
    test_decode_chain();
    test_filter_pipeline();
    test_render_modes();
    test_narrow_input_fails();

    println!("\nAll pipeline tests passed!");
}
