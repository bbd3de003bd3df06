use crate::columns::ResolvedColumn;
use crate::error::ProcessError;

/// One parsed upload: the header row plus every data row as strings.
///
/// Empty cells stay empty strings, never a null marker — the export uses
/// genuinely empty fields and the filtered output must carry them through
/// unchanged. Rows keep whatever width the file gave them; width checks
/// happen at extraction time.
#[derive(Debug, Clone)]
pub struct Roster {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// The four-column view extracted from a roster.
#[derive(Debug, Clone)]
pub struct Filtered {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Roster {
    /// Parse decoded CSV text into a roster.
    ///
    /// The reader is flexible about row widths so a ragged export still
    /// parses; short rows only fail later if extraction actually needs a
    /// position they don't have.
    ///
    /// # Arguments
    /// * `text` - Decoded CSV content, header row first
    ///
    /// # Returns
    /// * `Result<Roster, ProcessError>` - The parsed roster or a parse error
    pub fn parse(text: &str) -> Result<Roster, ProcessError> {
        if text.trim().is_empty() {
            return Err(ProcessError::EmptyUpload);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Roster { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Column count of the header row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Select the resolved columns out of every row, in order.
    ///
    /// Fails when the header row or any data row is narrower than the
    /// largest resolved position. That is a fatal per-request condition, not
    /// something to paper over with blanks.
    pub fn extract(&self, columns: &[ResolvedColumn]) -> Result<Filtered, ProcessError> {
        let largest = columns.iter().map(|c| c.index).max().unwrap_or(0);
        let required = largest + 1;

        if self.width() < required {
            return Err(ProcessError::TooNarrow {
                columns: self.width(),
                required,
            });
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() < required {
                return Err(ProcessError::RowTooShort {
                    row: i + 1,
                    found: row.len(),
                    required,
                });
            }
            rows.push(columns.iter().map(|c| row[c.index].clone()).collect());
        }

        Ok(Filtered {
            headers: columns.iter().map(|c| c.output.clone()).collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnMap;

    // A 20-column export in the documented layout: student name at 1-based
    // column 7, grade at 16, photo release at 20, parent pickup at 19.
    fn sample_csv() -> String {
        let mut header: Vec<String> = (1..=20).map(|i| format!("H{}", i)).collect();
        header[6] = "Mobile Phone".to_string();
        header[15] = "Gender".to_string();
        header[19] = "Authorized to Pickup".to_string();
        header[18] = "Parent Pickup".to_string();

        let mut row = vec![String::new(); 20];
        row[6] = "Alice".to_string();
        row[15] = "A".to_string();
        row[19] = "Yes".to_string();
        row[18] = "No".to_string();

        format!("{}\n{}\n", header.join(","), row.join(","))
    }

    #[test]
    fn parse_preserves_empty_cells() {
        let roster = Roster::parse("a,b,c\n1,,3\n").unwrap();
        assert_eq!(roster.width(), 3);
        assert_eq!(roster.rows()[0], vec!["1", "", "3"]);
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(
            Roster::parse("  \n"),
            Err(ProcessError::EmptyUpload)
        ));
    }

    #[test]
    fn extract_documented_scenario() {
        let roster = Roster::parse(&sample_csv()).unwrap();
        let resolved = ColumnMap::default_layout().resolve(roster.headers());
        let filtered = roster.extract(&resolved).unwrap();

        assert_eq!(
            filtered.headers,
            vec!["Student", "Grade", "Photo Release", "Parent Pickup"]
        );
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0], vec!["Alice", "A", "Yes", "No"]);
    }

    #[test]
    fn extract_keeps_empty_cells_empty() {
        let mut csv = sample_csv();
        // second data row with an empty grade cell
        let mut row = vec![String::new(); 20];
        row[6] = "Bob".to_string();
        row[19] = "No".to_string();
        row[18] = "Yes".to_string();
        csv.push_str(&row.join(","));
        csv.push('\n');

        let roster = Roster::parse(&csv).unwrap();
        let resolved = ColumnMap::default_layout().resolve(roster.headers());
        let filtered = roster.extract(&resolved).unwrap();

        assert_eq!(filtered.rows[1], vec!["Bob", "", "No", "Yes"]);
    }

    #[test]
    fn extract_fails_on_narrow_input() {
        let roster = Roster::parse("a,b,c\n1,2,3\n").unwrap();
        let resolved = ColumnMap::default_layout().resolve(roster.headers());

        match roster.extract(&resolved) {
            Err(ProcessError::TooNarrow { columns, required }) => {
                assert_eq!(columns, 3);
                assert_eq!(required, 20);
            }
            other => panic!("expected TooNarrow, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn extract_fails_on_short_row() {
        let mut csv = sample_csv();
        csv.push_str("only,three,cells\n");

        let roster = Roster::parse(&csv).unwrap();
        let resolved = ColumnMap::default_layout().resolve(roster.headers());

        match roster.extract(&resolved) {
            Err(ProcessError::RowTooShort { row, found, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected RowTooShort, got {:?}", other.map(|_| ())),
        }
    }
}
