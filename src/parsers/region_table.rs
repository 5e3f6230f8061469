// ==============================================================================
// region_table.rs - Per-Region Classifier Table Parser
// ==============================================================================
// Description: Reads one region's joint classifier CSV and arbitrates each row
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// Format: CSV file with header
// Example (PRRT):
//   SequenceName,Rega_PRRT_Subtype,Stanford_PRRT_Subtype,Comet_PRRT_Subtype
//   12-03456_PRRT_01,B,B,B
//   12-03457_PRRT_01,A (1),A,_Seq. nicht klassifizierbar
// ==============================================================================

use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

use crate::arbiter;
use crate::models::{Region, RegionRow, RegionTable};
use crate::sample_id::SampleIdExtractor;

const SEQUENCE_NAME_COLUMN: &str = "SequenceName";

/// Errors that can occur while reading a region table
#[derive(Error, Debug)]
pub enum RegionParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("{region} table is missing required column '{column}'")]
    MissingColumn { region: &'static str, column: &'static str },
}

/// Parser for one region's joint classifier table.
///
/// Parsing covers the whole per-region stage: each row gets its sample id
/// extracted from `SequenceName` and its two candidate calls arbitrated into
/// one resolved subtype. Rows are returned in file order, malformed sequence
/// names included.
pub struct RegionTableParser {
    region: Region,
    extractor: SampleIdExtractor,
}

impl RegionTableParser {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            extractor: SampleIdExtractor::new(),
        }
    }

    /// Parse and arbitrate a region table
    ///
    /// # Errors
    /// Fails on unreadable files, malformed CSV, or when the header lacks
    /// `SequenceName` or the region's two candidate columns. Row-level
    /// oddities (unmatched sequence name, empty candidate cell) never fail;
    /// they resolve to a missing id or a `Manual` verdict.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<RegionTable, RegionParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let seq_idx = self.require_column(&headers, SEQUENCE_NAME_COLUMN)?;
        let primary_idx = self.require_column(&headers, self.region.primary_column())?;
        let secondary_idx = self.require_column(&headers, self.region.secondary_column())?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            let sample_id = record
                .get(seq_idx)
                .and_then(|name| self.extractor.extract(name.trim()));

            let primary = candidate(&record, primary_idx);
            let secondary = candidate(&record, secondary_idx);
            let resolved = arbiter::resolve(self.region, primary, secondary);

            rows.push(RegionRow {
                sample_id,
                fields,
                resolved,
            });
        }

        Ok(RegionTable {
            region: self.region,
            headers,
            rows,
        })
    }

    fn require_column(
        &self,
        headers: &[String],
        column: &'static str,
    ) -> Result<usize, RegionParseError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(RegionParseError::MissingColumn {
                region: self.region.token(),
                column,
            })
    }
}

/// An empty or whitespace-only cell counts as a missing candidate
fn candidate(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_CLASSIFIABLE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with sample CSV data
    fn create_test_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_prrt_table() {
        let contents = "\
SequenceName,Rega_PRRT_Subtype,Stanford_PRRT_Subtype,Comet_PRRT_Subtype
12-03456_PRRT_01,B,B,B
12-03457_PRRT_01,A (1),A,C
12-03458_PRRT_01,C,C,_Seq. nicht klassifizierbar
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Prrt);

        let table = parser.parse(file.path()).unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            table.headers,
            vec![
                "SequenceName",
                "Rega_PRRT_Subtype",
                "Stanford_PRRT_Subtype",
                "Comet_PRRT_Subtype"
            ]
        );

        assert_eq!(table.rows[0].sample_id.as_deref(), Some("12-03456"));
        assert_eq!(table.rows[0].resolved, "B");

        // Stanford vs Comet disagreement; the Rega column is carried but
        // takes no part in arbitration
        assert_eq!(table.rows[1].resolved, "Manual");
        assert_eq!(table.rows[1].fields[1], "A (1)");

        assert_eq!(table.rows[2].resolved, NOT_CLASSIFIABLE);
    }

    #[test]
    fn test_parse_env_table_uses_rega_first_character() {
        let contents = "\
SequenceName,Rega_ENV_Subtype,Stanford_ENV_Subtype,Comet_ENV_Subtype
12-03456_ENV_01,AE,A,A
12-03457_ENV_01,AE,AE,AE
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Env);

        let table = parser.parse(file.path()).unwrap();

        // Rega "AE" agrees with Comet "A" via the first character
        assert_eq!(table.rows[0].resolved, "A");
        // Identical compound labels do not agree under the ENV quirk
        assert_eq!(table.rows[1].resolved, "Manual");
    }

    #[test]
    fn test_unmatched_sequence_names_keep_their_rows() {
        let contents = "\
SequenceName,Rega_INT_Subtype,Stanford_INT_Subtype,Comet_INT_Subtype
Konsensus 12-03456,B,B,B
12-03457_INT_01,C,C,C
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Int);

        let table = parser.parse(file.path()).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].sample_id, None);
        // Arbitration still ran for the unkeyed row
        assert_eq!(table.rows[0].resolved, "B");
        assert_eq!(table.rows[1].sample_id.as_deref(), Some("12-03457"));
    }

    #[test]
    fn test_empty_candidate_cells_resolve_to_manual() {
        let contents = "\
SequenceName,Rega_PRRT_Subtype,Stanford_PRRT_Subtype,Comet_PRRT_Subtype
12-03456_PRRT_01,B,,B
12-03457_PRRT_01,B,B,
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Prrt);

        let table = parser.parse(file.path()).unwrap();

        assert_eq!(table.rows[0].resolved, "Manual");
        assert_eq!(table.rows[1].resolved, "Manual");
    }

    #[test]
    fn test_missing_required_column() {
        let contents = "\
SequenceName,Rega_PRRT_Subtype,Comet_PRRT_Subtype
12-03456_PRRT_01,B,B
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Prrt);

        let result = parser.parse(file.path());
        match result.unwrap_err() {
            RegionParseError::MissingColumn { region, column } => {
                assert_eq!(region, "PRRT");
                assert_eq!(column, "Stanford_PRRT_Subtype");
            }
            other => panic!("Expected MissingColumn error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let parser = RegionTableParser::new(Region::Prrt);
        assert!(parser.parse("/nonexistent/PRRT_joint.csv").is_err());
    }

    #[test]
    fn test_header_only_table_is_empty_not_an_error() {
        let contents =
            "SequenceName,Rega_ENV_Subtype,Stanford_ENV_Subtype,Comet_ENV_Subtype\n";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Env);

        let table = parser.parse(file.path()).unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_label_strings_are_not_coerced() {
        // Numeric-looking and quoted labels must survive verbatim
        let contents = "\
SequenceName,Rega_INT_Subtype,Stanford_INT_Subtype,Comet_INT_Subtype
12-03456_INT_01,01,01,01
12-03457_INT_01,\"A, B\",\"A, B\",\"A, B\"
";
        let file = create_test_file(contents);
        let parser = RegionTableParser::new(Region::Int);

        let table = parser.parse(file.path()).unwrap();
        assert_eq!(table.rows[0].resolved, "01");
        assert_eq!(table.rows[1].resolved, "A, B");
    }
}
