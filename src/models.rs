// ==============================================================================
// models.rs - Region & Record Data Models
// ==============================================================================
// Description: Data structures for three-region subtype reconciliation
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use serde::Serialize;

/// Classifier verdict: sequence could not be assigned a subtype.
pub const NOT_CLASSIFIABLE: &str = "_Seq. nicht klassifizierbar";

/// Classifier verdict: sequence could not be evaluated (raw input form).
pub const NOT_EVALUABLE_RAW: &str = "_SeqNichtAuswertbar";

/// "Not evaluable" in the normalized form used by the final report.
pub const NOT_EVALUABLE_REPORT: &str = "_Seq. nicht auswertbar";

/// Region was not sequenced for this sample.
pub const NOT_SEQUENCED: &str = "_nichtSequenziert";

/// Disagreement that needs human review.
pub const MANUAL_REVIEW: &str = "Manual";

/// Genomic region covered by the upstream classifier runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Protease / reverse transcriptase
    Prrt,
    /// Integrase
    Int,
    /// Envelope
    Env,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Prrt, Region::Int, Region::Env];

    /// Filename token that maps an input file to this region
    pub fn token(&self) -> &'static str {
        match self {
            Region::Prrt => "PRRT",
            Region::Int => "INT",
            Region::Env => "ENV",
        }
    }

    /// Column holding the primary candidate subtype.
    ///
    /// PRRT and INT arbitrate Stanford against Comet; ENV arbitrates Rega
    /// against Comet. The remaining classifier column of each table is
    /// carried through untouched.
    pub fn primary_column(&self) -> &'static str {
        match self {
            Region::Prrt => "Stanford_PRRT_Subtype",
            Region::Int => "Stanford_INT_Subtype",
            Region::Env => "Rega_ENV_Subtype",
        }
    }

    /// Column holding the secondary candidate subtype (Comet for all regions)
    pub fn secondary_column(&self) -> &'static str {
        match self {
            Region::Prrt => "Comet_PRRT_Subtype",
            Region::Int => "Comet_INT_Subtype",
            Region::Env => "Comet_ENV_Subtype",
        }
    }

    /// Name of the resolved-subtype column appended to the decision table
    pub fn resolved_column(&self) -> &'static str {
        match self {
            Region::Prrt => "PRRT_Subtype",
            Region::Int => "INT_Subtype",
            Region::Env => "ENV_Subtype",
        }
    }

    /// Corresponding column in the final report
    pub fn report_column(&self) -> &'static str {
        match self {
            Region::Prrt => "Subtyp_PRRT",
            Region::Int => "Subtyp_INT",
            Region::Env => "Subtyp_ENV",
        }
    }
}

/// One row of a per-region table after id extraction and arbitration.
/// Written out cell-by-cell (the column set varies per input file), so it
/// carries no serde derives.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    /// Sample identifier extracted from `SequenceName`; None when the
    /// sequence name does not match the expected pattern. The row is kept
    /// either way so data-quality gaps stay visible downstream.
    pub sample_id: Option<String>,

    /// All input cells in original column order
    pub fields: Vec<String>,

    /// Arbitrated subtype for this region (always set, never empty)
    pub resolved: String,
}

/// A fully parsed and arbitrated per-region table
#[derive(Debug, Clone)]
pub struct RegionTable {
    pub region: Region,

    /// Header cells of the input file, in original order
    pub headers: Vec<String>,

    pub rows: Vec<RegionRow>,
}

impl RegionTable {
    /// (sample_id, resolved subtype) pairs for rows with an extracted id,
    /// in input order
    pub fn keyed_resolutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().filter_map(|row| {
            row.sample_id
                .as_deref()
                .map(|id| (id, row.resolved.as_str()))
        })
    }
}

/// One row of the unified cross-region report.
/// Field order and serde renames define the report's column layout; absent
/// regions serialize as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Sample identifier
    #[serde(rename = "SCount")]
    pub sample_id: String,

    /// Resolved PRRT subtype, if the sample appeared in the PRRT table
    #[serde(rename = "Subtyp_PRRT")]
    pub prrt: Option<String>,

    /// Resolved INT subtype, if the sample appeared in the INT table
    #[serde(rename = "Subtyp_INT")]
    pub int: Option<String>,

    /// Resolved ENV subtype, if the sample appeared in the ENV table
    #[serde(rename = "Subtyp_ENV")]
    pub env: Option<String>,

    /// Final consensus subtype
    #[serde(rename = "Subtyp_Summe")]
    pub final_subtype: String,

    /// Reserved for manual downstream entry, never computed here
    #[serde(rename = "Env_FPR")]
    pub env_fpr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_tokens() {
        assert_eq!(Region::Prrt.token(), "PRRT");
        assert_eq!(Region::Int.token(), "INT");
        assert_eq!(Region::Env.token(), "ENV");
    }

    #[test]
    fn test_region_columns_are_region_specific() {
        for region in Region::ALL {
            assert!(region.primary_column().contains(region.token()));
            assert!(region.secondary_column().contains(region.token()));
            assert!(region.resolved_column().starts_with(region.token()));
            assert!(region.report_column().ends_with(region.token()));
        }
        // ENV is the Rega-vs-Comet region
        assert!(Region::Env.primary_column().starts_with("Rega"));
        assert!(Region::Prrt.primary_column().starts_with("Stanford"));
    }

    #[test]
    fn test_keyed_resolutions_skip_missing_ids() {
        let table = RegionTable {
            region: Region::Prrt,
            headers: vec!["SequenceName".to_string()],
            rows: vec![
                RegionRow {
                    sample_id: Some("12-0001".to_string()),
                    fields: vec!["12-0001_PRRT_01".to_string()],
                    resolved: "B".to_string(),
                },
                RegionRow {
                    sample_id: None,
                    fields: vec!["garbled".to_string()],
                    resolved: "Manual".to_string(),
                },
            ],
        };

        let keyed: Vec<_> = table.keyed_resolutions().collect();
        assert_eq!(keyed, vec![("12-0001", "B")]);
    }
}
