// ==============================================================================
// output.rs - Decision Table & Report Output
// ==============================================================================
// Description: Writes per-region decision tables and the unified report CSV
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::models::{RegionTable, ReportRow};

/// Final report header, in output column order
pub const REPORT_COLUMNS: [&str; 6] = [
    "SCount",
    "Subtyp_PRRT",
    "Subtyp_INT",
    "Subtyp_ENV",
    "Subtyp_Summe",
    "Env_FPR",
];

/// Write one region's decision table.
///
/// Column order: `Scount` first for readability, then every input column
/// unchanged, then the region's resolved column last. Missing sample ids
/// become empty cells; all labels are written verbatim as strings.
pub fn write_region_decision(table: &RegionTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create decision table {}", path.display()))?;

    let mut header: Vec<&str> = Vec::with_capacity(table.headers.len() + 2);
    header.push("Scount");
    header.extend(table.headers.iter().map(String::as_str));
    header.push(table.region.resolved_column());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record: Vec<&str> = Vec::with_capacity(header.len());
        record.push(row.sample_id.as_deref().unwrap_or(""));
        record.extend(row.fields.iter().map(String::as_str));
        record.push(&row.resolved);
        writer.write_record(&record)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write decision table {}", path.display()))?;

    debug!(
        "Wrote {} decision table: {} ({} rows)",
        table.region.token(),
        path.display(),
        table.rows.len()
    );
    Ok(())
}

/// Write the unified cross-region report.
///
/// Columns come from `ReportRow`'s serde renames; absent regions and the
/// reserved `Env_FPR` column come out as empty cells.
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    // Serialization only emits the header alongside the first row, so an
    // empty report still needs one
    if rows.is_empty() {
        writer.write_record(REPORT_COLUMNS)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    debug!("Wrote report: {} ({} rows)", path.display(), rows.len());
    Ok(())
}

/// Decision tables land next to their input, prefixed `with_decision_`
pub fn decision_path(input: &Path) -> std::path::PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "region.csv".to_string());
    input.with_file_name(format!("with_decision_{name}"))
}
