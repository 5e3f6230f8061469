// ==============================================================================
// aggregator.rs - Cross-Region Consensus Aggregation
// ==============================================================================
// Description: Joins the three resolved region tables and decides the final
//              subtype per sample
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use std::collections::HashMap;
use tracing::warn;

use crate::models::{
    Region, RegionTable, ReportRow, MANUAL_REVIEW, NOT_CLASSIFIABLE, NOT_EVALUABLE_RAW,
    NOT_EVALUABLE_REPORT, NOT_SEQUENCED,
};

/// INT verdicts that carry no usable subtype call; the PRRT call stands in
/// for them.
const UNINFORMATIVE_INT: [&str; 4] = [
    NOT_CLASSIFIABLE,
    NOT_EVALUABLE_RAW,
    NOT_SEQUENCED,
    MANUAL_REVIEW,
];

/// Decide the final consensus subtype from the three per-region calls.
///
/// Ordered rules, first match wins. The historical decision table opens with
/// a three-way agreement check (prrt == int == env) whose result is always
/// re-derived by the pairwise check that follows, so the pairwise rule is
/// the one implemented; the three-way branch is dead and intentionally not
/// promoted above it.
///
/// The ENV call is carried into the report but never consulted here; the
/// historical table reads it without branching on it, and that gap is
/// preserved rather than papered over.
pub fn final_subtype(prrt: Option<&str>, int: Option<&str>, _env: Option<&str>) -> String {
    if let (Some(p), Some(i)) = (prrt, int) {
        if p == i {
            return p.to_string();
        }
    }
    match prrt {
        Some(NOT_CLASSIFIABLE) => return NOT_CLASSIFIABLE.to_string(),
        // Normalized on the way out, not passed through verbatim
        Some(NOT_EVALUABLE_RAW) => return NOT_EVALUABLE_REPORT.to_string(),
        _ => {}
    }
    if let (Some(p), Some(i)) = (prrt, int) {
        if UNINFORMATIVE_INT.contains(&i) {
            return p.to_string();
        }
    }
    MANUAL_REVIEW.to_string()
}

/// Full outer join of the three resolved tables on sample id, followed by
/// consensus arbitration per joined row.
///
/// Row order is deterministic: PRRT rows in input order, then INT-only
/// samples, then ENV-only samples. Rows without an extracted sample id
/// cannot key the join and are left to the per-region decision tables.
pub fn build_report(prrt: &RegionTable, int: &RegionTable, env: &RegionTable) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for table in [prrt, int, env] {
        merge_region(&mut rows, &mut index, table);
    }

    for row in &mut rows {
        row.final_subtype = final_subtype(
            row.prrt.as_deref(),
            row.int.as_deref(),
            row.env.as_deref(),
        );
    }

    rows
}

fn merge_region(rows: &mut Vec<ReportRow>, index: &mut HashMap<String, usize>, table: &RegionTable) {
    for (sample_id, resolved) in table.keyed_resolutions() {
        let idx = *index.entry(sample_id.to_string()).or_insert_with(|| {
            rows.push(ReportRow {
                sample_id: sample_id.to_string(),
                prrt: None,
                int: None,
                env: None,
                final_subtype: String::new(),
                env_fpr: None,
            });
            rows.len() - 1
        });

        let slot = match table.region {
            Region::Prrt => &mut rows[idx].prrt,
            Region::Int => &mut rows[idx].int,
            Region::Env => &mut rows[idx].env,
        };
        if slot.is_some() {
            warn!(
                "Duplicate sample id {} in {} table, keeping first occurrence",
                sample_id,
                table.region.token()
            );
            continue;
        }
        *slot = Some(resolved.to_string());
    }
}
