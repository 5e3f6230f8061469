// ==============================================================================
// processor.rs - Core Subtype Reconciliation Logic
// ==============================================================================
// Description: Maps input files to regions, arbitrates each table and merges
//              the three resolved tables into the unified report
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::aggregator;
use crate::models::{Region, RegionTable};
use crate::output;
use crate::parsers::RegionTableParser;

pub struct ReconcileProcessor {
    inputs: Vec<PathBuf>,
    output_path: PathBuf,
}

/// Input paths after region mapping, one per region
struct RegionFiles {
    prrt: PathBuf,
    int: PathBuf,
    env: PathBuf,
}

impl RegionFiles {
    fn get(&self, region: Region) -> &Path {
        match region {
            Region::Prrt => &self.prrt,
            Region::Int => &self.int,
            Region::Env => &self.env,
        }
    }
}

impl ReconcileProcessor {
    pub fn new(inputs: Vec<PathBuf>, output_path: PathBuf) -> Self {
        Self {
            inputs,
            output_path,
        }
    }

    /// Main processing pipeline
    pub fn process(&self) -> Result<PathBuf> {
        info!("Starting subtype reconciliation over {} input files", self.inputs.len());

        // 1. Map input files to regions by filename token
        let files = self.map_region_files()?;

        // 2. Parse and arbitrate all three region tables. Nothing is written
        //    until every table has parsed, so a fatal failure on a later
        //    region leaves no partial output behind.
        let mut tables = Vec::with_capacity(Region::ALL.len());
        for region in Region::ALL {
            tables.push(self.process_region(region, files.get(region))?);
        }
        let (prrt, int, env) = match tables.as_slice() {
            [p, i, e] => (p, i, e),
            _ => unreachable!("one table per region"),
        };

        // 3. Write each region's decision table next to its input
        for table in &tables {
            let decision_path = output::decision_path(files.get(table.region));
            output::write_region_decision(table, &decision_path).with_context(|| {
                format!("Failed to write {} decision table", table.region.token())
            })?;
        }

        // 4. Join the resolved tables and decide the final subtype per sample
        let report = aggregator::build_report(prrt, int, env);
        info!("Unified report holds {} distinct samples", report.len());

        // 5. Write the final report
        output::write_report(&report, &self.output_path)
            .context("Failed to write unified report")?;

        info!("Reconciliation complete, report: {:?}", self.output_path);
        Ok(self.output_path.clone())
    }

    /// Parse one region table and log its data-quality findings
    fn process_region(&self, region: Region, path: &Path) -> Result<RegionTable> {
        info!("Processing {} table: {}", region.token(), path.display());

        let parser = RegionTableParser::new(region);
        let table = parser
            .parse(path)
            .with_context(|| format!("Failed to read {} table {}", region.token(), path.display()))?;

        let unkeyed = table.rows.iter().filter(|r| r.sample_id.is_none()).count();
        if unkeyed > 0 {
            warn!(
                "{} table: {} of {} rows have no extractable sample id and \
                 will not join the unified report",
                region.token(),
                unkeyed,
                table.rows.len()
            );
        }
        info!("{} table: {} rows arbitrated", region.token(), table.rows.len());

        Ok(table)
    }

    /// Map each required region to an input file by case-insensitive
    /// substring match on the tokens PRRT, INT, ENV. Every region must be
    /// covered; the aggregation cannot run on a partial set.
    fn map_region_files(&self) -> Result<RegionFiles> {
        let mut prrt = None;
        let mut int = None;
        let mut env = None;

        for path in &self.inputs {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_uppercase())
                .unwrap_or_default();

            // INT must be tested last: the conventional *_joint.csv names
            // contain "INT" inside "JOINT"
            let (token, slot) = if file_name.contains(Region::Prrt.token()) {
                (Region::Prrt.token(), &mut prrt)
            } else if file_name.contains(Region::Env.token()) {
                (Region::Env.token(), &mut env)
            } else if file_name.contains(Region::Int.token()) {
                (Region::Int.token(), &mut int)
            } else {
                warn!("Input file matches no region token, ignoring: {}", path.display());
                continue;
            };

            if let Some(existing) = slot.as_ref() {
                warn!(
                    "Multiple inputs for one region, keeping {existing:?} and ignoring {path:?}"
                );
                continue;
            }
            debug!("Mapped {} to region {}", path.display(), token);
            *slot = Some(path.clone());
        }

        Ok(RegionFiles {
            prrt: prrt.ok_or_else(|| anyhow::anyhow!("No input file matches region token PRRT"))?,
            int: int.ok_or_else(|| anyhow::anyhow!("No input file matches region token INT"))?,
            env: env.ok_or_else(|| anyhow::anyhow!("No input file matches region token ENV"))?,
        })
    }
}
