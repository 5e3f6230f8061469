// ==============================================================================
// sample_id.rs - Sample Identifier Extraction
// ==============================================================================
// Description: Derives sample ids (Scount) from free-text sequence names
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// Format: <digits>-<digits>_<2-4 word chars>_<digits>
// Example:
//   "12-03456_PRRT_01"  -> "12-03456"
//   "12-03456_ENV_2"    -> "12-03456"
//   "Konsensus 12-0345" -> no match, id stays missing
// ==============================================================================

use regex::Regex;

/// Extracts the leading `<digits>-<digits>` sample id from a sequence name.
///
/// The full name must match the lab naming scheme end to end; anything else
/// yields `None` rather than an error, and the caller keeps the row.
#[derive(Debug, Clone)]
pub struct SampleIdExtractor {
    pattern: Regex,
}

impl Default for SampleIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleIdExtractor {
    pub fn new() -> Self {
        // Pattern is a literal and covered by tests, so compilation cannot fail.
        let pattern =
            Regex::new(r"^(\d+-\d+)_\w{2,4}_\d+$").expect("sample id pattern is valid");
        Self { pattern }
    }

    /// Extract the sample id, or `None` when the name does not match
    pub fn extract(&self, sequence_name: &str) -> Option<String> {
        self.pattern
            .captures(sequence_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
