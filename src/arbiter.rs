// ==============================================================================
// arbiter.rs - Per-Region Subtype Arbitration
// ==============================================================================
// Description: Resolves one subtype per row from two classifier candidates
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// Rules (first match wins):
//   1. candidates agree              -> the common value
//   2. Comet says not classifiable   -> "_Seq. nicht klassifizierbar"
//   3. anything else                 -> "Manual"
// ENV replaces rule 1 with a first-character comparison, see resolve_env.
// ==============================================================================

use crate::models::{Region, MANUAL_REVIEW, NOT_CLASSIFIABLE};

/// Resolve one subtype from the two candidate classifier calls of a row.
///
/// Total over all inputs: missing candidates never panic, they simply fail
/// the agreement rule and fall through to the sentinel check or `Manual`.
pub fn resolve(region: Region, primary: Option<&str>, secondary: Option<&str>) -> String {
    match region {
        Region::Env => resolve_env(primary, secondary),
        Region::Prrt | Region::Int => resolve_exact(primary, secondary),
    }
}

/// Stanford-vs-Comet arbitration (PRRT and INT): plain string equality.
fn resolve_exact(primary: Option<&str>, secondary: Option<&str>) -> String {
    if let (Some(p), Some(s)) = (primary, secondary) {
        if p == s {
            return p.to_string();
        }
    }
    fallback(secondary)
}

/// Rega-vs-Comet arbitration (ENV).
///
/// Rega emits compound labels ("AE") while Comet emits the parent clade
/// letter, so agreement compares only Rega's first character against the
/// whole Comet value, and only for Rega labels shorter than 3 characters.
/// This is a deliberate mirror of the established decision procedure; note
/// that identical multi-character labels ("AE" vs "AE") do NOT agree here
/// and fall through to manual review.
fn resolve_env(primary: Option<&str>, secondary: Option<&str>) -> String {
    if let (Some(p), Some(s)) = (primary, secondary) {
        let first = p.chars().next();
        let short = p.chars().count() < 3;
        if short && first.is_some_and(|c| s.chars().eq(std::iter::once(c))) {
            return s.to_string();
        }
    }
    fallback(secondary)
}

/// Rules 2 and 3: Comet's unclassifiable verdict overrides any primary
/// disagreement; everything else needs human review.
fn fallback(secondary: Option<&str>) -> String {
    match secondary {
        Some(NOT_CLASSIFIABLE) => NOT_CLASSIFIABLE.to_string(),
        _ => MANUAL_REVIEW.to_string(),
    }
}
