// ==============================================================================
// lib.rs - Subtype Reconciler Library
// ==============================================================================
// Description: Library interface for subtype reconciler modules
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

pub mod aggregator;
pub mod arbiter;
pub mod models;
pub mod output;
pub mod parsers;
pub mod processor;
pub mod sample_id;
