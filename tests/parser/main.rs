//! Integration tests for the tocs_parser crate.
//!
//! Tests for the free-text command pipeline:
//! - Parsing input lines into commands
//! - Chain expansion laws
//! - Location path resolution against a world

mod expansion_tests;
mod resolution_tests;
mod scenario_tests;
