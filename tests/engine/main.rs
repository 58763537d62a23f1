//! Integration tests for the tocs_engine crate.
//!
//! Tests for command dispatch and the built-in handlers:
//! - Handler selection by keyword
//! - Failure isolation at the dispatch boundary
//! - A full round through the bundled map

mod dispatch_tests;
mod walkthrough_tests;
