//! Integration tests for the tocs_world crate.
//!
//! Tests for the world tree:
//! - Depth-bounded searches
//! - Moving nodes, containers, and locks
//! - Loading the bundled map

mod map_tests;
mod search_tests;
mod tree_tests;
