//! Core types, attribute values, and errors for TOCS.
//!
//! This crate provides:
//! - [`NodeId`] - Stable identifiers for world tree nodes
//! - [`Value`] - Values stored in a node's open-ended attribute map
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod node_id;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use node_id::NodeId;
pub use value::Value;
