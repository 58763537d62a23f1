//! Error types for the TOCS system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::node_id::NodeId;

/// Result alias used throughout the TOCS crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for TOCS operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid node error.
    #[must_use]
    pub fn invalid_node(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidNode(reason.into()))
    }

    /// Creates a node not found error.
    #[must_use]
    pub fn node_not_found(id: NodeId) -> Self {
        Self::new(ErrorKind::NodeNotFound(id))
    }

    /// Creates a cyclic move error.
    #[must_use]
    pub fn cyclic_move(node: NodeId, target: NodeId) -> Self {
        Self::new(ErrorKind::CyclicMove { node, target })
    }

    /// Creates an error for a node lacking a required capability.
    #[must_use]
    pub fn missing_capability(node: NodeId, capability: &'static str) -> Self {
        Self::new(ErrorKind::MissingCapability { node, capability })
    }

    /// Creates a map loading error.
    #[must_use]
    pub fn map_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MapLoad(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A node could not be constructed (empty names or description).
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// Node id does not refer to a node in this world.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A node was moved under itself or one of its descendants.
    #[error("cannot move {node:?} under its own descendant {target:?}")]
    CyclicMove {
        /// The node being moved.
        node: NodeId,
        /// The requested new parent.
        target: NodeId,
    },

    /// Node lacks the capability an operation requires.
    #[error("node {node:?} is not {capability}")]
    MissingCapability {
        /// The node that was queried.
        node: NodeId,
        /// The capability that was required.
        capability: &'static str,
    },

    /// A map file could not be loaded or linked.
    #[error("map load error: {0}")]
    MapLoad(String),

    /// Configuration is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file the error relates to.
    pub source: Option<String>,
    /// Chain of operations that led to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_node() {
        let err = Error::invalid_node("names must not be empty");
        assert!(matches!(err.kind, ErrorKind::InvalidNode(_)));
        assert!(format!("{err}").contains("names must not be empty"));
    }

    #[test]
    fn error_with_context() {
        let err = Error::map_load("missing spawn point").with_context(
            ErrorContext::new()
                .with_source("data/maps/testmap.yaml")
                .with_frame("link"),
        );

        let ctx = err.context.unwrap();
        assert_eq!(ctx.source.as_deref(), Some("data/maps/testmap.yaml"));
        assert_eq!(ctx.stack, vec!["link".to_string()]);
        assert!(format!("{ctx}").contains("in link"));
    }

    #[test]
    fn error_cyclic_move() {
        let err = Error::cyclic_move(NodeId::new(1), NodeId::new(2));
        let msg = format!("{err}");
        assert!(msg.contains("NodeId(1)"));
        assert!(msg.contains("NodeId(2)"));
    }

    #[test]
    fn error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }

    #[test]
    fn error_missing_capability() {
        let err = Error::missing_capability(NodeId::new(7), "a room");
        assert_eq!(format!("{err}"), "node NodeId(7) is not a room");
    }
}
