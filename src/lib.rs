//! TOCS - Text-only combat server
//!
//! This crate re-exports all layers of the TOCS system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: tocs_server     - Config, logging, sessions, menus, TCP, console
//! Layer 3: tocs_engine     - Dispatch registry, command handlers, lobby, store
//! Layer 2: tocs_parser     - Command parser, location paths, location resolver
//! Layer 1: tocs_world      - World tree arena, capabilities, map files
//! Layer 0: tocs_foundation - Core types (NodeId, Value, Error)
//! ```

pub use tocs_engine as engine;
pub use tocs_foundation as foundation;
pub use tocs_parser as parser;
pub use tocs_server as server;
pub use tocs_world as world;
