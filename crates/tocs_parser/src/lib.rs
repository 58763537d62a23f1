//! Free-text command parser and location resolver for TOCS.
//!
//! This crate turns player input like "open the book in the box with the
//! knife" into a structured [`Command`] and walks the resulting location
//! paths through the world tree.
//!
//! # Architecture
//!
//! ```text
//! "open the book in the box with the knife"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [Verb(open), Filler, Word(book), Prep(OF), Filler,
//! └─────────────────┘     Word(box), Prep(WITH), Filler, Word(knife)]
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CHAIN           │  → prefix chain [{book}, {box}], WITH chain [{knife}]
//! │ BUILDING        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ EXPANSION       │  → prefix {box -> book}, WITH {knife}
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESOLUTION      │  → book node inside the box in the player's room
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`preposition`] - The three preposition classes and their word lists
//! - [`tokenizer`] - Input normalization and token classification
//! - [`location`] - Location paths
//! - [`command`] - The parsed command
//! - [`parser`] - Chain building and chain-to-path expansion
//! - [`resolver`] - Location path resolution against the world tree

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod location;
pub mod parser;
pub mod preposition;
pub mod resolver;
pub mod tokenizer;

// Re-export main types for convenience
pub use command::Command;
pub use location::LocationPath;
pub use parser::{CommandParser, expand_chain};
pub use preposition::Preposition;
pub use resolver::{NodeLocator, Unresolved};
pub use tokenizer::{InputToken, InputTokenizer};
