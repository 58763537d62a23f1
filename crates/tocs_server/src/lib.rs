//! Network sessions, menus, configuration, and logging for TOCS.
//!
//! This crate provides:
//! - [`Server`] - Accepts TCP connections and runs one session per player
//! - [`Connection`] - Message framing with the `0x17` separator
//! - [`run_session`] - Nickname, team choice, lobby, and the command loop
//! - [`ServerConfig`] - Settings loaded from a YAML file
//! - [`ConsoleTerminal`] - Local play on stdin/stdout

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod connection;
pub mod console;
pub mod context;
pub mod logging;
pub mod menu;
pub mod server;
pub mod session;
pub mod skins;
pub mod terminal;

pub use config::{DEFAULT_CONFIG_PATH, ServerConfig};
pub use connection::{Connection, MessageWriter, SEPARATOR};
pub use console::ConsoleTerminal;
pub use context::GameContext;
pub use menu::{NumericalMenu, Prompt, ShortcutSelector};
pub use server::Server;
pub use session::{command_loop, run_session};
pub use skins::{Skin, skins};
pub use terminal::{ScriptedTerminal, Terminal};
