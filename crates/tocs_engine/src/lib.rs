//! Command dispatch, built-in handlers, lobby, and equipment store for TOCS.
//!
//! This crate provides:
//! - [`HandlerRegistry`] - Routes input lines to the first suitable [`CommandHandler`]
//! - [`handlers`] - The built-in commands (look, go, take, put, open, lock, ...)
//! - [`Lobby`] - Ready flags and the countdown before a game starts
//! - [`TeamRoster`] - Team sizes and automatic team assignment
//! - [`EquipmentCatalog`] - Weapon categories loaded from a store file
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐ line  ┌─────────────────┐ first match ┌────────────────┐
//! │ Session  │──────▶│ HandlerRegistry │────────────▶│ CommandHandler │
//! └──────────┘       └─────────────────┘             └───────┬────────┘
//!      ▲                                                     │ parse + resolve
//!      │                     text                            ▼
//!      └─────────────────────────────────────────────── World (locked)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dispatch;
pub mod handlers;
pub mod lobby;
pub mod store;
pub mod team;

use std::sync::{Arc, Mutex};

use tocs_world::World;

pub use dispatch::{
    CommandHandler, DispatchOutcome, HandlerRegistry, INTERNAL_ERROR, NOT_UNDERSTOOD, Session,
    Transcript,
};
pub use lobby::{Lobby, MemberId, Notifier, should_announce};
pub use store::{Category, EquipmentCatalog, Purchase};
pub use team::TeamRoster;

/// The world shared by every session. Each command holds the lock for its
/// whole dispatch.
pub type SharedWorld = Arc<Mutex<World>>;

/// Wraps a world for sharing between sessions.
#[must_use]
pub fn share(world: World) -> SharedWorld {
    Arc::new(Mutex::new(world))
}
