//! Integration tests for the tocs_server crate.
//!
//! Tests for running sessions:
//! - The bundled configuration and data files
//! - Players meeting in the lobby
//! - Playing over a real TCP connection

mod context_tests;
mod lobby_tests;
mod tcp_tests;

use std::path::PathBuf;
use std::time::Duration;

use tocs_engine::{EquipmentCatalog, Lobby};
use tocs_server::{GameContext, ServerConfig};
use tocs_world::GameMap;

/// Resolves a path relative to the repository root.
pub fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// A context on the bundled map and store with a near-instant countdown.
pub fn quick_context() -> GameContext {
    let (map, world) = GameMap::load(repo_path("data/maps/testmap.yaml")).unwrap();
    let catalog = EquipmentCatalog::load(repo_path("data/default_store.yaml")).unwrap();
    GameContext::new(ServerConfig::default(), map, world, Some(catalog))
        .with_lobby(Lobby::with_tick(2, Duration::from_millis(5)))
}
