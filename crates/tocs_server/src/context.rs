//! Everything sessions share.

use std::sync::Arc;

use tocs_engine::{EquipmentCatalog, HandlerRegistry, Lobby, SharedWorld, TeamRoster, share};
use tocs_foundation::Result;
use tocs_world::{GameMap, World};
use tracing::{info, warn};

use crate::config::ServerConfig;

/// State shared by every session of one server: the world, the command
/// handlers, the lobby and the store.
pub struct GameContext {
    /// Server settings.
    pub config: ServerConfig,
    /// The loaded map.
    pub map: GameMap,
    /// The world all players act in.
    pub world: SharedWorld,
    /// Command handlers for in-game input.
    pub registry: HandlerRegistry,
    /// Players waiting for the game to start.
    pub lobby: Arc<Lobby>,
    /// Team sizes.
    pub roster: TeamRoster,
    /// Weapons on sale, if the store file could be read.
    pub catalog: Option<EquipmentCatalog>,
}

impl GameContext {
    /// Assembles a context around an already loaded map.
    #[must_use]
    pub fn new(config: ServerConfig, map: GameMap, world: World, catalog: Option<EquipmentCatalog>) -> Self {
        let lobby = Arc::new(Lobby::new(config.countdown_seconds));
        Self {
            config,
            map,
            world: share(world),
            registry: HandlerRegistry::with_builtins(),
            lobby,
            roster: TeamRoster::new(),
            catalog,
        }
    }

    /// Loads the configured map and store.
    ///
    /// A store that cannot be read leaves the store closed; the server
    /// still runs.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `MapLoad` if the map cannot be loaded.
    pub fn load(config: ServerConfig) -> Result<Self> {
        let (map, world) = GameMap::load(&config.map_path)?;
        let catalog = match EquipmentCatalog::load(&config.store_path) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(path = %config.store_path.display(), error = %e, "equipment store unavailable");
                None
            }
        };
        info!(map = map.name(), "game context ready");
        Ok(Self::new(config, map, world, catalog))
    }

    /// Replaces the lobby, e.g. to shorten the countdown.
    #[must_use]
    pub fn with_lobby(mut self, lobby: Lobby) -> Self {
        self.lobby = Arc::new(lobby);
        self
    }
}
