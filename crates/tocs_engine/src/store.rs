//! The equipment store.
//!
//! The catalogue is a YAML list of weapons, each naming its category:
//!
//! ```yaml
//! - category: Pistols
//!   name: Glock
//!   description: A reliable sidearm.
//!   capacity: 17
//!   rate: 1
//!   damage: 20
//!   price: 400
//! ```
//!
//! Categories keep the order in which they first appear.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tocs_foundation::{Error, ErrorContext, NodeId, Result};
use tocs_world::{WeaponType, World};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreEntry {
    category: String,
    name: String,
    description: String,
    capacity: u32,
    rate: u32,
    damage: u32,
    price: u32,
}

/// A named group of weapons, e.g. "Rifles".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name shown in the store menu.
    pub name: String,
    /// The weapons on offer, in file order.
    pub weapons: Vec<Arc<WeaponType>>,
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    /// The weapon was paid for and placed in the player's hands.
    Bought(NodeId),
    /// The player's credit does not cover the price.
    InsufficientCredit,
}

/// Weapon categories on sale in the lobby.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentCatalog {
    categories: Vec<Category>,
}

impl EquipmentCatalog {
    /// Loads a catalogue file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Serialization` if it is
    /// malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading equipment store");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|err| {
            err.with_context(ErrorContext::new().with_source(path.display().to_string()))
        })
    }

    /// Parses a catalogue from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the text is malformed.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let entries: Vec<StoreEntry> =
            serde_yaml::from_str(text).map_err(|err| Error::serialization(err.to_string()))?;

        let mut catalog = Self::default();
        for entry in entries {
            let weapon = Arc::new(WeaponType {
                name: entry.name.trim().to_string(),
                description: entry.description.trim().to_string(),
                capacity: entry.capacity,
                rate: entry.rate,
                damage: entry.damage,
                price: entry.price,
            });
            let category = entry.category.trim();
            match catalog.categories.iter_mut().find(|c| c.name == category) {
                Some(existing) => existing.weapons.push(weapon),
                None => catalog.categories.push(Category {
                    name: category.to_string(),
                    weapons: vec![weapon],
                }),
            }
        }
        debug!(categories = catalog.categories.len(), "equipment store parsed");
        Ok(catalog)
    }

    /// Returns the categories in file order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a weapon by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Arc<WeaponType>> {
        self.categories
            .iter()
            .flat_map(|category| &category.weapons)
            .find(|weapon| weapon.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Sells `weapon` to `player`: debits the price and puts a loaded
    /// weapon in the player's hands.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if `player` is not a player.
    pub fn purchase(world: &mut World, player: NodeId, weapon: &Arc<WeaponType>) -> Result<Purchase> {
        let hands = world
            .hands_of(player)
            .ok_or_else(|| Error::missing_capability(player, "a player"))?;
        if !world.consume_credit(player, weapon.price)? {
            return Ok(Purchase::InsufficientCredit);
        }
        let node = world.spawn_weapon(hands, Arc::clone(weapon))?;
        info!(player = world.identifier(player), weapon = %weapon.name, "weapon bought");
        Ok(Purchase::Bought(node))
    }
}
