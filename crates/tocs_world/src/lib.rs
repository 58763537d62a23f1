//! World tree arena, node capabilities, and map files for TOCS.
//!
//! This crate provides:
//! - [`World`] - Arena of nodes forming the ownership tree of the game world
//! - [`Node`] / [`NodeSpec`] - Nodes and their construction recipes
//! - Capabilities: [`OpenState`], [`LockState`], [`RoomLinks`], [`WeaponState`], [`PlayerState`]
//! - [`Direction`], [`Team`], [`WeaponType`] - Domain enums and records
//! - [`GameMap`] - Maps loaded from YAML files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod direction;
pub mod map;
pub mod node;
pub mod search;
pub mod team;
pub mod weapon;
pub mod world;

pub use direction::Direction;
pub use map::GameMap;
pub use node::{
    ATTR_HIDDEN, DescriptionHook, HANDS, INVENTORY, INVENTORY_ALIAS, LockState, Node, NodeSpec,
    OpenState, PlayerState, ROOT, RoomLinks,
};
pub use search::UNBOUNDED;
pub use team::Team;
pub use weapon::{WeaponState, WeaponType};
pub use world::World;
