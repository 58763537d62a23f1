//! World nodes, their capabilities, and construction recipes.
//!
//! A node's behaviour is composed from optional capability fields rather
//! than a type hierarchy: any node may be openable, lockable, a room, a
//! weapon, or a player, and operations check for the capability they need.

use std::collections::BTreeMap;
use std::sync::Arc;

use tocs_foundation::{NodeId, Value};

use crate::direction::Direction;
use crate::team::Team;
use crate::weapon::{WeaponState, WeaponType};

/// Identifier of the world's root node.
pub const ROOT: &str = "root";
/// Identifier of a player's backpack.
pub const INVENTORY: &str = "backpack";
/// Alternative name of a player's backpack.
pub const INVENTORY_ALIAS: &str = "inventory";
/// Identifier of a player's hands.
pub const HANDS: &str = "hands";
/// Attribute marking a node as left out of description listings.
pub const ATTR_HIDDEN: &str = "hidden";

/// Placeholder replaced by the node's identifier in description templates.
const NAME_PLACEHOLDER: &str = "_NAME_";

/// Computes a node's description dynamically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionHook {
    /// Template text in which `_NAME_` is replaced by the node's identifier.
    Template(String),
    /// Static description followed by the weapon's magazine state.
    AmmoCounter,
}

impl DescriptionHook {
    pub(crate) fn render(&self, node: &Node) -> String {
        match self {
            Self::Template(template) => template.replace(NAME_PLACEHOLDER, node.identifier()),
            Self::AmmoCounter => match &node.weapon {
                Some(weapon) => format!(
                    "{} ({}/{} rounds)",
                    node.description,
                    weapon.ammo(),
                    weapon.kind().capacity
                ),
                None => node.description.clone(),
            },
        }
    }
}

/// Open/closed state. Closed nodes refuse new children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenState {
    /// Whether the node is closed.
    pub closed: bool,
}

/// Lock state and the identifiers of the keys that fit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockState {
    /// Whether the node is locked.
    pub locked: bool,
    keys: Vec<String>,
}

impl LockState {
    /// Creates a lock state without keys.
    #[must_use]
    pub fn new(locked: bool) -> Self {
        Self {
            locked,
            keys: Vec::new(),
        }
    }

    /// Registers a key identifier. Duplicates are ignored.
    pub fn add_key(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if !self.keys.contains(&identifier) {
            self.keys.push(identifier);
        }
    }

    /// Returns true if the key identifier fits this lock.
    #[must_use]
    pub fn accepts(&self, identifier: &str) -> bool {
        self.keys.iter().any(|key| key == identifier)
    }

    /// Returns the registered key identifiers.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Doors from a room to adjacent rooms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomLinks {
    doors: BTreeMap<Direction, NodeId>,
}

impl RoomLinks {
    /// Returns the room behind the door in `direction`, if any.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<NodeId> {
        self.doors.get(&direction).copied()
    }

    /// Sets the door in `direction`, replacing any previous one.
    pub fn set(&mut self, direction: Direction, room: NodeId) {
        self.doors.insert(direction, room);
    }

    /// Iterates over all doors in direction order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        self.doors.iter().map(|(direction, room)| (*direction, *room))
    }
}

/// Player capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Team the player fights for.
    pub team: Team,
    /// Credit left to spend in the store.
    pub credit: u32,
}

/// A node in the world tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) names: Vec<String>,
    pub(crate) description: String,
    pub(crate) weight: i32,
    pub(crate) attributes: BTreeMap<String, Value>,
    pub(crate) hook: Option<DescriptionHook>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) openable: Option<OpenState>,
    pub(crate) lockable: Option<LockState>,
    pub(crate) room: Option<RoomLinks>,
    pub(crate) weapon: Option<WeaponState>,
    pub(crate) player: Option<PlayerState>,
}

impl Node {
    /// Returns this node's id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the canonical identifier (the first name).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.names[0]
    }

    /// Returns all names, identifier first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true if any of this node's names equals `name`.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the static description, ignoring any hook.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the description, computed by the hook when one is set.
    #[must_use]
    pub fn current_description(&self) -> String {
        match &self.hook {
            Some(hook) => hook.render(self),
            None => self.description.clone(),
        }
    }

    /// Returns the carry weight; `-1` means unlimited.
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Returns the attribute stored under `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns all attributes.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Returns the description hook, if any.
    #[must_use]
    pub fn hook(&self) -> Option<&DescriptionHook> {
        self.hook.as_ref()
    }

    /// Returns the parent, or `None` for the root and detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the node carries the hidden attribute.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.attribute(ATTR_HIDDEN).is_some_and(Value::is_truthy)
    }

    /// Returns true if the node is openable and currently closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.openable.is_some_and(|state| state.closed)
    }

    /// Returns true if the node is lockable and currently locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lockable.as_ref().is_some_and(|state| state.locked)
    }

    /// Returns the open state, if the node is openable.
    #[must_use]
    pub fn openable(&self) -> Option<&OpenState> {
        self.openable.as_ref()
    }

    /// Returns the lock state, if the node is lockable.
    #[must_use]
    pub fn lockable(&self) -> Option<&LockState> {
        self.lockable.as_ref()
    }

    /// Returns the doors, if the node is a room.
    #[must_use]
    pub fn room(&self) -> Option<&RoomLinks> {
        self.room.as_ref()
    }

    /// Returns the weapon state, if the node is a weapon.
    #[must_use]
    pub fn weapon(&self) -> Option<&WeaponState> {
        self.weapon.as_ref()
    }

    /// Returns the player state, if the node is a player.
    #[must_use]
    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }
}

/// Recipe for a new node, consumed by [`World::spawn`](crate::World::spawn).
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub(crate) names: Vec<String>,
    pub(crate) description: String,
    pub(crate) weight: i32,
    pub(crate) attributes: BTreeMap<String, Value>,
    pub(crate) hook: Option<DescriptionHook>,
    pub(crate) openable: Option<OpenState>,
    pub(crate) lockable: Option<LockState>,
    pub(crate) room: Option<RoomLinks>,
    pub(crate) weapon: Option<WeaponState>,
    pub(crate) player: Option<PlayerState>,
}

impl NodeSpec {
    /// Creates a plain node recipe with the given names (identifier first).
    #[must_use]
    pub fn new<I, S>(names: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            description: description.into(),
            weight: -1,
            attributes: BTreeMap::new(),
            hook: None,
            openable: None,
            lockable: None,
            room: None,
            weapon: None,
            player: None,
        }
    }

    /// Creates a plain node recipe with a single name.
    #[must_use]
    pub fn named(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new([identifier.into()], description)
    }

    /// Adds an alternative name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Sets the carry weight.
    #[must_use]
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets the description hook.
    #[must_use]
    pub fn with_hook(mut self, hook: DescriptionHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Leaves the node out of description listings.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.with_attribute(ATTR_HIDDEN, true)
    }

    /// Makes the node openable.
    #[must_use]
    pub fn openable(mut self, closed: bool) -> Self {
        self.openable = Some(OpenState { closed });
        self
    }

    /// Makes the node openable and lockable.
    #[must_use]
    pub fn lockable(mut self, closed: bool, locked: bool) -> Self {
        self.openable = Some(OpenState { closed });
        self.lockable = Some(LockState::new(locked));
        self
    }

    /// Adds a key identifier to a lockable node. Implies [`lockable`](Self::lockable).
    #[must_use]
    pub fn with_key(mut self, identifier: impl Into<String>) -> Self {
        if self.lockable.is_none() {
            self = self.lockable(false, false);
        }
        if let Some(lock) = self.lockable.as_mut() {
            lock.add_key(identifier);
        }
        self
    }

    /// Makes the node a room. Rooms are lockable, open, and unlocked.
    #[must_use]
    pub fn room(mut self) -> Self {
        if self.lockable.is_none() {
            self = self.lockable(false, false);
        }
        self.room = Some(RoomLinks::default());
        self
    }

    /// Makes the node a loaded weapon of the given type.
    #[must_use]
    pub fn weapon(mut self, kind: Arc<WeaponType>) -> Self {
        self.weapon = Some(WeaponState::loaded(kind));
        self.hook = Some(DescriptionHook::AmmoCounter);
        self
    }

    /// Makes the node a player.
    #[must_use]
    pub fn player(mut self, team: Team, credit: u32) -> Self {
        self.player = Some(PlayerState { team, credit });
        self
    }
}

/// Collapses runs of spaces, then drops tabs and spaces after newlines.
pub(crate) fn normalize_description(description: &str) -> String {
    let mut text = description.to_string();
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text.replace('\t', "").replace("\n ", "\n")
}
