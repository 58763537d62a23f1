//! The world tree.
//!
//! The `World` is an arena of nodes addressed by [`NodeId`]. Each node keeps
//! its parent id and an ordered list of child ids; every edit goes through
//! methods that keep both sides of that relation in agreement.
//!
//! Ids are handed out in increasing order and never reissued, so the id of
//! a removed node simply stops resolving.

use std::collections::BTreeMap;
use std::sync::Arc;

use tocs_foundation::{Error, NodeId, Result, Value};

use crate::direction::Direction;
use crate::node::{
    DescriptionHook, HANDS, INVENTORY, INVENTORY_ALIAS, Node, NodeSpec, ROOT, normalize_description,
};
use crate::team::Team;
use crate::weapon::WeaponType;

/// Arena holding every node of a game world.
#[derive(Debug, Clone)]
pub struct World {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u64,
    root: NodeId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a world holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::new(0);
        let node = Node {
            id: root,
            names: vec![ROOT.to_string()],
            description: "The root node".to_string(),
            weight: -1,
            attributes: BTreeMap::new(),
            hook: None,
            parent: None,
            children: Vec::new(),
            openable: None,
            lockable: None,
            room: None,
            weapon: None,
            player: None,
        };
        Self {
            nodes: BTreeMap::from([(root, node)]),
            next_id: 1,
            root,
        }
    }

    /// Returns the root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of live nodes, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the world holds no nodes. Never true in practice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` names a live node of this world.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the node, or `None` for foreign or removed ids.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns the node.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign or removed ids.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| Error::node_not_found(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| Error::node_not_found(id))
    }

    /// Returns the identifier of a node, or an empty string for foreign ids.
    #[must_use]
    pub fn identifier(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::identifier)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a node from `spec` and places it under `parent`.
    ///
    /// Placement at creation ignores the parent's open state, so map files
    /// can stock closed containers. A `None` parent leaves the node detached.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNode` if the spec has no names, an empty identifier,
    /// or an empty description, and `NodeNotFound` for a foreign parent.
    pub fn spawn(&mut self, parent: Option<NodeId>, spec: NodeSpec) -> Result<NodeId> {
        if spec.names.is_empty() {
            return Err(Error::invalid_node("a node needs at least one name"));
        }
        if spec.names[0].trim().is_empty() {
            return Err(Error::invalid_node("a node's identifier must not be empty"));
        }
        if spec.description.trim().is_empty() {
            return Err(Error::invalid_node(format!(
                "node \"{}\" has no description",
                spec.names[0]
            )));
        }
        if let Some(parent) = parent {
            self.node(parent)?;
        }

        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        let node = Node {
            id,
            names: spec.names,
            description: normalize_description(&spec.description),
            weight: spec.weight,
            attributes: spec.attributes,
            hook: spec.hook,
            parent: None,
            children: Vec::new(),
            openable: spec.openable,
            lockable: spec.lockable,
            room: spec.room,
            weapon: spec.weapon,
            player: spec.player,
        };
        self.nodes.insert(id, node);
        if let Some(parent) = parent {
            self.link(parent, id)?;
        }
        Ok(id)
    }

    /// Creates a detached player with a backpack and a pair of hands.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNode` for an empty nickname.
    pub fn spawn_player(&mut self, nickname: &str, team: Team, credit: u32) -> Result<NodeId> {
        let player = self.spawn(
            None,
            NodeSpec::named(nickname, format!("This is {nickname}.")).player(team, credit),
        )?;
        self.spawn(
            Some(player),
            NodeSpec::new([INVENTORY, INVENTORY_ALIAS], "A backpack containing equipment."),
        )?;
        self.spawn(Some(player), NodeSpec::named(HANDS, "A pair of unkempt hands."))?;
        Ok(player)
    }

    /// Creates a fully loaded weapon of `kind` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign parent.
    pub fn spawn_weapon(&mut self, parent: NodeId, kind: Arc<WeaponType>) -> Result<NodeId> {
        let spec = NodeSpec::named(kind.name.clone(), kind.description.clone()).weapon(kind);
        self.spawn(Some(parent), spec)
    }

    // =========================================================================
    // Tree edits
    // =========================================================================

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) -> Result<()> {
        if let Some(parent) = self.node_mut(child)?.parent.take() {
            self.node_mut(parent)?.children.retain(|c| *c != child);
        }
        Ok(())
    }

    /// Returns true if `ancestor` is `node` or lies on its parent chain.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Node::parent);
        }
        false
    }

    /// Adds `child` under `parent`, detaching it from its old parent.
    ///
    /// Returns `Ok(false)` without changing anything if `parent` is closed.
    ///
    /// # Errors
    ///
    /// Returns `CyclicMove` if `parent` lies inside `child`'s subtree.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.node(child)?;
        if self.node(parent)?.is_closed() {
            return Ok(false);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::cyclic_move(child, parent));
        }
        self.unlink(child)?;
        self.link(parent, child)?;
        Ok(true)
    }

    /// Detaches `child` if its parent is `parent`; otherwise does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent == Some(parent) {
            self.unlink(child)?;
        }
        Ok(())
    }

    /// Detaches a node from its parent.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        self.unlink(node)
    }

    /// Removes `node` and everything below it from the world. Returns the
    /// number of nodes removed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNode` for the root and `NodeNotFound` for foreign or
    /// removed ids.
    pub fn remove(&mut self, node: NodeId) -> Result<usize> {
        if node == self.root {
            return Err(Error::invalid_node("the root cannot be removed"));
        }
        self.unlink(node)?;
        let mut pending = vec![node];
        let mut removed = 0;
        while let Some(id) = pending.pop() {
            if let Some(entry) = self.nodes.remove(&id) {
                pending.extend(entry.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Moves `node` under `target`.
    ///
    /// A `None` target does nothing. Players only enter rooms, and closed
    /// targets refuse new children; in both cases the node stays where it
    /// was. Returns whether the node now sits under `target`.
    ///
    /// # Errors
    ///
    /// Returns `CyclicMove` when `target` is `node` or one of its descendants.
    pub fn move_node(&mut self, node: NodeId, target: Option<NodeId>) -> Result<bool> {
        let Some(target) = target else {
            return Ok(false);
        };
        if self.node(node)?.player.is_some() && self.node(target)?.room.is_none() {
            return Ok(false);
        }
        self.add_child(target, node)
    }

    /// Returns the topmost ancestor of `node`.
    #[must_use]
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.get(current).and_then(Node::parent) {
            current = parent;
        }
        current
    }

    /// Sets an attribute on a node.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.node_mut(node)?
            .attributes
            .insert(key.into(), value.into());
        Ok(())
    }

    /// Replaces a node's description hook.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn set_hook(&mut self, node: NodeId, hook: Option<DescriptionHook>) -> Result<()> {
        self.node_mut(node)?.hook = hook;
        Ok(())
    }

    // =========================================================================
    // Openable and lockable
    // =========================================================================

    /// Opens a node. Returns `Ok(false)` if it is locked.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not openable.
    pub fn open(&mut self, node: NodeId) -> Result<bool> {
        let entry = self.node_mut(node)?;
        let locked = entry.is_locked();
        let state = entry
            .openable
            .as_mut()
            .ok_or_else(|| Error::missing_capability(node, "openable"))?;
        if locked {
            return Ok(false);
        }
        state.closed = false;
        Ok(true)
    }

    /// Closes a node.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not openable.
    pub fn close(&mut self, node: NodeId) -> Result<()> {
        self.node_mut(node)?
            .openable
            .as_mut()
            .ok_or_else(|| Error::missing_capability(node, "openable"))?
            .closed = true;
        Ok(())
    }

    /// Locks a node with the key identified by `key`. Returns whether the key fit.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not lockable.
    pub fn lock(&mut self, node: NodeId, key: &str) -> Result<bool> {
        self.set_locked(node, key, true)
    }

    /// Unlocks a node with the key identified by `key`. Returns whether the key fit.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not lockable.
    pub fn unlock(&mut self, node: NodeId, key: &str) -> Result<bool> {
        self.set_locked(node, key, false)
    }

    fn set_locked(&mut self, node: NodeId, key: &str, locked: bool) -> Result<bool> {
        let lock = self
            .node_mut(node)?
            .lockable
            .as_mut()
            .ok_or_else(|| Error::missing_capability(node, "lockable"))?;
        if !lock.accepts(key) {
            return Ok(false);
        }
        lock.locked = locked;
        Ok(true)
    }

    /// Registers `key` as fitting the lock of `node`.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not lockable.
    pub fn add_key(&mut self, node: NodeId, key: impl Into<String>) -> Result<()> {
        self.node_mut(node)?
            .lockable
            .as_mut()
            .ok_or_else(|| Error::missing_capability(node, "lockable"))?
            .add_key(key);
        Ok(())
    }

    // =========================================================================
    // Rooms
    // =========================================================================

    /// Puts a door from room `from` to room `to` in `direction`.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if either node is not a room.
    pub fn link_rooms(&mut self, from: NodeId, direction: Direction, to: NodeId) -> Result<()> {
        if self.node(to)?.room.is_none() {
            return Err(Error::missing_capability(to, "a room"));
        }
        self.node_mut(from)?
            .room
            .as_mut()
            .ok_or_else(|| Error::missing_capability(from, "a room"))?
            .set(direction, to);
        Ok(())
    }

    /// Returns the room behind the door in `direction`, accessible or not.
    #[must_use]
    pub fn adjacent_room(&self, room: NodeId, direction: Direction) -> Option<NodeId> {
        self.get(room)?.room.as_ref()?.get(direction)
    }

    /// Returns true if a door leads from `room` in `direction`, neither room
    /// is locked, and the room behind the door is not closed.
    #[must_use]
    pub fn can_access(&self, room: NodeId, direction: Direction) -> bool {
        let Some(node) = self.get(room) else {
            return false;
        };
        if node.is_locked() {
            return false;
        }
        self.adjacent_room(room, direction)
            .and_then(|target| self.get(target))
            .is_some_and(|target| !target.is_locked() && !target.is_closed())
    }

    /// Returns the accessible adjacent rooms in direction order, without duplicates.
    #[must_use]
    pub fn accessible_rooms(&self, room: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let Some(links) = self.get(room).and_then(Node::room) else {
            return result;
        };
        for (direction, target) in links.iter() {
            if self.can_access(room, direction) && !result.contains(&target) {
                result.push(target);
            }
        }
        result
    }

    // =========================================================================
    // Players and weapons
    // =========================================================================

    /// Returns the player's backpack.
    #[must_use]
    pub fn inventory_of(&self, player: NodeId) -> Option<NodeId> {
        self.find_by_identifier(player, INVENTORY, 1)
    }

    /// Returns the player's hands.
    #[must_use]
    pub fn hands_of(&self, player: NodeId) -> Option<NodeId> {
        self.find_by_identifier(player, HANDS, 1)
    }

    /// Debits `amount` from the player's credit. Returns `Ok(false)` if the
    /// player cannot afford it.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not a player.
    pub fn consume_credit(&mut self, player: NodeId, amount: u32) -> Result<bool> {
        let state = self
            .node_mut(player)?
            .player
            .as_mut()
            .ok_or_else(|| Error::missing_capability(player, "a player"))?;
        if amount > state.credit {
            return Ok(false);
        }
        state.credit -= amount;
        Ok(true)
    }

    /// Dresses a player in a skin template; `_NAME_` is replaced by the nickname.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not a player.
    pub fn set_skin(&mut self, player: NodeId, template: impl Into<String>) -> Result<()> {
        if self.node(player)?.player.is_none() {
            return Err(Error::missing_capability(player, "a player"));
        }
        self.set_hook(player, Some(DescriptionHook::Template(template.into())))
    }

    /// Fires a weapon once and returns the damage dealt.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not a weapon.
    pub fn fire(&mut self, weapon: NodeId) -> Result<u32> {
        Ok(self
            .node_mut(weapon)?
            .weapon
            .as_mut()
            .ok_or_else(|| Error::missing_capability(weapon, "a weapon"))?
            .fire())
    }

    /// Refills a weapon's magazine.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if the node is not a weapon.
    pub fn reload(&mut self, weapon: NodeId) -> Result<()> {
        self.node_mut(weapon)?
            .weapon
            .as_mut()
            .ok_or_else(|| Error::missing_capability(weapon, "a weapon"))?
            .reload();
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Describes a node with its visible children listed one level deep.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn describe(&self, node: NodeId) -> Result<String> {
        self.describe_with_depth(node, 1)
    }

    /// Describes a node, listing the identifiers of its visible children.
    ///
    /// Children go on their own lines, indented by `depth + 1` tabs. A depth
    /// of zero lists no children.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for foreign ids.
    pub fn describe_with_depth(&self, node: NodeId, depth: i32) -> Result<String> {
        let entry = self.node(node)?;
        let mut text = entry.current_description();
        if depth != 0 {
            let indent = "\t".repeat(1 + usize::try_from(depth.max(0)).unwrap_or(0));
            for child in entry.children() {
                let child = self.node(*child)?;
                if child.is_hidden() {
                    continue;
                }
                text.push('\n');
                text.push_str(&indent);
                text.push_str(child.identifier());
            }
        }
        Ok(text)
    }

    /// Renders the subtree below `node` as tab-indented identifiers.
    #[must_use]
    pub fn render_tree(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.render_into(node, 0, &mut out);
        out
    }

    fn render_into(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(entry) = self.get(node) else {
            return;
        };
        if depth > 0 {
            out.push('\n');
        }
        out.push_str(&"\t".repeat(depth));
        out.push_str(entry.identifier());
        for child in entry.children() {
            self.render_into(*child, depth + 1, out);
        }
    }
}
