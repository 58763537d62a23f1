//! Maps loaded from YAML files.
//!
//! A map file describes a tree of nodes plus the spawn points of both teams
//! and the bomb point. Nodes refer to each other (doors, keys) through
//! reference ids that are resolved after the whole tree has been built:
//!
//! ```yaml
//! name: Dust
//! spawn_terrorists: t_spawn
//! spawn_counter_terrorists: ct_spawn
//! bomb_point: site_a
//! root:
//!   id: dust
//!   desc: A dusty town.
//!   nodes:
//!     - ref: t_spawn
//!       id: courtyard
//!       type: room
//!       desc: A sunny courtyard.
//!       doors:
//!         north: site_a
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tocs_foundation::{Error, ErrorContext, NodeId, Result, Value};
use tracing::{debug, info, warn};

use crate::direction::Direction;
use crate::node::NodeSpec;
use crate::team::Team;
use crate::world::World;

/// Placeholder name for maps that do not declare one.
const UNNAMED: &str = "NO_NAME_SPECIFIED";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapFile {
    name: Option<String>,
    spawn_terrorists: Option<String>,
    spawn_counter_terrorists: Option<String>,
    bomb_point: Option<String>,
    root: NodeEntry,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKind {
    #[default]
    Plain,
    Room,
    Openable,
    Lockable,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    #[serde(rename = "ref")]
    reference: Option<String>,
    id: String,
    #[serde(default)]
    names: Vec<String>,
    desc: String,
    #[serde(rename = "type", default)]
    kind: NodeKind,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    locked: bool,
    key: Option<String>,
    #[serde(default)]
    doors: BTreeMap<Direction, String>,
    #[serde(default)]
    hidden: bool,
    weight: Option<i32>,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
    #[serde(default)]
    nodes: Vec<NodeEntry>,
}

/// A link between two nodes, recorded while building and resolved afterwards.
#[derive(Debug)]
enum Reference {
    Key { owner: String, target: String },
    Door { owner: String, direction: Direction, target: String },
}

/// A playable map: its name, spawn points, and bomb point.
///
/// The nodes themselves live in the [`World`] returned alongside the map by
/// [`GameMap::load`].
#[derive(Debug, Clone)]
pub struct GameMap {
    name: String,
    root: NodeId,
    bomb_point: NodeId,
    spawn_points: BTreeMap<Team, NodeId>,
}

impl GameMap {
    /// Loads a map file into a fresh world.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `MapLoad` if it is
    /// malformed or lacks a spawn or bomb point.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, World)> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading map");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text).map_err(|err| {
            err.with_context(ErrorContext::new().with_source(path.display().to_string()))
        })
    }

    /// Builds a map from YAML text into a fresh world.
    ///
    /// # Errors
    ///
    /// Returns `MapLoad` if the text is malformed, lacks a spawn or bomb
    /// point, or a spawn point is not an open room.
    pub fn from_yaml(text: &str) -> Result<(Self, World)> {
        let file: MapFile =
            serde_yaml::from_str(text).map_err(|err| Error::map_load(err.to_string()))?;

        let name = match file.name {
            Some(name) => name.trim().to_string(),
            None => {
                warn!("map has no name");
                UNNAMED.to_string()
            }
        };

        let mut builder = Builder::default();
        let mut world = World::new();
        let world_root = world.root();
        let root = builder.build(&mut world, world_root, file.root)?;
        builder.link(&mut world);

        let terrorists = builder.required(file.spawn_terrorists, "spawn_terrorists")?;
        let counter_terrorists =
            builder.required(file.spawn_counter_terrorists, "spawn_counter_terrorists")?;
        let bomb_point = builder.required(file.bomb_point, "bomb_point")?;

        let mut spawn_points = BTreeMap::new();
        spawn_points.insert(Team::Terrorists, terrorists);
        spawn_points.insert(Team::CounterTerrorists, counter_terrorists);
        for (team, point) in &spawn_points {
            let node = world.node(*point)?;
            if node.room().is_none() || node.is_closed() {
                return Err(Error::map_load(format!(
                    "spawn point of the {team} must be an open room, \"{}\" is not",
                    node.identifier()
                )));
            }
        }

        info!(map = %name, nodes = world.len(), "map loaded");
        Ok((
            Self {
                name,
                root,
                bomb_point,
                spawn_points,
            },
            world,
        ))
    }

    /// Returns the map's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the topmost node of the map.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the bomb point.
    #[must_use]
    pub const fn bomb_point(&self) -> NodeId {
        self.bomb_point
    }

    /// Returns the spawn point of `team`.
    #[must_use]
    pub fn spawn_point(&self, team: Team) -> Option<NodeId> {
        self.spawn_points.get(&team).copied()
    }

    /// Places a player at their team's spawn point and returns the map
    /// banner followed by the room description.
    ///
    /// # Errors
    ///
    /// Returns `MissingCapability` if `player` is not a player and
    /// `Internal` if the spawn point refuses the player.
    pub fn spawn(&self, world: &mut World, player: NodeId) -> Result<String> {
        let team = world
            .node(player)?
            .player()
            .map(|state| state.team)
            .ok_or_else(|| Error::missing_capability(player, "a player"))?;
        let spawn_point = self
            .spawn_point(team)
            .ok_or_else(|| Error::internal(format!("no spawn point for {team}")))?;
        if !world.move_node(player, Some(spawn_point))? {
            return Err(Error::internal(format!(
                "spawn point \"{}\" refused {}",
                world.identifier(spawn_point),
                world.identifier(player)
            )));
        }
        debug!(player = world.identifier(player), %team, "player spawned");
        Ok(format!(
            "---------- {} ----------\n\n{}",
            self.name,
            world.describe(spawn_point)?
        ))
    }
}

#[derive(Default)]
struct Builder {
    references: HashMap<String, NodeId>,
    pending: Vec<Reference>,
}

impl Builder {
    fn build(&mut self, world: &mut World, parent: NodeId, entry: NodeEntry) -> Result<NodeId> {
        let reference = entry.reference.map(|r| r.trim().to_string());
        let identifier = entry.id.trim().to_string();
        debug!(node = %identifier, reference = ?reference, "loading node");

        let mut names = vec![identifier.clone()];
        names.extend(entry.names.iter().map(|n| n.trim().to_string()));
        let mut spec = NodeSpec::new(names, entry.desc.trim());

        match entry.kind {
            NodeKind::Plain => {
                if entry.closed || entry.locked {
                    warn!(node = %identifier, "closed and locked ignored on a plain node");
                }
            }
            NodeKind::Openable => {
                if entry.locked {
                    warn!(node = %identifier, "locked ignored on a node without a lock");
                }
                spec = spec.openable(entry.closed);
            }
            NodeKind::Lockable => spec = spec.lockable(entry.closed, entry.locked),
            NodeKind::Room => spec = spec.lockable(entry.closed, entry.locked).room(),
        }
        if entry.hidden {
            spec = spec.hidden();
        }
        if let Some(weight) = entry.weight {
            spec = spec.with_weight(weight);
        }
        for (key, value) in entry.attributes {
            spec = spec.with_attribute(key, value);
        }

        if let Some(key) = entry.key {
            match (&reference, entry.kind) {
                (Some(owner), NodeKind::Lockable | NodeKind::Room) => {
                    self.pending.push(Reference::Key {
                        owner: owner.clone(),
                        target: key.trim().to_string(),
                    });
                }
                (None, _) => warn!(node = %identifier, key = %key, "key owner has no reference id"),
                _ => warn!(node = %identifier, "key ignored on a node that cannot be locked"),
            }
        }
        if !entry.doors.is_empty() {
            match (&reference, entry.kind) {
                (Some(owner), NodeKind::Room) => {
                    for (direction, target) in entry.doors {
                        self.pending.push(Reference::Door {
                            owner: owner.clone(),
                            direction,
                            target: target.trim().to_string(),
                        });
                    }
                }
                (None, NodeKind::Room) => {
                    warn!(room = %identifier, "room has no reference id and cannot be reached");
                }
                _ => warn!(node = %identifier, "doors ignored on a node that is not a room"),
            }
        }

        let id = world
            .spawn(Some(parent), spec)
            .map_err(|err| Error::map_load(format!("node \"{identifier}\": {err}")))?;
        if let Some(reference) = reference {
            if self.references.insert(reference.clone(), id).is_some() {
                warn!(reference = %reference, "duplicate reference id, the later node wins");
            }
        }

        for child in entry.nodes {
            self.build(world, id, child)?;
        }
        Ok(id)
    }

    fn link(&mut self, world: &mut World) {
        for reference in self.pending.drain(..) {
            match reference {
                Reference::Key { owner, target } => {
                    let (Some(owner_id), Some(target_id)) =
                        (self.references.get(&owner), self.references.get(&target))
                    else {
                        warn!(owner = %owner, target = %target, "could not resolve key reference");
                        continue;
                    };
                    let key = world.identifier(*target_id).to_string();
                    if let Err(err) = world.add_key(*owner_id, key) {
                        warn!(owner = %owner, error = %err, "key ignored");
                    }
                }
                Reference::Door {
                    owner,
                    direction,
                    target,
                } => {
                    let (Some(owner_id), Some(target_id)) =
                        (self.references.get(&owner), self.references.get(&target))
                    else {
                        warn!(owner = %owner, target = %target, "could not resolve door reference");
                        continue;
                    };
                    if let Err(err) = world.link_rooms(*owner_id, direction, *target_id) {
                        warn!(
                            owner = %owner,
                            target = %target,
                            %direction,
                            error = %err,
                            "door ignored"
                        );
                    }
                }
            }
        }
    }

    fn required(&self, reference: Option<String>, field: &str) -> Result<NodeId> {
        let reference =
            reference.ok_or_else(|| Error::map_load(format!("{field} must be defined")))?;
        self.references
            .get(reference.trim())
            .copied()
            .ok_or_else(|| {
                Error::map_load(format!(
                    "{field} reference \"{}\" does not resolve to a node",
                    reference.trim()
                ))
            })
    }
}
