//! Location path resolution.
//!
//! The first segment of a path is looked up around the player: first in the
//! player's own subtree (backpack, hands, and anything inside them) without
//! a depth bound, then among the direct contents of the player's room. Every
//! further segment must be a direct child of the node found for the
//! previous one. Resolution stops at the first segment that cannot be found.

use thiserror::Error;
use tocs_foundation::NodeId;
use tocs_world::{UNBOUNDED, World};

use crate::location::LocationPath;

/// A location path that did not lead to a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("nothing called \"{target}\" could be found")]
pub struct Unresolved {
    /// The target (last segment) of the failed path.
    pub target: String,
}

/// Resolves location paths against the world tree.
pub struct NodeLocator;

impl NodeLocator {
    /// Finds a node named `name` at or below `parent` within `depth` levels.
    ///
    /// An identifier match anywhere in range wins over a match on an
    /// alternative name.
    #[must_use]
    pub fn find_sub_node(world: &World, name: &str, parent: NodeId, depth: i32) -> Option<NodeId> {
        world.find_by_identifier(parent, name, depth).or_else(|| {
            world
                .find_by_predicate(parent, |node| node.has_name(name), depth)
                .first()
                .copied()
        })
    }

    /// Finds a node named `name` around the player: in their own subtree,
    /// then directly in their room.
    #[must_use]
    pub fn find_at_player(world: &World, name: &str, player: NodeId) -> Option<NodeId> {
        Self::find_sub_node(world, name, player, UNBOUNDED).or_else(|| {
            let room = world.get(player)?.parent()?;
            Self::find_sub_node(world, name, room, 1)
        })
    }

    /// Resolves `path` for `player`. Returns `None` as soon as a segment is
    /// missing, and for empty paths.
    #[must_use]
    pub fn resolve(world: &World, path: &LocationPath, player: NodeId) -> Option<NodeId> {
        let mut segments = path.iter();
        let first = segments.next()?;
        let mut current = Self::find_at_player(world, first, player)?;
        for segment in segments {
            current = Self::find_sub_node(world, segment, current, 1)?;
        }
        Some(current)
    }

    /// Resolves `path` for `player`, naming the path's target on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Unresolved`] carrying the target identifier if any segment
    /// cannot be found.
    pub fn locate(world: &World, path: &LocationPath, player: NodeId) -> Result<NodeId, Unresolved> {
        Self::resolve(world, path, player).ok_or_else(|| Unresolved {
            target: path.target().to_string(),
        })
    }
}
