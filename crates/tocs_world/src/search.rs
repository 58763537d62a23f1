//! Depth-bounded pre-order searches over the world tree.
//!
//! Both searches visit a node before its children and children in insertion
//! order. A depth of `0` inspects only the start node, `1` adds its direct
//! children, and any negative depth searches without bound.

use tocs_foundation::NodeId;

use crate::node::Node;
use crate::world::World;

/// Depth that searches the whole subtree.
pub const UNBOUNDED: i32 = -1;

impl World {
    /// Returns the first node at or below `start` whose identifier equals
    /// `identifier`, within `depth` levels.
    #[must_use]
    pub fn find_by_identifier(&self, start: NodeId, identifier: &str, depth: i32) -> Option<NodeId> {
        let node = self.get(start)?;
        if node.identifier() == identifier {
            return Some(start);
        }
        if depth == 0 {
            return None;
        }
        node.children()
            .iter()
            .find_map(|child| self.find_by_identifier(*child, identifier, depth - 1))
    }

    /// Returns every node at or below `start` matching `predicate`, within
    /// `depth` levels, in pre-order.
    #[must_use]
    pub fn find_by_predicate<P>(&self, start: NodeId, predicate: P, depth: i32) -> Vec<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        let mut result = Vec::new();
        self.collect_matches(start, &predicate, depth, &mut result);
        result
    }

    fn collect_matches<P>(&self, start: NodeId, predicate: &P, depth: i32, out: &mut Vec<NodeId>)
    where
        P: Fn(&Node) -> bool,
    {
        let Some(node) = self.get(start) else {
            return;
        };
        if predicate(node) {
            out.push(start);
        }
        if depth == 0 {
            return;
        }
        for child in node.children() {
            self.collect_matches(*child, predicate, depth - 1, out);
        }
    }
}
