//! Built-in command handlers.
//!
//! Every handler parses its input with [`CommandParser`](tocs_parser::CommandParser)
//! and looks objects up with [`NodeLocator`](tocs_parser::NodeLocator). A path
//! that cannot be resolved is reported by its target and does not stop the
//! remaining paths of the same command. Paths with an empty target ("take
//! book and") are skipped without a reply.

mod containers;
mod describe;
mod equipment;
mod go;
mod take;

use tocs_foundation::{Error, NodeId, Result};
use tocs_parser::LocationPath;
use tocs_world::World;

use crate::dispatch::CommandHandler;

pub use containers::{LockHandler, OpenHandler, PutHandler};
pub use describe::DescribeHandler;
pub use equipment::{InventoryHandler, ReloadHandler, ShootHandler};
pub use go::GoHandler;
pub use take::TakeHandler;

/// Returns the built-in handlers in dispatch order.
#[must_use]
pub fn builtin() -> Vec<Box<dyn CommandHandler>> {
    vec![
        Box::new(DescribeHandler),
        Box::new(GoHandler),
        Box::new(TakeHandler),
        Box::new(PutHandler),
        Box::new(OpenHandler),
        Box::new(LockHandler),
        Box::new(InventoryHandler),
        Box::new(ReloadHandler),
        Box::new(ShootHandler),
    ]
}

/// Returns the room the player stands in.
fn room_of(world: &World, player: NodeId) -> Result<NodeId> {
    world
        .node(player)?
        .parent()
        .ok_or_else(|| Error::internal(format!("player {player} is not placed in a room")))
}

/// Returns the paths that name something.
fn named<'a>(paths: impl IntoIterator<Item = &'a LocationPath>) -> impl Iterator<Item = &'a LocationPath> {
    paths.into_iter().filter(|path| !path.target().is_empty())
}

/// Returns true if the input's first word is `verb`, ignoring case.
fn verb_is(input: &str, verb: &str) -> bool {
    input
        .split_whitespace()
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case(verb))
}
