//! Handlers that move objects between containers and operate their lids
//! and locks.

use tocs_foundation::{NodeId, Result};
use tocs_parser::{CommandParser, LocationPath, NodeLocator, Preposition};
use tocs_world::World;

use super::{named, verb_is};
use crate::dispatch::{CommandHandler, Session};

/// Resolves `path`, or tells the player what could not be found.
fn resolve_or_ask(world: &World, path: &LocationPath, session: &mut dyn Session) -> Option<NodeId> {
    let found = NodeLocator::resolve(world, path, session.player());
    if found.is_none() {
        session.write(&format!("What do you mean by \"{}\"?", path.target()));
    }
    found
}

// =============================================================================
// Put
// =============================================================================

/// Moves the prefix objects into the first destination named after a TO
/// preposition.
pub struct PutHandler;

impl CommandHandler for PutHandler {
    fn name(&self) -> &'static str {
        "put"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["put", "move", "place", "transport"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let command = CommandParser::parse(input);

        let mut destination = None;
        for path in named(command.argument(Preposition::To)) {
            destination = NodeLocator::resolve(world, path, player);
            if destination.is_some() {
                break;
            }
            session.write(&format!("I cannot see any \"{}\" around here.", path.target()));
        }
        let Some(destination) = destination else {
            if command.argument(Preposition::To).is_empty() {
                session.write("Where do you want to put it?");
            }
            return Ok(());
        };

        for path in named(&command.prefix) {
            let Some(object) = NodeLocator::resolve(world, path, player) else {
                session.write(&format!("I cannot find this \"{}\".", path.target()));
                continue;
            };
            if world.is_ancestor_or_self(object, destination) {
                session.write(&format!(
                    "You cannot put the {} into the {}.",
                    world.identifier(object),
                    world.identifier(destination)
                ));
                continue;
            }
            if world.move_node(object, Some(destination))? {
                session.write("Done.");
            } else if world.node(destination)?.is_closed() {
                session.write(&format!("The {} is closed.", world.identifier(destination)));
            } else {
                session.write(&format!("You cannot move the {}.", world.identifier(object)));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Open / Close
// =============================================================================

/// Opens or closes the prefix objects. Rooms cannot be opened or closed.
pub struct OpenHandler;

impl CommandHandler for OpenHandler {
    fn name(&self) -> &'static str {
        "open"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["open", "close"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let closing = verb_is(input, "close");
        let verb = if closing { "close" } else { "open" };
        let command = CommandParser::parse(input);

        for path in named(&command.prefix) {
            let Some(target) = resolve_or_ask(world, path, session) else {
                continue;
            };
            let node = world.node(target)?;
            let name = node.identifier().to_string();
            let Some(state) = node.openable().copied().filter(|_| node.room().is_none()) else {
                session.write(&format!("You cannot {verb} the {name}."));
                continue;
            };

            if closing {
                if state.closed {
                    session.write(&format!("The {name} is already closed."));
                } else {
                    world.close(target)?;
                    session.write("Closed.");
                }
            } else if !state.closed {
                session.write(&format!("The {name} is already open."));
            } else if world.open(target)? {
                session.write("Opened.");
            } else {
                session.write(&format!("The {name} is locked."));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Lock / Unlock
// =============================================================================

/// Locks or unlocks the prefix objects with the key named after WITH.
pub struct LockHandler;

impl CommandHandler for LockHandler {
    fn name(&self) -> &'static str {
        "lock"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["lock", "unlock"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let unlocking = verb_is(input, "unlock");
        let verb = if unlocking { "unlock" } else { "lock" };
        let command = CommandParser::parse(input);

        let Some(key_path) = named(command.argument(Preposition::With)).next() else {
            session.write(&format!("What do you want to {verb} it with?"));
            return Ok(());
        };
        let Some(key) = NodeLocator::resolve(world, key_path, player) else {
            session.write(&format!("You do not have any \"{}\".", key_path.target()));
            return Ok(());
        };
        let key_name = world.identifier(key).to_string();

        for path in named(&command.prefix) {
            let Some(target) = resolve_or_ask(world, path, session) else {
                continue;
            };
            let node = world.node(target)?;
            let name = node.identifier().to_string();
            if node.lockable().is_none() {
                session.write(&format!("You cannot {verb} the {name}."));
                continue;
            }
            if node.is_locked() != unlocking {
                let state = if unlocking { "unlocked" } else { "locked" };
                session.write(&format!("The {name} is already {state}."));
                continue;
            }

            let fits = if unlocking {
                world.unlock(target, &key_name)?
            } else {
                world.lock(target, &key_name)?
            };
            if !fits {
                session.write(&format!("The {key_name} does not fit."));
            } else if unlocking {
                session.write("Unlocked.");
            } else {
                session.write("Locked.");
            }
        }
        Ok(())
    }
}
