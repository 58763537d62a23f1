use tocs_foundation::{Error, Result};
use tocs_parser::{CommandParser, NodeLocator};
use tocs_world::World;

use super::{named, verb_is};
use crate::dispatch::{CommandHandler, Session};

/// Moves objects into the player's backpack.
pub struct TakeHandler;

impl TakeHandler {
    /// Drops the particle of "pick up", which would otherwise be read as
    /// part of the first identifier.
    fn without_particle(input: &str) -> String {
        let mut words = input.split_whitespace();
        match (words.next(), words.next()) {
            (Some(verb), Some(particle)) if verb_is(verb, "pick") && particle.eq_ignore_ascii_case("up") => {
                std::iter::once(verb).chain(words).collect::<Vec<_>>().join(" ")
            }
            _ => input.to_string(),
        }
    }
}

impl CommandHandler for TakeHandler {
    fn name(&self) -> &'static str {
        "take"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["take", "pick"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let inventory = world
            .inventory_of(player)
            .ok_or_else(|| Error::internal(format!("player {player} has no backpack")))?;
        let command = CommandParser::parse(&Self::without_particle(input));

        for path in named(&command.prefix) {
            let Some(object) = NodeLocator::resolve(world, path, player) else {
                session.write(&format!("There is no \"{}\" around here.", path.target()));
                continue;
            };
            if world.is_ancestor_or_self(object, inventory) {
                session.write(&format!("You cannot take the {}.", world.identifier(object)));
                continue;
            }
            if world.move_node(object, Some(inventory))? {
                session.write("Taken.");
            } else {
                session.write(&format!("You cannot take the {}.", world.identifier(object)));
            }
        }
        Ok(())
    }
}
