use tocs_foundation::Result;
use tocs_parser::{CommandParser, Preposition};
use tocs_world::{Direction, World};
use tracing::debug;

use super::{named, room_of};
use crate::dispatch::{CommandHandler, Session};

/// Walks the player through doors.
///
/// Every prefix target is a direction, walked in turn: "go north and west".
/// Only with an empty prefix are TO targets read as names of adjacent
/// rooms: "go to the cellar". The player ends up in the last room reached,
/// which is then described.
pub struct GoHandler;

impl CommandHandler for GoHandler {
    fn name(&self) -> &'static str {
        "go"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["go", "walk", "run"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let start = room_of(world, player)?;
        let mut room = start;
        let command = CommandParser::parse(input);

        for path in named(&command.prefix) {
            let Some(direction) = Direction::from_word(path.target()) else {
                session.write(&format!("What do you mean by \"{}\"?", path.target()));
                continue;
            };
            match world.adjacent_room(room, direction) {
                Some(next) if world.can_access(room, direction) => room = next,
                Some(_) => session.write("The way is blocked."),
                None => session.write("There's no way in this direction."),
            }
        }

        if command.prefix.is_empty() {
            for path in named(command.argument(Preposition::To)) {
                let target = path.target();
                let adjacent = world.accessible_rooms(room).into_iter().find(|candidate| {
                    world
                        .get(*candidate)
                        .is_some_and(|node| node.has_name(target))
                });
                match adjacent {
                    Some(next) => room = next,
                    None => session.write(&format!("There is no way to \"{target}\".")),
                }
            }
        }

        if room != start && !world.move_node(player, Some(room))? {
            session.write("The way is blocked.");
            return Ok(());
        }
        debug!(%player, %room, "player walks");
        session.write(&world.describe(room)?);
        Ok(())
    }
}
