use tocs_foundation::Result;
use tocs_parser::{CommandParser, NodeLocator, Preposition};
use tocs_world::World;

use super::{named, room_of};
use crate::dispatch::{CommandHandler, Session};

/// Inputs that describe the player's surroundings.
const LOOK_AROUND: [&str; 3] = ["look", "look around", "describe"];

/// Describes the room, or the objects named in the prefix and TO paths.
///
/// "describe the bear" names its objects in the prefix, "look at the bear"
/// after a TO preposition; both are honoured.
pub struct DescribeHandler;

impl CommandHandler for DescribeHandler {
    fn name(&self) -> &'static str {
        "describe"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["describe", "examine", "inspect", "look", "read"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let trimmed = input.trim();
        if LOOK_AROUND.iter().any(|form| form.eq_ignore_ascii_case(trimmed)) {
            let room = room_of(world, player)?;
            session.write(&world.describe(room)?);
            return Ok(());
        }

        let command = CommandParser::parse(input);
        let paths = command.prefix.iter().chain(command.argument(Preposition::To));
        for path in named(paths) {
            match NodeLocator::resolve(world, path, player) {
                Some(target) => session.write(&world.describe(target)?),
                None => session.write(&format!("What do you mean by \"{}\"?", path.target())),
            }
        }
        Ok(())
    }
}
