use tocs_foundation::{Error, Result};
use tocs_parser::{CommandParser, NodeLocator, Preposition};
use tocs_world::World;

use super::named;
use crate::dispatch::{CommandHandler, Session};

/// Lists what the player carries in the backpack and in their hands.
pub struct InventoryHandler;

impl CommandHandler for InventoryHandler {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["inventory"]
    }

    fn handle(&self, _input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let missing = || Error::internal(format!("player {player} lacks a backpack or hands"));
        let backpack = world.inventory_of(player).ok_or_else(missing)?;
        let hands = world.hands_of(player).ok_or_else(missing)?;
        session.write(&world.describe(backpack)?);
        session.write(&world.describe(hands)?);
        Ok(())
    }
}

/// Refills the magazines of the named weapons.
pub struct ReloadHandler;

impl CommandHandler for ReloadHandler {
    fn name(&self) -> &'static str {
        "reload"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["reload"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let command = CommandParser::parse(input);
        if command.prefix.is_empty() {
            session.write("What do you want to reload?");
            return Ok(());
        }

        for path in named(&command.prefix) {
            let Some(target) = NodeLocator::resolve(world, path, player) else {
                session.write(&format!("What do you mean by \"{}\"?", path.target()));
                continue;
            };
            if world.node(target)?.weapon().is_some() {
                world.reload(target)?;
                session.write("Reloaded.");
            } else {
                session.write(&format!("You cannot reload the {}.", world.identifier(target)));
            }
        }
        Ok(())
    }
}

/// Fires the weapon in the player's hands.
///
/// The target is the first path after "at", or else the first prefix path
/// that is not the weapon itself: "shoot at the crate", "fire the glock".
pub struct ShootHandler;

impl CommandHandler for ShootHandler {
    fn name(&self) -> &'static str {
        "shoot"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["shoot", "fire"]
    }

    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()> {
        let player = session.player();
        let hands = world
            .hands_of(player)
            .ok_or_else(|| Error::internal(format!("player {player} lacks hands")))?;
        let weapon = world
            .node(hands)?
            .children()
            .iter()
            .copied()
            .find(|child| world.get(*child).is_some_and(|node| node.weapon().is_some()));
        let Some(weapon) = weapon else {
            session.write("You have nothing to shoot with.");
            return Ok(());
        };

        let command = CommandParser::parse(input);
        let mut target = None;
        for path in named(command.argument(Preposition::To)).chain(named(&command.prefix)) {
            match NodeLocator::resolve(world, path, player) {
                Some(found) if found == weapon => {}
                Some(found) => {
                    target = Some(found);
                    break;
                }
                None => {
                    session.write(&format!("What do you mean by \"{}\"?", path.target()));
                    return Ok(());
                }
            }
        }

        let name = world.identifier(weapon).to_string();
        if world.node(weapon)?.weapon().is_some_and(|state| state.ammo() == 0) {
            session.write(&format!("Click. The {name} is empty."));
            return Ok(());
        }
        let damage = world.fire(weapon)?;
        match target {
            Some(target) => session.write(&format!(
                "You hit the {} with the {name} for {damage} damage.",
                world.identifier(target)
            )),
            None => session.write(&format!("Bang! The {name} dealt {damage} damage.")),
        }
        Ok(())
    }
}
