//! One player's way through a server: nickname, team, lobby, and the game.

use std::sync::{Arc, MutexGuard, PoisonError};

use tocs_engine::{EquipmentCatalog, HandlerRegistry, Purchase, Session, SharedWorld};
use tocs_foundation::{Error, NodeId, Result};
use tocs_world::{Team, WeaponType, World};
use tracing::{debug, info, warn};

use crate::context::GameContext;
use crate::menu::{NumericalMenu, Prompt, ShortcutSelector};
use crate::skins::skins;
use crate::terminal::Terminal;

/// Greeting asking for a nickname.
pub const NICKNAME_QUESTION: &str = "Welcome to TOCS! Please enter your nickname:";

/// Question offering the teams.
pub const TEAM_QUESTION: &str = "Which team do you want to join?";

/// Title of the lobby menu.
pub const LOBBY_TITLE: &str =
    "You're in the game lobby. Here you can buy equipment and change your skin before the game starts.";

/// Title of the top-level store menu.
pub const STORE_TITLE: &str = "Which kind of equipment do you want to buy?";

/// Reply when no equipment can be bought.
pub const STORE_UNAVAILABLE: &str = "Sorry, the equipment store is currently not available.";

/// Shown once a player is ready.
pub const WAITING: &str = "Waiting for the game to start...";

/// Prompt of the command loop.
pub const PROMPT: &str = "> ";

#[derive(Debug, Clone)]
enum LobbyChoice {
    Equipment,
    Skin(&'static str),
    Ready,
}

fn lock_world(world: &SharedWorld) -> MutexGuard<'_, World> {
    world.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Adapts a [`Terminal`] to the engine's [`Session`].
///
/// `Session::write` cannot fail, so the first delivery failure is kept
/// until the command loop picks it up.
struct TerminalSession<'a> {
    player: NodeId,
    terminal: &'a mut dyn Terminal,
    failure: Option<Error>,
}

impl Session for TerminalSession<'_> {
    fn player(&self) -> NodeId {
        self.player
    }

    fn write(&mut self, text: &str) {
        if self.failure.is_none() {
            if let Err(e) = self.terminal.write(text) {
                self.failure = Some(e);
            }
        }
    }
}

/// Runs a whole session. Returns once the player leaves.
///
/// The player's node, with everything they carry, is removed from the
/// world and their team slot freed however the session ends.
///
/// # Errors
///
/// Returns `Io` if the terminal fails.
pub fn run_session(context: &GameContext, terminal: &mut dyn Terminal) -> Result<()> {
    let Some(nickname) = Prompt::new(NICKNAME_QUESTION).display(terminal)? else {
        return Ok(());
    };
    let Some(choice) = team_selector().display(terminal)? else {
        return Ok(());
    };
    let team = context.roster.join(choice);
    let player = lock_world(&context.world).spawn_player(&nickname, team, context.config.player_credit);
    let player = match player {
        Ok(player) => player,
        Err(e) => {
            context.roster.leave(team);
            return Err(e);
        }
    };
    info!(player = %nickname, %team, "player joined");

    let result = terminal
        .write(&format!("You joined the {team}."))
        .and_then(|()| play(context, terminal, player));

    if let Err(e) = lock_world(&context.world).remove(player) {
        warn!(player = %nickname, error = %e, "could not remove player");
    }
    context.roster.leave(team);
    info!(player = %nickname, "player left");
    result
}

fn team_selector() -> ShortcutSelector<Option<Team>> {
    Team::ALL
        .into_iter()
        .fold(ShortcutSelector::new(TEAM_QUESTION), |selector, team| {
            selector.option(team.shortcut(), team.to_string(), Some(team))
        })
        .option('a', "Auto-assign", None)
}

fn play(context: &GameContext, terminal: &mut dyn Terminal, player: NodeId) -> Result<()> {
    if !wait_in_lobby(context, terminal, player)? {
        return Ok(());
    }
    let banner = context.map.spawn(&mut lock_world(&context.world), player)?;
    terminal.write(&banner)?;
    command_loop(&context.registry, &context.world, terminal, player)
}

/// Keeps the player in the lobby until the game starts. Returns false if
/// the player went away first.
fn wait_in_lobby(context: &GameContext, terminal: &mut dyn Terminal, player: NodeId) -> Result<bool> {
    let lobby = &context.lobby;
    let member = lobby.join(terminal.notifier());
    let ready = lobby_menu(context, terminal, player).and_then(|ready| {
        if ready {
            terminal.write(WAITING)?;
        }
        Ok(ready)
    });
    match ready {
        Ok(true) => {
            lobby.mark_ready(member);
            lobby.wait_for_start(member);
            Ok(true)
        }
        Ok(false) => {
            lobby.leave(member);
            Ok(false)
        }
        Err(e) => {
            lobby.leave(member);
            Err(e)
        }
    }
}

fn lobby_menu(context: &GameContext, terminal: &mut dyn Terminal, player: NodeId) -> Result<bool> {
    let team = lock_world(&context.world)
        .node(player)?
        .player()
        .map(|state| state.team)
        .ok_or_else(|| Error::missing_capability(player, "a player"))?;
    let outfits = skins(team)
        .iter()
        .fold(NumericalMenu::new("Which outfit do you want to put on?"), |menu, skin| {
            menu.option(skin.label, LobbyChoice::Skin(skin.template))
        });
    let menu = NumericalMenu::new(LOBBY_TITLE)
        .option("Equipment - Buy weapons and armors", LobbyChoice::Equipment)
        .submenu("Skins - Change your look", outfits)
        .option("Ready", LobbyChoice::Ready);

    loop {
        match menu.display(terminal)? {
            None => return Ok(false),
            Some(LobbyChoice::Ready) => return Ok(true),
            Some(LobbyChoice::Skin(template)) => {
                lock_world(&context.world).set_skin(player, template)?;
                debug!(player = %player, "skin changed");
                terminal.write("Your outfit has been changed.")?;
            }
            Some(LobbyChoice::Equipment) => shop(context.catalog.as_ref(), &context.world, terminal, player)?,
        }
    }
}

/// Lets the player buy at most one weapon.
///
/// # Errors
///
/// Returns `Io` if the terminal fails.
pub fn shop(
    catalog: Option<&EquipmentCatalog>,
    world: &SharedWorld,
    terminal: &mut dyn Terminal,
    player: NodeId,
) -> Result<()> {
    let Some(catalog) = catalog.filter(|catalog| !catalog.categories().is_empty()) else {
        return terminal.write(STORE_UNAVAILABLE);
    };
    let credit = lock_world(world)
        .node(player)?
        .player()
        .map_or(0, |state| state.credit);

    let mut menu = NumericalMenu::new(format!("{STORE_TITLE} You have ${credit}."));
    for category in catalog.categories() {
        let weapons = category.weapons.iter().fold(
            NumericalMenu::new(format!("Which {} do you want to buy?", category.name)),
            |menu, weapon| menu.option(format!("{} (${})", weapon.name, weapon.price), Some(Arc::clone(weapon))),
        );
        menu = menu.submenu(category.name.clone(), weapons);
    }
    let menu = menu.option("Leave the store", None::<Arc<WeaponType>>);

    let Some(Some(weapon)) = menu.display(terminal)? else {
        return Ok(());
    };
    let outcome = EquipmentCatalog::purchase(&mut lock_world(world), player, &weapon)?;
    match outcome {
        Purchase::Bought(_) => terminal.write(&format!("You bought a {}.", weapon.name)),
        Purchase::InsufficientCredit => terminal.write(&format!("You cannot afford a {}.", weapon.name)),
    }
}

/// Reads commands and dispatches them until the player leaves.
///
/// # Errors
///
/// Returns `Io` if the terminal fails.
pub fn command_loop(
    registry: &HandlerRegistry,
    world: &SharedWorld,
    terminal: &mut dyn Terminal,
    player: NodeId,
) -> Result<()> {
    let mut session = TerminalSession {
        player,
        terminal,
        failure: None,
    };
    loop {
        let Some(line) = session.terminal.read_line(PROMPT)? else {
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let outcome = registry.dispatch_shared(line, &mut session, world);
        debug!(player = %player, input = line, ?outcome, "command");
        if let Some(e) = session.failure.take() {
            return Err(e);
        }
    }
}
