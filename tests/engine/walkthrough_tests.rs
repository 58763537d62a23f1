//! A full round through the bundled map with the built-in handlers.

use std::path::PathBuf;

use tocs_engine::{HandlerRegistry, NOT_UNDERSTOOD, Transcript, share};
use tocs_foundation::NodeId;
use tocs_world::{GameMap, Team, UNBOUNDED, World};

struct Round {
    world: World,
    registry: HandlerRegistry,
    transcript: Transcript,
    player: NodeId,
}

impl Round {
    fn start(team: Team) -> Self {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/maps/testmap.yaml");
        let (map, mut world) = GameMap::load(path).unwrap();
        let player = world.spawn_player("neo", team, 0).unwrap();
        map.spawn(&mut world, player).unwrap();
        Self {
            world,
            registry: HandlerRegistry::with_builtins(),
            transcript: Transcript::new(player),
            player,
        }
    }

    fn say(&mut self, input: &str) -> Vec<String> {
        self.registry.dispatch(input, &mut self.transcript, &mut self.world);
        self.transcript.take()
    }

    fn room(&self) -> &str {
        let room = self.world.node(self.player).unwrap().parent().unwrap();
        self.world.identifier(room)
    }

    fn carries(&self, identifier: &str) -> bool {
        self.world
            .find_by_identifier(self.player, identifier, UNBOUNDED)
            .is_some()
    }
}

#[test]
fn terrorist_round() {
    let mut round = Round::start(Team::Terrorists);
    assert_eq!(round.room(), "pier");

    let look = round.say("look");
    assert_eq!(look, ["A wooden pier. Waves slap against the rotten posts.\n\t\tcrate\n\t\trope"]);

    assert_eq!(round.say("take the rope and the anchor"), ["There is no \"anchor\" around here.", "Taken."]);
    assert_eq!(round.say("open the crate"), ["Opened."]);
    assert_eq!(round.say("take the net from the crate"), ["Taken."]);
    assert!(round.carries("net"));

    let inventory = round.say("inventory");
    assert_eq!(inventory.len(), 2);
    assert!(inventory[0].ends_with("\n\t\tnet"));

    let quay = round.say("go north");
    assert_eq!(round.room(), "quay");
    assert!(quay[0].starts_with("A cobbled quay"));

    assert_eq!(round.say("put the net onto the bench"), ["Done."]);
    assert_eq!(round.say("dance"), [NOT_UNDERSTOOD]);
}

#[test]
fn counter_terrorist_round() {
    let mut round = Round::start(Team::CounterTerrorists);
    assert_eq!(round.room(), "office");

    assert_eq!(round.say("open the cabinet"), ["The cabinet is locked."]);
    assert_eq!(round.say("unlock the cabinet with the key"), ["You do not have any \"key\"."]);
    assert_eq!(round.say("take the key from the drawer in the desk"), ["Taken."]);
    assert!(round.carries("iron key"));

    assert_eq!(round.say("unlock the cabinet with the key"), ["Unlocked."]);
    assert_eq!(round.say("open the cabinet"), ["Opened."]);
    assert_eq!(round.say("pick up the book from the cabinet"), ["Taken."]);
    assert!(round.carries("ledger"));

    round.say("go west");
    let warehouse = round.say("go to the storehouse");
    assert_eq!(round.room(), "warehouse");
    assert_eq!(warehouse, ["A dark warehouse stacked with shipping containers.\n\t\tcontainer"]);

    assert_eq!(round.say("put the ledger into the container"), ["Done."]);
    assert!(!round.carries("ledger"));
}

#[test]
fn blocked_and_missing_ways() {
    let mut round = Round::start(Team::Terrorists);

    assert_eq!(
        round.say("go south"),
        [
            "There's no way in this direction.",
            "A wooden pier. Waves slap against the rotten posts.\n\t\tcrate\n\t\trope",
        ]
    );
    assert_eq!(round.room(), "pier");

    let replies = round.say("walk to the moon");
    assert_eq!(replies[0], "There is no way to \"moon\".");
}

#[test]
fn shared_world_dispatch() {
    let round = Round::start(Team::Terrorists);
    let registry = round.registry;
    let mut transcript = round.transcript;
    let world = share(round.world);

    registry.dispatch_shared("open the crate", &mut transcript, &world);
    assert_eq!(transcript.last(), Some("Opened."));

    let world = world.lock().unwrap();
    let crate_node = world.find_by_identifier(world.root(), "crate", UNBOUNDED).unwrap();
    assert!(!world.node(crate_node).unwrap().is_closed());
}
