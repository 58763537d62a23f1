//! Resolving location paths for a player.

use tocs_foundation::NodeId;
use tocs_parser::{CommandParser, LocationPath, NodeLocator};
use tocs_world::{NodeSpec, Team, World};

struct Room {
    world: World,
    player: NodeId,
    box_node: NodeId,
    book: NodeId,
}

fn room() -> Room {
    let mut world = World::new();
    let root = world.root();
    let room = world
        .spawn(Some(root), NodeSpec::named("R", "A plain room.").room())
        .unwrap();
    let box_node = world
        .spawn(Some(room), NodeSpec::named("box", "A wooden box.").openable(false))
        .unwrap();
    let book = world
        .spawn(Some(box_node), NodeSpec::named("book", "A thick book."))
        .unwrap();
    let player = world.spawn_player("ann", Team::Terrorists, 0).unwrap();
    assert!(world.move_node(player, Some(room)).unwrap());
    Room {
        world,
        player,
        box_node,
        book,
    }
}

#[test]
fn container_path_reaches_the_target() {
    let r = room();

    let path = LocationPath::new(["box", "book"]);
    assert_eq!(NodeLocator::resolve(&r.world, &path, r.player), Some(r.book));
    assert_eq!(
        NodeLocator::resolve(&r.world, &LocationPath::new(["box"]), r.player),
        Some(r.box_node)
    );
}

#[test]
fn misses_name_the_target() {
    let r = room();

    let err = NodeLocator::locate(&r.world, &LocationPath::new(["box", "missing"]), r.player)
        .unwrap_err();
    assert_eq!(err.target, "missing");
}

#[test]
fn missing_container_short_circuits() {
    let r = room();

    // "book" exists, but not inside a "crate".
    let path = LocationPath::new(["crate", "book"]);
    assert_eq!(NodeLocator::resolve(&r.world, &path, r.player), None);
    assert_eq!(NodeLocator::locate(&r.world, &path, r.player).unwrap_err().target, "book");
}

#[test]
fn room_lookup_is_one_level_deep() {
    let r = room();

    assert_eq!(NodeLocator::resolve(&r.world, &LocationPath::new(["book"]), r.player), None);
}

#[test]
fn carried_items_are_found_at_any_depth() {
    let mut r = room();
    let backpack = r.world.inventory_of(r.player).unwrap();
    let pouch = r
        .world
        .spawn(Some(backpack), NodeSpec::named("pouch", "A leather pouch."))
        .unwrap();
    let coin = r
        .world
        .spawn(Some(pouch), NodeSpec::named("coin", "A silver coin."))
        .unwrap();

    assert_eq!(NodeLocator::resolve(&r.world, &LocationPath::new(["coin"]), r.player), Some(coin));
}

#[test]
fn parsed_paths_resolve_end_to_end() {
    let r = room();
    let command = CommandParser::parse("read the book in the box");

    let found: Vec<_> = command
        .prefix
        .iter()
        .filter_map(|path| NodeLocator::resolve(&r.world, path, r.player))
        .collect();
    assert_eq!(found, vec![r.book]);
}
