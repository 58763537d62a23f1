//! Moving nodes, containers, and locks.

use tocs_foundation::ErrorKind;
use tocs_world::{Direction, NodeSpec, Team, World};

#[test]
fn move_reparents_both_sides() {
    let mut world = World::new();
    let root = world.root();
    let shelf = world.spawn(Some(root), NodeSpec::named("shelf", "A shelf.")).unwrap();
    let table = world.spawn(Some(root), NodeSpec::named("table", "A table.")).unwrap();
    let cup = world.spawn(Some(shelf), NodeSpec::named("cup", "A cup.")).unwrap();

    assert!(world.move_node(cup, Some(table)).unwrap());
    assert!(world.node(shelf).unwrap().children().is_empty());
    assert_eq!(world.node(table).unwrap().children(), &[cup]);
    assert_eq!(world.node(cup).unwrap().parent(), Some(table));
}

#[test]
fn move_to_nowhere_changes_nothing() {
    let mut world = World::new();
    let root = world.root();
    let cup = world.spawn(Some(root), NodeSpec::named("cup", "A cup.")).unwrap();

    assert!(!world.move_node(cup, None).unwrap());
    assert_eq!(world.node(cup).unwrap().parent(), Some(root));
}

#[test]
fn closed_containers_refuse_and_keep_the_node_in_place() {
    let mut world = World::new();
    let root = world.root();
    let jar = world
        .spawn(Some(root), NodeSpec::named("jar", "A jar.").openable(true))
        .unwrap();
    let bean = world.spawn(Some(root), NodeSpec::named("bean", "A bean.")).unwrap();

    assert!(!world.move_node(bean, Some(jar)).unwrap());
    assert_eq!(world.node(bean).unwrap().parent(), Some(root));

    assert!(world.open(jar).unwrap());
    assert!(world.move_node(bean, Some(jar)).unwrap());
    assert_eq!(world.node(bean).unwrap().parent(), Some(jar));
}

#[test]
fn nodes_cannot_enter_their_own_subtree() {
    let mut world = World::new();
    let root = world.root();
    let outer = world.spawn(Some(root), NodeSpec::named("outer", "Outer box.")).unwrap();
    let inner = world.spawn(Some(outer), NodeSpec::named("inner", "Inner box.")).unwrap();

    let err = world.move_node(outer, Some(inner)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicMove { .. }));
    assert_eq!(world.node(inner).unwrap().parent(), Some(outer));
}

#[test]
fn locks_need_a_fitting_key() {
    let mut world = World::new();
    let root = world.root();
    let safe = world
        .spawn(
            Some(root),
            NodeSpec::named("safe", "A wall safe.")
                .lockable(true, true)
                .with_key("silver key"),
        )
        .unwrap();

    assert!(!world.open(safe).unwrap());
    assert!(!world.unlock(safe, "brass key").unwrap());
    assert!(world.node(safe).unwrap().is_locked());
    assert!(world.unlock(safe, "silver key").unwrap());
    assert!(world.open(safe).unwrap());
    assert!(!world.node(safe).unwrap().is_closed());
}

#[test]
fn locked_rooms_block_their_doors() {
    let mut world = World::new();
    let root = world.root();
    let hall = world.spawn(Some(root), NodeSpec::named("hall", "A hall.").room()).unwrap();
    let vault = world
        .spawn(
            Some(root),
            NodeSpec::named("vault", "A vault.").room().lockable(false, true).with_key("code"),
        )
        .unwrap();
    world.link_rooms(hall, Direction::East, vault).unwrap();

    assert_eq!(world.adjacent_room(hall, Direction::East), Some(vault));
    assert!(!world.can_access(hall, Direction::East));
    assert!(world.accessible_rooms(hall).is_empty());

    assert!(world.unlock(vault, "code").unwrap());
    assert_eq!(world.accessible_rooms(hall), vec![vault]);
}

#[test]
fn players_only_enter_rooms() {
    let mut world = World::new();
    let root = world.root();
    let hall = world.spawn(Some(root), NodeSpec::named("hall", "A hall.").room()).unwrap();
    let crate_node = world.spawn(Some(hall), NodeSpec::named("crate", "A crate.")).unwrap();
    let player = world.spawn_player("ann", Team::CounterTerrorists, 100).unwrap();

    assert!(!world.move_node(player, Some(crate_node)).unwrap());
    assert!(world.move_node(player, Some(hall)).unwrap());
    assert!(world.inventory_of(player).is_some());
    assert!(world.hands_of(player).is_some());
}

#[test]
fn descriptions_list_visible_children() {
    let mut world = World::new();
    let root = world.root();
    let hall = world.spawn(Some(root), NodeSpec::named("hall", "A long hall.").room()).unwrap();
    world.spawn(Some(hall), NodeSpec::named("bench", "A bench.")).unwrap();
    world
        .spawn(Some(hall), NodeSpec::named("mouse", "A mouse.").hidden())
        .unwrap();
    world.spawn(Some(hall), NodeSpec::named("lamp", "A lamp.")).unwrap();

    assert_eq!(world.describe(hall).unwrap(), "A long hall.\n\t\tbench\n\t\tlamp");
}

#[test]
fn nameless_or_undescribed_nodes_are_rejected() {
    let mut world = World::new();

    let err = world.spawn(None, NodeSpec::named("ghost", "  ")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNode(_)));
    assert!(world.spawn(None, NodeSpec::named("", "Nothing.")).is_err());
}
