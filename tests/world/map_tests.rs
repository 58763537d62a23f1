//! Loading the bundled map.

use std::path::PathBuf;

use tocs_foundation::ErrorKind;
use tocs_world::{Direction, GameMap, Team, UNBOUNDED};

fn bundled_map() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/maps/testmap.yaml")
}

#[test]
fn bundled_map_loads() {
    let (map, world) = GameMap::load(bundled_map()).unwrap();

    assert_eq!(map.name(), "Old Harbour");
    let pier = map.spawn_point(Team::Terrorists).unwrap();
    let office = map.spawn_point(Team::CounterTerrorists).unwrap();
    assert_eq!(world.identifier(pier), "pier");
    assert_eq!(world.identifier(office), "office");
    assert_eq!(world.identifier(map.bomb_point()), "warehouse");
}

#[test]
fn bundled_map_is_connected() {
    let (map, world) = GameMap::load(bundled_map()).unwrap();
    let pier = map.spawn_point(Team::Terrorists).unwrap();

    let quay = world.adjacent_room(pier, Direction::North).unwrap();
    assert_eq!(world.identifier(quay), "quay");
    assert_eq!(world.accessible_rooms(quay).len(), 3);
    assert!(world.can_access(quay, Direction::West));
}

#[test]
fn bundled_keys_fit_their_locks() {
    let (map, world) = GameMap::load(bundled_map()).unwrap();
    let office = map.spawn_point(Team::CounterTerrorists).unwrap();

    let cabinet = world.find_by_identifier(office, "cabinet", 1).unwrap();
    let cabinet = world.node(cabinet).unwrap();
    assert!(cabinet.is_locked());
    assert!(cabinet.lockable().unwrap().accepts("iron key"));
    assert!(world.find_by_identifier(office, "iron key", UNBOUNDED).is_some());
}

#[test]
fn spawning_places_the_player() {
    let (map, mut world) = GameMap::load(bundled_map()).unwrap();
    let player = world.spawn_player("neo", Team::Terrorists, 0).unwrap();

    let banner = map.spawn(&mut world, player).unwrap();
    assert!(banner.starts_with("---------- Old Harbour ----------\n\n"));
    assert!(banner.contains("A wooden pier."));
    assert_eq!(world.node(player).unwrap().parent(), map.spawn_point(Team::Terrorists));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameMap::load("no/such/map.yaml").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[test]
fn broken_yaml_is_a_map_error() {
    let err = GameMap::from_yaml("name: [unterminated").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MapLoad(_)));
}
