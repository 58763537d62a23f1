//! Depth-bounded searches.

use proptest::prelude::*;
use tocs_foundation::NodeId;
use tocs_world::{NodeSpec, UNBOUNDED, World};

/// Builds a chain `level0 > level1 > ... > level{n-1}` under the root, with
/// a `twin` leaf next to every level.
fn tower(levels: usize) -> (World, Vec<NodeId>) {
    let mut world = World::new();
    let mut parent = world.root();
    let mut ids = Vec::new();
    for level in 0..levels {
        let id = world
            .spawn(Some(parent), NodeSpec::named(format!("level{level}"), "A level."))
            .unwrap();
        world
            .spawn(Some(parent), NodeSpec::named("twin", format!("Twin at {level}.")))
            .unwrap();
        ids.push(id);
        parent = id;
    }
    (world, ids)
}

#[test]
fn depth_zero_compares_the_start_only() {
    let (world, ids) = tower(3);

    assert_eq!(world.find_by_identifier(ids[0], "level0", 0), Some(ids[0]));
    assert_eq!(world.find_by_identifier(ids[0], "level1", 0), None);
    assert_eq!(world.find_by_identifier(ids[0], "level1", 1), Some(ids[1]));
}

#[test]
fn unbounded_reaches_the_bottom() {
    let (world, ids) = tower(6);

    assert_eq!(world.find_by_identifier(world.root(), "level5", UNBOUNDED), Some(ids[5]));
    assert_eq!(world.find_by_identifier(world.root(), "level5", 5), None);
    assert_eq!(world.find_by_identifier(world.root(), "level5", 6), Some(ids[5]));
}

#[test]
fn first_match_in_pre_order_wins() {
    let (world, ids) = tower(3);

    // level0 comes before the top twin, and holds another twin further down.
    let twin = world.find_by_identifier(world.root(), "twin", UNBOUNDED).unwrap();
    assert_eq!(world.node(twin).unwrap().parent(), Some(ids[1]));
}

#[test]
fn predicate_search_collects_in_pre_order() {
    let (world, ids) = tower(3);

    let twins = world.find_by_predicate(world.root(), |node| node.has_name("twin"), UNBOUNDED);
    let parents: Vec<_> = twins
        .iter()
        .map(|twin| world.node(*twin).unwrap().parent().unwrap())
        .collect();
    assert_eq!(parents, vec![ids[1], ids[0], world.root()]);
}

proptest! {
    #[test]
    fn deeper_searches_keep_earlier_finds(levels in 1usize..8, target in 0usize..8, depth in 0i32..8) {
        let (world, _) = tower(levels);
        let name = format!("level{}", target % levels);
        let shallow = world.find_by_identifier(world.root(), &name, depth);
        if shallow.is_some() {
            prop_assert_eq!(world.find_by_identifier(world.root(), &name, depth + 1), shallow);
            prop_assert_eq!(world.find_by_identifier(world.root(), &name, UNBOUNDED), shallow);
        }
    }
}
