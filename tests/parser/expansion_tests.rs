//! Laws of chain expansion.

use proptest::prelude::*;
use tocs_parser::{CommandParser, LocationPath, expand_chain};

fn chain(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

#[test]
fn reversal_puts_outermost_first() {
    let paths = expand_chain(&chain(&[&["book", "chest"], &["box"], &["desk"]]));

    let expected: Vec<LocationPath> = vec![
        LocationPath::new(["desk", "box", "book"]),
        LocationPath::new(["desk", "box", "chest"]),
    ];
    assert_eq!(paths.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn alternatives_at_every_level_multiply() {
    let paths = expand_chain(&chain(&[&["pen", "ink"], &["drawer", "box"], &["desk"]]));

    assert_eq!(paths.len(), 4);
    assert!(paths.iter().all(|path| path.segments()[0] == "desk"));
    assert!(paths.contains(&LocationPath::new(["desk", "box", "ink"])));
}

#[test]
fn all_empty_chain_is_nothing() {
    assert!(expand_chain(&chain(&[&[""], &[" "]])).is_empty());
    assert!(expand_chain(&[]).is_empty());
}

#[test]
fn empty_segments_survive_next_to_named_ones() {
    let paths = expand_chain(&chain(&[&[""], &["box"]]));

    assert_eq!(paths.len(), 1);
    let path = paths.iter().next().unwrap();
    assert_eq!(path.segments(), ["box".to_string(), String::new()]);
    assert_eq!(path.target(), "");
}

fn group() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 1..4).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn every_path_spans_the_whole_chain(groups in prop::collection::vec(group(), 1..5)) {
        let paths = expand_chain(&groups);
        let expected: usize = groups.iter().map(Vec::len).product();

        prop_assert_eq!(paths.len(), expected);
        for path in &paths {
            prop_assert_eq!(path.len(), groups.len());
            for (segment, group) in path.iter().zip(groups.iter().rev()) {
                prop_assert!(group.iter().any(|alternative| alternative == segment));
            }
        }
    }

    #[test]
    fn parsing_has_no_hidden_state(words in prop::collection::vec(
        prop_oneof![
            Just("the".to_string()),
            Just("and".to_string()),
            Just("in".to_string()),
            Just("with".to_string()),
            Just("into".to_string()),
            "[a-z]{1,5}",
        ],
        0..12,
    )) {
        let line = format!("look {}", words.join(" "));
        prop_assert_eq!(CommandParser::parse(&line), CommandParser::parse(&line));
    }
}
