//! Literal input lines and the commands they parse into.

use std::collections::BTreeSet;

use tocs_parser::{Command, CommandParser, LocationPath, Preposition};

fn paths(list: &[&[&str]]) -> BTreeSet<LocationPath> {
    list.iter().map(|segments| LocationPath::new(segments.iter().copied())).collect()
}

fn assert_no_arguments(command: &Command) {
    assert!(command.argument(Preposition::To).is_empty());
    assert!(command.argument(Preposition::With).is_empty());
}

#[test]
fn single_object() {
    let command = CommandParser::parse("open book");

    assert_eq!(command.verb, "open");
    assert_eq!(command.prefix, paths(&[&["book"]]));
    assert_no_arguments(&command);
}

#[test]
fn two_objects_joined_by_and() {
    let command = CommandParser::parse("open the book and the box");

    assert_eq!(command.verb, "open");
    assert_eq!(command.prefix, paths(&[&["book"], &["box"]]));
    assert_no_arguments(&command);
}

#[test]
fn container_and_instrument() {
    let command = CommandParser::parse("open the book in the box with the knife");

    assert_eq!(command.verb, "open");
    assert_eq!(command.prefix, paths(&[&["box", "book"]]));
    assert_eq!(command.argument(Preposition::With), &paths(&[&["knife"]]));
    assert!(command.argument(Preposition::To).is_empty());
}

#[test]
fn shared_container_chain() {
    let command = CommandParser::parse("open the book and the chest in the box on the desk");

    assert_eq!(command.verb, "open");
    assert_eq!(
        command.prefix,
        paths(&[&["desk", "box", "book"], &["desk", "box", "chest"]])
    );
    assert_no_arguments(&command);
}

#[test]
fn commas_and_as_well_as_separate_objects() {
    let command = CommandParser::parse("take the key, the letter as well as the coin.");

    assert_eq!(command.verb, "take");
    assert_eq!(command.prefix, paths(&[&["coin"], &["key"], &["letter"]]));
}

#[test]
fn destination_chain() {
    let command = CommandParser::parse("put the coin into the drawer of the desk");

    assert_eq!(command.prefix, paths(&[&["coin"]]));
    assert_eq!(command.argument(Preposition::To), &paths(&[&["desk", "drawer"]]));
}

#[test]
fn multi_word_identifiers() {
    let command = CommandParser::parse("unlock the iron door with the brass key");

    assert_eq!(command.prefix, paths(&[&["iron door"]]));
    assert_eq!(command.argument(Preposition::With), &paths(&[&["brass key"]]));
}

#[test]
fn verb_alone() {
    let command = CommandParser::parse("inventory");

    assert_eq!(command.verb, "inventory");
    assert!(command.is_bare());
}

#[test]
fn blank_input_never_fails() {
    for input in ["", "   ", "!!!", "the the the", "with", "in on of"] {
        let command = CommandParser::parse(input);
        assert!(command.prefix.is_empty(), "{input:?} gave {command}");
    }
}

#[test]
fn parsing_is_repeatable() {
    let input = "put the book and the pen in the box onto the shelf using a ladder";
    assert_eq!(CommandParser::parse(input), CommandParser::parse(input));
}
