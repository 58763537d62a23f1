//! Command parsing.
//!
//! Words accumulate into an identifier; `and` closes the identifier into
//! the current group of alternatives; OF-class prepositions close the group
//! into the current chain; TO/WITH-class prepositions close the chain and
//! expand it into a set of location paths.

use std::collections::BTreeSet;

use crate::command::Command;
use crate::location::LocationPath;
use crate::preposition::Preposition;
use crate::tokenizer::{InputToken, InputTokenizer};

/// Expands a chain of groups, given in input order, into location paths.
///
/// The chain is reversed so the last-mentioned (outermost) group comes
/// first, then the Cartesian product across the groups yields one path per
/// combination of alternatives. Identifiers are trimmed. A chain without a
/// single non-empty identifier expands to the empty set.
///
/// ```
/// use tocs_parser::{LocationPath, expand_chain};
///
/// let chain = vec![
///     vec!["book".to_string(), "chest".to_string()],
///     vec!["box".to_string()],
///     vec!["desk".to_string()],
/// ];
/// let paths = expand_chain(&chain);
/// assert!(paths.contains(&LocationPath::new(["desk", "box", "book"])));
/// assert!(paths.contains(&LocationPath::new(["desk", "box", "chest"])));
/// assert_eq!(paths.len(), 2);
/// ```
#[must_use]
pub fn expand_chain(chain: &[Vec<String>]) -> BTreeSet<LocationPath> {
    if chain.iter().flatten().all(|identifier| identifier.trim().is_empty()) {
        return BTreeSet::new();
    }

    let mut partial: Vec<Vec<String>> = vec![Vec::new()];
    for group in chain.iter().rev() {
        partial = partial
            .iter()
            .flat_map(|prefix| {
                group.iter().map(move |alternative| {
                    let mut path = prefix.clone();
                    path.push(alternative.trim().to_string());
                    path
                })
            })
            .collect();
    }
    partial.into_iter().map(LocationPath::new).collect()
}

/// Accumulates identifiers, groups, and the chain of one phrase.
#[derive(Debug, Default)]
struct ChainBuilder {
    identifier: String,
    group: Vec<String>,
    chain: Vec<Vec<String>>,
}

impl ChainBuilder {
    fn push_word(&mut self, word: &str) {
        if !self.identifier.is_empty() {
            self.identifier.push(' ');
        }
        self.identifier.push_str(word);
    }

    fn close_identifier(&mut self) {
        let identifier = std::mem::take(&mut self.identifier);
        if !self.group.contains(&identifier) {
            self.group.push(identifier);
        }
    }

    fn close_group(&mut self) {
        self.close_identifier();
        self.chain.push(std::mem::take(&mut self.group));
    }

    fn finish(&mut self) -> BTreeSet<LocationPath> {
        self.close_group();
        expand_chain(&std::mem::take(&mut self.chain))
    }
}

/// Parses raw input lines into [`Command`]s.
pub struct CommandParser;

impl CommandParser {
    /// Parses one input line. Never fails; odd input yields empty path sets.
    ///
    /// The chain before the first TO/WITH-class preposition becomes the
    /// prefix. Each later chain closed by a TO/WITH-class preposition is
    /// added to that preposition's argument set, and the trailing chain
    /// goes to the most recently seen TO/WITH-class preposition.
    #[must_use]
    pub fn parse(input: &str) -> Command {
        let mut tokens = InputTokenizer::tokenize(input).into_iter();
        let verb = match tokens.next() {
            Some(InputToken::Verb(verb)) => verb,
            _ => String::new(),
        };

        let mut command = Command::new(verb);
        let mut chain = ChainBuilder::default();
        let mut last_preposition: Option<Preposition> = None;

        for token in tokens {
            match token {
                InputToken::Verb(_) | InputToken::Filler => {}
                InputToken::Delimiter => chain.close_identifier(),
                InputToken::Word(word) => chain.push_word(&word),
                InputToken::Preposition(class) if class.is_recursive() => chain.close_group(),
                InputToken::Preposition(class) => {
                    let paths = chain.finish();
                    if last_preposition.is_some() {
                        command.arguments.entry(class).or_default().extend(paths);
                    } else {
                        command.prefix = paths;
                    }
                    last_preposition = Some(class);
                }
            }
        }

        let paths = chain.finish();
        match last_preposition {
            Some(class) => command.arguments.entry(class).or_default().extend(paths),
            None => command.prefix = paths,
        }
        command
    }
}
