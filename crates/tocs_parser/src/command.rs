//! The parsed form of one input line.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::location::LocationPath;
use crate::preposition::Preposition;

static NO_PATHS: BTreeSet<LocationPath> = BTreeSet::new();

/// A parsed input line: verb, prefix paths, and preposition-keyed argument paths.
///
/// The argument map always carries the `To` and `With` keys, possibly with
/// empty sets; `Of` never appears as a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The first word of the input, or empty for blank input.
    pub verb: String,
    /// Paths named before the first non-OF preposition.
    pub prefix: BTreeSet<LocationPath>,
    /// Paths introduced by TO and WITH prepositions.
    pub arguments: BTreeMap<Preposition, BTreeSet<LocationPath>>,
}

impl Command {
    /// Creates a command with an empty prefix and empty TO/WITH sets.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        let mut arguments = BTreeMap::new();
        arguments.insert(Preposition::To, BTreeSet::new());
        arguments.insert(Preposition::With, BTreeSet::new());
        Self {
            verb: verb.into(),
            prefix: BTreeSet::new(),
            arguments,
        }
    }

    /// Returns the paths keyed by `preposition`, or an empty set.
    #[must_use]
    pub fn argument(&self, preposition: Preposition) -> &BTreeSet<LocationPath> {
        self.arguments.get(&preposition).unwrap_or(&NO_PATHS)
    }

    /// Returns true if neither the prefix nor any argument names a path.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.prefix.is_empty() && self.arguments.values().all(BTreeSet::is_empty)
    }
}

fn write_paths(f: &mut fmt::Formatter<'_>, label: &str, set: &BTreeSet<LocationPath>) -> fmt::Result {
    if set.is_empty() {
        return Ok(());
    }
    write!(f, " {label} {{")?;
    for (i, path) in set.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "[{path}]")?;
    }
    write!(f, "}}")
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        write_paths(f, "prefix", &self.prefix)?;
        for (preposition, set) in &self.arguments {
            write_paths(f, &preposition.to_string(), set)?;
        }
        Ok(())
    }
}
