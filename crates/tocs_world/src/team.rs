//! The two opposing teams.

use std::fmt;

use serde::Deserialize;

/// Team a player fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The terrorists.
    Terrorists,
    /// The counter-terrorists.
    CounterTerrorists,
}

impl Team {
    /// Both teams.
    pub const ALL: [Team; 2] = [Self::Terrorists, Self::CounterTerrorists];

    /// Returns the shortcut used to pick this team in menus.
    #[must_use]
    pub const fn shortcut(self) -> char {
        match self {
            Self::Terrorists => 't',
            Self::CounterTerrorists => 'c',
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrorists => f.write_str("Terrorists"),
            Self::CounterTerrorists => f.write_str("Counter-Terrorists"),
        }
    }
}
