//! Compass directions linking rooms.

use std::fmt;

use serde::Deserialize;

/// Direction of a door between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// West.
    West,
    /// East.
    East,
    /// Northwest.
    Northwest,
    /// Northeast.
    Northeast,
    /// Southwest.
    Southwest,
    /// Southeast.
    Southeast,
    /// Up (stairs, ladders).
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 10] = [
        Self::North,
        Self::South,
        Self::West,
        Self::East,
        Self::Northwest,
        Self::Northeast,
        Self::Southwest,
        Self::Southeast,
        Self::Up,
        Self::Down,
    ];

    /// Returns the lowercase word for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
            Self::Northwest => "northwest",
            Self::Northeast => "northeast",
            Self::Southwest => "southwest",
            Self::Southeast => "southeast",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parses a direction word, ignoring case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
