//! Preposition classes.

use std::fmt;

/// One of the three closed preposition classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Preposition {
    /// Chains location path segments: "the book *in* the box".
    Of,
    /// Names a destination: "put the book *into* the box".
    To,
    /// Names an instrument: "open the box *with* the knife".
    With,
}

impl Preposition {
    /// All classes.
    pub const ALL: [Preposition; 3] = [Self::Of, Self::To, Self::With];

    /// Returns the words belonging to this class. The first word names the class.
    #[must_use]
    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Self::Of => &["of", "in", "on", "from"],
            Self::To => &["to", "into", "onto", "over", "under", "at"],
            Self::With => &["with", "using"],
        }
    }

    /// Classifies a word, ignoring case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| {
            class
                .words()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(word))
        })
    }

    /// Returns true for the class that chains path segments instead of
    /// closing them.
    #[must_use]
    pub const fn is_recursive(self) -> bool {
        matches!(self, Self::Of)
    }
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.words()[0])
    }
}
