//! Input tokenization.
//!
//! Normalizes raw player input and classifies each word.

use crate::preposition::Preposition;

/// Articles and determiners dropped from input.
pub const FILLER_WORDS: [&str; 9] = ["the", "this", "my", "these", "those", "a", "an", "some", "one"];

/// Word separating alternatives within a group.
pub const DELIMITER: &str = "and";

/// A classified token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputToken {
    /// The first word of the input.
    Verb(String),
    /// An article or determiner.
    Filler,
    /// The word "and".
    Delimiter,
    /// A preposition of the given class.
    Preposition(Preposition),
    /// Any other word, case preserved.
    Word(String),
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Rewrites list punctuation to the delimiter word and strips sentence
    /// punctuation.
    ///
    /// - `,` becomes ` and `
    /// - `as well as` becomes `and`
    /// - `;`, `.` and `!` are removed
    #[must_use]
    pub fn normalize(input: &str) -> String {
        input
            .replace(',', " and ")
            .replace("as well as", DELIMITER)
            .replace([';', '.', '!'], "")
            .trim()
            .to_string()
    }

    /// Normalizes the input, splits it on whitespace, and classifies the words.
    ///
    /// The first word is always the verb. Filler words, the delimiter and
    /// prepositions are recognized regardless of case.
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        let normalized = Self::normalize(input);
        let mut words = normalized.split_whitespace();
        let Some(verb) = words.next() else {
            return Vec::new();
        };

        let mut tokens = vec![InputToken::Verb(verb.to_string())];
        tokens.extend(words.map(Self::classify));
        tokens
    }

    fn classify(word: &str) -> InputToken {
        if FILLER_WORDS.iter().any(|f| f.eq_ignore_ascii_case(word)) {
            InputToken::Filler
        } else if word.eq_ignore_ascii_case(DELIMITER) {
            InputToken::Delimiter
        } else if let Some(class) = Preposition::from_word(word) {
            InputToken::Preposition(class)
        } else {
            InputToken::Word(word.to_string())
        }
    }
}
