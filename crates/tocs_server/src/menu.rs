//! Text menus shown over a [`Terminal`].
//!
//! Every menu re-asks until it gets a usable answer. When the player goes
//! away mid-menu, `display` returns `Ok(None)`.

use tocs_foundation::Result;

use crate::terminal::Terminal;

/// Asks for a free-text, non-empty answer.
#[derive(Debug, Clone)]
pub struct Prompt {
    question: String,
}

impl Prompt {
    /// Reply to an empty answer.
    pub const EMPTY_ANSWER: &'static str = "Enter a value!";

    /// Creates a prompt asking `question`.
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    /// Asks until a non-empty answer arrives, returned trimmed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the terminal fails.
    pub fn display(&self, terminal: &mut dyn Terminal) -> Result<Option<String>> {
        terminal.write(&self.question)?;
        loop {
            let Some(line) = terminal.read_line("")? else {
                return Ok(None);
            };
            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
            terminal.write(Self::EMPTY_ANSWER)?;
        }
    }
}

/// Offers options selected by a one-letter shortcut.
#[derive(Debug, Clone)]
pub struct ShortcutSelector<T> {
    question: String,
    options: Vec<(char, String, T)>,
}

impl<T: Clone> ShortcutSelector<T> {
    /// Reply to an answer matching no shortcut.
    pub const UNKNOWN_SHORTCUT: &'static str = "Enter one of the shortcuts!";

    /// Creates a selector asking `question`.
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Adds an option. Shortcuts match regardless of case.
    #[must_use]
    pub fn option(mut self, shortcut: char, label: impl Into<String>, value: T) -> Self {
        self.options.push((shortcut.to_ascii_lowercase(), label.into(), value));
        self
    }

    fn render(&self) -> String {
        let mut text = self.question.clone();
        for (shortcut, label, _) in &self.options {
            text.push_str(&format!("\n  [{shortcut}] {label}"));
        }
        text
    }

    /// Asks until the first character of an answer is a known shortcut.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the terminal fails.
    pub fn display(&self, terminal: &mut dyn Terminal) -> Result<Option<T>> {
        terminal.write(&self.render())?;
        loop {
            let Some(line) = terminal.read_line("")? else {
                return Ok(None);
            };
            let pick = line.trim().chars().next().map(|c| c.to_ascii_lowercase());
            let chosen = self
                .options
                .iter()
                .find(|(shortcut, _, _)| Some(*shortcut) == pick);
            match chosen {
                Some((_, _, value)) => return Ok(Some(value.clone())),
                None => terminal.write(Self::UNKNOWN_SHORTCUT)?,
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Value(T),
    Submenu(NumericalMenu<T>),
}

enum Selection<T> {
    Chosen(T),
    Back,
    Closed,
}

/// Offers numbered options, possibly leading to nested menus.
///
/// Nested menus show an extra `0) back` option returning to their parent.
#[derive(Debug, Clone)]
pub struct NumericalMenu<T> {
    title: String,
    entries: Vec<(String, Entry<T>)>,
}

impl<T: Clone> NumericalMenu<T> {
    /// Reply to an answer that is not an offered number.
    pub const INVALID_NUMBER: &'static str = "Enter a valid number!";

    /// Creates an empty menu headed by `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an option selecting `value`.
    #[must_use]
    pub fn option(mut self, label: impl Into<String>, value: T) -> Self {
        self.entries.push((label.into(), Entry::Value(value)));
        self
    }

    /// Adds an option opening `menu`.
    #[must_use]
    pub fn submenu(mut self, label: impl Into<String>, menu: NumericalMenu<T>) -> Self {
        self.entries.push((label.into(), Entry::Submenu(menu)));
        self
    }

    /// Returns the number of options, not counting `back`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the menu offers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn render(&self, nested: bool) -> String {
        let mut text = self.title.clone();
        for (i, (label, _)) in self.entries.iter().enumerate() {
            text.push_str(&format!("\n  {}) {label}", i + 1));
        }
        if nested {
            text.push_str("\n  0) back");
        }
        text
    }

    fn run(&self, terminal: &mut dyn Terminal, nested: bool) -> Result<Selection<T>> {
        loop {
            terminal.write(&self.render(nested))?;
            loop {
                let Some(line) = terminal.read_line("")? else {
                    return Ok(Selection::Closed);
                };
                let answer = line.trim();
                if nested && (answer == "0" || answer.eq_ignore_ascii_case("back")) {
                    return Ok(Selection::Back);
                }
                let index = answer
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=self.entries.len()).contains(n));
                let Some(index) = index else {
                    terminal.write(Self::INVALID_NUMBER)?;
                    continue;
                };
                match &self.entries[index - 1].1 {
                    Entry::Value(value) => return Ok(Selection::Chosen(value.clone())),
                    Entry::Submenu(menu) => match menu.run(terminal, true)? {
                        Selection::Back => break,
                        other => return Ok(other),
                    },
                }
            }
        }
    }

    /// Shows the menu until a value is chosen.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the terminal fails.
    pub fn display(&self, terminal: &mut dyn Terminal) -> Result<Option<T>> {
        match self.run(terminal, false)? {
            Selection::Chosen(value) => Ok(Some(value)),
            Selection::Back | Selection::Closed => Ok(None),
        }
    }
}
