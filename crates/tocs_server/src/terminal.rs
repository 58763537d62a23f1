//! The player's end of a session.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tocs_engine::Notifier;
use tocs_foundation::Result;

/// A line-oriented channel to one player.
pub trait Terminal {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the message cannot be delivered.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Shows `prompt` (if not empty) and reads one line. Returns `None` once
    /// the player has gone.
    ///
    /// # Errors
    ///
    /// Returns `Io` if reading fails.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Returns a handle other threads can use to message the player.
    fn notifier(&self) -> Arc<dyn Notifier>;
}

/// A terminal fed from a fixed list of lines, recording all output.
///
/// Output written through the terminal and through its notifiers lands in
/// the same log.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    output: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTerminal {
    /// Creates a terminal that will answer reads with `lines`, then end.
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Arc::default(),
        }
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if some message contains `needle`.
    #[must_use]
    pub fn saw(&self, needle: &str) -> bool {
        self.output().iter().any(|line| line.contains(needle))
    }
}

struct SharedLog(Arc<Mutex<Vec<String>>>);

impl Notifier for SharedLog {
    fn notify(&self, message: &str) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

impl Terminal for ScriptedTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        SharedLog(Arc::clone(&self.output)).notify(text);
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !prompt.is_empty() {
            self.write(prompt)?;
        }
        Ok(self.input.pop_front())
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(SharedLog(Arc::clone(&self.output)))
    }
}
