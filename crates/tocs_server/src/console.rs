//! A local terminal on stdin/stdout, for playing without a network client.

use std::io::{self, Write};
use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter};
use tocs_engine::Notifier;
use tocs_foundation::{Error, ErrorKind, Result};

use crate::terminal::Terminal;

/// Completes command keywords at the start of a line.
struct KeywordCompleter {
    keywords: Vec<&'static str>,
}

impl Completer for KeywordCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = line[..pos].to_lowercase();
        let candidates = self
            .keywords
            .iter()
            .filter(|keyword| keyword.starts_with(&typed))
            .map(|keyword| Pair {
                display: (*keyword).to_string(),
                replacement: (*keyword).to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

#[derive(Helper, Completer, Hinter)]
struct ConsoleHelper {
    #[rustyline(Completer)]
    completer: KeywordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

struct Stdout;

impl Notifier for Stdout {
    fn notify(&self, message: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout leaves nobody to tell.
        let _ = writeln!(out, "{message}");
    }
}

/// A terminal reading with rustyline and writing to stdout.
pub struct ConsoleTerminal {
    editor: Editor<ConsoleHelper, DefaultHistory>,
}

impl ConsoleTerminal {
    /// Creates a console completing `keywords`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the terminal cannot be set up.
    pub fn new(keywords: Vec<&'static str>) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(true)
            .max_history_size(500)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();
        let mut editor =
            Editor::with_config(config).map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(ConsoleHelper {
            completer: KeywordCompleter { keywords },
            hinter: HistoryHinter::new(),
        }));
        Ok(Self { editor })
    }
}

impl Terminal for ConsoleTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(Stdout)
    }
}
