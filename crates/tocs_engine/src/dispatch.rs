//! Command dispatch.
//!
//! A [`HandlerRegistry`] owns the command handlers in registration order.
//! Each input line goes to the first handler with a keyword the line starts
//! with (ignoring case). Handler failures, whether returned or panicked, are
//! reported to the player and never end the session.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{PoisonError, RwLock};

use tocs_foundation::{NodeId, Result};
use tocs_world::World;
use tracing::{debug, error};

use crate::SharedWorld;
use crate::handlers;

/// Reply when no handler accepts the input.
pub const NOT_UNDERSTOOD: &str = "This was not understandable.";

/// Reply when the chosen handler fails.
pub const INTERNAL_ERROR: &str = "Sorry, TOCS recognized an internal error.";

/// The player's side of a command: who is acting and where replies go.
pub trait Session {
    /// The player node acting.
    fn player(&self) -> NodeId;

    /// Sends one message to the player.
    fn write(&mut self, text: &str);
}

/// A session that records every message, for consoles and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    player: NodeId,
    lines: Vec<String>,
}

impl Transcript {
    /// Creates an empty transcript for `player`.
    #[must_use]
    pub fn new(player: NodeId) -> Self {
        Self {
            player,
            lines: Vec::new(),
        }
    }

    /// Returns the recorded messages in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Removes and returns the recorded messages.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Session for Transcript {
    fn player(&self) -> NodeId {
        self.player
    }

    fn write(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// A command implementation selected by keyword.
pub trait CommandHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Keywords selecting this handler. The first one is the canonical verb.
    fn keywords(&self) -> &'static [&'static str];

    /// Executes the command for the session's player.
    ///
    /// # Errors
    ///
    /// Returns an error when the world is not in the shape the handler
    /// needs, e.g. a player without a room.
    fn handle(&self, input: &str, session: &mut dyn Session, world: &mut World) -> Result<()>;

    /// Returns true if the input starts with one of the keywords, ignoring case.
    fn is_suitable(&self, input: &str) -> bool {
        let input = input.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| input.starts_with(&keyword.to_lowercase()))
    }
}

/// What happened to a dispatched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The named handler ran to completion.
    Handled(&'static str),
    /// No handler accepted the line.
    NotUnderstood,
    /// The named handler returned an error or panicked.
    Failed(&'static str),
}

/// Ordered collection of command handlers.
pub struct HandlerRegistry {
    handlers: RwLock<Vec<Box<dyn CommandHandler>>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Creates a registry holding the built-in handlers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for handler in handlers::builtin() {
            registry.register(handler);
        }
        registry
    }

    /// Appends a handler. Earlier handlers win when keywords overlap.
    pub fn register(&self, handler: Box<dyn CommandHandler>) {
        debug!(handler = handler.name(), "registering command handler");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every keyword of every handler in registration order.
    #[must_use]
    pub fn keywords(&self) -> Vec<&'static str> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .flat_map(|handler| handler.keywords().iter().copied())
            .collect()
    }

    /// Routes `input` to the first suitable handler.
    ///
    /// Writes [`NOT_UNDERSTOOD`] when nothing matches and [`INTERNAL_ERROR`]
    /// when the handler fails.
    pub fn dispatch(&self, input: &str, session: &mut dyn Session, world: &mut World) -> DispatchOutcome {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let Some(handler) = handlers.iter().find(|handler| handler.is_suitable(input)) else {
            session.write(NOT_UNDERSTOOD);
            return DispatchOutcome::NotUnderstood;
        };

        let name = handler.name();
        debug!(handler = name, player = %session.player(), input, "dispatching");
        let result = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(input, session, world)));
        match result {
            Ok(Ok(())) => DispatchOutcome::Handled(name),
            Ok(Err(e)) => {
                error!(handler = name, input, error = %e, "command failed");
                session.write(INTERNAL_ERROR);
                DispatchOutcome::Failed(name)
            }
            Err(_) => {
                error!(handler = name, input, "command panicked");
                session.write(INTERNAL_ERROR);
                DispatchOutcome::Failed(name)
            }
        }
    }

    /// Locks the shared world for the whole dispatch of `input`.
    ///
    /// Replies are collected while the lock is held and handed to `session`
    /// once it is released.
    /// A lock poisoned by an earlier panic is taken over; the arena keeps
    /// its parent/child agreement across every public edit.
    pub fn dispatch_shared(&self, input: &str, session: &mut dyn Session, world: &SharedWorld) -> DispatchOutcome {
        let mut replies = Transcript::new(session.player());
        let outcome = {
            let mut world = world.lock().unwrap_or_else(PoisonError::into_inner);
            self.dispatch(input, &mut replies, &mut world)
        };
        for line in replies.take() {
            session.write(&line);
        }
        outcome
    }
}
