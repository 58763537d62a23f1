//! The game lobby.
//!
//! Players wait in the lobby until the game starts. The game starts when
//! every member is ready, or when the countdown started by the second
//! member runs out. Members are announced the remaining time at a
//! decreasing interval: every minute, every ten seconds below one minute,
//! and every second below ten seconds.

use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

/// Receives lobby announcements for one member.
pub trait Notifier: Send + Sync {
    /// Delivers one announcement.
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message);
    }
}

/// Identifies a lobby member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u64);

/// Returns true if `remaining` seconds should be announced.
#[must_use]
pub const fn should_announce(remaining: u32) -> bool {
    remaining % 60 == 0 || (remaining % 10 == 0 && remaining < 60) || remaining < 10
}

struct Member {
    notifier: Arc<dyn Notifier>,
    ready: bool,
}

#[derive(Default)]
struct LobbyState {
    members: BTreeMap<MemberId, Member>,
    next_id: u64,
    countdown_started: bool,
    game_running: bool,
}

/// Coordinates ready flags and the countdown of waiting players.
pub struct Lobby {
    state: Mutex<LobbyState>,
    started: Condvar,
    countdown: u32,
    tick: Duration,
}

impl Lobby {
    /// Creates a lobby whose countdown lasts `countdown` seconds.
    #[must_use]
    pub fn new(countdown: u32) -> Self {
        Self::with_tick(countdown, Duration::from_secs(1))
    }

    /// Creates a lobby whose countdown ticks every `tick` instead of every second.
    #[must_use]
    pub fn with_tick(countdown: u32, tick: Duration) -> Self {
        Self {
            state: Mutex::new(LobbyState::default()),
            started: Condvar::new(),
            countdown,
            tick,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LobbyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a member. The second member to arrive starts the countdown.
    pub fn join(self: &Arc<Self>, notifier: Arc<dyn Notifier>) -> MemberId {
        let mut state = self.lock();
        let id = MemberId(state.next_id);
        state.next_id += 1;
        state.members.insert(
            id,
            Member {
                notifier,
                ready: false,
            },
        );
        debug!(member = id.0, members = state.members.len(), "joined lobby");

        if state.members.len() == 2 && !state.countdown_started && !state.game_running {
            state.countdown_started = true;
            drop(state);
            self.start_countdown();
        }
        id
    }

    fn start_countdown(self: &Arc<Self>) {
        info!(seconds = self.countdown, "starting countdown");
        let lobby = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("countdown".to_string())
            .spawn(move || lobby.run_countdown());
        if let Err(e) = spawned {
            warn!(error = %e, "countdown thread failed to start; starting game");
            self.start_game(&mut self.lock());
        }
    }

    fn run_countdown(&self) {
        let mut remaining = self.countdown;
        while remaining > 0 {
            thread::sleep(self.tick);
            remaining -= 1;
            if self.lock().game_running {
                return;
            }
            if should_announce(remaining) {
                self.announce(&format!("Game starts in {remaining} seconds."));
            }
        }
        self.start_game(&mut self.lock());
    }

    fn announce(&self, message: &str) {
        let notifiers: Vec<_> = self
            .lock()
            .members
            .values()
            .map(|member| Arc::clone(&member.notifier))
            .collect();
        for notifier in notifiers {
            notifier.notify(message);
        }
    }

    fn start_game(&self, state: &mut LobbyState) {
        if !state.game_running {
            info!(members = state.members.len(), "game starts");
            state.game_running = true;
            self.started.notify_all();
        }
    }

    /// Marks a member ready. When every member is ready the game starts.
    pub fn mark_ready(&self, member: MemberId) {
        let mut state = self.lock();
        if let Some(entry) = state.members.get_mut(&member) {
            entry.ready = true;
        }
        if state.members.values().all(|entry| entry.ready) {
            self.start_game(&mut state);
        }
    }

    /// Blocks until the game runs, then removes the member from the lobby.
    pub fn wait_for_start(&self, member: MemberId) {
        let mut state = self
            .started
            .wait_while(self.lock(), |state| !state.game_running)
            .unwrap_or_else(PoisonError::into_inner);
        state.members.remove(&member);
    }

    /// Removes a member that left before the game started.
    pub fn leave(&self, member: MemberId) {
        let mut state = self.lock();
        state.members.remove(&member);
        if !state.members.is_empty() && state.members.values().all(|entry| entry.ready) {
            self.start_game(&mut state);
        }
    }

    /// Returns true once the game has started.
    #[must_use]
    pub fn is_game_running(&self) -> bool {
        self.lock().game_running
    }

    /// Returns the number of members still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().members.len()
    }

    /// Returns true if nobody is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
