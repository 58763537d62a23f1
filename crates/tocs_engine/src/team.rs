//! Team sizes and automatic assignment.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tocs_world::Team;

/// Counts the players of each team.
#[derive(Debug, Default)]
pub struct TeamRoster {
    counts: Mutex<BTreeMap<Team, usize>>,
}

impl TeamRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<Team, usize>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of players in `team`.
    #[must_use]
    pub fn count(&self, team: Team) -> usize {
        self.lock().get(&team).copied().unwrap_or(0)
    }

    /// Returns the team an automatic pick would join: the terrorists when
    /// they are strictly fewer, otherwise the counter-terrorists.
    #[must_use]
    pub fn auto_team(&self) -> Team {
        Self::smaller(&self.lock())
    }

    fn smaller(counts: &BTreeMap<Team, usize>) -> Team {
        let count = |team: Team| counts.get(&team).copied().unwrap_or(0);
        if count(Team::Terrorists) < count(Team::CounterTerrorists) {
            Team::Terrorists
        } else {
            Team::CounterTerrorists
        }
    }

    /// Adds a player to `choice`, or to the smaller team when `None`.
    /// Returns the team joined.
    pub fn join(&self, choice: Option<Team>) -> Team {
        let mut counts = self.lock();
        let team = choice.unwrap_or_else(|| Self::smaller(&counts));
        *counts.entry(team).or_default() += 1;
        team
    }

    /// Removes a player from `team`.
    pub fn leave(&self, team: Team) {
        if let Some(count) = self.lock().get_mut(&team) {
            *count = count.saturating_sub(1);
        }
    }
}
