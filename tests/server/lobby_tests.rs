//! Players meeting in the lobby.

use std::sync::Arc;
use std::thread;

use tocs_server::{ScriptedTerminal, run_session};
use tocs_world::Team;

use crate::quick_context;

#[test]
fn two_players_start_together() {
    let context = Arc::new(quick_context());

    let players: Vec<_> = [("ann", "t"), ("bob", "c")]
        .into_iter()
        .map(|(name, team)| {
            let context = Arc::clone(&context);
            thread::spawn(move || {
                let mut terminal = ScriptedTerminal::new([name, team, "3", "look"]);
                run_session(&context, &mut terminal).unwrap();
                terminal
            })
        })
        .collect();

    for player in players {
        let terminal = player.join().unwrap();
        assert!(terminal.saw("---------- Old Harbour ----------"));
    }
    assert!(context.lobby.is_game_running());
    assert!(context.lobby.is_empty());
    assert_eq!(context.roster.count(Team::Terrorists), 0);
    assert_eq!(context.roster.count(Team::CounterTerrorists), 0);
}

#[test]
fn auto_assignment_balances_teams() {
    let context = quick_context();
    context.roster.join(Some(Team::Terrorists));

    let mut terminal = ScriptedTerminal::new(["neo", "a"]);
    run_session(&context, &mut terminal).unwrap();

    assert!(terminal.saw("You joined the Counter-Terrorists."));
    assert_eq!(context.roster.count(Team::Terrorists), 1);
    assert_eq!(context.roster.count(Team::CounterTerrorists), 0);
}

#[test]
fn buying_spends_credit() {
    let context = quick_context();
    // Pistols > Desert Eagle, then Rifles > M4A1, which is too expensive.
    let mut terminal = ScriptedTerminal::new([
        "neo", "t", "1", "1", "2", "1", "3", "3", "3", "inventory",
    ]);
    run_session(&context, &mut terminal).unwrap();

    assert!(terminal.saw("You bought a Desert Eagle."));
    assert!(terminal.saw("You have $350."));
    assert!(terminal.saw("You cannot afford a M4A1."));
    assert!(terminal.saw("\t\tDesert Eagle"));
}
