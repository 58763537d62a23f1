//! Playing over a real TCP connection.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tocs_server::connection::MAX_FRAME;
use tocs_server::{GameContext, SEPARATOR, Server, ServerConfig};
use tocs_world::{GameMap, Team};

use crate::{quick_context, repo_path};

fn frames(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|b| *b == SEPARATOR)
        .filter(|frame| !frame.is_empty())
        .map(|frame| String::from_utf8_lossy(frame).into_owned())
        .collect()
}

#[test]
fn plays_a_session_over_tcp() {
    let server = Server::bind_to(Arc::new(quick_context()), "127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();

    let mut client = TcpStream::connect(addr).unwrap();
    let session = server.accept_one().unwrap();

    for line in ["neo", "t", "3", "look", "take the rope"] {
        client.write_all(line.as_bytes()).unwrap();
        client.write_all(&[SEPARATOR]).unwrap();
    }
    client.shutdown(Shutdown::Write).unwrap();

    let mut received = Vec::new();
    client.read_to_end(&mut received).unwrap();
    session.join().unwrap();

    let frames = frames(&received);
    assert_eq!(frames[0], "Welcome to TOCS! Please enter your nickname:");
    assert!(frames.iter().any(|f| f.starts_with("---------- Old Harbour ----------")));
    assert!(frames.iter().any(|f| f == "> "));
    assert_eq!(frames.last().map(String::as_str), Some("> "));
    assert!(frames.iter().any(|f| f == "Taken."));
}

fn context_with(config: ServerConfig) -> GameContext {
    let (map, world) = GameMap::load(repo_path("data/maps/testmap.yaml")).unwrap();
    GameContext::new(config, map, world, None)
}

#[test]
fn idle_players_are_disconnected() {
    let config = ServerConfig {
        idle_timeout_secs: 1,
        ..ServerConfig::default()
    };
    let server = Server::bind_to(Arc::new(context_with(config)), "127.0.0.1:0").unwrap();
    let mut client = TcpStream::connect(server.local_addr().unwrap()).unwrap();
    let session = server.accept_one().unwrap();

    let started = Instant::now();
    let mut received = Vec::new();
    client.read_to_end(&mut received).unwrap();
    session.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(30));
    assert_eq!(
        frames(&received).first().map(String::as_str),
        Some("Welcome to TOCS! Please enter your nickname:")
    );
}

#[test]
fn oversized_messages_end_the_session() {
    let context = Arc::new(context_with(ServerConfig::default()));
    let server = Server::bind_to(Arc::clone(&context), "127.0.0.1:0").unwrap();
    let mut client = TcpStream::connect(server.local_addr().unwrap()).unwrap();
    let session = server.accept_one().unwrap();

    client.write_all(&vec![b'x'; MAX_FRAME * 2]).unwrap();
    session.join().unwrap();

    assert_eq!(context.roster.count(Team::Terrorists), 0);
    assert_eq!(context.roster.count(Team::CounterTerrorists), 0);
}
