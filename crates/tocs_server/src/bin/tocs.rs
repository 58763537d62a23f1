//! TOCS server entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tocs_engine::EquipmentCatalog;
use tocs_server::{ConsoleTerminal, DEFAULT_CONFIG_PATH, GameContext, Server, ServerConfig, logging, run_session};
use tocs_world::GameMap;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_path: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    debug: bool,
    console: bool,
    check: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-d" | "--debug" => config.debug = true,
            "-c" | "--console" => config.console = true,
            "--check" => config.check = true,
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.config_path.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.config_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("tocs {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let path = cli
        .config_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ServerConfig::load(&path)?;
    logging::init(&config.log_level, cli.debug)?;

    if cli.check {
        return check(&config);
    }

    let context = GameContext::load(config)?;

    if cli.console {
        let mut terminal = ConsoleTerminal::new(context.registry.keywords())?;
        run_session(&context, &mut terminal)?;
        return Ok(());
    }

    let server = Server::bind(Arc::new(context))?;
    println!("TOCS listening on {}", server.local_addr()?);
    server.serve()?;
    Ok(())
}

fn check(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (map, world) = GameMap::load(&config.map_path)?;
    println!("\x1b[1mMap\x1b[0m      {} ({} nodes)", map.name(), world.len());
    let catalog = EquipmentCatalog::load(&config.store_path)?;
    println!("\x1b[1mStore\x1b[0m    {} categories", catalog.categories().len());
    for category in catalog.categories() {
        println!("  - {} ({} items)", category.name, category.weapons.len());
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mTOCS\x1b[0m - Text-only combat server

\x1b[1mUSAGE:\x1b[0m
    tocs [OPTIONS] [CONFIG]

\x1b[1mARGUMENTS:\x1b[0m
    [CONFIG]    Configuration file (default: {DEFAULT_CONFIG_PATH})

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    -d, --debug      Log at debug level
    -c, --console    Play locally instead of serving TCP clients
    --check          Load the map and store, report, and exit

\x1b[1mEXAMPLES:\x1b[0m
    tocs                     Serve with ./{DEFAULT_CONFIG_PATH}
    tocs server.yaml         Serve with another configuration
    tocs --console           Play a local game on this terminal
    tocs --check             Validate the map and store files

\x1b[1mIN-GAME COMMANDS:\x1b[0m
    look, go, take, put, open, close, lock, unlock, inventory, reload, shoot
    Ctrl+D               Leave the game (console)"
    );
}
