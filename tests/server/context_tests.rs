//! The bundled configuration and data files.

use tocs_server::{GameContext, ServerConfig};

use crate::repo_path;

#[test]
fn bundled_config_matches_defaults() {
    let config = ServerConfig::load(repo_path("tocs.yaml")).unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn context_loads_map_and_store() {
    let config = ServerConfig {
        map_path: repo_path("data/maps/testmap.yaml"),
        store_path: repo_path("data/default_store.yaml"),
        ..ServerConfig::default()
    };

    let context = GameContext::load(config).unwrap();
    let catalog = context.catalog.as_ref().unwrap();
    let names: Vec<_> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Pistols", "SMGs", "Rifles"]);
    assert!(catalog.find("ak-47").is_some());
    assert_eq!(context.map.name(), "Old Harbour");
}

#[test]
fn missing_store_keeps_the_server_up() {
    let config = ServerConfig {
        map_path: repo_path("data/maps/testmap.yaml"),
        store_path: repo_path("data/no_such_store.yaml"),
        ..ServerConfig::default()
    };

    let context = GameContext::load(config).unwrap();
    assert!(context.catalog.is_none());
}

#[test]
fn missing_map_is_fatal() {
    let config = ServerConfig {
        map_path: repo_path("data/maps/nowhere.yaml"),
        ..ServerConfig::default()
    };

    assert!(GameContext::load(config).is_err());
}
