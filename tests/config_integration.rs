//! Integration tests for configuration loading

use std::path::PathBuf;
use taskai::core::config::AppConfig;

fn example_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("taskai.example.toml")
}

#[test]
fn test_example_config_matches_defaults() {
    let loaded = AppConfig::load(&example_path()).expect("example config should load");
    let defaults = AppConfig::default();

    assert_eq!(loaded.llm.api_url, defaults.llm.api_url);
    assert_eq!(loaded.llm.model, defaults.llm.model);
    assert_eq!(loaded.llm.api_key_env, defaults.llm.api_key_env);
    assert_eq!(loaded.llm.timeout_secs, defaults.llm.timeout_secs);
    assert_eq!(loaded.snapshot.max_groups, defaults.snapshot.max_groups);
    assert_eq!(loaded.termination.graceful, defaults.termination.graceful);
}

#[test]
fn test_discover_explicit_path() {
    let config = AppConfig::discover(Some(&example_path())).unwrap();
    assert_eq!(config.snapshot.max_groups, 50);
}

#[test]
fn test_discover_missing_explicit_path_fails() {
    let missing = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("no-such-config.toml");
    assert!(AppConfig::discover(Some(&missing)).is_err());
}
