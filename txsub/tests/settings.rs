use std::env;
use std::io::Write;

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use txsub::{Level, TxSubSettings};

// Every test here mutates the process environment.
static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

const VARS: [&str; 3] = ["CONFIG_FILES", "TXSUB_MAX_QUEUE_SIZE", "TXSUB_TRACING__LEVEL"];

fn load_with(vars: &[(&str, &str)]) -> eyre::Result<TxSubSettings> {
    let _guard = ENV_LOCK.lock();
    for (key, value) in vars {
        env::set_var(key, value);
    }
    let settings = TxSubSettings::load();
    for key in VARS {
        env::remove_var(key);
    }
    settings
}

fn json_file(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{json}").unwrap();
    file
}

#[test]
fn test_load_reads_config_files() {
    let file = json_file(r#"{ "max_queue_size": 12 }"#);
    let path = file.path().to_str().unwrap();

    let settings = load_with(&[("CONFIG_FILES", path)]).unwrap();

    assert_eq!(settings.max_queue_size, 12);
}

#[test]
fn test_nested_env_override() {
    let settings = load_with(&[("TXSUB_TRACING__LEVEL", "debug")]).unwrap();

    assert_eq!(settings.tracing.level, Level::Debug);
}

#[test]
fn test_env_takes_precedence_over_config_files() {
    let file = json_file(r#"{ "max_queue_size": 12, "tick_interval_ms": 250 }"#);
    let path = file.path().to_str().unwrap();

    let settings = load_with(&[("CONFIG_FILES", path), ("TXSUB_MAX_QUEUE_SIZE", "77")]).unwrap();

    assert_eq!(settings.max_queue_size, 77);
    assert_eq!(settings.tick_interval_ms, 250);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let path = missing.to_str().unwrap();

    let err = load_with(&[("CONFIG_FILES", path)]).unwrap_err();

    assert!(err.to_string().contains("CONFIG_FILES"));
}
