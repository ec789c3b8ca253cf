use std::time::Duration;

use config::{Config, File, FileFormat};

use crate::DEFAULT_MAX_SIZE;

use super::{Level, Style, TxSubSettings};

fn from_json(json: &str) -> eyre::Result<TxSubSettings> {
    let config = Config::builder()
        .add_source(File::from_str(json, FileFormat::Json))
        .build()?;
    TxSubSettings::from_config(config)
}

#[test]
fn test_defaults_apply_to_empty_config() {
    let settings = from_json("{}").unwrap();

    assert_eq!(settings.max_queue_size, DEFAULT_MAX_SIZE);
    assert_eq!(settings.tick_interval(), Duration::from_secs(5));
    assert_eq!(settings.tracing.level, Level::Info);
    assert_eq!(settings.tracing.fmt, Style::Full);
}

#[test]
fn test_overrides_are_read() {
    let settings = from_json(
        r#"{
            "max_queue_size": 32,
            "tick_interval_ms": 250,
            "tracing": { "fmt": "json", "level": "debug" }
        }"#,
    )
    .unwrap();

    assert_eq!(settings.max_queue_size, 32);
    assert_eq!(settings.tick_interval(), Duration::from_millis(250));
    assert_eq!(settings.tracing.level, Level::Debug);
    assert_eq!(settings.tracing.fmt, Style::Json);
    assert_eq!(settings.build_gate().max_size(), 32);
}

#[test]
fn test_unknown_level_falls_back_to_info() {
    let settings = from_json(r#"{ "tracing": { "level": "verbose" } }"#).unwrap();
    assert_eq!(settings.tracing.level, Level::Info);
}

#[test]
fn test_zero_capacity_is_rejected() {
    let err = from_json(r#"{ "max_queue_size": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("max_queue_size"));
}

#[test]
fn test_zero_tick_interval_is_rejected() {
    let err = from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("tick_interval_ms"));
}

#[test]
fn test_levels_order_by_verbosity() {
    assert!(Level::Off < Level::Error);
    assert!(Level::Warn < Level::Info);
    assert!(Level::Info < Level::Debug);
    assert!(Level::Debug < Level::Trace);
}
