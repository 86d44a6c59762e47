//! Tests for StreamConfig defaults, validation and parsing.

use std::time::Duration;

use crate::config::{ConfigError, InputConfig, StreamConfig};

#[test]
fn defaults_match_console_settings() {
    let cfg = StreamConfig::default();
    assert_eq!(cfg.buffer_capacity, 1024);
    assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    assert_eq!(cfg.log_filter, "warn");
    assert_eq!(cfg.input.kind, "stdin");
    assert!(cfg.validate().is_ok());
}

#[test]
fn validate_rejects_unusable_values() {
    let err = StreamConfig::new().with_buffer_capacity(1).validate().unwrap_err();
    assert!(matches!(err, ConfigError::BufferTooSmall(1)));

    let err = StreamConfig::new()
        .with_poll_interval(Duration::ZERO)
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroPollInterval));

    let err = StreamConfig::new()
        .with_input(InputConfig {
            kind: "file".into(),
            path: None,
        })
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingPath));

    let err = StreamConfig::new()
        .with_input(InputConfig {
            kind: "socket".into(),
            path: None,
        })
        .validate()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown input kind 'socket' (expected 'stdin' or 'file')"
    );
}

#[test]
fn deserialize_fills_missing_fields_with_defaults() {
    let cfg: StreamConfig = serde_json::from_str(r#"{"poll_interval_ms": 250}"#).unwrap();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
    assert_eq!(cfg.buffer_capacity, 1024);
    assert_eq!(cfg.input, InputConfig::default());

    let cfg: StreamConfig = serde_json::from_str(
        r#"{"buffer_capacity": 64, "input": {"kind": "file", "path": "cmds.txt"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.buffer_capacity, 64);
    assert_eq!(cfg.input.path.as_deref(), Some("cmds.txt"));
}

#[cfg(feature = "json")]
#[test]
fn from_json_str_validates() {
    let err = StreamConfig::from_json_str(r#"{"buffer_capacity": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::BufferTooSmall(0)));

    let err = StreamConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[cfg(feature = "yaml")]
#[test]
fn from_yaml_str_parses() {
    let yaml = r#"
buffer_capacity: 256
poll_interval_ms: 100
log_filter: "lineio=debug"
"#;
    let cfg = StreamConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.buffer_capacity, 256);
    assert_eq!(cfg.log_filter, "lineio=debug");
}

#[cfg(feature = "toml")]
#[test]
fn from_toml_str_parses() {
    let toml = r#"
poll_interval_ms = 500

[input]
kind = "file"
path = "session.txt"
"#;
    let cfg = StreamConfig::from_toml_str(toml).unwrap();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(500));
    assert_eq!(cfg.input.kind, "file");
}
