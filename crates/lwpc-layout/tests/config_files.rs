//! File-backed `LayoutConfig` loading.

use std::io::Write;

use lwpc_layout::{ConfigError, DEFAULT_MIN_FRAME_HEIGHT, LayoutConfig};

#[test]
fn toml_overrides_width_only() {
    let config = LayoutConfig::from_toml_str("min_frame_width = 0.2\n").unwrap();
    assert_eq!(config.min_frame_width, 0.2);
    assert_eq!(config.min_frame_height, DEFAULT_MIN_FRAME_HEIGHT);
}

#[test]
fn json_round_trips_through_validation() {
    let config =
        LayoutConfig::from_json_str(r#"{"min_frame_width":0.25,"min_frame_height":0.2}"#).unwrap();
    assert_eq!(
        config,
        LayoutConfig {
            min_frame_width: 0.25,
            min_frame_height: 0.2,
        }
    );
}

#[test]
fn invalid_values_are_rejected() {
    let err = LayoutConfig::from_toml_str("min_frame_height = 0.9\n").unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("min_frame_height"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn parse_errors_keep_their_source() {
    let err = LayoutConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(std::error::Error::source(&err).is_some());

    let err = LayoutConfig::from_toml_str("min_frame_width = \"wide\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "min_frame_width = 0.3").unwrap();
    writeln!(file, "min_frame_height = 0.3").unwrap();
    file.flush().unwrap();
    let config = LayoutConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.min_frame_width, 0.3);

    let path = file.path().to_path_buf();
    drop(file);
    let missing = LayoutConfig::from_toml_file(&path).unwrap_err();
    assert!(matches!(missing, ConfigError::Io(_)));
}
