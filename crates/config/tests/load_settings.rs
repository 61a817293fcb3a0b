//! Integration tests for layered settings loading

use std::fs;

use voice_bill_config::{load_settings_from, MenuPreset, RuntimeEnvironment};

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(dir.path().to_str().unwrap(), None).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.menu.preset, MenuPreset::Restaurant);
    assert_eq!(settings.parser.qualifier_window_chars, 14);
}

#[test]
fn test_env_file_overrides_default_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.yaml"),
        "server:\n  port: 9000\nparser:\n  quantity_lookahead_chars: 12\n  extra_number_words:\n    rendey: 2\nmenu:\n  preset: shop\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("staging.yaml"),
        "environment: staging\nserver:\n  port: 9100\n",
    )
    .unwrap();

    let settings = load_settings_from(dir.path().to_str().unwrap(), Some("staging")).unwrap();

    assert_eq!(settings.environment, RuntimeEnvironment::Staging);
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.parser.quantity_lookahead_chars, 12);
    assert_eq!(settings.parser.extra_number_words.get("rendey"), Some(&2));
    assert_eq!(settings.menu.preset, MenuPreset::Shop);
}

#[test]
fn test_invalid_window_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.yaml"),
        "parser:\n  qualifier_window_chars: 0\n",
    )
    .unwrap();

    assert!(load_settings_from(dir.path().to_str().unwrap(), None).is_err());
}
