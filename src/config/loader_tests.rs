//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_ends_with_tmv_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("tmv") && path_str.ends_with("config.toml"),
            "Path should contain 'tmv' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("tmv_test_config.toml");
    let toml_content = r#"
popup_delay_ms = 250
dim_opacity = 0.5
show_labels = false
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.popup_delay_ms, Some(250));
    assert_eq!(config.dim_opacity, Some(0.5));
    assert_eq!(config.show_labels, Some(false));
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("tmv_test_invalid.toml");
    fs::write(&config_path, "popup_delay_ms = = 3").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should return ParseError, got: {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("tmv_test_unknown.toml");
    fs::write(&config_path, "theme = \"dark\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

// ===== merge_config =====

#[test]
fn merge_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn default_popup_delay_is_500ms() {
    assert_eq!(ResolvedConfig::default().popup_delay_ms, 500);
    assert_eq!(ResolvedConfig::default().dim_opacity, 0.7);
}

#[test]
fn merge_clamps_negative_popup_delay() {
    let config = ConfigFile {
        popup_delay_ms: Some(-40),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(config)).popup_delay_ms, 0);
}

#[test]
fn merge_clamps_dim_opacity_into_unit_range() {
    let high = ConfigFile {
        dim_opacity: Some(3.0),
        ..ConfigFile::default()
    };
    let nan = ConfigFile {
        dim_opacity: Some(f64::NAN),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(high)).dim_opacity, 1.0);
    assert_eq!(merge_config(Some(nan)).dim_opacity, DEFAULT_DIM_OPACITY);
}

#[test]
fn merge_keeps_defaults_for_unset_fields() {
    let config = ConfigFile {
        show_labels: Some(false),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(config));
    assert!(!resolved.show_labels);
    assert_eq!(resolved.popup_delay_ms, DEFAULT_POPUP_DELAY_MS);
}

// ===== Precedence =====

#[test]
#[serial(tmv_env)]
fn explicit_path_wins_over_env_var() {
    let explicit = env::temp_dir().join("tmv_test_explicit.toml");
    let from_env = env::temp_dir().join("tmv_test_env.toml");
    fs::write(&explicit, "popup_delay_ms = 1\n").expect("Failed to write test config");
    fs::write(&from_env, "popup_delay_ms = 2\n").expect("Failed to write test config");
    env::set_var("TMV_CONFIG", &from_env);

    let loaded = load_config_with_precedence(Some(explicit.clone())).unwrap();

    env::remove_var("TMV_CONFIG");
    assert_eq!(loaded.and_then(|c| c.popup_delay_ms), Some(1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tmv_env)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = env::temp_dir().join("tmv_test_env_only.toml");
    fs::write(&from_env, "popup_delay_ms = 2\n").expect("Failed to write test config");
    env::set_var("TMV_CONFIG", &from_env);

    let loaded = load_config_with_precedence(None).unwrap();

    env::remove_var("TMV_CONFIG");
    assert_eq!(loaded.and_then(|c| c.popup_delay_ms), Some(2));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tmv_env)]
fn env_override_sets_popup_delay() {
    env::set_var("TMV_POPUP_DELAY_MS", "120");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TMV_POPUP_DELAY_MS");

    assert_eq!(config.popup_delay_ms, 120);
}

#[test]
#[serial(tmv_env)]
fn env_override_clamps_negative_delay() {
    env::set_var("TMV_POPUP_DELAY_MS", "-5");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TMV_POPUP_DELAY_MS");

    assert_eq!(config.popup_delay_ms, 0);
}

#[test]
#[serial(tmv_env)]
fn env_override_ignores_garbage() {
    env::set_var("TMV_POPUP_DELAY_MS", "soon");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TMV_POPUP_DELAY_MS");

    assert_eq!(config.popup_delay_ms, DEFAULT_POPUP_DELAY_MS);
}

// ===== CLI overrides =====

#[test]
fn cli_override_replaces_delay() {
    let config = apply_cli_overrides(ResolvedConfig::default(), Some(75), false);
    assert_eq!(config.popup_delay_ms, 75);
    assert!(config.show_labels);
}

#[test]
fn cli_without_flags_changes_nothing() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, false), base);
}

#[test]
fn cli_no_labels_disables_labels() {
    let config = apply_cli_overrides(ResolvedConfig::default(), None, true);
    assert!(!config.show_labels);
}
