//! Configuration file loading with precedence handling.

use crate::state::DEFAULT_POPUP_DELAY_MS;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Opacity applied to unselected items while something is selected.
pub const DEFAULT_DIM_OPACITY: f64 = 0.7;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tmv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Hover delay before the detail popup appears. Negative clamps to 0.
    #[serde(default)]
    pub popup_delay_ms: Option<i64>,

    /// Opacity of unselected items while a selection exists (0.0-1.0).
    #[serde(default)]
    pub dim_opacity: Option<f64>,

    /// Draw labels inside rectangles.
    #[serde(default)]
    pub show_labels: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Hover delay in milliseconds.
    pub popup_delay_ms: u64,
    /// Opacity of unselected items while a selection exists.
    pub dim_opacity: f64,
    /// Draw labels inside rectangles.
    pub show_labels: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            popup_delay_ms: DEFAULT_POPUP_DELAY_MS,
            dim_opacity: DEFAULT_DIM_OPACITY,
            show_labels: true,
            log_file_path: default_log_path(),
        }
    }
}

/// Clamp a possibly negative delay to milliseconds `>= 0`.
pub fn clamp_delay(ms: i64) -> u64 {
    u64::try_from(ms).unwrap_or(0)
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tmv/tmv.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tmv").join("tmv.log")
    } else {
        PathBuf::from("tmv.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tmv/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tmv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TMV_CONFIG` environment variable
/// 3. Default path `~/.config/tmv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TMV_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TMV_POPUP_DELAY_MS`: Override popup delay (unparseable values are ignored)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("TMV_POPUP_DELAY_MS") {
        match raw.trim().parse::<i64>() {
            Ok(ms) => config.popup_delay_ms = clamp_delay(ms),
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid TMV_POPUP_DELAY_MS"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// `dim_opacity` is clamped into `0.0..=1.0`; a non-finite value falls back
/// to the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let dim_opacity = config
        .dim_opacity
        .filter(|o| o.is_finite())
        .map_or(defaults.dim_opacity, |o| o.clamp(0.0, 1.0));

    ResolvedConfig {
        popup_delay_ms: config
            .popup_delay_ms
            .map_or(defaults.popup_delay_ms, clamp_delay),
        dim_opacity,
        show_labels: config.show_labels.unwrap_or(defaults.show_labels),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    popup_delay_override: Option<i64>,
    no_labels: bool,
) -> ResolvedConfig {
    if let Some(ms) = popup_delay_override {
        config.popup_delay_ms = clamp_delay(ms);
    }

    if no_labels {
        config.show_labels = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_tmv_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("tmv.log"),
            "Default log path should end with 'tmv.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }
}
