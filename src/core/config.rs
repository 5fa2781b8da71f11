//! # Configuration
//!
//! Centralizes user settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.deeni/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The backend base address is *not* configured here. It is a preference the
//! user edits inside the app, persisted by [`crate::core::store`].

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Language;
use crate::api::DEFAULT_REQUEST_TIMEOUT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeeniConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_language: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: Language,
    pub request_timeout: Duration,
    pub prefs_path: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.deeni/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".deeni"))
}

/// Returns the path to `~/.deeni/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the path to `~/.deeni/prefs.toml`, where the base address lives.
pub fn prefs_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("prefs.toml"))
}

/// Load config from `~/.deeni/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DeeniConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DeeniConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DeeniConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DeeniConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DeeniConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Deeni Q&A Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.
# The server address is edited inside the app and saved to prefs.toml.

# [general]
# default_language = "urdu"          # "urdu" or "english"
# request_timeout_secs = 30
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_language` and `cli_timeout_secs` are from CLI flags (None = not specified).
pub fn resolve(
    config: &DeeniConfig,
    cli_language: Option<Language>,
    cli_timeout_secs: Option<u64>,
) -> ResolvedConfig {
    // Language: CLI → env → config → default
    let language = cli_language
        .or_else(|| parse_language(std::env::var("DEENI_LANGUAGE").ok(), "DEENI_LANGUAGE"))
        .or_else(|| {
            parse_language(
                config.general.default_language.clone(),
                "general.default_language",
            )
        })
        .unwrap_or_default();

    // Timeout: CLI → env → config → default
    let request_timeout = cli_timeout_secs
        .or_else(|| {
            std::env::var("DEENI_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| match v.trim().parse::<u64>() {
                    Ok(secs) => Some(secs),
                    Err(e) => {
                        warn!("Ignoring DEENI_REQUEST_TIMEOUT={:?}: {}", v, e);
                        None
                    }
                })
        })
        .or(config.general.request_timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    ResolvedConfig {
        language,
        request_timeout,
        prefs_path: prefs_path(),
    }
}

/// Parses a language setting, warning (not failing) on bad values.
fn parse_language(value: Option<String>, origin: &str) -> Option<Language> {
    let value = value?;
    match value.parse() {
        Ok(lang) => Some(lang),
        Err(e) => {
            warn!("Ignoring {}: {}", origin, e);
            None
        }
    }
}
