//! # Preferences Store
//!
//! Persists the one user-editable preference: the backend base address.
//!
//! On disk it is a small TOML file (`~/.deeni/prefs.toml`):
//!
//! ```toml
//! [deeniqa_prefs]
//! base_url = "http://192.168.1.20:8000/"
//! ```
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) so a crash never
//! leaves a half-written file behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::ConfigError;

/// Base address used until the user saves one. `10.0.2.2` is the host
/// machine as seen from an Android emulator.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8000/";

/// Durable storage for the backend base address.
pub trait ConfigStore: Send + Sync {
    /// The saved base address, or [`DEFAULT_BASE_URL`] if none was saved.
    fn get(&self) -> String;

    /// Saves `address` for all future `get()` calls, including after restart.
    /// Callers pass a non-empty, trimmed address.
    fn set(&self, address: &str) -> Result<(), ConfigError>;
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PrefsFile {
    #[serde(default)]
    deeniqa_prefs: Prefs,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Prefs {
    base_url: Option<String>,
}

/// `ConfigStore` backed by a TOML file.
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<PrefsFile, ConfigError> {
        if !self.path.exists() {
            return Ok(PrefsFile::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }
}

impl ConfigStore for TomlConfigStore {
    fn get(&self) -> String {
        match self.read() {
            Ok(prefs) => prefs
                .deeniqa_prefs
                .base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            Err(e) => {
                warn!(
                    "Failed to read prefs from {}: {}, using default base URL",
                    self.path.display(),
                    e
                );
                DEFAULT_BASE_URL.to_string()
            }
        }
    }

    fn set(&self, address: &str) -> Result<(), ConfigError> {
        debug_assert!(!address.trim().is_empty(), "base address must not be empty");

        // An unreadable file is replaced rather than blocking the save
        let mut prefs = self.read().unwrap_or_default();
        prefs.deeniqa_prefs.base_url = Some(address.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string(&prefs).map_err(ConfigError::Serialize)?;
        atomic_write(&self.path, &contents).map_err(ConfigError::Io)?;

        info!("Saved base URL {} to {}", address, self.path.display());
        Ok(())
    }
}

/// Write `contents` to `path` via `.tmp` + rename.
fn atomic_write(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// `ConfigStore` that lives only as long as the process. Used when there is
/// no home directory to persist into.
#[derive(Default)]
pub struct MemoryConfigStore {
    base_url: Mutex<Option<String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self) -> String {
        self.base_url
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn set(&self, address: &str) -> Result<(), ConfigError> {
        let mut guard = self
            .base_url
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(address.to_string());
        debug!("Base URL set in memory: {}", address);
        Ok(())
    }
}
