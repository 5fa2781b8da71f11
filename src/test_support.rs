//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::Language;
use crate::core::config::ConfigError;
use crate::core::state::App;
use crate::core::store::{ConfigStore, DEFAULT_BASE_URL, MemoryConfigStore};

/// A store whose writes always fail.
pub struct FailingConfigStore;

impl ConfigStore for FailingConfigStore {
    fn get(&self) -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn set(&self, _address: &str) -> Result<(), ConfigError> {
        Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

/// Creates a test App with an in-memory store.
pub fn test_app() -> App {
    test_app_with_store(Arc::new(MemoryConfigStore::new()))
}

pub fn test_app_with_store(store: Arc<dyn ConfigStore>) -> App {
    App::new(store, Language::Urdu)
}
