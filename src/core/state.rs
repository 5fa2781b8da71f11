//! # Application State
//!
//! Core business state for Deeni. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<dyn ConfigStore>   // persisted base address
//! ├── phase: Phase                  // Idle | Loading | Displaying(result)
//! ├── language: Language            // selector value
//! ├── answer_text: String           // answer region
//! ├── source_text: String           // source region
//! ├── base_address: String          // last saved address, for display
//! ├── status_message: String        // transient notices
//! └── server_status: Option<String> // last status check summary
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::Language;
use crate::api::AnswerResult;
use crate::core::store::ConfigStore;

/// Where the session is in its request lifecycle. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Displaying(AnswerResult),
}

pub struct App {
    pub store: Arc<dyn ConfigStore>,
    pub phase: Phase,
    pub language: Language,
    pub answer_text: String,
    pub source_text: String,
    /// Cached copy of the stored address. Submissions read the store itself.
    pub base_address: String,
    pub status_message: String,
    pub server_status: Option<String>,
}

impl App {
    pub fn new(store: Arc<dyn ConfigStore>, language: Language) -> Self {
        let base_address = store.get();
        Self {
            store,
            phase: Phase::Idle,
            language,
            answer_text: String::new(),
            source_text: String::new(),
            base_address,
            status_message: String::from("Ask a question to begin"),
            server_status: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// True when the displayed answer is an error message.
    pub fn showing_failure(&self) -> bool {
        matches!(&self.phase, Phase::Displaying(result) if result.is_failure())
    }
}
