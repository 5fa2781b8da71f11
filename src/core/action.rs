//! # Actions
//!
//! Everything that can happen in Deeni becomes an `Action`.
//! User presses Enter in the question box? That's `Action::Submit`.
//! The backend responds? That's `Action::ResultReceived(result)`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the adapter should start. The reducer never waits on
//! the network; the only I/O it does is the synchronous preference store.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Phase transitions:
//!
//! ```text
//! Idle ──Submit──▶ Loading ──ResultReceived──▶ Displaying ──Submit──▶ Loading ...
//! ```

use log::{debug, info, warn};

use crate::Language;
use crate::api::{AnswerResult, ClientError, Question, ServerStatus};
use crate::core::state::{App, Phase};

/// Notice shown when the question box is blank.
pub const EMPTY_QUESTION_NOTICE: &str = "Enter a question";
/// Notice shown after the base address is stored.
pub const BASE_URL_SAVED_NOTICE: &str = "Base URL saved";

#[derive(Debug)]
pub enum Action {
    /// Ask a question in the given language.
    Submit { text: String, language: Language },
    /// The outstanding query finished.
    ResultReceived(AnswerResult),
    /// Store a new backend base address.
    SaveBaseAddress(String),
    CycleLanguage,
    /// Ask the backend to describe itself.
    CheckServer,
    /// Outcome of a status check against `base_address`.
    ServerStatusReceived {
        base_address: String,
        result: Result<ServerStatus, ClientError>,
    },
    Quit,
}

/// A query the adapter must run. The base address is fixed at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub question: Question,
    pub base_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnQuery(PendingQuery),
    CheckServer(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit { text, language } => submit(app, &text, language),
        Action::ResultReceived(result) => {
            if !app.is_loading() {
                warn!("Dropping result received while {:?}: {:?}", app.phase, result);
                return Effect::None;
            }
            info!("Query finished: failure={}", result.is_failure());
            app.answer_text = result.answer_text();
            app.source_text = result.source_text();
            app.status_message.clear();
            app.phase = Phase::Displaying(result);
            Effect::None
        }
        Action::SaveBaseAddress(raw) => save_base_address(app, &raw),
        Action::CycleLanguage => {
            app.language = app.language.next();
            app.status_message = format!("Language: {}", app.language);
            Effect::None
        }
        Action::CheckServer => Effect::CheckServer(app.base_address.clone()),
        Action::ServerStatusReceived {
            base_address,
            result,
        } => {
            // A check of an address that has since been replaced says nothing
            // about the current one
            if base_address != app.base_address {
                debug!("Dropping status for stale address {}: {:?}", base_address, result);
                return Effect::None;
            }
            app.server_status = Some(match result {
                Ok(status) => status.summary(),
                Err(e) => format!("Server unreachable: {e}"),
            });
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw_text: &str, language: Language) -> Effect {
    // The UI disables submit while loading; this covers anything that bypasses it
    if app.is_loading() {
        debug!("Submit ignored: a query is already in flight");
        return Effect::None;
    }

    let Some(question) = Question::new(raw_text, language) else {
        app.status_message = EMPTY_QUESTION_NOTICE.to_string();
        return Effect::None;
    };

    app.phase = Phase::Loading;
    app.answer_text.clear();
    app.source_text.clear();
    app.status_message = String::from("Waiting for answer...");

    let base_address = app.store.get();
    info!(
        "Submitting question ({}, {} chars) to {}",
        question.language,
        question.text.chars().count(),
        base_address
    );

    Effect::SpawnQuery(PendingQuery {
        question,
        base_address,
    })
}

fn save_base_address(app: &mut App, raw_address: &str) -> Effect {
    let address = raw_address.trim();
    if address.is_empty() {
        debug!("Ignoring save of empty base address");
        return Effect::None;
    }

    match app.store.set(address) {
        Ok(()) => {
            app.base_address = address.to_string();
            app.status_message = BASE_URL_SAVED_NOTICE.to_string();
            Effect::CheckServer(address.to_string())
        }
        Err(e) => {
            warn!("Failed to save base URL: {}", e);
            app.status_message = format!("Failed to save base URL: {e}");
            Effect::None
        }
    }
}
