use serde::{Deserialize, Serialize};

use crate::Language;

/// A question as the user submitted it. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub language: Language,
}

impl Question {
    /// Builds a question from raw input, trimming surrounding whitespace.
    /// Returns None if nothing is left.
    pub fn new(raw_text: &str, language: Language) -> Option<Self> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            language,
        })
    }
}

/// Body of `POST {base}ask`.
#[derive(Serialize, Debug)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub language: Language,
}

impl<'a> From<&'a Question> for AskRequest<'a> {
    fn from(question: &'a Question) -> Self {
        Self {
            question: &question.text,
            language: question.language,
        }
    }
}

/// Body of a 200 response from `ask`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Body of `GET {base}`: what the backend reports about itself.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ServerStatus {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub pdf_present: bool,
    #[serde(default)]
    pub index_present: bool,
}

impl ServerStatus {
    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        let name = if self.app.is_empty() { "server" } else { self.app.as_str() };
        if self.index_present {
            format!("Connected: {name}")
        } else {
            format!("Connected: {name} (index not built)")
        }
    }
}

/// Terminal classification of one query attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    Success { answer: String, source: Option<String> },
    HttpFailure { status_code: u16 },
    TransportFailure { message: String },
}

impl AnswerResult {
    pub fn is_failure(&self) -> bool {
        !matches!(self, AnswerResult::Success { .. })
    }

    /// Main display text for this outcome.
    pub fn answer_text(&self) -> String {
        match self {
            AnswerResult::Success { answer, .. } => answer.clone(),
            AnswerResult::HttpFailure { status_code } => format!("Server error: {status_code}"),
            AnswerResult::TransportFailure { message } => format!("Network error: {message}"),
        }
    }

    /// Source line; empty unless a successful answer named one.
    pub fn source_text(&self) -> String {
        match self {
            AnswerResult::Success {
                source: Some(source),
                ..
            } => format!("Source: {source}"),
            _ => String::new(),
        }
    }
}

impl From<AskResponse> for AnswerResult {
    fn from(response: AskResponse) -> Self {
        AnswerResult::Success {
            answer: response.answer,
            source: response.source,
        }
    }
}
