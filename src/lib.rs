//! Deeni Q&A library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Languages the backend answers in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Urdu,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Urdu, Language::English];

    /// Wire name, as the backend expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Urdu => "urdu",
            Language::English => "english",
        }
    }

    /// Cycles through languages (used by the selector).
    pub fn next(self) -> Self {
        match self {
            Language::Urdu => Language::English,
            Language::English => Language::Urdu,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urdu" => Ok(Language::Urdu),
            "english" => Ok(Language::English),
            other => Err(format!("unsupported language '{other}' (expected urdu or english)")),
        }
    }
}
