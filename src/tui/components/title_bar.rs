//! # TitleBar Component
//!
//! Top status bar showing which server is in use and any notices.
//!
//! ## Conditional Formatting
//!
//! 1. **Status and server check**: `"Deeni Q&A (server: URL) | Base URL saved | Connected: app"`
//! 2. **Status only**: `"Deeni Q&A (server: URL) | Waiting for answer..."`
//! 3. **Default**: `"Deeni Q&A (server: URL)"`
//!
//! TitleBar is purely presentational: it receives everything as props and
//! keeps no state, so the parent decides where each value comes from.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    /// Base address the next question goes to
    pub base_address: String,
    /// Transient notice (e.g. "Enter a question", "Base URL saved")
    pub status_message: String,
    /// Summary of the last server status check, if any
    pub server_status: Option<String>,
}

impl TitleBar {
    pub fn new(base_address: String, status_message: String, server_status: Option<String>) -> Self {
        Self {
            base_address,
            status_message,
            server_status,
        }
    }

    fn text(&self) -> String {
        let mut title = format!("Deeni Q&A (server: {})", self.base_address);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if let Some(server) = &self.server_status {
            title.push_str(" | ");
            title.push_str(server);
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = match &self.server_status {
            Some(s) if s.starts_with("Server unreachable") => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}
