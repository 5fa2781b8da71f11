//! # TextField Component
//!
//! Single-line text input used for both the question and the server address.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste with newlines folded to spaces)
//! - Handle editing (backspace, delete, cursor movement, Home/End)
//! - Emit `FieldEvent::Submit` on Enter, leaving the text in place
//! - Scroll horizontally so the cursor stays visible
//!
//! The buffer and cursor are internal state. `title`, `focused` and
//! `disabled` are props set by the parent each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Horizontal space taken by the left and right borders.
const BORDER_WIDTH: u16 = 2;

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Enter pressed; carries the current text
    Submit(String),
    ContentChanged,
}

pub struct TextField {
    /// Text buffer (Internal State)
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Border title (Prop)
    pub title: String,
    /// Whether keystrokes go here (Prop)
    pub focused: bool,
    /// Rendered dimmed, e.g. while a question is in flight (Prop)
    pub disabled: bool,
}

impl TextField {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title: title.into(),
            focused: false,
            disabled: false,
        }
    }

    /// Creates a field pre-filled with `text`, cursor at the end.
    pub fn with_text(title: impl Into<String>, text: &str) -> Self {
        let mut field = Self::new(title);
        field.set_text(text);
        field
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    /// Display columns from the start of the buffer to the cursor.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Columns to skip so the cursor fits inside `inner_width`.
    fn scroll_offset(&self, inner_width: u16) -> u16 {
        let column = self.cursor_column();
        if inner_width == 0 || column < inner_width {
            0
        } else {
            column - inner_width + 1
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(pos)
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(BORDER_WIDTH);
        let offset = self.scroll_offset(inner_width);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        let paragraph = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(text_style)
            .scroll((0, offset));

        frame.render_widget(paragraph, area);

        if self.focused && area.height > 2 {
            let x = area.x + 1 + self.cursor_column().saturating_sub(offset);
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(FieldEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let single_line: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&single_line);
                Some(FieldEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FieldEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FieldEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::ContentChanged
            }),
            TuiEvent::Home => (self.cursor != 0).then(|| {
                self.cursor = 0;
                FieldEvent::ContentChanged
            }),
            TuiEvent::End => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                FieldEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(FieldEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
