//! # Answer Panel
//!
//! Shows the answer (or error text) for the last question, a spinner while a
//! question is in flight, and the source line underneath.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AnswerPanelState` lives in `TuiState` and owns the scroll offset
//! - `AnswerPanel` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const PAGE_LINES: u16 = 10;

/// Persistent scroll state for the answer panel.
#[derive(Debug, Default)]
pub struct AnswerPanelState {
    pub scroll: u16,
    /// Largest useful offset, recomputed on every render.
    max_scroll: u16,
}

impl AnswerPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, e.g. when a new question is sent.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl EventHandler for AnswerPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let next = match event {
            TuiEvent::ScrollUp => self.scroll.saturating_sub(1),
            TuiEvent::ScrollDown => self.scroll.saturating_add(1),
            TuiEvent::ScrollPageUp => self.scroll.saturating_sub(PAGE_LINES),
            TuiEvent::ScrollPageDown => self.scroll.saturating_add(PAGE_LINES),
            _ => return None,
        };
        self.scroll = next.min(self.max_scroll);
        Some(())
    }
}

/// Transient render wrapper for the answer panel.
pub struct AnswerPanel<'a> {
    pub state: &'a mut AnswerPanelState,
    pub answer: &'a str,
    pub source: &'a str,
    pub loading: bool,
    pub failure: bool,
    pub spinner_frame: usize,
}

impl Component for AnswerPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [answer_area, source_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let title = if self.loading {
            format!("Answer {} waiting for server", SPINNER[self.spinner_frame % SPINNER.len()])
        } else {
            String::from("Answer")
        };

        let style = if self.failure {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().add_modifier(Modifier::DIM))
            .title(title);

        let paragraph = Paragraph::new(self.answer)
            .style(style)
            .wrap(Wrap { trim: false });

        let inner_width = answer_area.width.saturating_sub(2);
        let inner_height = answer_area.height.saturating_sub(2);
        let total = paragraph.line_count(inner_width) as u16;
        self.state.max_scroll = total.saturating_sub(inner_height);
        self.state.scroll = self.state.scroll.min(self.state.max_scroll);

        frame.render_widget(
            paragraph.block(block).scroll((self.state.scroll, 0)),
            answer_area,
        );

        let source = Paragraph::new(self.source)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC));
        frame.render_widget(source, source_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(panel: &mut AnswerPanel<'_>, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                panel.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_answer_and_source() {
        let mut state = AnswerPanelState::new();
        let mut panel = AnswerPanel {
            state: &mut state,
            answer: "42",
            source: "Source: bookX",
            loading: false,
            failure: false,
            spinner_frame: 0,
        };
        let text = render_text(&mut panel, 40, 6);
        assert!(text.contains("Answer"));
        assert!(text.contains("42"));
        assert!(text.contains("Source: bookX"));
    }

    #[test]
    fn test_loading_title_shows_spinner() {
        let mut state = AnswerPanelState::new();
        let mut panel = AnswerPanel {
            state: &mut state,
            answer: "",
            source: "",
            loading: true,
            failure: false,
            spinner_frame: 1,
        };
        let text = render_text(&mut panel, 40, 6);
        assert!(text.contains("Answer / waiting for server"));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut state = AnswerPanelState::new();
        let long_answer = (1..=20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        {
            let mut panel = AnswerPanel {
                state: &mut state,
                answer: &long_answer,
                source: "",
                loading: false,
                failure: false,
                spinner_frame: 0,
            };
            // 6 rows: 1 for source, 2 for borders, 3 visible lines
            render_text(&mut panel, 40, 6);
        }

        state.handle_event(&TuiEvent::ScrollPageDown);
        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.scroll, 17);

        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll, 16);

        state.reset();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_ignores_unrelated_events() {
        let mut state = AnswerPanelState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }
}
