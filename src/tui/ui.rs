use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Language;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{AnswerPanel, TitleBar};
use crate::tui::{Focus, TuiState};

const HELP_TEXT: &str =
    " Enter ask/save  Tab switch field  Ctrl+L language  Ctrl+T check server  Esc quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Length(3), Min(4), Length(3), Length(1)]);
    let [title_area, language_area, question_area, answer_area, address_area, help_area] =
        layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.base_address.clone(),
        app.status_message.clone(),
        app.server_status.clone(),
    );
    title_bar.render(frame, title_area);

    frame.render_widget(language_line(app.language), language_area);

    tui.question.focused = tui.focus == Focus::Question;
    tui.question.disabled = app.is_loading();
    tui.question.render(frame, question_area);

    let mut answer = AnswerPanel {
        state: &mut tui.answer,
        answer: &app.answer_text,
        source: &app.source_text,
        loading: app.is_loading(),
        failure: app.showing_failure(),
        spinner_frame,
    };
    answer.render(frame, answer_area);

    tui.address.focused = tui.focus == Focus::Address;
    tui.address.render(frame, address_area);

    frame.render_widget(
        Line::from(HELP_TEXT).style(Style::default().add_modifier(Modifier::DIM)),
        help_area,
    );
}

/// `Language: [urdu]  english`, selected entry highlighted.
fn language_line(selected: Language) -> Line<'static> {
    let mut spans = vec![Span::raw(" Language: ")];
    for lang in Language::ALL {
        if lang == selected {
            spans.push(Span::styled(
                format!("[{lang}]"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {lang} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AnswerResult;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
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
    fn test_draw_ui_idle() {
        let app = test_app();
        let mut tui = TuiState::new(&app.base_address);
        let text = screen_text(&app, &mut tui);

        assert!(text.contains("Deeni Q&A"));
        assert!(text.contains("[urdu]"));
        assert!(text.contains("Question"));
        assert!(text.contains("Server address"));
        assert!(text.contains("http://10.0.2.2:8000/"));
    }

    #[test]
    fn test_draw_ui_shows_result() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Submit {
                text: "q".to_string(),
                language: Language::English,
            },
        );
        update(
            &mut app,
            Action::ResultReceived(AnswerResult::Success {
                answer: "42".to_string(),
                source: Some("bookX".to_string()),
            }),
        );

        let mut tui = TuiState::new(&app.base_address);
        let text = screen_text(&app, &mut tui);
        assert!(text.contains("42"));
        assert!(text.contains("Source: bookX"));
    }

    #[test]
    fn test_draw_ui_loading_disables_question() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Submit {
                text: "q".to_string(),
                language: Language::Urdu,
            },
        );

        let mut tui = TuiState::new(&app.base_address);
        let text = screen_text(&app, &mut tui);
        assert!(text.contains("waiting for server"));
        assert!(tui.question.disabled);
    }

    #[test]
    fn test_language_line_marks_selection() {
        let line = language_line(Language::English);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("[english]"));
        assert!(text.contains(" urdu "));
    }
}
