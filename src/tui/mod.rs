//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Threading
//!
//! Queries and status checks run on tokio tasks. They never touch `App`;
//! they send an `Action` back over a channel, and the event loop applies it
//! with `update()`. The loop is the single writer of all state.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::task::JoinHandle;

use crate::api::QueryClient;
use crate::core::action::{Action, Effect, PendingQuery, update};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AnswerPanelState, FieldEvent, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which input field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Question,
    Address,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Question => Focus::Address,
            Focus::Address => Focus::Question,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub question: TextField,
    pub address: TextField,
    pub answer: AnswerPanelState,
    pub focus: Focus,
}

impl TuiState {
    pub fn new(base_address: &str) -> Self {
        Self {
            question: TextField::new("Question"),
            address: TextField::with_text("Server address", base_address),
            answer: AnswerPanelState::new(),
            focus: Focus::Question, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(mut app: App, client: Arc<dyn QueryClient>) -> std::io::Result<()> {
    let mut tui = TuiState::new(&app.base_address);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Initial server check so a wrong address shows up before the first question
    let mut should_quit = apply(&mut app, &mut tui, Action::CheckServer, &client, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &client, &tx) {
                should_quit = true;
                break;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, action, &client, &tx) {
                should_quit = true;
            }
        }
    }

    ratatui::restore();
    info!("Deeni shutting down");
    Ok(())
}

/// Routes one terminal event. Returns true if the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    client: &Arc<dyn QueryClient>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        // Resize just needs a redraw (already flagged)
        TuiEvent::Resize => false,
        TuiEvent::Quit | TuiEvent::ForceQuit => apply(app, tui, Action::Quit, client, tx),
        TuiEvent::CycleLanguage => apply(app, tui, Action::CycleLanguage, client, tx),
        TuiEvent::CheckServer => apply(app, tui, Action::CheckServer, client, tx),
        TuiEvent::FocusNext | TuiEvent::FocusPrev => {
            tui.focus = tui.focus.toggle();
            false
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.answer.handle_event(&event);
            false
        }
        _ => match tui.focus {
            Focus::Question => match tui.question.handle_event(&event) {
                // The ask button is disabled while loading
                Some(FieldEvent::Submit(_)) if app.is_loading() => false,
                Some(FieldEvent::Submit(text)) => {
                    let language = app.language;
                    apply(app, tui, Action::Submit { text, language }, client, tx)
                }
                _ => false,
            },
            Focus::Address => match tui.address.handle_event(&event) {
                Some(FieldEvent::Submit(text)) => {
                    let quit = apply(app, tui, Action::SaveBaseAddress(text), client, tx);
                    tui.address.set_text(&app.base_address);
                    quit
                }
                _ => false,
            },
        },
    }
}

/// Runs `update()` and starts whatever the effect asks for.
/// Returns true if the app should quit.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    client: &Arc<dyn QueryClient>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnQuery(query) => {
            tui.answer.reset();
            spawn_query(client.clone(), query, tx.clone());
            false
        }
        Effect::CheckServer(base_address) => {
            spawn_status_check(client.clone(), base_address, tx.clone());
            false
        }
    }
}

/// Runs one query on a background task and reports the outcome as
/// `Action::ResultReceived`. Not cancellable: it always runs to completion.
pub fn spawn_query(
    client: Arc<dyn QueryClient>,
    query: PendingQuery,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning query to {}", query.base_address);
    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let result = client.ask(&query.question, &query.base_address).await;
        debug!(
            "Query finished in {}ms: {:?}",
            started.elapsed().as_millis(),
            result
        );
        if tx.send(Action::ResultReceived(result)).is_err() {
            warn!("Failed to deliver query result: receiver dropped");
        }
    })
}

/// Fetches server status on a background task and reports it as
/// `Action::ServerStatusReceived`.
pub fn spawn_status_check(
    client: Arc<dyn QueryClient>,
    base_address: String,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    debug!("Spawning status check for {}", base_address);
    tokio::spawn(async move {
        let result = client.status(&base_address).await;
        if tx
            .send(Action::ServerStatusReceived {
                base_address,
                result,
            })
            .is_err()
        {
            warn!("Failed to deliver server status: receiver dropped");
        }
    })
}
