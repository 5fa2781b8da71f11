//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing server address and notices
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `TextField`: Single-line input for the question and the server address
//! - `AnswerPanel`: Scrollable answer view with loading spinner and source line
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into `App`. The parent copies what each one needs every frame:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.base_address.clone(), app.status_message.clone(), None);
//! title_bar.render(frame, area);
//! ```

pub mod answer_panel;
pub mod text_field;
mod title_bar;

pub use answer_panel::{AnswerPanel, AnswerPanelState};
pub use text_field::{FieldEvent, TextField};
pub use title_bar::TitleBar;
