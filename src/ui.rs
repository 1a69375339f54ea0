//! Terminal table view with ratatui
//!
//! The view pulls header and rows from the model into a [`TableSnapshot`] and
//! hands it to a [`UIRenderer`]. Scroll position and follow mode live in
//! [`ViewState`].

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{StatusLine, TableSnapshot, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
