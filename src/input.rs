//! Terminal input: key bindings and event polling.
//!
//! Crossterm events are translated into [`InputAction`]s. The application reads
//! them on a dedicated thread (see `app::runtime`).

use crate::error::{Result, RltableError};
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use std::time::Duration;

/// Number of rows produced by a single mouse wheel tick.
const MOUSE_SCROLL_LINES: usize = 3;

/// Direction for scroll actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// High-level input actions consumed by the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    ToggleAutoScroll,
    ReloadFormat,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
}

/// Map a key press to an action, `None` for unbound keys
pub fn key_to_action(key_event: KeyEvent) -> Option<InputAction> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    let plain = !key_event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    let action = match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        KeyCode::Char('j') if plain => scroll(ScrollDirection::Down, 1),
        KeyCode::Down => scroll(ScrollDirection::Down, 1),
        KeyCode::Char('k') if plain => scroll(ScrollDirection::Up, 1),
        KeyCode::Up => scroll(ScrollDirection::Up, 1),
        KeyCode::Char(' ') | KeyCode::Char('f') if plain => InputAction::PageDown,
        KeyCode::PageDown => InputAction::PageDown,
        KeyCode::Char('b') if plain => InputAction::PageUp,
        KeyCode::PageUp => InputAction::PageUp,
        KeyCode::Char('g') if plain => InputAction::GoToStart,
        KeyCode::Home => InputAction::GoToStart,
        KeyCode::Char('G') if plain => InputAction::GoToEnd,
        KeyCode::End => InputAction::GoToEnd,
        KeyCode::Char('F') if plain => InputAction::ToggleAutoScroll,
        KeyCode::Char('r') if plain => InputAction::ReloadFormat,
        KeyCode::Char('q') if plain => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        _ => return None,
    };
    Some(action)
}

fn scroll(direction: ScrollDirection, lines: usize) -> InputAction {
    InputAction::Scroll { direction, lines }
}

/// Translate any terminal event into an action
pub fn event_to_action(event: Event) -> Option<InputAction> {
    match event {
        Event::Key(key_event) => key_to_action(key_event),
        Event::Resize(width, height) => Some(InputAction::Resize { width, height }),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(scroll(ScrollDirection::Down, MOUSE_SCROLL_LINES)),
            MouseEventKind::ScrollUp => Some(scroll(ScrollDirection::Up, MOUSE_SCROLL_LINES)),
            _ => None,
        },
        _ => None,
    }
}

/// Wait up to `timeout` for the next terminal event and translate it
pub fn poll_action(timeout: Duration) -> Result<Option<InputAction>> {
    let ready = event::poll(timeout)
        .map_err(|e| RltableError::ui(format!("Failed to poll terminal events: {e}")))?;
    if !ready {
        return Ok(None);
    }
    let event =
        event::read().map_err(|e| RltableError::ui(format!("Failed to read terminal event: {e}")))?;
    Ok(event_to_action(event))
}
