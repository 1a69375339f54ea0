//! Terminal UI implementation using ratatui
//!
//! Draws the table header, the snapshot rows with their highlight colors and a
//! one-line status bar.

use crate::error::Result;
use crate::format::Color as HighlightColor;
use crate::model::CellView;
use crate::ui::{ColorTheme, TableSnapshot, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Widest a non-final column may get; the last column takes the remaining space.
const MAX_COLUMN_WIDTH: u16 = 40;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Self {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
        }
    }

    fn render_table(frame: &mut Frame, area: Rect, table: &TableSnapshot, theme: &ColorTheme) {
        let header = Row::new(table.headers.iter().map(|h| Cell::from(h.as_str())))
            .style(theme.header);

        let rows = table.rows.iter().map(|cells| {
            Row::new(
                cells
                    .iter()
                    .map(|cell| Cell::from(cell.text.as_str()).style(cell_style(cell, theme))),
            )
        });

        let widget = Table::new(rows, column_widths(table))
            .header(header)
            .column_spacing(1);
        frame.render_widget(widget, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

fn to_terminal_color(color: HighlightColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn cell_style(cell: &CellView, theme: &ColorTheme) -> Style {
    let mut style = theme.cell_style();
    if let Some(fg) = cell.fg {
        style = style.fg(to_terminal_color(fg));
    }
    if let Some(bg) = cell.bg {
        style = style.bg(to_terminal_color(bg));
    }
    style
}

/// Size every column but the last to its widest visible text
fn column_widths(table: &TableSnapshot) -> Vec<Constraint> {
    let count = table.column_count();
    (0..count)
        .map(|column| {
            if column + 1 == count {
                return Constraint::Fill(1);
            }
            let header = table.headers[column].chars().count();
            let widest = table
                .rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.text.chars().count())
                .fold(header, usize::max);
            let width = u16::try_from(widest).unwrap_or(u16::MAX);
            Constraint::Length(width.min(MAX_COLUMN_WIDTH))
        })
        .collect()
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState, table: &TableSnapshot) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                    .split(size);

                Self::render_table(frame, chunks[0], table, theme);
                Self::render_status(frame, chunks[1], view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
