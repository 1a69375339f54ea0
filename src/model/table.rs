//! Table projection over a line source and a format.
//!
//! [`LogModel`] answers row/column queries for a view. Rows are parsed and
//! highlighted lazily on first access and cached until the next reset. A reset
//! happens on every [`LogModel::set_format`] call and on every line-source
//! change that is not a strict growth; strict growth only announces the new
//! rows.

use crate::format::{Color, LogFormat, OptionalColor};
use crate::line_source::{ChangeKind, LineCountChange, LineProvider};
use crate::model::cache::RowCache;
use crate::parser::{parse, Cell, LogLine};
use crate::resolver::apply_highlights;
use std::sync::Arc;

/// Notification for the consuming view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// Every row/column index handed out before is invalid; re-query everything
    Reset,
    /// Rows `start..end` were added at the end
    RowsInserted { start: usize, end: usize },
}

/// Lifecycle of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// No format has been set yet; there are no columns
    Uninitialized,
    Ready,
}

/// What a [`LogModel::data`] query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Display,
    Foreground,
    Background,
}

/// Answer to a [`LogModel::data`] query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellData {
    Text(String),
    Color(Color),
}

/// Everything a view needs to draw one cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellView {
    pub text: String,
    pub fg: OptionalColor,
    pub bg: OptionalColor,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            text: cell.text.clone(),
            fg: cell.fg_color,
            bg: cell.bg_color,
        }
    }
}

/// Parse a raw line and resolve its highlights
pub fn process_line(raw: &str, format: &LogFormat) -> LogLine {
    let mut line = parse(raw, format);
    apply_highlights(&mut line, format);
    line
}

pub struct LogModel {
    provider: Arc<dyn LineProvider>,
    format: Option<Arc<LogFormat>>,
    columns: Vec<String>,
    cache: RowCache,
}

impl LogModel {
    /// Create an uninitialized model reading from `provider`
    pub fn new(provider: Arc<dyn LineProvider>) -> Self {
        Self {
            provider,
            format: None,
            columns: Vec::new(),
            cache: RowCache::new(),
        }
    }

    /// Create a model and set its format right away
    pub fn with_format(provider: Arc<dyn LineProvider>, format: Arc<LogFormat>) -> Self {
        let mut model = Self::new(provider);
        model.set_format(format);
        model
    }

    pub fn state(&self) -> ModelState {
        if self.format.is_some() {
            ModelState::Ready
        } else {
            ModelState::Uninitialized
        }
    }

    pub fn format(&self) -> Option<&Arc<LogFormat>> {
        self.format.as_ref()
    }

    /// Replace the active format; always a full reset
    pub fn set_format(&mut self, format: Arc<LogFormat>) -> ModelEvent {
        self.columns = format.columns().to_vec();
        self.format = Some(format);
        self.reset()
    }

    /// Drop every cached row
    pub fn reset(&mut self) -> ModelEvent {
        log::debug!("Resetting model ({} cached rows)", self.cache.len());
        self.cache.clear();
        ModelEvent::Reset
    }

    /// React to a line-source change
    pub fn on_line_count_changed(&mut self, change: LineCountChange) -> ModelEvent {
        match change.kind() {
            ChangeKind::Append { start, end } => {
                log::debug!("Rows {start}..{end} appended");
                self.cache.grow_to(end);
                ModelEvent::RowsInserted { start, end }
            }
            ChangeKind::Reset => self.reset(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.provider.line_count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column name for a header section
    pub fn header(&self, section: usize) -> Option<&str> {
        self.columns.get(section).map(String::as_str)
    }

    /// Cached row, without parsing it when absent
    pub fn cached_row(&self, row: usize) -> Option<&LogLine> {
        self.cache.get(row)
    }

    /// Text and colors of one cell
    ///
    /// Returns `None` for out-of-range rows and columns. For a row the format
    /// does not match, only the last column has a value: the raw line.
    pub fn cell(&mut self, row: usize, column: usize) -> Option<CellView> {
        let column_count = self.column_count();
        if column >= column_count {
            return None;
        }
        let provider = Arc::clone(&self.provider);
        match self.log_line(row)? {
            LogLine::Parsed(cells) => cells.get(column).map(CellView::from),
            LogLine::Unparsed if column == column_count - 1 => {
                provider.line_at(row).map(|raw| CellView {
                    text: raw.to_string(),
                    fg: None,
                    bg: None,
                })
            }
            LogLine::Unparsed => None,
        }
    }

    /// Single-role query on one cell
    pub fn data(&mut self, row: usize, column: usize, role: CellRole) -> Option<CellData> {
        let cell = self.cell(row, column)?;
        match role {
            CellRole::Display => Some(CellData::Text(cell.text)),
            CellRole::Foreground => cell.fg.map(CellData::Color),
            CellRole::Background => cell.bg.map(CellData::Color),
        }
    }

    /// Whole row as cell views, one per column
    pub fn row(&mut self, row: usize) -> Option<Vec<CellView>> {
        self.log_line(row)?;
        Some(
            (0..self.column_count())
                .map(|column| self.cell(row, column).unwrap_or_default())
                .collect(),
        )
    }

    fn log_line(&mut self, row: usize) -> Option<&LogLine> {
        let format = self.format.as_ref()?;
        if row >= self.provider.line_count() {
            return None;
        }
        if !self.cache.contains(row) {
            let raw = self.provider.line_at(row)?;
            let line = process_line(&raw, format);
            if !line.is_valid() {
                log::warn!("Line {} does not match: {}", row + 1, raw);
            }
            self.cache.insert(row, line);
        }
        self.cache.get(row)
    }
}

impl std::fmt::Debug for LogModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogModel")
            .field("format", &self.format.as_ref().map(|format| format.name().to_string()))
            .field("columns", &self.columns)
            .field("row_count", &self.row_count())
            .field("cached_rows", &self.cache.len())
            .field("covered_rows", &self.cache.capacity())
            .finish()
    }
}
