//! Row parser: raw line + format -> [`LogLine`].
//!
//! Parsing is a pure function of its inputs. A line the pattern does not match
//! is not an error; it becomes [`LogLine::Unparsed`] and the table shows its raw
//! text in the last column.

use crate::format::{LogFormat, OptionalColor};

/// One column's value for one row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Captured text with surrounding whitespace trimmed
    pub text: String,
    pub fg_color: OptionalColor,
    pub bg_color: OptionalColor,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg_color: None,
            bg_color: None,
        }
    }
}

/// Derived row: either one cell per column, or the unparsed marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Unparsed,
    Parsed(Vec<Cell>),
}

impl LogLine {
    pub fn is_valid(&self) -> bool {
        matches!(self, LogLine::Parsed(_))
    }

    /// Cells of a parsed line; empty for an unparsed one
    pub fn cells(&self) -> &[Cell] {
        match self {
            LogLine::Parsed(cells) => cells,
            LogLine::Unparsed => &[],
        }
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells().get(column)
    }
}

/// Split `raw` into cells according to `format`, without colors
///
/// Cell `i` takes the text of the capture group backing column `i`; a group
/// that did not participate in the match yields an empty cell.
pub fn parse(raw: &str, format: &LogFormat) -> LogLine {
    let Some(pattern) = format.pattern() else {
        return LogLine::Unparsed;
    };
    if format.column_count() == 0 {
        return LogLine::Unparsed;
    }
    let Some(captures) = pattern.captures(raw) else {
        return LogLine::Unparsed;
    };

    let cells = (0..format.column_count())
        .map(|column| {
            let text = format
                .column_group(column)
                .and_then(|group| captures.get(group))
                .map_or("", |m| m.as_str());
            Cell::new(text.trim())
        })
        .collect();
    LogLine::Parsed(cells)
}
