//! UI state management structures
//!
//! [`ViewState`] tracks which rows of the table are on screen. It only knows
//! row counts and terminal dimensions; cell contents come from the model as a
//! [`TableSnapshot`] right before each render.

use crate::model::{CellView, LogModel, ModelEvent};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Rows reserved for the header and the status line.
const CHROME_ROWS: u16 = 2;

/// Viewport state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// File path for display
    pub file_path: PathBuf,

    /// Name of the active format
    pub format_name: String,

    /// Index of the first visible row
    pub top_row: usize,

    /// Number of rows the model currently has
    pub row_count: usize,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,

    /// Keep the last row in view as rows arrive
    pub auto_scroll: bool,

    pub status_line: StatusLine,
}

impl ViewState {
    pub fn new(file_path: impl AsRef<Path>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            format_name: String::new(),
            top_row: 0,
            row_count: 0,
            viewport_width,
            viewport_height,
            auto_scroll: false,
            status_line: StatusLine::new(),
        }
    }

    /// Get the filename for display
    pub fn filename(&self) -> String {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }

    /// Table rows that fit between the header and the status line
    pub fn rows_per_page(&self) -> usize {
        usize::from(self.viewport_height.saturating_sub(CHROME_ROWS)).max(1)
    }

    /// Largest `top_row` that still fills the page
    pub fn max_top_row(&self) -> usize {
        self.row_count.saturating_sub(self.rows_per_page())
    }

    /// Rows currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.top_row + self.rows_per_page()).min(self.row_count);
        self.top_row.min(end)..end
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.top_row = self.top_row.saturating_add(lines).min(self.max_top_row());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.top_row = self.top_row.saturating_sub(lines);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.rows_per_page());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.rows_per_page());
    }

    pub fn go_to_start(&mut self) {
        self.top_row = 0;
    }

    pub fn go_to_end(&mut self) {
        self.top_row = self.max_top_row();
    }

    pub fn at_end(&self) -> bool {
        self.top_row >= self.max_top_row()
    }

    /// Flip auto-scroll; turning it on jumps to the end
    pub fn toggle_auto_scroll(&mut self) -> bool {
        self.auto_scroll = !self.auto_scroll;
        if self.auto_scroll {
            self.go_to_end();
        }
        self.auto_scroll
    }

    /// Follow a model notification
    ///
    /// `row_count` is the model's row count after the event.
    pub fn on_model_event(&mut self, event: ModelEvent, row_count: usize) {
        self.row_count = row_count;
        match event {
            ModelEvent::RowsInserted { .. } if self.auto_scroll => self.go_to_end(),
            ModelEvent::RowsInserted { .. } => {}
            ModelEvent::Reset => {
                if self.auto_scroll {
                    self.go_to_end();
                } else {
                    self.top_row = self.top_row.min(self.max_top_row());
                }
            }
        }
    }

    /// Update terminal dimensions
    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            if self.auto_scroll {
                self.go_to_end();
            } else {
                self.top_row = self.top_row.min(self.max_top_row());
            }
        }
        changed
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        let range = self.visible_range();
        self.status_line.format_status_line(
            &self.filename(),
            &self.format_name,
            range,
            self.row_count,
            self.auto_scroll,
        )
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(
        &self,
        filename: &str,
        format_name: &str,
        visible: Range<usize>,
        row_count: usize,
        auto_scroll: bool,
    ) -> String {
        let position = if row_count == 0 {
            "Empty".to_string()
        } else {
            format!("{}-{}/{}", visible.start + 1, visible.end, row_count)
        };

        let mut parts = vec![filename.to_string()];
        if !format_name.is_empty() {
            parts.push(format_name.to_string());
        }
        parts.push(position);
        if auto_scroll {
            parts.push("FOLLOW".to_string());
        }
        if let Some(ref message) = self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }
}

/// Header and visible rows pulled from the model for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    /// Row index of `rows[0]`
    pub first_row: usize,
    pub rows: Vec<Vec<CellView>>,
}

impl TableSnapshot {
    /// Query the model for `range`; populates the model's cache for those rows
    pub fn capture(model: &mut LogModel, range: Range<usize>) -> Self {
        let headers = model.columns().to_vec();
        let first_row = range.start;
        let rows = range.filter_map(|row| model.row(row)).collect();
        Self {
            headers,
            first_row,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LogFormat;
    use crate::line_source::InMemoryLineProvider;
    use std::sync::Arc;

    fn view(height: u16, rows: usize) -> ViewState {
        let mut state = ViewState::new("/var/log/app.log", 80, height);
        state.row_count = rows;
        state
    }

    #[test]
    fn test_rows_per_page_excludes_chrome() {
        assert_eq!(view(24, 0).rows_per_page(), 22);
        assert_eq!(view(1, 0).rows_per_page(), 1);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut state = view(12, 25);
        state.scroll_down(100);
        assert_eq!(state.top_row, 15);
        assert!(state.at_end());
        state.scroll_up(3);
        assert_eq!(state.top_row, 12);
        state.page_up();
        assert_eq!(state.top_row, 2);
        state.page_up();
        assert_eq!(state.top_row, 0);
        state.page_down();
        assert_eq!(state.top_row, 10);
        state.go_to_end();
        assert_eq!(state.visible_range(), 15..25);
        state.go_to_start();
        assert_eq!(state.visible_range(), 0..10);
    }

    #[test]
    fn test_short_table_never_scrolls() {
        let mut state = view(24, 5);
        state.page_down();
        assert_eq!(state.top_row, 0);
        assert_eq!(state.visible_range(), 0..5);
    }

    #[test]
    fn test_rows_inserted_follows_only_with_auto_scroll() {
        let mut state = view(12, 10);
        state.on_model_event(ModelEvent::RowsInserted { start: 10, end: 30 }, 30);
        assert_eq!(state.top_row, 0);

        assert!(state.toggle_auto_scroll());
        assert_eq!(state.top_row, 20);
        state.on_model_event(ModelEvent::RowsInserted { start: 30, end: 35 }, 35);
        assert_eq!(state.top_row, 25);
    }

    #[test]
    fn test_reset_clamps_position() {
        let mut state = view(12, 100);
        state.scroll_down(80);
        state.on_model_event(ModelEvent::Reset, 20);
        assert_eq!(state.top_row, 10);
        state.on_model_event(ModelEvent::Reset, 0);
        assert_eq!(state.top_row, 0);
        assert_eq!(state.visible_range(), 0..0);
    }

    #[test]
    fn test_status_line() {
        let mut state = view(12, 40);
        state.format_name = "app".to_string();
        assert_eq!(state.format_status_line(), "app.log | app | 1-10/40");

        state.toggle_auto_scroll();
        state.status_line.set_message("format reloaded".to_string());
        assert_eq!(
            state.format_status_line(),
            "app.log | app | 31-40/40 | FOLLOW | format reloaded"
        );

        let empty = view(12, 0);
        assert_eq!(empty.format_status_line(), "app.log | Empty");
    }

    #[test]
    fn test_snapshot_captures_visible_rows() {
        let provider = Arc::new(InMemoryLineProvider::from_lines(vec![
            "t1 INFO one",
            "t2 WARN two",
            "garbage",
        ]));
        let format = Arc::new(LogFormat::new(r"^(?<ts>\S+) (?<level>\S+) (?<msg>.*)$"));
        let mut model = LogModel::with_format(provider, format);

        let snapshot = TableSnapshot::capture(&mut model, 1..3);
        assert_eq!(snapshot.headers, vec!["level", "msg"]);
        assert_eq!(snapshot.first_row, 1);
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.rows[0][0].text, "WARN");
        assert_eq!(snapshot.rows[1][0].text, "");
        assert_eq!(snapshot.rows[1][1].text, "garbage");
    }
}
