//! Line sources: indexed access to raw log lines plus change notifications.
//!
//! A [`LineProvider`] owns the raw text; consumers only read from it. Every
//! mutation batch is described by a [`LineCountChange`] carrying the new and
//! the previous line count. Growth (`new > old`) means lines were appended and
//! every existing index still holds the same text. Anything else means the
//! content may have been rewritten and consumers must start over.

pub mod file;
pub mod in_memory;
pub mod validation;

pub use file::FileLineProvider;
pub use in_memory::InMemoryLineProvider;
pub use validation::validate_file_path;

use memchr::memchr_iter;
use std::sync::Arc;

/// Read access to an indexed sequence of text lines
///
/// Implementations must be thread-safe: a watcher may append lines while the
/// consumer reads them.
pub trait LineProvider: Send + Sync {
    /// Number of lines currently available
    fn line_count(&self) -> usize;

    /// Line text at `index` (0-based), `None` when out of range
    fn line_at(&self, index: usize) -> Option<Arc<str>>;
}

/// Change event emitted after each mutation batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCountChange {
    pub new_count: usize,
    pub old_count: usize,
}

/// How a consumer has to react to a [`LineCountChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Rows `start..end` were added; earlier rows are unchanged
    Append { start: usize, end: usize },
    /// Content may have changed anywhere; discard everything derived from it
    Reset,
}

impl LineCountChange {
    pub fn new(new_count: usize, old_count: usize) -> Self {
        Self {
            new_count,
            old_count,
        }
    }

    /// Only strict growth counts as an append; an unchanged count is a reset
    pub fn is_append(&self) -> bool {
        self.new_count > self.old_count
    }

    pub fn kind(&self) -> ChangeKind {
        if self.is_append() {
            ChangeKind::Append {
                start: self.old_count,
                end: self.new_count,
            }
        } else {
            ChangeKind::Reset
        }
    }
}

/// Split bytes into lines on `\n`, dropping a trailing `\r` from each line
///
/// Returns the lines and whether the data ended with a newline. A final
/// segment without newline is still returned as a line.
pub(crate) fn split_lines(data: &[u8]) -> (Vec<Arc<str>>, bool) {
    let mut lines = Vec::new();
    let mut start = 0;
    for newline in memchr_iter(b'\n', data) {
        lines.push(decode_line(&data[start..newline]));
        start = newline + 1;
    }
    let complete = start == data.len();
    if !complete {
        lines.push(decode_line(&data[start..]));
    }
    (lines, complete)
}

fn decode_line(bytes: &[u8]) -> Arc<str> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    Arc::from(String::from_utf8_lossy(bytes).as_ref())
}
