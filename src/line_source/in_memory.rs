//! In-memory line provider
//!
//! Holds its lines in a `Vec` behind a lock. Used for piped input, for
//! embedding, and as the line source in tests.

use crate::line_source::{split_lines, LineCountChange, LineProvider};
use parking_lot::RwLock;
use std::sync::Arc;

/// Line provider backed by an in-memory vector of lines
#[derive(Debug, Default)]
pub struct InMemoryLineProvider {
    lines: RwLock<Vec<Arc<str>>>,
}

impl InMemoryLineProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw bytes, splitting on `\n`
    pub fn from_bytes(content: &[u8]) -> Self {
        let (lines, _) = split_lines(content);
        Self {
            lines: RwLock::new(lines),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: RwLock::new(lines.into_iter().map(|l| Arc::from(l.as_ref())).collect()),
        }
    }

    /// Append lines at the end
    pub fn append_lines<I, S>(&self, lines: I) -> LineCountChange
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = self.lines.write();
        let old_count = guard.len();
        guard.extend(lines.into_iter().map(|l| Arc::from(l.as_ref())));
        LineCountChange::new(guard.len(), old_count)
    }

    /// Replace the whole content
    pub fn replace_lines<I, S>(&self, lines: I) -> LineCountChange
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = self.lines.write();
        let old_count = guard.len();
        *guard = lines.into_iter().map(|l| Arc::from(l.as_ref())).collect();
        LineCountChange::new(guard.len(), old_count)
    }

    pub fn clear(&self) -> LineCountChange {
        let mut guard = self.lines.write();
        let old_count = guard.len();
        guard.clear();
        LineCountChange::new(0, old_count)
    }
}

impl LineProvider for InMemoryLineProvider {
    fn line_count(&self) -> usize {
        self.lines.read().len()
    }

    fn line_at(&self, index: usize) -> Option<Arc<str>> {
        self.lines.read().get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_content() -> Vec<u8> {
        b"line1\nline2\nline3\nline4\n".to_vec()
    }

    #[test]
    fn test_from_bytes() {
        let provider = InMemoryLineProvider::from_bytes(&create_test_content());
        assert_eq!(provider.line_count(), 4);
        assert_eq!(provider.line_at(0).as_deref(), Some("line1"));
        assert_eq!(provider.line_at(3).as_deref(), Some("line4"));
    }

    #[test]
    fn test_line_at_out_of_bounds() {
        let provider = InMemoryLineProvider::from_bytes(&create_test_content());
        assert!(provider.line_at(4).is_none());
        assert!(provider.line_at(999).is_none());
    }

    #[test]
    fn test_single_line_no_newline() {
        let provider = InMemoryLineProvider::from_bytes(b"single line without newline");
        assert_eq!(provider.line_count(), 1);
        assert_eq!(
            provider.line_at(0).as_deref(),
            Some("single line without newline")
        );
    }

    #[test]
    fn test_empty_content() {
        let provider = InMemoryLineProvider::from_bytes(b"");
        assert_eq!(provider.line_count(), 0);
        assert!(provider.line_at(0).is_none());
    }

    #[test]
    fn test_append_reports_growth() {
        let provider = InMemoryLineProvider::from_lines(["a", "b"]);
        let change = provider.append_lines(["c"]);
        assert_eq!(change, LineCountChange::new(3, 2));
        assert!(change.is_append());
        assert_eq!(provider.line_at(2).as_deref(), Some("c"));
    }

    #[test]
    fn test_empty_append_is_not_growth() {
        let provider = InMemoryLineProvider::from_lines(["a"]);
        let change = provider.append_lines(Vec::<String>::new());
        assert_eq!(change, LineCountChange::new(1, 1));
        assert!(!change.is_append());
    }

    #[test]
    fn test_replace_and_clear() {
        let provider = InMemoryLineProvider::from_lines(["a", "b", "c"]);
        let change = provider.replace_lines(["x"]);
        assert_eq!(change, LineCountChange::new(1, 3));
        assert_eq!(provider.line_at(0).as_deref(), Some("x"));

        let change = provider.clear();
        assert_eq!(change, LineCountChange::new(0, 1));
        assert_eq!(provider.line_count(), 0);
    }
}
