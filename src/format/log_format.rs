//! Log format: a named-capture pattern plus ordered highlight rules.

use crate::format::highlight::{Highlight, HighlightId};
use regex::Regex;

/// Pattern used by [`LogFormat::plain`]: the whole line in a single column.
const PLAIN_PATTERN: &str = r"^(?<anchor>)(?<line>.*)$";

/// Compiled line format
///
/// The columns are the pattern's named capture groups in group order, minus
/// the first named group, which only anchors the pattern. A pattern that fails
/// to compile, or that has no named group besides the anchor, produces a
/// format with zero columns: every line is then reported as unparsed.
#[derive(Debug, Clone)]
pub struct LogFormat {
    name: String,
    pattern_source: String,
    pattern: Option<Regex>,
    columns: Vec<String>,
    /// Capture group index backing each column
    column_groups: Vec<usize>,
    highlights: Vec<Highlight>,
}

impl LogFormat {
    pub fn new(pattern: &str) -> Self {
        let compiled = match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                log::warn!("Invalid format pattern `{pattern}`: {err}");
                None
            }
        };

        let (columns, column_groups) = match &compiled {
            Some(regex) => Self::named_columns(regex),
            None => (Vec::new(), Vec::new()),
        };
        if compiled.is_some() && columns.is_empty() {
            log::warn!("Format pattern `{pattern}` defines no columns");
        }

        Self {
            name: "default".to_string(),
            pattern_source: pattern.to_string(),
            pattern: compiled,
            columns,
            column_groups,
            highlights: Vec::new(),
        }
    }

    /// Single-column format showing each raw line as is
    pub fn plain() -> Self {
        Self::new(PLAIN_PATTERN).with_name("plain")
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn named_columns(regex: &Regex) -> (Vec<String>, Vec<usize>) {
        regex
            .capture_names()
            .enumerate()
            .filter_map(|(group, name)| name.map(|name| (name.to_string(), group)))
            .skip(1)
            .unzip()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern_source(&self) -> &str {
        &self.pattern_source
    }

    /// Compiled pattern, `None` when the pattern is malformed
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Capture group index holding the text of `column`
    pub fn column_group(&self, column: usize) -> Option<usize> {
        self.column_groups.get(column).copied()
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Append a highlight after the existing ones and return its id
    pub fn add_highlight(&mut self, highlight: Highlight) -> HighlightId {
        if highlight.column() >= self.column_count() {
            log::warn!(
                "Highlight `{}` targets column {} but format `{}` has {} columns",
                highlight.condition_definition(),
                highlight.column(),
                self.name,
                self.column_count()
            );
        }
        self.highlights.push(highlight);
        HighlightId(self.highlights.len() - 1)
    }

    pub fn highlight(&self, id: HighlightId) -> Option<&Highlight> {
        self.highlights.get(id.0)
    }

    pub fn highlight_mut(&mut self, id: HighlightId) -> Option<&mut Highlight> {
        self.highlights.get_mut(id.0)
    }

    pub fn remove_highlight(&mut self, id: HighlightId) -> Option<Highlight> {
        (id.0 < self.highlights.len()).then(|| self.highlights.remove(id.0))
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::plain()
    }
}
