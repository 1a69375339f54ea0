//! Format file loading.
//!
//! A format file is a TOML document:
//!
//! ```toml
//! name = "app"
//! pattern = '^(?<ts>\S+) (?<level>\S+) (?<msg>.*)$'
//!
//! [[highlights]]
//! column = "level"
//! condition = "== ERROR"
//! bg = "red"
//!
//! [[highlights]]
//! column = "msg"
//! scope = "row"
//! condition = "contains panic"
//! fg = "#ffffff"
//! ```
//!
//! Malformed patterns and conditions are not load errors; they degrade the
//! same way as formats built in code. Unknown columns and colors are errors.

use crate::error::{Result, RltableError};
use crate::format::color::Color;
use crate::format::highlight::{Highlight, Scope};
use crate::format::log_format::LogFormat;
use serde::Deserialize;
use std::path::Path;

/// TOML format file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FormatFile {
    /// Display name; defaults to the file stem
    #[serde(default)]
    pub name: Option<String>,

    /// Regular expression with named capture groups
    pub pattern: String,

    /// Highlight rules in priority order
    #[serde(default)]
    pub highlights: Vec<HighlightEntry>,
}

/// One `[[highlights]]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HighlightEntry {
    pub column: ColumnRef,

    #[serde(default)]
    pub scope: Scope,

    pub condition: String,

    #[serde(default)]
    pub fg: Option<Color>,

    #[serde(default)]
    pub bg: Option<Color>,
}

/// Column addressed by name or by zero-based index
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl FormatFile {
    /// Build the runtime format, resolving column references
    pub fn into_format(self) -> Result<LogFormat> {
        let mut format = LogFormat::new(&self.pattern);
        if let Some(name) = self.name {
            format = format.with_name(name);
        }

        for entry in self.highlights {
            let column = match entry.column {
                ColumnRef::Index(index) => index,
                ColumnRef::Name(name) => format.column_index(&name).ok_or_else(|| {
                    RltableError::config(format!(
                        "Highlight `{}` refers to unknown column `{}`",
                        entry.condition, name
                    ))
                })?,
            };
            format.add_highlight(
                Highlight::new(column, entry.condition)
                    .with_scope(entry.scope)
                    .with_fg_color(entry.fg)
                    .with_bg_color(entry.bg),
            );
        }

        Ok(format)
    }
}

/// Parse a format from TOML text
pub fn parse_format(text: &str) -> Result<LogFormat> {
    let file: FormatFile =
        toml::from_str(text).map_err(|e| RltableError::config(format!("Invalid TOML: {e}")))?;
    file.into_format()
}

/// Load a format from a TOML file on disk
pub fn load_format(path: &Path) -> Result<LogFormat> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        RltableError::file_error(
            format!("Failed to read format file: {}", path.display()),
            e,
        )
    })?;

    let file: FormatFile = toml::from_str(&text).map_err(|e| {
        RltableError::config(format!("Invalid TOML in {}: {e}", path.display()))
    })?;
    let has_name = file.name.is_some();
    let mut format = file.into_format()?;
    if !has_name {
        if let Some(stem) = path.file_stem() {
            format = format.with_name(stem.to_string_lossy());
        }
    }

    log::info!(
        "Loaded format `{}` from {} ({} columns, {} highlights)",
        format.name(),
        path.display(),
        format.column_count(),
        format.highlights().len()
    );
    Ok(format)
}
