//! # rltable - Columnar Terminal Log Viewer
//!
//! Splits every line of a log file into columns with a regular expression and
//! colors cells with ordered highlight rules.
//!
//! ## Features
//!
//! - **Regex Formats**: Named capture groups become table columns
//! - **Highlight Rules**: Per-cell or whole-row colors, first matching rule wins
//! - **Lazy Rows**: Lines are parsed and colored on first access, then cached
//! - **Follow Mode**: Appended lines show up as new rows; rewrites reset the table
//! - **Terminal UI**: Scrollable ratatui table with a status line
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`format`] - Formats, highlight rules, conditions and format files
//! - [`line_source`] - Indexed line access with change notifications
//! - [`parser`] / [`resolver`] - Raw line to cells, cells to colors
//! - [`model`] - Row cache and the table projection over it
//! - [`ui`] / [`input`] - Terminal table view and key bindings
//! - [`app`] - Application core and component coordination

// Core modules
pub mod error;
pub mod format;
pub mod line_source;
pub mod parser;
pub mod resolver;

// Table projection
pub mod model;

// Binary shell
pub mod app;
pub mod input;
pub mod ui;

// Re-export commonly used types for convenience
pub use error::{Result, RltableError};

pub use app::{AppConfig, Application};
pub use format::{load_format, Color, Condition, Highlight, LogFormat, Scope};
pub use line_source::{FileLineProvider, InMemoryLineProvider, LineCountChange, LineProvider};
pub use model::{LogModel, ModelEvent};
pub use parser::{parse, Cell, LogLine};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
