//! Log formats: how raw lines become columns, and how columns get colored.
//!
//! A [`LogFormat`] owns a compiled pattern whose named capture groups define
//! the columns, plus an ordered list of [`Highlight`] rules. Formats are
//! usually loaded from TOML files through [`loader`].

pub mod color;
pub mod condition;
pub mod highlight;
pub mod loader;
pub mod log_format;

pub use color::{Color, OptionalColor};
pub use condition::{CompareOp, Condition};
pub use highlight::{Highlight, HighlightId, Scope};
pub use loader::{load_format, parse_format};
pub use log_format::LogFormat;
