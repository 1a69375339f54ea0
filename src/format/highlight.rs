//! Highlight rules.
//!
//! A [`Highlight`] maps a [`Condition`] on one column's text to a pair of
//! optional colors. Highlights are owned by their [`LogFormat`] and referred
//! to from outside by [`HighlightId`], their position in declaration order.
//!
//! [`LogFormat`]: crate::format::LogFormat

use crate::format::color::OptionalColor;
use crate::format::condition::Condition;
use serde::Deserialize;

/// What a matching highlight colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only the cell of the highlight's column
    #[default]
    Cell,
    /// Every cell of the row
    Row,
}

/// Position of a highlight inside its format's rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HighlightId(pub usize);

/// Conditional coloring rule bound to one column
#[derive(Debug, Clone)]
pub struct Highlight {
    column: usize,
    scope: Scope,
    condition_definition: String,
    condition: Condition,
    fg_color: OptionalColor,
    bg_color: OptionalColor,
}

impl Highlight {
    /// Create a cell-scoped highlight without colors
    pub fn new(column: usize, condition_definition: impl Into<String>) -> Self {
        let condition_definition = condition_definition.into();
        let condition = Condition::compile(&condition_definition);
        Self {
            column,
            scope: Scope::Cell,
            condition_definition,
            condition,
            fg_color: None,
            bg_color: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_fg_color(mut self, color: OptionalColor) -> Self {
        self.fg_color = color;
        self
    }

    pub fn with_bg_color(mut self, color: OptionalColor) -> Self {
        self.bg_color = color;
        self
    }

    /// Replace the condition definition, recompiling only when it changed
    pub fn set_condition_definition(&mut self, definition: impl Into<String>) {
        let definition = definition.into();
        if definition == self.condition_definition {
            return;
        }
        self.condition = Condition::compile(&definition);
        self.condition_definition = definition;
    }

    pub fn condition_definition(&self) -> &str {
        &self.condition_definition
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn fg_color(&self) -> OptionalColor {
        self.fg_color
    }

    pub fn bg_color(&self) -> OptionalColor {
        self.bg_color
    }

    /// Evaluate the condition against the text of this highlight's column
    pub fn matches(&self, text: &str) -> bool {
        self.condition.eval(text)
    }
}
