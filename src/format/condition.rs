//! Highlight conditions.
//!
//! A condition is a predicate over one cell's text, compiled once from a short
//! textual definition of the form `<operator> <operand>`:
//!
//! | definition        | matches when the cell text...          |
//! |-------------------|----------------------------------------|
//! | `== ERROR`        | equals `ERROR`                         |
//! | `!= INFO`         | differs from `INFO`                    |
//! | `contains fail`   | contains `fail`                        |
//! | `~ ^E\d+`         | matches the regular expression         |
//! | `> 500`, `<= 0.5` | parses as a number and compares        |
//!
//! Operands may be wrapped in double quotes to keep surrounding spaces.

use crate::error::{Result, RltableError};
use regex::Regex;

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Less => lhs < rhs,
            CompareOp::LessOrEqual => lhs <= rhs,
            CompareOp::Greater => lhs > rhs,
            CompareOp::GreaterOrEqual => lhs >= rhs,
        }
    }
}

/// Compiled predicate over a single cell's text
#[derive(Debug, Clone)]
pub enum Condition {
    /// Never matches. Produced when a definition fails to compile.
    Never,
    Equals(String),
    NotEquals(String),
    Contains(String),
    Matches(Regex),
    Compare { op: CompareOp, value: f64 },
}

/// Operator spellings, longest first so that `<=` wins over `<`.
const OPERATORS: &[&str] = &["contains", "==", "!=", "<=", ">=", "<", ">", "~"];

impl Condition {
    /// Parse a definition, reporting why it is malformed
    pub fn parse(definition: &str) -> Result<Self> {
        let trimmed = definition.trim();
        let op = OPERATORS
            .iter()
            .find(|op| trimmed.starts_with(**op))
            .ok_or_else(|| RltableError::invalid_condition(definition, "unknown operator"))?;
        let operand = unquote(trimmed[op.len()..].trim());

        // `contains` must be followed by whitespace, not glued to the operand
        if *op == "contains" && !trimmed[op.len()..].starts_with(char::is_whitespace) {
            return Err(RltableError::invalid_condition(definition, "unknown operator"));
        }

        let condition = match *op {
            "==" => Condition::Equals(operand.to_string()),
            "!=" => Condition::NotEquals(operand.to_string()),
            "contains" => Condition::Contains(operand.to_string()),
            "~" => Condition::Matches(
                Regex::new(operand)
                    .map_err(|e| RltableError::invalid_condition(definition, e.to_string()))?,
            ),
            _ => {
                let value = operand.parse::<f64>().map_err(|_| {
                    RltableError::invalid_condition(
                        definition,
                        format!("`{operand}` is not a number"),
                    )
                })?;
                let op = match *op {
                    "<" => CompareOp::Less,
                    "<=" => CompareOp::LessOrEqual,
                    ">" => CompareOp::Greater,
                    _ => CompareOp::GreaterOrEqual,
                };
                Condition::Compare { op, value }
            }
        };
        Ok(condition)
    }

    /// Compile a definition; malformed definitions yield [`Condition::Never`]
    pub fn compile(definition: &str) -> Self {
        match Self::parse(definition) {
            Ok(condition) => condition,
            Err(err) => {
                log::warn!("{err}; highlight will never match");
                Condition::Never
            }
        }
    }

    /// Evaluate the condition against a cell's text
    pub fn eval(&self, text: &str) -> bool {
        match self {
            Condition::Never => false,
            Condition::Equals(expected) => text == expected,
            Condition::NotEquals(expected) => text != expected,
            Condition::Contains(needle) => text.contains(needle.as_str()),
            Condition::Matches(regex) => regex.is_match(text),
            Condition::Compare { op, value } => text
                .trim()
                .parse::<f64>()
                .map(|lhs| op.apply(lhs, *value))
                .unwrap_or(false),
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Condition::Never)
    }
}

fn unquote(operand: &str) -> &str {
    operand
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(operand)
}
