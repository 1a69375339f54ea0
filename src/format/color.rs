//! Highlight colors.
//!
//! A [`Color`] is a plain RGB triple. Highlights carry an [`OptionalColor`] for
//! foreground and background; `None` means "leave the view's default".

use crate::error::{Result, RltableError};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Named colors accepted in format files, in addition to hex notation.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("red", Color::rgb(0xcc, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0x99, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xcc)),
    ("yellow", Color::rgb(0xcc, 0xcc, 0x00)),
    ("orange", Color::rgb(0xff, 0x88, 0x00)),
    ("magenta", Color::rgb(0xcc, 0x00, 0xcc)),
    ("cyan", Color::rgb(0x00, 0xcc, 0xcc)),
    ("gray", Color::rgb(0x88, 0x88, 0x88)),
    ("grey", Color::rgb(0x88, 0x88, 0x88)),
];

/// RGB color used by highlight rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color that may be unset
pub type OptionalColor = Option<Color>;

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb` or one of the known color names (case-insensitive)
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|(_, color)| *color)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                // #abc expands to #aabbcc
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
                Some(Self::rgb(r * 0x11, g * 0x11, b * 0x11))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = RltableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| RltableError::config(format!("Unknown color: {s}")))
    }
}

impl TryFrom<String> for Color {
    type Error = RltableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
