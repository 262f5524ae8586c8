//! Validated hex paint colors.
//!
//! The color picker hands over raw strings; only `#RGB`, `#RRGGBB` and
//! `#RRGGBBAA` forms are accepted. The spelling as entered is kept so the
//! renderer can pass it straight to the 2D context, while [`HexColor::rgba`]
//! expands it into channels for raster export.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLOR;

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    #[error("color `{0}` must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// A paint color in CSS hex notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_owned())
    }
}

impl HexColor {
    /// Validate `raw` against `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorError`] describing the first rule the input breaks.
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let Some(digits) = raw.strip_prefix('#') else {
            return Err(ColorError::MissingHash(raw.to_owned()));
        };
        if !matches!(digits.len(), 3 | 6 | 8) {
            return Err(ColorError::BadLength(raw.to_owned()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(raw.to_owned()));
        }
        Ok(Self(raw.to_owned()))
    }

    /// The color exactly as it was entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand to straight (non-premultiplied) RGBA channels.
    ///
    /// Short and long forms without an alpha pair are fully opaque.
    #[must_use]
    pub fn rgba(&self) -> [u8; 4] {
        let digits = self.0.as_bytes().get(1..).unwrap_or_default();
        match digits.len() {
            3 => {
                let [r, g, b] = [digits[0], digits[1], digits[2]].map(|d| nibble(d) * 0x11);
                [r, g, b, 0xff]
            }
            6 => [pair(&digits[0..2]), pair(&digits[2..4]), pair(&digits[4..6]), 0xff],
            8 => [pair(&digits[0..2]), pair(&digits[2..4]), pair(&digits[4..6]), pair(&digits[6..8])],
            _ => [0, 0, 0, 0],
        }
    }
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

fn pair(digits: &[u8]) -> u8 {
    (nibble(digits[0]) << 4) | nibble(digits[1])
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
