//! Color representation and parsing utilities.
//!
//! This module provides the [`Color`] struct, an HSLA color as used by the
//! blog's palettes, and [`ColorParseError`] for handling errors during color
//! string parsing.
//!
//! Colors are stored in HSL form because every palette entry in Verso is
//! authored as a CSS `hsl()` string; rendering a palette back out therefore
//! reproduces the authored value. Hex strings are accepted on input and
//! converted to HSL.
//!
//! # Examples
//!
//! ```
//! use verso_core::types::Color;
//! use std::str::FromStr;
//!
//! let accent = Color::hsl(197.0, 60.0, 50.0);
//! assert_eq!(accent.to_string(), "hsl(197, 60%, 50%)");
//!
//! let parsed = Color::from_str("hsl(197, 60%, 50%)").unwrap();
//! assert_eq!(parsed, accent);
//! ```

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string is not a recognized `hsl()`, `hsla()`, or hex color form.
    #[error("Invalid color string format: '{0}'. Expected hsl(), hsla(), or #hex.")]
    InvalidFormat(String),

    /// A hex color string has an incorrect number of digits after the `#`.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 4, 6, or 8 characters after '#'.")]
    InvalidHexLength(String),

    /// An invalid hexadecimal digit was encountered within a component.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// A numeric component inside an `hsl()`/`hsla()` string failed to parse.
    #[error("Invalid component '{0}' in hsl color string")]
    InvalidComponent(String),
}

/// A color in HSLA form.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `lightness` are
/// percentages `[0, 100]`, and `alpha` is `[0.0, 1.0]`. Values outside these
/// ranges are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation as a percentage, `[0, 100]`.
    pub saturation: f32,
    /// Lightness as a percentage, `[0, 100]`.
    pub lightness: f32,
    /// Alpha (opacity), `[0.0, 1.0]`. `1.0` is fully opaque.
    pub alpha: f32,
}

impl Color {
    /// Creates a fully opaque color from hue, saturation, and lightness.
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::hsla(hue, saturation, lightness, 1.0)
    }

    /// Creates a color from hue, saturation, lightness, and alpha.
    /// Out-of-range components are clamped.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Parses a hex color string (`#RGB`, `#RGBA`, `#RRGGBB`, or `#RRGGBBAA`)
    /// and converts it to HSL form.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidFormat(hex.to_string()))?;

        let component = |part: &str| -> Result<u8, ColorParseError> {
            let widened = if part.len() == 1 {
                format!("{part}{part}")
            } else {
                part.to_string()
            };
            u8::from_str_radix(&widened, 16).map_err(|source| ColorParseError::InvalidHexDigit {
                input_str: hex.to_string(),
                source,
            })
        };

        let (r, g, b, a) = match digits.len() {
            3 => (
                component(&digits[0..1])?,
                component(&digits[1..2])?,
                component(&digits[2..3])?,
                255,
            ),
            4 => (
                component(&digits[0..1])?,
                component(&digits[1..2])?,
                component(&digits[2..3])?,
                component(&digits[3..4])?,
            ),
            6 => (
                component(&digits[0..2])?,
                component(&digits[2..4])?,
                component(&digits[4..6])?,
                255,
            ),
            8 => (
                component(&digits[0..2])?,
                component(&digits[2..4])?,
                component(&digits[4..6])?,
                component(&digits[6..8])?,
            ),
            _ => return Err(ColorParseError::InvalidHexLength(hex.to_string())),
        };

        let (hue, saturation, lightness) =
            rgb_to_hsl(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        Ok(Self::hsla(hue, saturation, lightness, a as f32 / 255.0))
    }
}

/// Converts RGB components in `[0.0, 1.0]` to (hue degrees, saturation %, lightness %).
fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f32::EPSILON {
        return (0.0, 0.0, l * 100.0);
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if (max - r).abs() < f32::EPSILON {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f32::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h * 60.0, s * 100.0, l * 100.0)
}

impl fmt::Display for Color {
    /// Renders the color as a CSS `hsl()` string, or `hsla()` when the color
    /// is not fully opaque. Integral components print without a decimal point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.alpha - 1.0).abs() < f32::EPSILON {
            write!(
                f,
                "hsl({}, {}%, {}%)",
                self.hue, self.saturation, self.lightness
            )
        } else {
            write!(
                f,
                "hsla({}, {}%, {}%, {})",
                self.hue, self.saturation, self.lightness, self.alpha
            )
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }

        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("hsla(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("hsl(") {
            (rest, false)
        } else {
            return Err(ColorParseError::InvalidFormat(s.to_string()));
        };

        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorParseError::InvalidFormat(s.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::InvalidFormat(s.to_string()));
        }

        let number = |part: &str| -> Result<f32, ColorParseError> {
            part.parse::<f32>()
                .map_err(|_| ColorParseError::InvalidComponent(part.to_string()))
        };
        let percent = |part: &str| -> Result<f32, ColorParseError> {
            let stripped = part
                .strip_suffix('%')
                .ok_or_else(|| ColorParseError::InvalidComponent(part.to_string()))?;
            number(stripped)
        };

        let hue = number(parts[0])?;
        let saturation = percent(parts[1])?;
        let lightness = percent(parts[2])?;
        let alpha = if has_alpha { number(parts[3])? } else { 1.0 };

        Ok(Self::hsla(hue, saturation, lightness, alpha))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hsl_displays_as_css_string() {
        assert_eq!(
            Color::hsl(197.0, 60.0, 50.0).to_string(),
            "hsl(197, 60%, 50%)"
        );
        assert_eq!(Color::hsl(0.0, 0.0, 100.0).to_string(), "hsl(0, 0%, 100%)");
    }

    #[test]
    fn hsla_displays_alpha() {
        assert_eq!(
            Color::hsla(347.0, 87.0, 60.0, 0.5).to_string(),
            "hsla(347, 87%, 60%, 0.5)"
        );
    }

    #[test]
    fn parse_round_trips_hsl_string() {
        let parsed: Color = "hsl(197, 60%, 50%)".parse().unwrap();
        assert_eq!(parsed, Color::hsl(197.0, 60.0, 50.0));
        assert_eq!(parsed.to_string(), "hsl(197, 60%, 50%)");
    }

    #[test]
    fn parse_rejects_missing_percent() {
        let result: Result<Color, _> = "hsl(197, 60, 50)".parse();
        assert!(matches!(result, Err(ColorParseError::InvalidComponent(_))));
    }

    #[test]
    fn parse_rejects_unknown_format() {
        let result: Result<Color, _> = "rgb(1, 2, 3)".parse();
        assert!(matches!(result, Err(ColorParseError::InvalidFormat(_))));
    }

    #[test]
    fn hex_white_and_black_convert_to_hsl() {
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::hsl(0.0, 0.0, 100.0));
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::hsl(0.0, 0.0, 0.0));
    }

    #[test]
    fn hex_short_form_widens_digits() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::hsl(0.0, 0.0, 100.0));
    }

    #[test]
    fn hex_invalid_length_errors() {
        assert!(matches!(
            Color::from_hex("#ffff0"),
            Err(ColorParseError::InvalidHexLength(_))
        ));
    }

    #[test]
    fn construction_clamps_components() {
        let c = Color::hsla(400.0, 150.0, -10.0, 2.0);
        assert_eq!(c.hue, 40.0);
        assert_eq!(c.saturation, 100.0);
        assert_eq!(c.lightness, 0.0);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn serde_uses_css_string_form() {
        let c = Color::hsl(190.0, 23.0, 95.0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#""hsl(190, 23%, 95%)""#);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
