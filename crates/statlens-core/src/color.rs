//! Color representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from RGBA values.
    #[must_use]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r, g, b, a)
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }

        let channel = |i: usize| -> Result<f32, ColorParseError> {
            let part = hex
                .get(i..i + 2)
                .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))?;
            u8::from_str_radix(part, 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters in `{0}`")]
    InvalidHex(String),
    /// Invalid string length
    #[error("invalid hex string length {0} (expected 6 or 8)")]
    InvalidLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#ff0000").unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));

        let c2 = Color::from_hex("00ff00").unwrap();
        assert_eq!(c2.g, 1.0);
        assert_eq!(c2.a, 1.0);
    }

    #[test]
    fn test_color_from_hex_with_alpha() {
        let c = Color::from_hex("#ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(
            Color::from_hex("#ff"),
            Err(ColorParseError::InvalidLength(2))
        );
        assert!(matches!(
            Color::from_hex("#gg0000"),
            Err(ColorParseError::InvalidHex(_))
        ));
        // Multi-byte characters must not panic on slicing.
        assert!(Color::from_hex("ééé").is_err());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        assert_eq!(Color::from_hex("#3497ed").unwrap().to_hex(), "#3497ed");
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidLength(3).to_string(),
            "invalid hex string length 3 (expected 6 or 8)"
        );
        assert!(ColorParseError::InvalidHex("zz".into())
            .to_string()
            .contains("zz"));
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::BLACK);
    }
}
