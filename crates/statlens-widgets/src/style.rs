//! Style configuration for the point details popup.
//!
//! Every field has a default, so a config document only needs the values it
//! overrides:
//!
//! ```
//! use statlens_widgets::PointDetailsStyle;
//!
//! let style = PointDetailsStyle::from_toml_str(r#"
//!     mid_line_space = 4.0
//!
//!     [dates]
//!     long = "%d.%m %H:%M"
//!     short = "%d.%m.%Y"
//! "#).expect("valid style");
//! assert_eq!(style.mid_line_space, 4.0);
//! ```

use crate::format::{DateFormats, NumberFormat};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use statlens_core::{Color, FontWeight, Insets, Shadow, TextStyle};
use thiserror::Error;

/// Errors raised while loading or validating a style.
#[derive(Debug, Error)]
pub enum StyleError {
    /// TOML syntax or schema error
    #[error("invalid TOML style: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or schema error
    #[error("invalid JSON style: {0}")]
    Json(#[from] serde_json::Error),

    /// A length that must not be negative is
    #[error("{field} must not be negative")]
    Negative {
        /// Offending field
        field: &'static str,
    },

    /// A date pattern contains unknown specifiers
    #[error("invalid {which} date format `{pattern}`")]
    DateFormat {
        /// `long` or `short`
        which: &'static str,
        /// The rejected pattern
        pattern: String,
    },

    /// UTC offset beyond ±24h
    #[error("UTC offset of {0} minutes is out of range")]
    UtcOffset(i32),
}

/// Look of the point details popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointDetailsStyle {
    /// Space around the card, taken by the shadow
    pub padding: Insets,
    /// Space between the card edge and its text
    pub margins: Insets,
    /// Vertical gap between value lines
    pub mid_line_space: f32,
    /// Style of names and values; its color is used for names
    pub text: TextStyle,
    /// Style of the timestamp header
    pub header: TextStyle,
    /// Card background
    pub background: Color,
    /// Card corner radius
    pub corner_radius: f32,
    /// Card shadow
    pub shadow: Shadow,
    /// Header timestamp patterns
    pub dates: DateFormats,
    /// Value rendering
    pub numbers: NumberFormat,
}

impl Default for PointDetailsStyle {
    fn default() -> Self {
        Self {
            padding: Insets::uniform(6.0),
            margins: Insets::new(10.0, 8.0, 10.0, 8.0),
            mid_line_space: 6.0,
            text: TextStyle {
                size: 13.0,
                color: Color::BLACK,
                weight: FontWeight::Normal,
            },
            header: TextStyle {
                size: 13.0,
                color: Color::BLACK,
                weight: FontWeight::Semibold,
            },
            background: Color::WHITE,
            corner_radius: 6.0,
            shadow: Shadow {
                color: Color::rgba(0.0, 0.0, 0.0, 0.2),
                offset_x: 0.0,
                offset_y: 1.0,
                blur: 6.0,
            },
            dates: DateFormats::default(),
            numbers: NumberFormat::default(),
        }
    }
}

impl PointDetailsStyle {
    /// Load a style from TOML and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, StyleError> {
        let style: Self = toml::from_str(source)?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style from JSON and validate it.
    pub fn from_json_str(source: &str) -> Result<Self, StyleError> {
        let style: Self = serde_json::from_str(source)?;
        style.validate()?;
        Ok(style)
    }

    /// Reject negative lengths, broken date patterns and impossible offsets.
    pub fn validate(&self) -> Result<(), StyleError> {
        let lengths = [
            ("padding", self.padding.is_non_negative()),
            ("margins", self.margins.is_non_negative()),
            ("mid_line_space", self.mid_line_space >= 0.0),
            ("corner_radius", self.corner_radius >= 0.0),
            ("text.size", self.text.size >= 0.0),
            ("header.size", self.header.size >= 0.0),
        ];
        if let Some((field, _)) = lengths.into_iter().find(|(_, ok)| !ok) {
            return Err(StyleError::Negative { field });
        }

        for (which, pattern) in [("long", &self.dates.long), ("short", &self.dates.short)] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(StyleError::DateFormat {
                    which,
                    pattern: pattern.clone(),
                });
            }
        }

        if self.dates.offset().is_none() {
            return Err(StyleError::UtcOffset(self.dates.utc_offset_minutes));
        }
        Ok(())
    }
}
