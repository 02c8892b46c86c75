//! Text measurement.
//!
//! Widgets size themselves from text metrics supplied by the host. The
//! rendering backend usually owns real font shaping, so measurement sits
//! behind [`TextMetrics`]; two backend-free implementations are provided.

use crate::widget::{FontWeight, TextStyle};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Measures single-line text.
pub trait TextMetrics: Send + Sync {
    /// Natural (unwrapped) advance width of `text`.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;

    /// Height of one line of text, including leading.
    fn line_height(&self, style: &TextStyle) -> f32;
}

/// Approximate metrics derived from the font size.
///
/// Each terminal column of the text advances `size * advance_factor`, with
/// heavier weights slightly wider. Line height is `size * line_spacing`
/// rounded up to a whole pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedMetrics {
    /// Advance of one column relative to the font size
    pub advance_factor: f32,
    /// Line height relative to the font size
    pub line_spacing: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            advance_factor: 0.6,
            line_spacing: 1.2,
        }
    }
}

impl EstimatedMetrics {
    const fn weight_factor(weight: FontWeight) -> f32 {
        match weight {
            FontWeight::Light => 0.97,
            FontWeight::Normal => 1.0,
            FontWeight::Medium => 1.02,
            FontWeight::Semibold => 1.04,
            FontWeight::Bold => 1.06,
        }
    }
}

// Rounds up to whole pixels, ignoring float noise from the factor products.
fn ceil_px(value: f32) -> f32 {
    (value - 1e-3).ceil().max(0.0)
}

impl TextMetrics for EstimatedMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        let columns = UnicodeWidthStr::width(text) as f32;
        ceil_px(columns * style.size * self.advance_factor * Self::weight_factor(style.weight))
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        ceil_px(style.size * self.line_spacing)
    }
}

/// Fixed-cell metrics: every column advances `advance`, every line is
/// `line_height` tall, whatever the style. Suits cell-based backends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceMetrics {
    /// Width of one column
    pub advance: f32,
    /// Height of one line
    pub line_height: f32,
}

impl MonospaceMetrics {
    /// Create monospace metrics.
    #[must_use]
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, _style: &TextStyle) -> f32 {
        UnicodeWidthStr::width(text) as f32 * self.advance
    }

    fn line_height(&self, _style: &TextStyle) -> f32 {
        self.line_height
    }
}
