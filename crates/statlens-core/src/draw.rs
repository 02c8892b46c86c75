//! Draw commands: the backend-agnostic output of widget painting.

use crate::geometry::{CornerRadius, Point, Rect};
use crate::widget::TextStyle;
use crate::Color;
use serde::{Deserialize, Serialize};

/// Box style for filled rectangles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color
    pub fill: Option<Color>,
    /// Drop shadow
    pub shadow: Option<Shadow>,
}

impl BoxStyle {
    /// Create a fill-only style.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            shadow: None,
        }
    }

    /// Create a shadow-only style.
    #[must_use]
    pub const fn shadow(shadow: Shadow) -> Self {
        Self {
            fill: None,
            shadow: Some(shadow),
        }
    }
}

/// Shadow configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    /// Shadow color
    pub color: Color,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.0, 0.0, 0.0, 0.3),
            offset_x: 0.0,
            offset_y: 2.0,
            blur: 4.0,
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text, `position` is the top-left of the line box
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Apply opacity
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child command
        child: Box<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a rounded rectangle.
    #[must_use]
    pub const fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::fill(color),
        }
    }

    /// Create a shadow cast by a rounded rectangle.
    #[must_use]
    pub const fn shadow(bounds: Rect, radius: f32, shadow: Shadow) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::shadow(shadow),
        }
    }

    /// Wrap with opacity.
    #[must_use]
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self::Opacity {
            alpha,
            child: Box::new(self),
        }
    }

    /// Effective opacity and the innermost command.
    #[must_use]
    pub fn flatten(&self) -> (f32, &Self) {
        match self {
            Self::Opacity { alpha, child } => {
                let (inner, cmd) = child.flatten();
                (alpha * inner, cmd)
            }
            other => (1.0, other),
        }
    }
}
