//! Widget trait and related types.
//!
//! Widgets follow a verify-measure-layout-paint cycle:
//!
//! 1. **Verify**: Check all Brick assertions pass
//! 2. **Measure**: Compute intrinsic size given constraints
//! 3. **Layout**: Position self within allocated bounds
//! 4. **Paint**: Generate draw commands for rendering
//!
//! # Examples
//!
//! ```
//! use statlens_core::{TextStyle, FontWeight, Color};
//!
//! let header = TextStyle {
//!     size: 13.0,
//!     color: Color::BLACK,
//!     weight: FontWeight::Semibold,
//! };
//! assert_ne!(header, TextStyle::default());
//! ```

use crate::brick::Brick;
use crate::constraints::Constraints;
use crate::draw::Shadow;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types (used for diffing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Brick + Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position the widget within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events, returning a message for the host if any.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Check if this widget is interactive (can receive pointer events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend. Opacity pushes
/// nest multiplicatively until the matching pop.
pub trait Canvas {
    /// Draw a filled rectangle with uniformly rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Draw the drop shadow of a rounded rectangle.
    fn draw_shadow(&mut self, rect: Rect, radius: f32, shadow: &Shadow);

    /// Draw text with its line box's top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Push an opacity layer.
    fn push_opacity(&mut self, alpha: f32);

    /// Pop the opacity layer.
    fn pop_opacity(&mut self);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl TextStyle {
    /// Same style drawn in another color.
    #[must_use]
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Light (300)
    Light,
    /// Normal (400)
    #[default]
    Normal,
    /// Medium (500)
    Medium,
    /// Semibold (600)
    Semibold,
    /// Bold (700)
    Bold,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Tooltip or popup with contextual details
    Tooltip,
}
