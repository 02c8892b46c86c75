//! Core types and traits for Statlens chart widgets.
//!
//! This crate provides foundational types used throughout Statlens:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - The [`Widget`] / [`Canvas`] seams and a [`RecordingCanvas`]
//! - Text measurement through [`TextMetrics`]

mod brick;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod text;
pub mod widget;

pub use brick::{Brick, BrickAssertion, BrickVerification, VerificationBuilder};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, Shadow};
pub use event::{Event, MouseButton};
pub use geometry::{CornerRadius, Insets, Point, Rect, Size};
pub use text::{EstimatedMetrics, MonospaceMetrics, TextMetrics};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
