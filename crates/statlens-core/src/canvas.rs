//! Canvas implementations for rendering.

use crate::draw::{DrawCommand, Shadow};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, Point, Rect};

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (send commands to a backend)
///
/// Commands recorded while an opacity below 1.0 is active are wrapped in a
/// single [`DrawCommand::Opacity`] carrying the accumulated alpha.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    opacity_stack: Vec<f32>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Accumulated opacity of all pushed layers.
    #[must_use]
    pub fn current_opacity(&self) -> f32 {
        self.opacity_stack.iter().product()
    }

    /// Get the opacity stack depth.
    #[must_use]
    pub fn opacity_depth(&self) -> usize {
        self.opacity_stack.len()
    }

    /// Text commands as `(content, position, style, effective opacity)`.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &TextStyle, f32)> {
        self.commands.iter().filter_map(|cmd| match cmd.flatten() {
            (alpha, DrawCommand::Text {
                content,
                position,
                style,
            }) => Some((content.as_str(), *position, style, alpha)),
            _ => None,
        })
    }

    fn record(&mut self, command: DrawCommand) {
        let alpha = self.current_opacity();
        if alpha < 1.0 {
            self.commands.push(command.with_opacity(alpha));
        } else {
            self.commands.push(command);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.record(DrawCommand::rounded_rect(rect, radius, color));
    }

    fn draw_shadow(&mut self, rect: Rect, radius: f32, shadow: &Shadow) {
        self.record(DrawCommand::shadow(rect, radius, *shadow));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.opacity_stack.push(alpha.clamp(0.0, 1.0));
    }

    fn pop_opacity(&mut self) {
        self.opacity_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_new() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        assert_eq!(canvas.command_count(), 0);
        assert_eq!(canvas.current_opacity(), 1.0);
    }

    #[test]
    fn test_fill_rounded_rect_records_command() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 3.0, Color::WHITE);
        assert_eq!(canvas.command_count(), 1);
        assert!(matches!(canvas.commands()[0], DrawCommand::Rect { .. }));
    }

    #[test]
    fn test_opacity_wraps_commands() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_opacity(0.5);
        canvas.fill_rounded_rect(Rect::default(), 4.0, Color::WHITE);
        canvas.pop_opacity();
        canvas.fill_rounded_rect(Rect::default(), 4.0, Color::WHITE);

        match &canvas.commands()[0] {
            DrawCommand::Opacity { alpha, .. } => assert_eq!(*alpha, 0.5),
            other => panic!("Expected Opacity, got {other:?}"),
        }
        assert!(matches!(canvas.commands()[1], DrawCommand::Rect { .. }));
    }

    #[test]
    fn test_nested_opacity_multiplies() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_opacity(0.5);
        canvas.push_opacity(0.4);
        assert!((canvas.current_opacity() - 0.2).abs() < 1e-6);
        assert_eq!(canvas.opacity_depth(), 2);
        canvas.draw_text("a", Point::ORIGIN, &TextStyle::default());
        let (_, _, _, alpha) = canvas.texts().next().unwrap();
        assert!((alpha - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_opacity(3.0);
        assert_eq!(canvas.current_opacity(), 1.0);
    }

    #[test]
    fn test_texts_iterates_text_commands_only() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_shadow(Rect::default(), 2.0, &Shadow::default());
        canvas.draw_text("hello", Point::new(1.0, 2.0), &TextStyle::default());
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, "hello");
        assert_eq!(texts[0].1, Point::new(1.0, 2.0));
        assert_eq!(texts[0].3, 1.0);
    }
}
