//! Point details popup for statistics charts.
//!
//! Shows the timestamp of the hovered x point followed by one line per series
//! (name on the left, value on the right in the series color). The width is
//! fixed at construction from the widest text the chart can produce; the
//! height follows the per-line fade alphas so hidden series collapse smoothly.

use crate::chart_data::ChartData;
use crate::format::{format_timestamp, format_value};
use crate::style::PointDetailsStyle;
use statlens_core::{
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, EstimatedMetrics,
    Event, MouseButton, Point, Rect, Size, TextMetrics, TypeId, Widget,
};
use std::any::Any;
use std::sync::Arc;

/// Message emitted when a clickable popup is clicked (zoom into the point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointDetailsClicked {
    /// X index the popup was showing
    pub x_index: usize,
}

/// One rendered series line.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailLine {
    id: i32,
    name: String,
    value: String,
    color: Color,
    value_width: f32,
    alpha: f32,
}

impl DetailLine {
    /// Series id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Formatted value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Color the value is drawn in.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Measured width of the value text.
    #[must_use]
    pub const fn value_width(&self) -> f32 {
        self.value_width
    }

    /// Fade alpha in [0, 1].
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Tooltip-like popup with the details of one chart point.
#[derive(Debug)]
pub struct PointDetails<M: TextMetrics = EstimatedMetrics> {
    chart: Arc<ChartData>,
    style: PointDetailsStyle,
    metrics: M,
    zoom_enabled: bool,
    x_index: Option<usize>,
    header: String,
    lines: Vec<DetailLine>,
    alpha: f32,
    width: f32,
    size: Size,
    origin: Point,
    inner_rect: Rect,
    text_rect: Rect,
    transparent_for_mouse: bool,
    pressed: bool,
    repaint_requested: bool,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
}

impl PointDetails<EstimatedMetrics> {
    /// Create a popup with the default style and estimated text metrics.
    #[must_use]
    pub fn new(chart: Arc<ChartData>, max_absolute_value: f64, zoom_enabled: bool) -> Self {
        Self::with_style(
            chart,
            max_absolute_value,
            zoom_enabled,
            PointDetailsStyle::default(),
            EstimatedMetrics::default(),
        )
    }
}

impl<M: TextMetrics> PointDetails<M> {
    /// Create a popup with an explicit style and text metrics.
    #[must_use]
    pub fn with_style(
        chart: Arc<ChartData>,
        max_absolute_value: f64,
        zoom_enabled: bool,
        style: PointDetailsStyle,
        metrics: M,
    ) -> Self {
        let width = calculate_width(&chart, max_absolute_value, &style, &metrics);
        let mut details = Self {
            chart,
            style,
            metrics,
            zoom_enabled,
            x_index: None,
            header: String::new(),
            lines: Vec::new(),
            alpha: 1.0,
            width,
            size: Size::ZERO,
            origin: Point::ORIGIN,
            inner_rect: Rect::default(),
            text_rect: Rect::default(),
            transparent_for_mouse: true,
            pressed: false,
            repaint_requested: false,
            accessible_name_value: None,
            test_id_value: None,
        };
        details.resize(Size::new(width, 0.0));
        details.resize_height();
        details
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Show the point at `index`, or record that no point is active.
    ///
    /// Lines are rebuilt fully visible; the host re-applies legend fades.
    /// `None` keeps the previous header and lines so a fading-out popup keeps
    /// its content. An index past the chart is ignored.
    pub fn set_x_index(&mut self, index: Option<usize>) {
        let Some(index) = index else {
            self.x_index = None;
            return;
        };
        let Some(&timestamp) = self.chart.x().get(index) else {
            tracing::warn!(index, len = self.chart.len(), "x index out of range");
            return;
        };
        self.x_index = Some(index);
        self.header = format_timestamp(timestamp, &self.style.dates);

        let mut has_positive_values = false;
        self.lines = self
            .chart
            .lines()
            .iter()
            .map(|line| {
                let y = line.y[index];
                has_positive_values |= y > 0.0;
                let value = format_value(y, &self.style.numbers);
                DetailLine {
                    id: line.id,
                    name: line.name.clone(),
                    value_width: self.metrics.text_width(&value, &self.style.text),
                    value,
                    color: line.color,
                    alpha: 1.0,
                }
            })
            .collect();

        let clickable = self.zoom_enabled && has_positive_values;
        self.transparent_for_mouse = !clickable;
        if !clickable {
            self.pressed = false;
        }
        self.resize_height();
        self.repaint_requested = true;
        tracing::debug!(
            index,
            lines = self.lines.len(),
            clickable,
            "point details rebuilt"
        );
    }

    /// Active x index.
    #[must_use]
    pub const fn x_index(&self) -> Option<usize> {
        self.x_index
    }

    /// Fade the line with `id`; unknown ids are ignored.
    pub fn set_line_alpha(&mut self, id: i32, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let mut found = false;
        for line in self.lines.iter_mut().filter(|line| line.id == id) {
            line.alpha = alpha;
            found = true;
        }
        if found {
            tracing::trace!(id, alpha, "line alpha updated");
        } else {
            tracing::trace!(id, "line alpha for unknown id ignored");
        }
        self.repaint_requested = true;
        self.resize_height();
    }

    /// Set the opacity of the whole popup.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.repaint_requested = true;
    }

    /// Opacity of the whole popup.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Header text of the active point.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Lines of the active point.
    #[must_use]
    pub fn lines(&self) -> &[DetailLine] {
        &self.lines
    }

    /// Current size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Card rectangle (size minus padding), widget-local.
    #[must_use]
    pub const fn inner_rect(&self) -> Rect {
        self.inner_rect
    }

    /// Text rectangle (card minus margins), widget-local.
    #[must_use]
    pub const fn text_rect(&self) -> Rect {
        self.text_rect
    }

    /// Whether pointer events pass through the popup.
    #[must_use]
    pub const fn is_transparent_for_mouse(&self) -> bool {
        self.transparent_for_mouse
    }

    /// Return and clear the pending repaint request.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Apply a new size and recompute the derived rectangles.
    ///
    /// A null size falls back to a square of the computed width.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        let full = if size.is_null() {
            Rect::from_size(Size::square(self.width))
        } else {
            Rect::from_size(size)
        };
        self.inner_rect = full - self.style.padding;
        self.text_rect = self.inner_rect - self.style.margins;
    }

    /// Fit the height to the header and every line slot of the chart.
    pub fn resize_height(&mut self) {
        let height = self.line_y_at(self.chart.lines().len()) + self.style.margins.bottom;
        self.resize(Size::new(self.size.width, height));
    }

    /// Widget-local top of the line slot at `index`.
    ///
    /// Each earlier slot contributes its alpha times one line step; slots
    /// past the current lines count as fully visible.
    #[must_use]
    pub fn line_y_at(&self, index: usize) -> f32 {
        let step = self.metrics.line_height(&self.style.text) + self.style.mid_line_space;
        let lines_height: f32 = (0..index)
            .map(|i| self.lines.get(i).map_or(1.0, DetailLine::alpha) * step)
            .sum();
        self.text_rect.y
            + self.metrics.line_height(&self.style.header)
            + self.style.margins.bottom
            + lines_height.ceil()
    }
}

fn calculate_width<M: TextMetrics>(
    chart: &ChartData,
    max_absolute_value: f64,
    style: &PointDetailsStyle,
    metrics: &M,
) -> f32 {
    let value_width =
        metrics.text_width(&format_value(max_absolute_value, &style.numbers), &style.text);
    let name_width = chart
        .lines()
        .iter()
        .map(|line| metrics.text_width(&line.name, &style.text))
        .fold(0.0, f32::max);
    let header_width = chart
        .x()
        .iter()
        .map(|&x| metrics.text_width(&format_timestamp(x, &style.dates), &style.header))
        .fold(0.0, f32::max);

    value_width
        + style.margins.horizontal()
        + style.padding.horizontal()
        // Gap between names and values.
        + style.padding.left
        + name_width.max(header_width + style.padding.left)
}

impl<M: TextMetrics + 'static> Widget for PointDetails<M> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.origin = bounds.origin();
        LayoutResult { size: self.size }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.header.is_empty() {
            return;
        }

        canvas.push_opacity(self.alpha);

        let inner = self.inner_rect.translate(self.origin);
        canvas.draw_shadow(inner, self.style.corner_radius, &self.style.shadow);
        canvas.fill_rounded_rect(inner, self.style.corner_radius, self.style.background);

        let text_rect = self.text_rect.translate(self.origin);
        canvas.draw_text(&self.header, text_rect.origin(), &self.style.header);

        for (i, line) in self.lines.iter().enumerate() {
            let opacity = line.alpha * line.alpha;
            if opacity <= 0.0 {
                continue;
            }
            let y = self.origin.y + self.line_y_at(i);
            canvas.push_opacity(opacity);
            canvas.draw_text(&line.name, Point::new(text_rect.x, y), &self.style.text);
            canvas.draw_text(
                &line.value,
                Point::new(text_rect.right() - line.value_width, y),
                &self.style.text.with_color(line.color),
            );
            canvas.pop_opacity();
        }

        canvas.pop_opacity();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.transparent_for_mouse {
            return None;
        }

        let area = self.inner_rect.translate(self.origin);
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } if area.contains_point(position) => {
                self.pressed = true;
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = std::mem::take(&mut self.pressed);
                if was_pressed && area.contains_point(position) {
                    self.x_index.map(|x_index| {
                        Box::new(PointDetailsClicked { x_index }) as Box<dyn Any + Send>
                    })
                } else {
                    None
                }
            }
            Event::MouseLeave => {
                self.pressed = false;
                None
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.transparent_for_mouse
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or_else(|| (!self.header.is_empty()).then_some(self.header.as_str()))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Tooltip
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.size).translate(self.origin)
    }
}

impl<M: TextMetrics> Brick for PointDetails<M> {
    fn brick_name(&self) -> &'static str {
        "PointDetails"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::OpacityInRange, BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut builder = BrickVerification::collect();

        let in_range = |a: f32| (0.0..=1.0).contains(&a);
        let bad_line = self.lines.iter().find(|line| !in_range(line.alpha));
        builder.check(
            BrickAssertion::OpacityInRange,
            in_range(self.alpha) && bad_line.is_none(),
            || match bad_line {
                Some(line) => format!("line {} alpha {} outside [0, 1]", line.id, line.alpha),
                None => format!("popup alpha {} outside [0, 1]", self.alpha),
            },
        );
        builder.check(
            BrickAssertion::TextVisible,
            self.x_index.is_none() || !self.header.is_empty(),
            || "header is empty for the active point".to_string(),
        );

        builder.finish()
    }
}
