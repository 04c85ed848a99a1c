use std::io::Write;
use std::sync::Arc;

use crate::core::types::ChartBox;
use crate::error::ChartResult;
use crate::render::font::measure_text_box;
use crate::render::{Color, DEFAULT_DPI, Font, RenderCache, Renderer, Style};

/// A drawn text label as seen by [`NullRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedText {
    pub body: String,
    pub x: i32,
    pub y: i32,
}

/// Headless renderer used by tests and layout-only callers.
///
/// Measures text exactly like [`SvgRenderer`](crate::render::SvgRenderer)
/// but produces no output; it only counts primitives and records text
/// placements so layout can be asserted on.
#[derive(Debug)]
pub struct NullRenderer {
    cache: Arc<RenderCache>,
    dpi: f64,
    state: Style,
    text_theta: f64,
    pending_path: bool,
    pub path_count: usize,
    pub circle_count: usize,
    pub texts: Vec<RecordedText>,
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NullRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(RenderCache::global())
    }

    #[must_use]
    pub fn with_cache(cache: Arc<RenderCache>) -> Self {
        Self {
            cache,
            dpi: DEFAULT_DPI,
            state: Style::default(),
            text_theta: 0.0,
            pending_path: false,
            path_count: 0,
            circle_count: 0,
            texts: Vec::new(),
        }
    }

    /// Current drawing state, as the last setters left it.
    #[must_use]
    pub fn state(&self) -> &Style {
        &self.state
    }

    fn flush_path(&mut self) {
        if std::mem::take(&mut self.pending_path) {
            self.path_count += 1;
        }
    }
}

impl Renderer for NullRenderer {
    fn reset_style(&mut self) {
        self.state = Style {
            font: self.state.font.take(),
            ..Style::default()
        };
    }

    fn dpi(&self) -> f64 {
        self.dpi
    }

    fn set_dpi(&mut self, dpi: f64) {
        self.dpi = dpi;
    }

    fn set_class_name(&mut self, class_name: &str) {
        self.state.class_name = Some(class_name.to_owned()).filter(|name| !name.is_empty());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = Some(color);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = Some(color);
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.state.stroke_width = Some(width);
    }

    fn set_stroke_dash_array(&mut self, dash_array: &[f64]) {
        self.state.stroke_dash_array =
            (!dash_array.is_empty()).then(|| dash_array.iter().copied().collect());
    }

    fn move_to(&mut self, _x: i32, _y: i32) {
        self.pending_path = true;
    }

    fn line_to(&mut self, _x: i32, _y: i32) {
        self.pending_path = true;
    }

    fn quad_curve_to(&mut self, _cx: i32, _cy: i32, _x: i32, _y: i32) {
        self.pending_path = true;
    }

    fn close(&mut self) {}

    fn stroke(&mut self) {
        self.flush_path();
    }

    fn fill(&mut self) {
        self.flush_path();
    }

    fn fill_stroke(&mut self) {
        self.flush_path();
    }

    fn circle(&mut self, _radius: f64, _x: i32, _y: i32) {
        self.circle_count += 1;
    }

    fn set_font(&mut self, font: Option<Font>) {
        self.state.font = font;
    }

    fn set_font_color(&mut self, color: Color) {
        self.state.font_color = Some(color);
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = Some(size);
    }

    fn text(&mut self, body: &str, x: i32, y: i32) {
        self.texts.push(RecordedText {
            body: body.to_owned(),
            x,
            y,
        });
    }

    fn measure_text(&self, body: &str) -> ChartBox {
        measure_text_box(&self.cache, &self.state, self.dpi, self.text_theta, body)
    }

    fn set_text_rotation(&mut self, radians: f64) {
        self.text_theta = radians;
    }

    fn clear_text_rotation(&mut self) {
        self.text_theta = 0.0;
    }

    fn save(&mut self, _writer: &mut dyn Write) -> ChartResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NullRenderer;
    use crate::render::{Font, Renderer};

    #[test]
    fn counts_flushed_paths_only() {
        let mut r = NullRenderer::new();
        r.stroke();
        r.move_to(0, 0);
        r.line_to(1, 1);
        r.stroke();
        r.circle(2.0, 0, 0);
        assert_eq!(r.path_count, 1);
        assert_eq!(r.circle_count, 1);
    }

    #[test]
    fn measures_like_a_real_renderer() {
        let mut r = NullRenderer::new();
        r.set_font(Some(Font::monospace()));
        r.set_font_size(10.0);
        let measured = r.measure_text("10.00");
        assert_eq!((measured.width(), measured.height()), (39, 12));
        r.text("x", 1, 2);
        assert_eq!(r.texts[0].body, "x");
    }
}
