mod cache;
mod color;
pub mod draw;
mod font;
mod null_renderer;
mod style;
mod svg;

pub use cache::{CacheStats, RenderCache};
pub use color::{Color, DEFAULT_COLORS, alpha_bucket, default_color};
pub use font::{Font, FontFace, MonospaceFace, TrueTypeFace};
pub use null_renderer::{NullRenderer, RecordedText};
pub use style::{
    DEFAULT_FONT_SIZE, DEFAULT_TEXT_LINE_SPACING, DashArray, Style, TextHorizontalAlign,
    TextVerticalAlign, TextWrap,
};
pub use svg::{SvgRenderer, svg, svg_with_css};

use std::io::Write;

use crate::core::types::ChartBox;
use crate::error::ChartResult;

/// Points-to-pixels resolution used when none is configured.
pub const DEFAULT_DPI: f64 = 92.0;

/// Stateful drawing surface.
///
/// Style setters change the state applied to the next primitive. Path
/// builders accumulate into a pending path that `stroke`, `fill` or
/// `fill_stroke` flush as one primitive. Text rotation persists until
/// `clear_text_rotation` is called.
pub trait Renderer {
    /// Clears the drawing state, keeping the font and text rotation.
    fn reset_style(&mut self);

    fn dpi(&self) -> f64;
    fn set_dpi(&mut self, dpi: f64);

    fn set_class_name(&mut self, class_name: &str);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f64);
    fn set_stroke_dash_array(&mut self, dash_array: &[f64]);

    fn move_to(&mut self, x: i32, y: i32);
    fn line_to(&mut self, x: i32, y: i32);
    fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32);
    fn close(&mut self);

    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_stroke(&mut self);

    fn circle(&mut self, radius: f64, x: i32, y: i32);

    fn set_font(&mut self, font: Option<Font>);
    fn set_font_color(&mut self, color: Color);
    fn set_font_size(&mut self, size: f64);

    fn text(&mut self, body: &str, x: i32, y: i32);

    /// Bounding box of `body` in the current text state, anchored at the origin.
    fn measure_text(&self, body: &str) -> ChartBox;

    fn set_text_rotation(&mut self, radians: f64);
    fn clear_text_rotation(&mut self);

    /// Finalizes the document and writes it to `writer`.
    fn save(&mut self, writer: &mut dyn Write) -> ChartResult<()>;
}
