use smallvec::SmallVec;

use crate::core::math::degrees_to_radians;
use crate::core::types::ChartBox;
use crate::render::{Color, Font, Renderer};

pub const DEFAULT_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_TEXT_LINE_SPACING: i32 = 5;
pub const DEFAULT_STROKE_WIDTH: f64 = 0.0;
pub const DEFAULT_DOT_WIDTH: f64 = 0.0;

/// Dash pattern in pixels, alternating dash and gap lengths.
pub type DashArray = SmallVec<[f64; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextHorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVerticalAlign {
    #[default]
    Baseline,
    Bottom,
    Middle,
    /// Centers the cap height rather than the full line box.
    MiddleBaseline,
    Top,
    TopBaseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrap {
    #[default]
    None,
    Word,
    Rune,
}

/// Sparse visual attributes.
///
/// Every attribute is optional; `inherit_from` fills unset attributes from a
/// fallback style one field at a time and never overwrites a set one. The
/// `hidden` flag belongs to the style it is set on and is not inherited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub hidden: bool,
    pub padding: Option<ChartBox>,
    pub class_name: Option<String>,

    pub stroke_width: Option<f64>,
    pub stroke_color: Option<Color>,
    pub stroke_dash_array: Option<DashArray>,

    pub dot_color: Option<Color>,
    pub dot_width: Option<f64>,

    pub fill_color: Option<Color>,

    pub font: Option<Font>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,

    pub text_horizontal_align: Option<TextHorizontalAlign>,
    pub text_vertical_align: Option<TextVerticalAlign>,
    pub text_wrap: Option<TextWrap>,
    pub text_line_spacing: Option<i32>,
    pub text_rotation_degrees: Option<f64>,
}

impl Style {
    /// A style that suppresses drawing of whatever it is attached to.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn shown() -> Self {
        Self::default()
    }

    /// `true` when no attribute is set.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_stroke_dash_array(mut self, dash_array: impl IntoIterator<Item = f64>) -> Self {
        self.stroke_dash_array = Some(dash_array.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_dot(mut self, color: Color, width: f64) -> Self {
        self.dot_color = Some(color);
        self.dot_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: ChartBox) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_text_horizontal_align(mut self, align: TextHorizontalAlign) -> Self {
        self.text_horizontal_align = Some(align);
        self
    }

    #[must_use]
    pub fn with_text_vertical_align(mut self, align: TextVerticalAlign) -> Self {
        self.text_vertical_align = Some(align);
        self
    }

    #[must_use]
    pub fn with_text_wrap(mut self, wrap: TextWrap) -> Self {
        self.text_wrap = Some(wrap);
        self
    }

    #[must_use]
    pub fn with_text_rotation_degrees(mut self, degrees: f64) -> Self {
        self.text_rotation_degrees = Some(degrees);
        self
    }

    /// Fills every unset attribute of `self` from `defaults`.
    #[must_use]
    pub fn inherit_from(&self, defaults: &Style) -> Style {
        fn pick<T: Clone>(own: &Option<T>, fallback: &Option<T>) -> Option<T> {
            own.as_ref().or(fallback.as_ref()).cloned()
        }

        Style {
            hidden: self.hidden,
            padding: pick(&self.padding, &defaults.padding),
            class_name: pick(&self.class_name, &defaults.class_name),
            stroke_width: pick(&self.stroke_width, &defaults.stroke_width),
            stroke_color: pick(&self.stroke_color, &defaults.stroke_color),
            stroke_dash_array: pick(&self.stroke_dash_array, &defaults.stroke_dash_array),
            dot_color: pick(&self.dot_color, &defaults.dot_color),
            dot_width: pick(&self.dot_width, &defaults.dot_width),
            fill_color: pick(&self.fill_color, &defaults.fill_color),
            font: pick(&self.font, &defaults.font),
            font_size: pick(&self.font_size, &defaults.font_size),
            font_color: pick(&self.font_color, &defaults.font_color),
            text_horizontal_align: pick(
                &self.text_horizontal_align,
                &defaults.text_horizontal_align,
            ),
            text_vertical_align: pick(&self.text_vertical_align, &defaults.text_vertical_align),
            text_wrap: pick(&self.text_wrap, &defaults.text_wrap),
            text_line_spacing: pick(&self.text_line_spacing, &defaults.text_line_spacing),
            text_rotation_degrees: pick(
                &self.text_rotation_degrees,
                &defaults.text_rotation_degrees,
            ),
        }
    }

    #[must_use]
    pub fn padding(&self) -> ChartBox {
        self.padding.unwrap_or_default()
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color.unwrap_or_default()
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    #[must_use]
    pub fn stroke_dash_array(&self) -> &[f64] {
        self.stroke_dash_array.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn dot_color(&self) -> Color {
        self.dot_color.unwrap_or_default()
    }

    #[must_use]
    pub fn dot_width(&self) -> f64 {
        self.dot_width.unwrap_or(DEFAULT_DOT_WIDTH)
    }

    #[must_use]
    pub fn fill_color(&self) -> Color {
        self.fill_color.unwrap_or_default()
    }

    #[must_use]
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    #[must_use]
    pub fn font_color(&self) -> Color {
        self.font_color.unwrap_or_default()
    }

    #[must_use]
    pub fn text_horizontal_align(&self) -> TextHorizontalAlign {
        self.text_horizontal_align.unwrap_or_default()
    }

    #[must_use]
    pub fn text_vertical_align(&self) -> TextVerticalAlign {
        self.text_vertical_align.unwrap_or_default()
    }

    #[must_use]
    pub fn text_wrap(&self) -> TextWrap {
        self.text_wrap.unwrap_or_default()
    }

    #[must_use]
    pub fn text_line_spacing(&self) -> i32 {
        self.text_line_spacing.unwrap_or(DEFAULT_TEXT_LINE_SPACING)
    }

    #[must_use]
    pub fn text_rotation_degrees(&self) -> f64 {
        self.text_rotation_degrees.unwrap_or_default()
    }

    /// Attributes that affect stroked paths only.
    #[must_use]
    pub fn stroke_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            stroke_dash_array: self.stroke_dash_array.clone(),
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            ..Style::default()
        }
    }

    #[must_use]
    pub fn fill_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            fill_color: self.fill_color,
            ..Style::default()
        }
    }

    /// Dots are filled and outlined in the dot color with a hairline stroke.
    #[must_use]
    pub fn dot_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            fill_color: self.dot_color,
            stroke_color: self.dot_color,
            stroke_width: Some(1.0),
            ..Style::default()
        }
    }

    #[must_use]
    pub fn fill_and_stroke_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            stroke_dash_array: self.stroke_dash_array.clone(),
            fill_color: self.fill_color,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            ..Style::default()
        }
    }

    #[must_use]
    pub fn text_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            font_color: self.font_color,
            font_size: self.font_size,
            font: self.font.clone(),
            text_horizontal_align: self.text_horizontal_align,
            text_vertical_align: self.text_vertical_align,
            text_wrap: self.text_wrap,
            text_line_spacing: self.text_line_spacing,
            text_rotation_degrees: self.text_rotation_degrees,
            ..Style::default()
        }
    }

    /// Pushes every attribute into the renderer's current state.
    ///
    /// Rotation is always cleared first and only re-applied when non-zero.
    pub fn write_to_renderer(&self, renderer: &mut dyn Renderer) {
        renderer.set_class_name(self.class_name());
        renderer.set_stroke_color(self.stroke_color());
        renderer.set_stroke_width(self.stroke_width());
        renderer.set_stroke_dash_array(self.stroke_dash_array());
        renderer.set_fill_color(self.fill_color());
        renderer.set_font(self.font.clone());
        renderer.set_font_color(self.font_color());
        renderer.set_font_size(self.font_size());

        renderer.clear_text_rotation();
        let rotation = self.text_rotation_degrees();
        if rotation != 0.0 {
            renderer.set_text_rotation(degrees_to_radians(rotation));
        }
    }

    pub fn write_drawing_options_to_renderer(&self, renderer: &mut dyn Renderer) {
        renderer.set_class_name(self.class_name());
        renderer.set_stroke_color(self.stroke_color());
        renderer.set_stroke_width(self.stroke_width());
        renderer.set_stroke_dash_array(self.stroke_dash_array());
        renderer.set_fill_color(self.fill_color());
    }

    pub fn write_text_options_to_renderer(&self, renderer: &mut dyn Renderer) {
        renderer.set_class_name(self.class_name());
        renderer.set_font(self.font.clone());
        renderer.set_font_color(self.font_color());
        renderer.set_font_size(self.font_size());
    }

    #[must_use]
    pub fn should_draw_stroke(&self) -> bool {
        !self.stroke_color().is_zero() && self.stroke_width() > 0.0
    }

    #[must_use]
    pub fn should_draw_dot(&self) -> bool {
        !self.dot_color().is_zero() && self.dot_width() > 0.0
    }

    #[must_use]
    pub fn should_draw_fill(&self) -> bool {
        !self.fill_color().is_zero()
    }
}
