use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use crate::core::math::{points_to_pixels, radians_to_degrees};
use crate::core::types::{ChartBox, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::font::measure_text_box;
use crate::render::{Color, DEFAULT_DPI, Font, RenderCache, Renderer, Style};

const SVG_NAMESPACES: &str =
    r#"xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#;

/// Family keywords emitted without quoting or a fallback.
const GENERIC_FAMILIES: [&str; 6] = [
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
];

/// Vector renderer that serializes drawing commands into an SVG document.
///
/// Elements are buffered until [`Renderer::save`], so nothing reaches the
/// writer if the caller bails out before saving.
///
/// Output is structurally compatible with the go-chart vector renderer but
/// not byte-identical: path commands are newline separated and the root
/// element carries `viewBox` rather than `viewbox`.
#[derive(Debug)]
pub struct SvgRenderer {
    cache: Arc<RenderCache>,
    dpi: f64,
    width: i32,
    height: i32,
    css: Option<String>,
    nonce: Option<String>,
    state: Style,
    text_theta: f64,
    path: String,
    body: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_cache(width, height, RenderCache::global())
    }

    /// Renderer backed by a caller-owned cache instead of the global one.
    #[must_use]
    pub fn with_cache(width: i32, height: i32, cache: Arc<RenderCache>) -> Self {
        Self {
            cache,
            dpi: DEFAULT_DPI,
            width,
            height,
            css: None,
            nonce: None,
            state: Style::default(),
            text_theta: 0.0,
            path: String::new(),
            body: String::new(),
        }
    }

    /// Embeds a `<style>` block right after the root element.
    #[must_use]
    pub fn with_css(mut self, css: impl Into<String>, nonce: impl Into<String>) -> Self {
        self.css = Some(css.into()).filter(|css| !css.is_empty());
        self.nonce = Some(nonce.into()).filter(|nonce| !nonce.is_empty());
        self
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The complete document as it would be saved.
    #[must_use]
    pub fn document(&self) -> String {
        let width = self.cache.itoa(i64::from(self.width));
        let height = self.cache.itoa(i64::from(self.height));

        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("<svg ");
        out.push_str(SVG_NAMESPACES);
        out.push_str(&format!(
            " viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">\n"
        ));
        if let Some(css) = &self.css {
            out.push_str(r#"<style type="text/css""#);
            if let Some(nonce) = &self.nonce {
                out.push_str(&format!(" nonce=\"{}\"", escape_xml(nonce)));
            }
            out.push_str("><![CDATA[");
            out.push_str(&css.replace("]]>", "]]]]><![CDATA[>"));
            out.push_str("]]></style>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    fn draw_path(&mut self, style: &Style) {
        let path = std::mem::take(&mut self.path);
        self.body.push_str("<path ");
        let dash_array = style.stroke_dash_array();
        if !dash_array.is_empty() {
            let values: Vec<String> = dash_array
                .iter()
                .map(|value| self.cache.ftoa1(*value))
                .collect();
            self.body.push_str(&format!(
                "stroke-dasharray=\"{}\" ",
                values.join(", ")
            ));
        }
        self.body.push_str("d=\"");
        self.body.push_str(&path);
        self.body.push_str("\" ");
        let attributes = self.style_as_svg(style);
        self.body.push_str(&attributes);
        self.body.push_str("/>");
    }

    fn font_family(style: &Style) -> String {
        let family = match style.font() {
            Some(font) if GENERIC_FAMILIES.contains(&font.family()) => font.family().to_owned(),
            Some(font) if !font.family().is_empty() => {
                format!("'{}', sans-serif", escape_xml(font.family()))
            }
            _ => "sans-serif".to_owned(),
        };
        format!("font-family:{family}")
    }

    /// Either a class reference with presence modifiers or an inline style.
    fn style_as_svg(&self, style: &Style) -> String {
        let stroke_color = style.stroke_color();
        let fill_color = style.fill_color();
        let font_color = style.font_color();
        let font_size = style.font_size.unwrap_or_default();

        let class_name = collapse_whitespace(style.class_name());
        if !class_name.is_empty() {
            let mut classes = vec![escape_xml(&class_name)];
            if !stroke_color.is_zero() {
                classes.push("stroke".to_owned());
            }
            if !fill_color.is_zero() {
                classes.push("fill".to_owned());
            }
            if font_size != 0.0 || style.font.is_some() {
                classes.push("text".to_owned());
            }
            return format!("class=\"{}\"", classes.join(" "));
        }

        let mut pieces = Vec::with_capacity(5);
        let stroke_width = style.stroke_width();
        if stroke_width != 0.0 {
            pieces.push(format!(
                "stroke-width:{}",
                self.cache.itoa(stroke_width as i64)
            ));
        } else {
            pieces.push("stroke-width:0".to_owned());
        }

        if stroke_color.is_zero() {
            pieces.push("stroke:none".to_owned());
        } else {
            pieces.push(format!("stroke:{}", self.cache.color_string(stroke_color)));
        }

        if !font_color.is_zero() {
            pieces.push(format!("fill:{}", self.cache.color_string(font_color)));
        } else if !fill_color.is_zero() {
            pieces.push(format!("fill:{}", self.cache.color_string(fill_color)));
        } else {
            pieces.push("fill:none".to_owned());
        }

        if font_size != 0.0 {
            pieces.push(format!(
                "font-size:{}px",
                self.cache.ftoa1(points_to_pixels(self.dpi, font_size))
            ));
        }

        if style.font.is_some() {
            pieces.push(Self::font_family(style));
        }
        format!("style=\"{}\"", pieces.join(";"))
    }

    /// Path commands are newline separated.
    fn begin_command(&mut self) {
        if !self.path.is_empty() {
            self.path.push('\n');
        }
    }

    fn push_point(&mut self, command: &str, x: i32, y: i32) {
        self.begin_command();
        self.path.push_str(command);
        self.path.push_str(&self.cache.itoa(i64::from(x)));
        self.path.push(' ');
        self.path.push_str(&self.cache.itoa(i64::from(y)));
    }
}

impl Renderer for SvgRenderer {
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

    fn move_to(&mut self, x: i32, y: i32) {
        self.push_point("M ", x, y);
    }

    fn line_to(&mut self, x: i32, y: i32) {
        self.push_point("L ", x, y);
    }

    fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.begin_command();
        self.path.push('Q');
        self.path.push_str(&self.cache.itoa(i64::from(cx)));
        self.path.push(',');
        self.path.push_str(&self.cache.itoa(i64::from(cy)));
        self.path.push(' ');
        self.path.push_str(&self.cache.itoa(i64::from(x)));
        self.path.push(',');
        self.path.push_str(&self.cache.itoa(i64::from(y)));
    }

    fn close(&mut self) {
        self.begin_command();
        self.path.push('Z');
    }

    fn stroke(&mut self) {
        let style = self.state.stroke_options();
        self.draw_path(&style);
    }

    fn fill(&mut self) {
        let style = self.state.fill_options();
        self.draw_path(&style);
    }

    fn fill_stroke(&mut self) {
        let style = self.state.fill_and_stroke_options();
        self.draw_path(&style);
    }

    fn circle(&mut self, radius: f64, x: i32, y: i32) {
        let style = self.state.fill_and_stroke_options();
        let attributes = self.style_as_svg(&style);
        self.body.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {attributes}/>",
            self.cache.itoa(i64::from(x)),
            self.cache.itoa(i64::from(y)),
            self.cache.itoa(radius as i64),
        ));
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
        let style = self.state.text_options();
        let sx = self.cache.itoa(i64::from(x));
        let sy = self.cache.itoa(i64::from(y));

        self.body.push_str(&format!("<text x=\"{sx}\" y=\"{sy}\" "));
        let attributes = self.style_as_svg(&style);
        self.body.push_str(&attributes);
        if self.text_theta != 0.0 {
            let degrees = self.cache.ftoa2(radians_to_degrees(self.text_theta));
            self.body
                .push_str(&format!(" transform=\"rotate({degrees},{sx},{sy})\""));
        }
        self.body.push('>');
        self.body.push_str(&escape_xml(&collapse_whitespace(body)));
        self.body.push_str("</text>");
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

    fn save(&mut self, writer: &mut dyn Write) -> ChartResult<()> {
        let document = self.document();
        debug!(
            width = self.width,
            height = self.height,
            bytes = document.len(),
            "saving svg document"
        );
        writer.write_all(document.as_bytes())?;
        Ok(())
    }
}

fn checked_viewport(width: i32, height: i32) -> ChartResult<Viewport> {
    let viewport = Viewport::new(
        u32::try_from(width).unwrap_or_default(),
        u32::try_from(height).unwrap_or_default(),
    );
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

/// SVG renderer provider backed by the global cache.
pub fn svg(width: i32, height: i32) -> ChartResult<Box<dyn Renderer>> {
    checked_viewport(width, height)?;
    Ok(Box::new(SvgRenderer::new(width, height)))
}

/// SVG renderer provider that embeds `css`, optionally with a CSP `nonce`.
pub fn svg_with_css(
    css: impl Into<String>,
    nonce: impl Into<String>,
) -> impl Fn(i32, i32) -> ChartResult<Box<dyn Renderer>> {
    let css = css.into();
    let nonce = nonce.into();
    move |width, height| {
        checked_viewport(width, height)?;
        Ok(Box::new(
            SvgRenderer::new(width, height).with_css(css.clone(), nonce.clone()),
        ))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, collapse_whitespace, escape_xml, svg};
    use crate::error::ChartError;
    use crate::render::{Color, Font, Renderer};

    fn saved(renderer: &mut SvgRenderer) -> String {
        let mut out = Vec::new();
        renderer.save(&mut out).expect("save");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn empty_document_frames_the_surface() {
        let mut r = SvgRenderer::new(200, 100);
        assert_eq!(
            saved(&mut r),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" viewBox=\"0 0 200 100\" width=\"200\" height=\"100\">\n</svg>"
        );
    }

    #[test]
    fn stroke_flushes_the_pending_path() {
        let mut r = SvgRenderer::new(10, 10);
        r.set_stroke_color(Color::RED);
        r.set_stroke_width(2.0);
        r.set_stroke_dash_array(&[5.0, 2.0]);
        r.move_to(0, 0);
        r.line_to(5, 5);
        r.quad_curve_to(6, 7, 8, 9);
        r.close();
        r.stroke();
        r.move_to(1, 1);
        r.fill();
        let doc = saved(&mut r);
        assert!(doc.contains(
            "<path stroke-dasharray=\"5.0, 2.0\" d=\"M 0 0\nL 5 5\nQ6,7 8,9\nZ\" style=\"stroke-width:2;stroke:rgba(255,0,0,1);fill:none\"/>"
        ));
        assert!(doc.contains("<path d=\"M 1 1\" style=\"stroke-width:0;stroke:none;fill:none\"/>"));
    }

    #[test]
    fn class_mode_suppresses_inline_style() {
        let mut r = SvgRenderer::new(10, 10);
        r.set_class_name("  axis   line ");
        r.set_stroke_color(Color::BLACK);
        r.move_to(0, 0);
        r.stroke();
        let doc = saved(&mut r);
        assert!(doc.contains("class=\"axis line stroke\""));
        assert!(!doc.contains("style="));
    }

    #[test]
    fn text_prefers_font_color_and_rotates() {
        let mut r = SvgRenderer::new(10, 10);
        r.set_font(Some(Font::monospace()));
        r.set_font_size(10.0);
        r.set_font_color(Color::BLUE);
        r.set_fill_color(Color::RED);
        r.set_text_rotation(std::f64::consts::FRAC_PI_2);
        r.text("a  <b>", 3, 4);
        let doc = saved(&mut r);
        assert!(doc.contains(
            "<text x=\"3\" y=\"4\" style=\"stroke-width:0;stroke:none;fill:rgba(0,0,255,1);font-size:12.8px;font-family:monospace\" transform=\"rotate(90.00,3,4)\">a &lt;b&gt;</text>"
        ));
    }

    #[test]
    fn css_block_cannot_close_cdata_early() {
        let mut r = SvgRenderer::new(1, 1).with_css("a > b { x: \"]]>\" }", "abc");
        let doc = saved(&mut r);
        assert!(doc.contains("<style type=\"text/css\" nonce=\"abc\"><![CDATA[a > b { x: \"]]]]><![CDATA[>\" }]]></style>"));
    }

    #[test]
    fn measure_without_font_is_zero_and_rotation_swaps_axes() {
        let mut r = SvgRenderer::new(10, 10);
        assert!(r.measure_text("hello").is_zero());
        r.set_font(Some(Font::monospace()));
        r.set_font_size(10.0);
        let flat = r.measure_text("10.00");
        assert_eq!((flat.width(), flat.height()), (39, 12));
        r.set_text_rotation(std::f64::consts::FRAC_PI_2);
        let turned = r.measure_text("10.00");
        assert_eq!((turned.width(), turned.height()), (12, 39));
    }

    #[test]
    fn reset_keeps_font_and_rotation() {
        let mut r = SvgRenderer::new(10, 10);
        r.set_font(Some(Font::monospace()));
        r.set_stroke_color(Color::RED);
        r.set_text_rotation(1.0);
        r.reset_style();
        assert!(r.state.font.is_some());
        assert_eq!(r.state.stroke_color, None);
        assert_eq!(r.text_theta, 1.0);
    }

    #[test]
    fn helpers_escape_and_collapse() {
        assert_eq!(collapse_whitespace(" a \t b\n"), "a b");
        assert_eq!(escape_xml("<a href='x'>&"), "&lt;a href=&apos;x&apos;&gt;&amp;");
    }

    #[test]
    fn provider_rejects_empty_surfaces() {
        assert!(svg(10, 10).is_ok());
        assert!(matches!(
            svg(0, 10),
            Err(ChartError::InvalidViewport { width: 0, height: 10 })
        ));
        assert!(matches!(
            svg(5, -1),
            Err(ChartError::InvalidViewport { width: 5, height: 0 })
        ));
    }
}
