//! Composite drawing helpers built on [`Renderer`] primitives.
//!
//! Each helper writes the style it needs, draws, then resets the renderer
//! style so state never leaks into the next caller.

use crate::core::range::Range;
use crate::core::series::Series;
use crate::core::types::ChartBox;
use crate::render::{Renderer, Style, TextHorizontalAlign, TextVerticalAlign, TextWrap};

/// Measures `text` under the text attributes of `style`.
pub fn measure_text(renderer: &mut dyn Renderer, text: &str, style: &Style) -> ChartBox {
    style.text_options().write_to_renderer(renderer);
    let measured = renderer.measure_text(text);
    renderer.reset_style();
    measured
}

/// Draws `text` with its baseline at `(x, y)`.
pub fn text(renderer: &mut dyn Renderer, text: &str, x: i32, y: i32, style: &Style) {
    style.text_options().write_to_renderer(renderer);
    renderer.text(text, x, y);
    renderer.reset_style();
}

/// Fills and strokes the outline of `bounds`.
pub fn box_outline(renderer: &mut dyn Renderer, bounds: ChartBox, style: &Style) {
    style.fill_and_stroke_options().write_to_renderer(renderer);
    renderer.move_to(bounds.left, bounds.top);
    renderer.line_to(bounds.right, bounds.top);
    renderer.line_to(bounds.right, bounds.bottom);
    renderer.line_to(bounds.left, bounds.bottom);
    renderer.line_to(bounds.left, bounds.top);
    renderer.fill_stroke();
    renderer.reset_style();
}

/// Wraps `text` to `bounds` and draws each line aligned within it.
pub fn text_within(renderer: &mut dyn Renderer, text: &str, bounds: ChartBox, style: &Style) {
    style.text_options().write_to_renderer(renderer);
    let lines = wrap_fit(renderer, text, bounds.width(), style);
    let lines_box = measure_lines(renderer, &lines, style);

    let mut y = match style.text_vertical_align {
        Some(TextVerticalAlign::Bottom | TextVerticalAlign::Baseline) => {
            bounds.bottom - lines_box.height()
        }
        Some(TextVerticalAlign::Middle | TextVerticalAlign::MiddleBaseline) => {
            bounds.top + ((bounds.height() - lines_box.height()) >> 1)
        }
        _ => bounds.top,
    };

    let rotated = style.text_rotation_degrees() != 0.0;
    for line in &lines {
        let line_box = renderer.measure_text(line);
        let tx = match style.text_horizontal_align() {
            TextHorizontalAlign::Center => bounds.left + ((bounds.width() - line_box.width()) >> 1),
            TextHorizontalAlign::Right => bounds.right - line_box.width(),
            TextHorizontalAlign::Left => bounds.left,
        };
        let ty = if rotated { y } else { y + line_box.height() };
        renderer.text(line, tx, ty);
        y += line_box.height() + style.text_line_spacing();
    }
    renderer.reset_style();
}

/// Splits `text` into lines no wider than `width` per the style's wrap mode.
pub fn wrap_fit(renderer: &mut dyn Renderer, text: &str, width: i32, style: &Style) -> Vec<String> {
    match style.text_wrap() {
        TextWrap::Word => wrap_fit_word(renderer, text, width, style),
        TextWrap::Rune => wrap_fit_rune(renderer, text, width, style),
        TextWrap::None => vec![text.to_owned()],
    }
}

/// Breaks at whitespace; a word that would overflow starts the next line.
pub fn wrap_fit_word(
    renderer: &mut dyn Renderer,
    text: &str,
    width: i32,
    style: &Style,
) -> Vec<String> {
    style.write_to_renderer(renderer);
    let mut output = Vec::new();
    let mut line = String::new();
    let mut word = String::new();

    for ch in text.chars() {
        if ch == '\n' {
            line.push_str(&word);
            output.push(line.trim().to_owned());
            line.clear();
            word.clear();
            continue;
        }

        let candidate = format!("{line}{word}{ch}");
        if renderer.measure_text(&candidate).width() >= width {
            output.push(line.trim().to_owned());
            line = std::mem::take(&mut word);
            word.push(ch);
            continue;
        }

        if ch == ' ' || ch == '\t' {
            line.push_str(&word);
            line.push(ch);
            word.clear();
            continue;
        }
        word.push(ch);
    }

    line.push_str(&word);
    output.push(line.trim().to_owned());
    output
}

/// Breaks between characters as soon as a line would overflow.
pub fn wrap_fit_rune(
    renderer: &mut dyn Renderer,
    text: &str,
    width: i32,
    style: &Style,
) -> Vec<String> {
    style.write_to_renderer(renderer);
    let mut output = Vec::new();
    let mut line = String::new();

    for ch in text.chars() {
        if ch == '\n' {
            output.push(std::mem::take(&mut line));
            continue;
        }
        let candidate = format!("{line}{ch}");
        if renderer.measure_text(&candidate).width() >= width {
            output.push(std::mem::replace(&mut line, ch.to_string()));
            continue;
        }
        line.push(ch);
    }
    output.push(line);
    output
}

/// Box enclosing `lines` stacked with the style's line spacing.
pub fn measure_lines(renderer: &mut dyn Renderer, lines: &[String], style: &Style) -> ChartBox {
    style.write_text_options_to_renderer(renderer);
    let spacing = style.text_line_spacing();
    let mut output = ChartBox::ZERO;
    for (index, line) in lines.iter().enumerate() {
        let line_box = renderer.measure_text(line);
        output.right = output.right.max(line_box.right);
        output.bottom += line_box.height();
        if index + 1 < lines.len() {
            output.bottom += spacing;
        }
    }
    output
}

/// Draws `series` as a polyline, with optional area fill and dots.
///
/// The fill closes down to the value `0` or the canvas bottom, whichever is
/// higher on screen, and is only drawn when the line itself is stroked.
pub fn line_series(
    renderer: &mut dyn Renderer,
    canvas: ChartBox,
    x_range: &dyn Range,
    y_range: &dyn Range,
    style: &Style,
    series: &dyn Series,
) {
    if series.is_empty() {
        return;
    }
    let point = |index: usize| {
        let (vx, vy) = series.values(index);
        (
            canvas.left + x_range.translate(vx),
            canvas.bottom - y_range.translate(vy),
        )
    };
    let (x0, y0) = point(0);

    if style.should_draw_stroke() && style.should_draw_fill() {
        style.fill_options().write_drawing_options_to_renderer(renderer);
        renderer.move_to(x0, y0);
        let mut last_x = x0;
        for index in 1..series.len() {
            let (x, y) = point(index);
            renderer.line_to(x, y);
            last_x = x;
        }
        let baseline = canvas.bottom.min(canvas.bottom - y_range.translate(0.0));
        renderer.line_to(last_x, baseline);
        renderer.line_to(x0, baseline);
        renderer.line_to(x0, y0);
        renderer.fill();
    }

    if style.should_draw_stroke() {
        style.stroke_options().write_drawing_options_to_renderer(renderer);
        renderer.move_to(x0, y0);
        for index in 1..series.len() {
            let (x, y) = point(index);
            renderer.line_to(x, y);
        }
        renderer.stroke();
    }

    if style.should_draw_dot() {
        let dot_width = style.dot_width();
        style.dot_options().write_drawing_options_to_renderer(renderer);
        for index in 0..series.len() {
            let (x, y) = point(index);
            renderer.circle(dot_width, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{measure_lines, text_within, wrap_fit};
    use crate::core::types::ChartBox;
    use crate::render::{Font, NullRenderer, Style, TextHorizontalAlign, TextWrap};

    fn mono() -> Style {
        Style::default().with_font(Font::monospace()).with_font_size(10.0)
    }

    #[test]
    fn word_wrap_breaks_on_whitespace() {
        let mut r = NullRenderer::new();
        let style = mono().with_text_wrap(TextWrap::Word);
        // 7.67px per char at 92 dpi, so ~6 chars fit in 50px
        let lines = wrap_fit(&mut r, "alpha beta gamma", 50, &style);
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn rune_wrap_and_no_wrap() {
        let mut r = NullRenderer::new();
        let lines = wrap_fit(&mut r, "abcdefgh", 40, &mono().with_text_wrap(TextWrap::Rune));
        assert_eq!(lines, vec!["abcde", "fgh"]);
        let lines = wrap_fit(&mut r, "abc def", 10, &mono());
        assert_eq!(lines, vec!["abc def"]);
    }

    #[test]
    fn stacked_lines_include_spacing() {
        let mut r = NullRenderer::new();
        let lines = vec!["ab".to_owned(), "abcd".to_owned()];
        let measured = measure_lines(&mut r, &lines, &mono());
        assert_eq!(measured.height(), 12 + 5 + 12);
        assert_eq!(measured.width(), 31);
    }

    #[test]
    fn centered_text_within_box() {
        let mut r = NullRenderer::new();
        let style = mono().with_text_horizontal_align(TextHorizontalAlign::Center);
        text_within(&mut r, "ab", ChartBox::new(100, 0, 100, 100), &style);
        let drawn = &r.texts[0];
        assert_eq!((drawn.x, drawn.y), (42, 112));
    }
}
