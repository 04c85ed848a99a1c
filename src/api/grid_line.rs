use crate::core::range::Range;
use crate::core::tick::Tick;
use crate::core::types::ChartBox;
use crate::render::{Renderer, Style};

/// A line across the canvas at one axis value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLine {
    pub value: f64,
    pub is_minor: bool,
    pub style: Style,
}

impl GridLine {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Strokes the line; vertical lines run bottom to top at `left + translate`,
    /// horizontal ones left to right at `bottom - translate`.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        range: &dyn Range,
        is_vertical: bool,
        defaults: &Style,
    ) {
        let style = self.style.inherit_from(defaults);
        renderer.set_stroke_color(style.stroke_color());
        renderer.set_stroke_width(style.stroke_width());
        renderer.set_stroke_dash_array(style.stroke_dash_array());

        if is_vertical {
            let x = canvas.left + range.translate(self.value);
            renderer.move_to(x, canvas.bottom);
            renderer.line_to(x, canvas.top);
        } else {
            let y = canvas.bottom - range.translate(self.value);
            renderer.move_to(canvas.left, y);
            renderer.line_to(canvas.right, y);
        }
        renderer.stroke();
    }
}

/// One grid line per interior tick, alternating major and minor.
///
/// The endpoint ticks coincide with the canvas edges and get no line.
#[must_use]
pub fn generate_grid_lines(ticks: &[Tick], major: &Style, minor: &Style) -> Vec<GridLine> {
    if ticks.len() < 3 {
        return Vec::new();
    }
    ticks[1..ticks.len() - 1]
        .iter()
        .enumerate()
        .map(|(index, tick)| {
            let is_minor = index % 2 == 1;
            GridLine {
                value: tick.value,
                is_minor,
                style: if is_minor { minor.clone() } else { major.clone() },
            }
        })
        .collect()
}

/// Renders grid lines under the opt-in rule shared by both axes.
///
/// Nothing is drawn unless a grid style is shown and at least one of the two
/// styles has an explicit stroke color. A class of line whose style has no
/// stroke color (or is hidden) is skipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_grid(
    renderer: &mut dyn Renderer,
    canvas: ChartBox,
    range: &dyn Range,
    is_vertical: bool,
    lines: &[GridLine],
    major: &Style,
    minor: &Style,
) {
    if major.hidden && minor.hidden {
        return;
    }
    let major_set = major.stroke_color.is_some_and(|color| !color.is_zero());
    let minor_set = minor.stroke_color.is_some_and(|color| !color.is_zero());
    if !major_set && !minor_set {
        return;
    }

    for line in lines {
        let (style, enabled) = if line.is_minor {
            (minor, minor_set && !minor.hidden)
        } else {
            (major, major_set && !major.hidden)
        };
        if enabled {
            line.render(renderer, canvas, range, is_vertical, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GridLine, generate_grid_lines, render_grid};
    use crate::core::range::ContinuousRange;
    use crate::core::tick::Tick;
    use crate::core::types::ChartBox;
    use crate::render::{Color, NullRenderer, Style};

    fn ticks(count: usize) -> Vec<Tick> {
        (0..count)
            .map(|index| Tick::new(index as f64, index.to_string()))
            .collect()
    }

    #[test]
    fn interior_ticks_alternate_major_minor() {
        let lines = generate_grid_lines(&ticks(5), &Style::default(), &Style::hidden());
        let kinds: Vec<_> = lines.iter().map(|line| (line.value, line.is_minor)).collect();
        assert_eq!(kinds, vec![(1.0, false), (2.0, true), (3.0, false)]);
        assert!(lines[1].style.hidden);
        assert!(generate_grid_lines(&ticks(2), &Style::default(), &Style::default()).is_empty());
    }

    #[test]
    fn default_styles_draw_nothing() {
        let mut r = NullRenderer::new();
        let lines = generate_grid_lines(&ticks(6), &Style::default(), &Style::default());
        let range = ContinuousRange::new(0.0, 5.0, 100);
        let canvas = ChartBox::new(0, 0, 100, 100);
        render_grid(&mut r, canvas, &range, true, &lines, &Style::default(), &Style::default());
        assert_eq!(r.path_count, 0);

        let major = Style::default().with_stroke_color(Color::BLACK).with_stroke_width(1.0);
        render_grid(&mut r, canvas, &range, true, &lines, &major, &Style::default());
        assert_eq!(r.path_count, 2);
    }

    #[test]
    fn line_style_overrides_axis_defaults() {
        let mut r = NullRenderer::new();
        let line = GridLine::new(2.5).with_style(Style::default().with_stroke_width(3.0));
        let defaults = Style::default().with_stroke_color(Color::RED).with_stroke_width(1.0);
        line.render(
            &mut r,
            ChartBox::new(0, 0, 100, 100),
            &ContinuousRange::new(0.0, 5.0, 100),
            false,
            &defaults,
        );
        assert_eq!(r.state().stroke_width, Some(3.0));
        assert_eq!(r.state().stroke_color, Some(Color::RED));
    }
}
