use std::fmt;

use tracing::debug;

use crate::api::axis::{TickPosition, resolve_ticks, sorted_ticks};
use crate::api::chart_defaults::{DEFAULT_VERTICAL_TICK_HEIGHT, DEFAULT_X_AXIS_MARGIN};
use crate::api::grid_line::{GridLine, generate_grid_lines, render_grid};
use crate::core::range::{AxisRange, Range};
use crate::core::tick::Tick;
use crate::core::types::ChartBox;
use crate::core::value_formatter::ValueFormatter;
use crate::render::{Renderer, Style, TextHorizontalAlign, draw};

/// Horizontal axis drawn below the canvas.
#[derive(Clone, Default)]
pub struct XAxis {
    pub name: String,
    pub name_style: Style,

    pub style: Style,
    pub value_formatter: Option<ValueFormatter>,
    pub range: Option<AxisRange>,

    pub tick_style: Style,
    pub ticks: Vec<Tick>,
    pub tick_position: TickPosition,

    pub grid_lines: Vec<GridLine>,
    pub grid_major_style: Style,
    pub grid_minor_style: Style,
}

impl fmt::Debug for XAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XAxis")
            .field("name", &self.name)
            .field("hidden", &self.style.hidden)
            .field("range", &self.range)
            .field("ticks", &self.ticks.len())
            .field("tick_position", &self.tick_position)
            .field("grid_lines", &self.grid_lines.len())
            .finish_non_exhaustive()
    }
}

impl XAxis {
    /// An axis that is neither measured nor drawn.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            style: Style::hidden(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_name_style(mut self, style: Style) -> Self {
        self.name_style = style;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.value_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: impl Into<AxisRange>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_tick_style(mut self, style: Style) -> Self {
        self.tick_style = style;
        self
    }

    #[must_use]
    pub fn with_tick_position(mut self, position: TickPosition) -> Self {
        self.tick_position = position;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, lines: Vec<GridLine>) -> Self {
        self.grid_lines = lines;
        self
    }

    #[must_use]
    pub fn with_grid_major_style(mut self, style: Style) -> Self {
        self.grid_major_style = style;
        self
    }

    #[must_use]
    pub fn with_grid_minor_style(mut self, style: Style) -> Self {
        self.grid_minor_style = style;
        self
    }

    pub fn get_ticks(
        &self,
        renderer: &mut dyn Renderer,
        range: &dyn Range,
        defaults: &Style,
        formatter: Option<&ValueFormatter>,
    ) -> Vec<Tick> {
        resolve_ticks(
            &self.ticks,
            renderer,
            range,
            false,
            &self.style,
            defaults,
            formatter,
        )
    }

    /// User grid lines when given, otherwise lines generated from `ticks`.
    #[must_use]
    pub fn get_grid_lines(&self, ticks: &[Tick]) -> Vec<GridLine> {
        if !self.grid_lines.is_empty() {
            return self.grid_lines.clone();
        }
        generate_grid_lines(ticks, &self.grid_major_style, &self.grid_minor_style)
    }

    /// Box the tick labels and axis name occupy below `canvas`.
    pub fn measure(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        range: &dyn Range,
        defaults: &Style,
        ticks: &[Tick],
    ) -> ChartBox {
        let tick_style = self.tick_style.inherit_from(&self.style.inherit_from(defaults));
        let ticks = sorted_ticks(ticks);
        let position = self.tick_position.resolve();

        let mut left = i32::MAX;
        let mut right = 0;
        let mut bottom = 0;

        for (index, tick) in ticks.iter().enumerate() {
            let label_box = draw::measure_text(renderer, &tick.label, &tick_style);
            let tx = canvas.left + range.translate(tick.value);
            let ty = canvas.bottom + DEFAULT_X_AXIS_MARGIN + label_box.height();

            let extent = match position {
                TickPosition::BetweenTicks if index == 0 => None,
                TickPosition::BetweenTicks => {
                    Some((canvas.left + range.translate(ticks[index - 1].value), tx))
                }
                _ => {
                    let half = label_box.width() >> 1;
                    Some((tx - half, tx + half))
                }
            };
            if let Some((ltx, rtx)) = extent {
                left = left.min(ltx);
                right = right.max(rtx);
            }
            bottom = bottom.max(ty);
        }

        if !self.name_style.hidden && !self.name.is_empty() {
            let name_box =
                draw::measure_text(renderer, &self.name, &self.name_style.inherit_from(defaults));
            bottom += DEFAULT_X_AXIS_MARGIN + name_box.height();
        }

        let measured = ChartBox::new(canvas.bottom, left, right, bottom);
        debug!(?measured, ticks = ticks.len(), "measured x axis");
        measured
    }

    /// Draws the baseline, tick marks, labels, name and grid lines.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        range: &dyn Range,
        defaults: &Style,
        ticks: &[Tick],
    ) {
        let tick_style = self.tick_style.inherit_from(&self.style.inherit_from(defaults));
        let ticks = sorted_ticks(ticks);

        tick_style.stroke_options().write_to_renderer(renderer);
        renderer.move_to(canvas.left, canvas.bottom);
        renderer.line_to(canvas.right, canvas.bottom);
        renderer.stroke();

        let position = self.tick_position.resolve();
        let mut max_text_height = 0;

        for (index, tick) in ticks.iter().enumerate() {
            let mut tx = canvas.left + range.translate(tick.value);

            tick_style.stroke_options().write_to_renderer(renderer);
            renderer.move_to(tx, canvas.bottom);
            renderer.line_to(tx, canvas.bottom + DEFAULT_VERTICAL_TICK_HEIGHT);
            renderer.stroke();

            let label_box = draw::measure_text(renderer, &tick.label, &tick_style);
            match position {
                TickPosition::BetweenTicks => {
                    if index == 0 {
                        continue;
                    }
                    let ltx = canvas.left + range.translate(ticks[index - 1].value);
                    let centered = tick_style.inherit_from(
                        &Style::default().with_text_horizontal_align(TextHorizontalAlign::Center),
                    );
                    let top = canvas.bottom + DEFAULT_X_AXIS_MARGIN;
                    draw::text_within(
                        renderer,
                        &tick.label,
                        ChartBox::new(top, ltx, tx, top),
                        &centered,
                    );
                    let lines = draw::wrap_fit(renderer, &tick.label, tx - ltx, &centered);
                    let lines_box = draw::measure_lines(renderer, &lines, &centered);
                    max_text_height = max_text_height.max(lines_box.height());
                }
                _ => {
                    let ty = if tick_style.text_rotation_degrees() == 0.0 {
                        tx -= label_box.width() >> 1;
                        canvas.bottom + DEFAULT_X_AXIS_MARGIN + label_box.height()
                    } else {
                        canvas.bottom + 2 * DEFAULT_X_AXIS_MARGIN
                    };
                    draw::text(renderer, &tick.label, tx, ty, &tick_style);
                    max_text_height = max_text_height.max(label_box.height());
                }
            }
        }

        let name_style = self.name_style.inherit_from(defaults);
        if !self.name_style.hidden && !self.name.is_empty() {
            let name_box = draw::measure_text(renderer, &self.name, &name_style);
            let tx = canvas.right - ((canvas.width() >> 1) + (name_box.width() >> 1));
            let ty = canvas.bottom
                + DEFAULT_X_AXIS_MARGIN
                + max_text_height
                + DEFAULT_X_AXIS_MARGIN
                + name_box.height();
            draw::text(renderer, &self.name, tx, ty, &name_style);
        }

        let grid_lines = self.get_grid_lines(&ticks);
        render_grid(
            renderer,
            canvas,
            range,
            true,
            &grid_lines,
            &self.grid_major_style,
            &self.grid_minor_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::XAxis;
    use crate::api::axis::TickPosition;
    use crate::core::range::ContinuousRange;
    use crate::core::tick::Tick;
    use crate::core::types::ChartBox;
    use crate::render::{Color, Font, NullRenderer, Style};

    fn defaults() -> Style {
        Style::default()
            .with_font(Font::monospace())
            .with_font_size(10.0)
            .with_stroke_color(Color::BLACK)
            .with_stroke_width(1.0)
    }

    fn ticks() -> Vec<Tick> {
        vec![
            Tick::new(1.0, "1.0"),
            Tick::new(2.0, "2.0"),
            Tick::new(3.0, "3.0"),
        ]
    }

    #[test]
    fn explicit_ticks_bypass_generation() {
        let mut r = NullRenderer::new();
        let axis = XAxis::default().with_ticks(vec![Tick::new(1.0, "1.0")]);
        let range = ContinuousRange::new(10.0, 100.0, 1024);
        let ticks = axis.get_ticks(&mut r, &range, &defaults(), None);
        assert_eq!(ticks, vec![Tick::new(1.0, "1.0")]);
    }

    #[test]
    fn measure_under_ticks_spans_half_labels() {
        let mut r = NullRenderer::new();
        let range = ContinuousRange::new(1.0, 3.0, 100);
        let measured = XAxis::default().measure(
            &mut r,
            ChartBox::new(0, 0, 100, 100),
            &range,
            &defaults(),
            &ticks(),
        );
        assert_eq!(measured.width(), 122);
        assert_eq!(measured.height(), 22);
    }

    #[test]
    fn measure_between_ticks_stays_inside_tick_span() {
        let mut r = NullRenderer::new();
        let range = ContinuousRange::new(1.0, 3.0, 100);
        let axis = XAxis::default().with_tick_position(TickPosition::BetweenTicks);
        let measured = axis.measure(
            &mut r,
            ChartBox::new(0, 20, 120, 100),
            &range,
            &defaults(),
            &ticks(),
        );
        assert_eq!((measured.left, measured.right), (20, 120));
    }

    #[test]
    fn render_skips_first_label_between_ticks() {
        let mut r = NullRenderer::new();
        let range = ContinuousRange::new(1.0, 3.0, 100);
        let canvas = ChartBox::new(0, 0, 100, 100);

        XAxis::default().render(&mut r, canvas, &range, &defaults(), &ticks());
        assert_eq!(r.texts.len(), 3);
        assert_eq!((r.texts[0].x, r.texts[0].y), (-11, 122));

        let mut r = NullRenderer::new();
        XAxis::default()
            .with_tick_position(TickPosition::BetweenTicks)
            .render(&mut r, canvas, &range, &defaults(), &ticks());
        let bodies: Vec<_> = r.texts.iter().map(|text| text.body.as_str()).collect();
        assert_eq!(bodies, vec!["2.0", "3.0"]);
    }

    #[test]
    fn rotated_labels_hang_two_margins_below_the_canvas() {
        let mut r = NullRenderer::new();
        let range = ContinuousRange::new(1.0, 3.0, 100);
        let tick_style = Style::default().with_text_rotation_degrees(45.0);
        XAxis::default().with_tick_style(tick_style).render(
            &mut r,
            ChartBox::new(0, 0, 100, 100),
            &range,
            &defaults(),
            &ticks(),
        );
        let positions: Vec<_> = r.texts.iter().map(|text| (text.x, text.y)).collect();
        assert_eq!(positions, vec![(0, 120), (50, 120), (100, 120)]);
    }

    #[test]
    fn name_adds_a_row_below_labels() {
        let mut r = NullRenderer::new();
        let range = ContinuousRange::new(1.0, 3.0, 100);
        let measured = XAxis::default().with_name("Date").measure(
            &mut r,
            ChartBox::new(0, 0, 100, 100),
            &range,
            &defaults(),
            &ticks(),
        );
        assert_eq!(measured.height(), 22 + 10 + 12);
    }
}
