use std::fmt;

use tracing::debug;

use crate::api::axis::{resolve_ticks, sorted_ticks};
use crate::api::chart_defaults::{DEFAULT_HORIZONTAL_TICK_WIDTH, DEFAULT_Y_AXIS_MARGIN};
use crate::api::grid_line::{GridLine, generate_grid_lines, render_grid};
use crate::core::range::{AxisRange, Range};
use crate::core::series::YAxisType;
use crate::core::tick::Tick;
use crate::core::types::ChartBox;
use crate::core::value_formatter::ValueFormatter;
use crate::render::{Renderer, Style, draw};

/// Vertical axis; the primary sits right of the canvas, the secondary left.
#[derive(Clone, Default)]
pub struct YAxis {
    pub name: String,
    pub name_style: Style,

    pub style: Style,
    pub axis_type: YAxisType,
    pub value_formatter: Option<ValueFormatter>,
    pub range: Option<AxisRange>,

    pub tick_style: Style,
    pub ticks: Vec<Tick>,

    /// Optional horizontal line at the zero value.
    pub zero: Option<GridLine>,

    pub grid_lines: Vec<GridLine>,
    pub grid_major_style: Style,
    pub grid_minor_style: Style,
}

impl fmt::Debug for YAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YAxis")
            .field("name", &self.name)
            .field("axis_type", &self.axis_type)
            .field("hidden", &self.style.hidden)
            .field("range", &self.range)
            .field("ticks", &self.ticks.len())
            .field("zero", &self.zero)
            .field("grid_lines", &self.grid_lines.len())
            .finish_non_exhaustive()
    }
}

impl YAxis {
    #[must_use]
    pub fn secondary() -> Self {
        Self {
            axis_type: YAxisType::Secondary,
            ..Self::default()
        }
    }

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
    pub fn with_zero(mut self, zero: GridLine) -> Self {
        self.zero = Some(zero);
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

    fn is_primary(&self) -> bool {
        self.axis_type == YAxisType::Primary
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
            true,
            &self.style,
            defaults,
            formatter,
        )
    }

    #[must_use]
    pub fn get_grid_lines(&self, ticks: &[Tick]) -> Vec<GridLine> {
        if !self.grid_lines.is_empty() {
            return self.grid_lines.clone();
        }
        generate_grid_lines(ticks, &self.grid_major_style, &self.grid_minor_style)
    }

    /// Box the tick labels (and room for the name) occupy beside `canvas`.
    pub fn measure(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        range: &dyn Range,
        defaults: &Style,
        ticks: &[Tick],
    ) -> ChartBox {
        let primary = self.is_primary();
        let tx = if primary {
            canvas.right + DEFAULT_Y_AXIS_MARGIN
        } else {
            canvas.left - DEFAULT_Y_AXIS_MARGIN
        };

        self.tick_style
            .inherit_from(&self.style.inherit_from(defaults))
            .write_to_renderer(renderer);
        let ticks = sorted_ticks(ticks);

        let (mut min_x, mut max_x) = (i32::MAX, 0);
        let (mut min_y, mut max_y) = (i32::MAX, 0);
        let mut max_text_height = 0;

        for tick in &ticks {
            let ly = canvas.bottom - range.translate(tick.value);
            let label_box = renderer.measure_text(&tick.label);
            let half = label_box.height() >> 1;
            max_text_height = max_text_height.max(label_box.height());

            if primary {
                min_x = canvas.right;
                max_x = max_x.max(tx + label_box.width());
            } else {
                min_x = min_x.min(tx - label_box.width());
                max_x = max_x.max(tx);
            }
            min_y = min_y.min(ly - half);
            max_y = max_y.max(ly + half);
        }

        if !self.name_style.hidden && !self.name.is_empty() {
            max_x += DEFAULT_Y_AXIS_MARGIN + max_text_height;
        }

        let measured = ChartBox::new(min_y, min_x, max_x, max_y);
        debug!(?measured, axis = ?self.axis_type, "measured y axis");
        measured
    }

    /// Draws the baseline, tick marks, labels, rotated name, zero line and grid.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        range: &dyn Range,
        defaults: &Style,
        ticks: &[Tick],
    ) {
        let primary = self.is_primary();
        let tick_style = self.tick_style.inherit_from(&self.style.inherit_from(defaults));
        tick_style.write_to_renderer(renderer);

        let stroke_width = tick_style.stroke_width() as i32;
        let (lx, tx) = if primary {
            let lx = canvas.right + stroke_width;
            (lx, lx + DEFAULT_Y_AXIS_MARGIN)
        } else {
            let lx = canvas.left - stroke_width;
            (lx, lx - DEFAULT_Y_AXIS_MARGIN)
        };

        renderer.move_to(lx, canvas.bottom);
        renderer.line_to(lx, canvas.top);
        renderer.stroke();

        let rotated = tick_style.text_rotation_degrees() != 0.0;
        let mut max_text_width = 0;
        for tick in &sorted_ticks(ticks) {
            let ly = canvas.bottom - range.translate(tick.value);
            let label_box = draw::measure_text(renderer, &tick.label, &tick_style);
            max_text_width = max_text_width.max(label_box.width());

            let text_x = if primary { tx } else { tx - label_box.width() };
            let text_y = if rotated {
                ly
            } else {
                ly + (label_box.height() >> 1)
            };

            tick_style.write_to_renderer(renderer);
            renderer.move_to(lx, ly);
            if primary {
                renderer.line_to(lx + DEFAULT_HORIZONTAL_TICK_WIDTH, ly);
            } else {
                renderer.line_to(lx - DEFAULT_HORIZONTAL_TICK_WIDTH, ly);
            }
            renderer.stroke();

            draw::text(renderer, &tick.label, text_x, text_y, &tick_style);
        }

        let rotated_defaults =
            defaults.inherit_from(&Style::default().with_text_rotation_degrees(90.0));
        let name_style = self.name_style.inherit_from(&rotated_defaults);
        if !self.name_style.hidden && !self.name.is_empty() {
            let name_box = draw::measure_text(renderer, &self.name, &name_style);
            let offset = DEFAULT_Y_AXIS_MARGIN + stroke_width + max_text_width + DEFAULT_Y_AXIS_MARGIN;
            let name_x = if primary {
                canvas.right + offset
            } else {
                canvas.left - offset
            };
            let extent = if name_style.text_rotation_degrees() == 0.0 {
                name_box.width()
            } else {
                name_box.height()
            };
            let name_y = canvas.top + ((canvas.height() >> 1) - (extent >> 1));
            draw::text(renderer, &self.name, name_x, name_y, &name_style);
        }

        if let Some(zero) = self.zero.as_ref().filter(|zero| !zero.style.hidden) {
            zero.render(renderer, canvas, range, false, &Style::default());
        }

        let grid_lines = self.get_grid_lines(ticks);
        render_grid(
            renderer,
            canvas,
            range,
            false,
            &grid_lines,
            &self.grid_major_style,
            &self.grid_minor_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::YAxis;
    use crate::api::grid_line::GridLine;
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
        vec![Tick::new(0.0, "0.00"), Tick::new(10.0, "10.00")]
    }

    #[test]
    fn primary_measures_to_the_right_of_the_canvas() {
        let mut r = NullRenderer::new();
        let canvas = ChartBox::new(10, 10, 100, 110);
        let range = ContinuousRange::new(0.0, 10.0, 100);
        let measured = YAxis::default().measure(&mut r, canvas, &range, &defaults(), &ticks());
        assert_eq!(measured.left, 100);
        assert_eq!(measured.right, 100 + 10 + 39);
        assert_eq!((measured.top, measured.bottom), (10 - 6, 110 + 6));
    }

    #[test]
    fn secondary_mirrors_to_the_left() {
        let mut r = NullRenderer::new();
        let canvas = ChartBox::new(10, 60, 160, 110);
        let range = ContinuousRange::new(0.0, 10.0, 100);
        let measured = YAxis::secondary().measure(&mut r, canvas, &range, &defaults(), &ticks());
        assert_eq!(measured.right, 50);
        assert_eq!(measured.left, 50 - 39);
    }

    #[test]
    fn name_is_drawn_rotated_beside_labels() {
        let mut r = NullRenderer::new();
        let canvas = ChartBox::new(10, 10, 100, 110);
        let range = ContinuousRange::new(0.0, 10.0, 100);
        YAxis::default()
            .with_name("Count")
            .render(&mut r, canvas, &range, &defaults(), &ticks());
        let name = r.texts.last().expect("name text");
        assert_eq!(name.body, "Count");
        assert_eq!(name.x, 100 + 1 + 10 + 39 + 10);
        assert!(name.y > canvas.top && name.y < canvas.bottom);
    }

    #[test]
    fn zero_line_draws_only_when_configured() {
        let canvas = ChartBox::new(10, 10, 100, 110);
        let range = ContinuousRange::new(-5.0, 5.0, 100);

        let mut r = NullRenderer::new();
        YAxis::default().render(&mut r, canvas, &range, &defaults(), &[]);
        let without_zero = r.path_count;

        let mut r = NullRenderer::new();
        let zero = GridLine::new(0.0).with_style(Style::default().with_stroke_color(Color::BLACK));
        YAxis::default()
            .with_zero(zero)
            .render(&mut r, canvas, &range, &defaults(), &[]);
        assert_eq!(r.path_count, without_zero + 1);
    }
}
