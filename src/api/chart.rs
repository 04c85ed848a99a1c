use std::io::Write;

use tracing::debug;

use crate::api::chart_defaults::{
    DEFAULT_AXIS_COLOR, DEFAULT_AXIS_FONT_SIZE, DEFAULT_AXIS_LINE_WIDTH,
    DEFAULT_BACKGROUND_COLOR, DEFAULT_BACKGROUND_PADDING, DEFAULT_BACKGROUND_STROKE_COLOR,
    DEFAULT_BACKGROUND_STROKE_WIDTH, DEFAULT_CANVAS_COLOR, DEFAULT_CANVAS_STROKE_COLOR,
    DEFAULT_CANVAS_STROKE_WIDTH, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_DPI,
    DEFAULT_SERIES_LINE_WIDTH, DEFAULT_TEXT_COLOR, DEFAULT_TITLE_FONT_SIZE, DEFAULT_TITLE_TOP,
};
use crate::api::{XAxis, YAxis};
use crate::core::math::{round_down, round_to_for_delta, round_up};
use crate::core::range::{AxisRange, Range};
use crate::core::series::{Series, YAxisType};
use crate::core::tick::Tick;
use crate::core::types::ChartBox;
use crate::core::value_formatter::{ValueFormatter, float_value_formatter};
use crate::error::{ChartError, ChartResult};
use crate::render::{DEFAULT_FONT_SIZE, Font, Renderer, Style, default_color, draw};

/// Value ranges resolved for the three axes, in `(x, y, secondary y)` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRanges {
    pub x: AxisRange,
    pub y: AxisRange,
    pub y_secondary: AxisRange,
}

/// Settled geometry of one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLayout {
    pub canvas: ChartBox,
    pub ranges: ChartRanges,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub y_ticks_secondary: Vec<Tick>,
}

/// A line chart: series plus the axes, title and boxes framing them.
#[derive(Debug)]
pub struct Chart {
    pub title: String,
    pub title_style: Style,

    pub width: i32,
    pub height: i32,
    pub dpi: f64,

    pub background: Style,
    pub canvas: Style,

    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub y_axis_secondary: YAxis,

    /// Fallback font for every text element; the built-in monospace face when unset.
    pub font: Option<Font>,
    pub series: Vec<Box<dyn Series>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_style: Style::default(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            dpi: DEFAULT_DPI,
            background: Style::default(),
            canvas: Style::default(),
            x_axis: XAxis::default(),
            y_axis: YAxis::default(),
            y_axis_secondary: YAxis::secondary(),
            font: None,
            series: Vec::new(),
        }
    }
}

impl Chart {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }

    #[must_use]
    pub fn with_canvas(mut self, style: Style) -> Self {
        self.canvas = style;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: XAxis) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: YAxis) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis_secondary(mut self, axis: YAxis) -> Self {
        self.y_axis_secondary = axis;
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Series + 'static) -> Self {
        self.series.push(Box::new(series));
        self
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        if self.width > 0 {
            self.width
        } else {
            DEFAULT_CHART_WIDTH
        }
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        if self.height > 0 {
            self.height
        } else {
            DEFAULT_CHART_HEIGHT
        }
    }

    #[must_use]
    pub fn dpi(&self) -> f64 {
        if self.dpi > 0.0 { self.dpi } else { DEFAULT_DPI }
    }

    #[must_use]
    pub fn font(&self) -> Font {
        self.font.clone().unwrap_or_else(Font::monospace)
    }

    /// Renders the chart through a renderer built by `provider` and writes
    /// the finished document to `writer`.
    ///
    /// Nothing is written when an error is returned.
    pub fn render<P>(&self, provider: P, writer: &mut dyn Write) -> ChartResult<()>
    where
        P: FnOnce(i32, i32) -> ChartResult<Box<dyn Renderer>>,
    {
        self.validate()?;

        let mut renderer = provider(self.width(), self.height())?;
        renderer.set_dpi(self.dpi());

        draw::box_outline(
            renderer.as_mut(),
            ChartBox::new(0, 0, self.width(), self.height()),
            &self.background_style(),
        );

        let layout = self.layout(renderer.as_mut())?;

        draw::box_outline(renderer.as_mut(), layout.canvas, &self.canvas_style());
        self.draw_axes(renderer.as_mut(), &layout);
        self.draw_series(renderer.as_mut(), &layout);
        self.draw_title(renderer.as_mut());

        debug!(
            width = self.width(),
            height = self.height(),
            series = self.series.len(),
            "chart rendered"
        );
        renderer.save(writer)
    }

    /// Checks that there is something to draw and that every series is well formed.
    pub fn validate(&self) -> ChartResult<()> {
        if self.series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if self.series.iter().all(|series| series.style().hidden) {
            return Err(ChartError::NoVisibleSeries);
        }
        self.series.iter().try_for_each(|series| series.validate())
    }

    /// Resolves ranges and ticks and settles the canvas box against the
    /// space the axes need.
    pub fn layout(&self, renderer: &mut dyn Renderer) -> ChartResult<ChartLayout> {
        let mut ranges = self.get_ranges();
        let mut canvas = self.default_canvas_box();
        let (x_formatter, y_formatter, y_formatter_secondary) = self.value_formatters();

        self.set_range_domains(canvas, &mut ranges);
        self.check_ranges(&ranges)?;

        let mut layout = ChartLayout::default();
        if self.has_axes() {
            // The first pass can shift the canvas enough to change the tick
            // set, so ticks are regenerated once against the adjusted box.
            let defaults = self.axes_defaults();
            let secondary = self.secondary_axis();
            for _ in 0..2 {
                layout.x_ticks = if self.x_axis.style.hidden {
                    Vec::new()
                } else {
                    self.x_axis
                        .get_ticks(renderer, &ranges.x, &defaults, Some(&x_formatter))
                };
                layout.y_ticks = if self.y_axis.style.hidden {
                    Vec::new()
                } else {
                    self.y_axis
                        .get_ticks(renderer, &ranges.y, &defaults, Some(&y_formatter))
                };
                layout.y_ticks_secondary = if self.shows_secondary_axis() {
                    secondary.get_ticks(
                        renderer,
                        &ranges.y_secondary,
                        &defaults,
                        Some(&y_formatter_secondary),
                    )
                } else {
                    Vec::new()
                };
                canvas = self.axes_adjusted_canvas_box(renderer, canvas, &ranges, &layout);
                self.set_range_domains(canvas, &mut ranges);
            }
        }

        debug!(?canvas, "canvas box settled");
        layout.canvas = canvas;
        layout.ranges = ranges;
        Ok(layout)
    }

    /// Discovers ranges from the visible series, honoring explicit axis
    /// ticks and user ranges.
    #[must_use]
    pub fn get_ranges(&self) -> ChartRanges {
        let (mut min_x, mut max_x) = (f64::MAX, -f64::MAX);
        let (mut min_y, mut max_y) = (f64::MAX, -f64::MAX);
        let (mut min_ya, mut max_ya) = (f64::MAX, -f64::MAX);
        let mut has_secondary = false;

        for series in self.series.iter().filter(|series| !series.style().hidden) {
            let axis = series.y_axis();
            for index in 0..series.len() {
                let (vx, vy) = series.values(index);
                min_x = min_x.min(vx);
                max_x = max_x.max(vx);
                match axis {
                    YAxisType::Primary => {
                        min_y = min_y.min(vy);
                        max_y = max_y.max(vy);
                    }
                    YAxisType::Secondary => {
                        min_ya = min_ya.min(vy);
                        max_ya = max_ya.max(vy);
                        has_secondary = true;
                    }
                }
            }
        }

        let mut x = self.x_axis.range.clone().unwrap_or_default();
        let mut y = self.y_axis.range.clone().unwrap_or_default();
        let mut y_secondary = self.y_axis_secondary.range.clone().unwrap_or_default();

        if let Some((min, max)) = tick_bounds(&self.x_axis.ticks) {
            x.set_min(min);
            x.set_max(max);
        } else if x.is_zero() {
            x.set_min(min_x);
            x.set_max(max_x);
        }

        if let Some((min, max)) = tick_bounds(&self.y_axis.ticks) {
            y.set_min(min);
            y.set_max(max);
        } else if y.is_zero() {
            set_rounded(&mut y, min_y, max_y, !self.y_axis.style.hidden);
        }

        if let Some((min, max)) = tick_bounds(&self.y_axis_secondary.ticks) {
            y_secondary.set_min(min);
            y_secondary.set_max(max);
        } else if has_secondary && y_secondary.is_zero() {
            set_rounded(
                &mut y_secondary,
                min_ya,
                max_ya,
                !self.y_axis_secondary.style.hidden,
            );
        }

        debug!(?x, ?y, ?y_secondary, "resolved chart ranges");
        ChartRanges { x, y, y_secondary }
    }

    /// Rejects ranges with an infinite or NaN bound, or a zero delta, checking
    /// x, y and then the secondary y range when a series uses it.
    pub fn check_ranges(&self, ranges: &ChartRanges) -> ChartResult<()> {
        check_range("x", &ranges.x)?;
        check_range("y", &ranges.y)?;
        if self.has_secondary_series() {
            check_range("secondary y", &ranges.y_secondary)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn has_axes(&self) -> bool {
        !self.x_axis.style.hidden
            || !self.y_axis.style.hidden
            || !self.y_axis_secondary.style.hidden
    }

    #[must_use]
    pub fn has_secondary_series(&self) -> bool {
        self.series
            .iter()
            .any(|series| series.y_axis() == YAxisType::Secondary)
    }

    /// Chart bounds inset by the background padding.
    #[must_use]
    pub fn default_canvas_box(&self) -> ChartBox {
        let padding = self.background.padding.unwrap_or(DEFAULT_BACKGROUND_PADDING);
        ChartBox::new(
            padding.top,
            padding.left,
            self.width() - padding.right,
            self.height() - padding.bottom,
        )
    }

    #[must_use]
    pub fn background_style(&self) -> Style {
        self.background.inherit_from(
            &Style::default()
                .with_fill_color(DEFAULT_BACKGROUND_COLOR)
                .with_stroke_color(DEFAULT_BACKGROUND_STROKE_COLOR)
                .with_stroke_width(DEFAULT_BACKGROUND_STROKE_WIDTH),
        )
    }

    #[must_use]
    pub fn canvas_style(&self) -> Style {
        self.canvas.inherit_from(
            &Style::default()
                .with_fill_color(DEFAULT_CANVAS_COLOR)
                .with_stroke_color(DEFAULT_CANVAS_STROKE_COLOR)
                .with_stroke_width(DEFAULT_CANVAS_STROKE_WIDTH),
        )
    }

    /// Style every axis inherits from.
    #[must_use]
    pub fn axes_defaults(&self) -> Style {
        Style::default()
            .with_font(self.font())
            .with_font_color(DEFAULT_AXIS_COLOR)
            .with_font_size(DEFAULT_AXIS_FONT_SIZE)
            .with_stroke_color(DEFAULT_AXIS_COLOR)
            .with_stroke_width(DEFAULT_AXIS_LINE_WIDTH)
    }

    /// Style the series at `index` inherits from; colors cycle through the palette.
    #[must_use]
    pub fn series_defaults(&self, index: usize) -> Style {
        let color = default_color(index);
        let mut style = Style::default()
            .with_stroke_color(color)
            .with_stroke_width(DEFAULT_SERIES_LINE_WIDTH)
            .with_font(self.font())
            .with_font_size(DEFAULT_FONT_SIZE);
        style.dot_color = Some(color);
        style
    }

    /// Formatters for `(x, y, secondary y)`: the last series' own formatters,
    /// overridden per axis by an explicit axis formatter.
    #[must_use]
    pub fn value_formatters(&self) -> (ValueFormatter, ValueFormatter, ValueFormatter) {
        let mut x = float_value_formatter();
        let mut y = float_value_formatter();
        let mut y_secondary = float_value_formatter();

        for series in &self.series {
            let (series_x, series_y) = series.value_formatters();
            x = series_x;
            match series.y_axis() {
                YAxisType::Primary => y = series_y,
                YAxisType::Secondary => y_secondary = series_y,
            }
        }

        if let Some(formatter) = &self.x_axis.value_formatter {
            x = formatter.clone();
        }
        if let Some(formatter) = &self.y_axis.value_formatter {
            y = formatter.clone();
        }
        if let Some(formatter) = &self.y_axis_secondary.value_formatter {
            y_secondary = formatter.clone();
        }
        (x, y, y_secondary)
    }

    fn shows_secondary_axis(&self) -> bool {
        !self.y_axis_secondary.style.hidden && self.has_secondary_series()
    }

    fn secondary_axis(&self) -> YAxis {
        YAxis {
            axis_type: YAxisType::Secondary,
            ..self.y_axis_secondary.clone()
        }
    }

    fn set_range_domains(&self, canvas: ChartBox, ranges: &mut ChartRanges) {
        ranges.x.set_domain(canvas.width());
        ranges.y.set_domain(canvas.height());
        ranges.y_secondary.set_domain(canvas.height());
    }

    fn axes_adjusted_canvas_box(
        &self,
        renderer: &mut dyn Renderer,
        canvas: ChartBox,
        ranges: &ChartRanges,
        layout: &ChartLayout,
    ) -> ChartBox {
        let defaults = self.axes_defaults();
        let mut outer = canvas;
        if !self.x_axis.style.hidden {
            let bounds = self
                .x_axis
                .measure(renderer, canvas, &ranges.x, &defaults, &layout.x_ticks);
            outer = outer.grow(bounds);
        }
        if !self.y_axis.style.hidden {
            let bounds = self
                .y_axis
                .measure(renderer, canvas, &ranges.y, &defaults, &layout.y_ticks);
            outer = outer.grow(bounds);
        }
        if self.shows_secondary_axis() {
            let bounds = self.secondary_axis().measure(
                renderer,
                canvas,
                &ranges.y_secondary,
                &defaults,
                &layout.y_ticks_secondary,
            );
            outer = outer.grow(bounds);
        }
        canvas.outer_constrain(self.default_canvas_box(), outer)
    }

    fn draw_axes(&self, renderer: &mut dyn Renderer, layout: &ChartLayout) {
        let defaults = self.axes_defaults();
        let ranges = &layout.ranges;
        if !self.x_axis.style.hidden {
            self.x_axis
                .render(renderer, layout.canvas, &ranges.x, &defaults, &layout.x_ticks);
        }
        if !self.y_axis.style.hidden {
            self.y_axis
                .render(renderer, layout.canvas, &ranges.y, &defaults, &layout.y_ticks);
        }
        if self.shows_secondary_axis() {
            self.secondary_axis().render(
                renderer,
                layout.canvas,
                &ranges.y_secondary,
                &defaults,
                &layout.y_ticks_secondary,
            );
        }
    }

    fn draw_series(&self, renderer: &mut dyn Renderer, layout: &ChartLayout) {
        let ranges = &layout.ranges;
        for (index, series) in self.series.iter().enumerate() {
            if series.style().hidden {
                continue;
            }
            let y_range = match series.y_axis() {
                YAxisType::Primary => &ranges.y,
                YAxisType::Secondary => &ranges.y_secondary,
            };
            let style = series.style().inherit_from(&self.series_defaults(index));
            draw::line_series(
                renderer,
                layout.canvas,
                &ranges.x,
                y_range,
                &style,
                series.as_ref(),
            );
        }
    }

    fn draw_title(&self, renderer: &mut dyn Renderer) {
        if self.title.is_empty() || self.title_style.hidden {
            return;
        }
        let style = &self.title_style;
        renderer.set_font(Some(style.font().cloned().unwrap_or_else(|| self.font())));
        renderer.set_font_color(style.font_color.unwrap_or(DEFAULT_TEXT_COLOR));
        renderer.set_font_size(style.font_size.unwrap_or(DEFAULT_TITLE_FONT_SIZE));
        renderer.clear_text_rotation();

        let text_box = renderer.measure_text(&self.title);
        let x = (self.width() >> 1) - (text_box.width() >> 1);
        let y = style.padding.map_or(DEFAULT_TITLE_TOP, |padding| padding.top) + text_box.height();
        renderer.text(&self.title, x, y);
    }
}

fn tick_bounds(ticks: &[Tick]) -> Option<(f64, f64)> {
    if ticks.is_empty() {
        return None;
    }
    Some(ticks.iter().fold((f64::MAX, -f64::MAX), |(min, max), tick| {
        (min.min(tick.value), max.max(tick.value))
    }))
}

fn set_rounded(range: &mut AxisRange, min: f64, max: f64, round: bool) {
    range.set_min(min);
    range.set_max(max);
    if round {
        let round_to = round_to_for_delta(range.delta());
        range.set_min(round_down(min, round_to));
        range.set_max(round_up(max, round_to));
    }
}

fn check_range(axis: &'static str, range: &dyn Range) -> ChartResult<()> {
    let (min, max) = (range.min(), range.max());
    if min.is_infinite() || max.is_infinite() {
        return Err(ChartError::InfiniteRangeDelta { axis });
    }
    if min.is_nan() || max.is_nan() {
        return Err(ChartError::NanRangeDelta { axis });
    }
    if range.delta() == 0.0 {
        return Err(ChartError::ZeroRangeDelta { axis });
    }
    Ok(())
}
