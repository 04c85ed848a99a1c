//! Layout constants shared by the chart and its axes.

use crate::core::types::ChartBox;
use crate::render::Color;

pub use crate::render::DEFAULT_DPI;

pub const DEFAULT_CHART_WIDTH: i32 = 1024;
pub const DEFAULT_CHART_HEIGHT: i32 = 400;

/// Space kept between the background edge and the canvas on every side.
pub const DEFAULT_BACKGROUND_PADDING: ChartBox = ChartBox::new(5, 5, 5, 5);

/// Gap between the canvas edge and the first row of x-axis labels.
pub const DEFAULT_X_AXIS_MARGIN: i32 = 10;
/// Gap between the canvas edge and the column of y-axis labels.
pub const DEFAULT_Y_AXIS_MARGIN: i32 = 10;

/// Length of an x-axis tick mark below the baseline.
pub const DEFAULT_VERTICAL_TICK_HEIGHT: i32 = 5;
/// Length of a y-axis tick mark beside the baseline.
pub const DEFAULT_HORIZONTAL_TICK_WIDTH: i32 = 5;

pub const DEFAULT_AXIS_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_AXIS_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_SERIES_LINE_WIDTH: f64 = 1.0;

pub const DEFAULT_TITLE_FONT_SIZE: f64 = 18.0;
pub const DEFAULT_TITLE_TOP: i32 = 10;

pub const DEFAULT_AXIS_COLOR: Color = Color::new(51, 51, 51, 255);
pub const DEFAULT_TEXT_COLOR: Color = Color::new(51, 51, 51, 255);

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::WHITE;
pub const DEFAULT_BACKGROUND_STROKE_COLOR: Color = Color::WHITE;
pub const DEFAULT_BACKGROUND_STROKE_WIDTH: f64 = 0.0;

pub const DEFAULT_CANVAS_COLOR: Color = Color::WHITE;
pub const DEFAULT_CANVAS_STROKE_COLOR: Color = Color::WHITE;
pub const DEFAULT_CANVAS_STROKE_WIDTH: f64 = 0.0;
