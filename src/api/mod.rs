//! Chart orchestration: axes, grid lines and the [`Chart`] render pass.

mod axis;
mod chart;
pub mod chart_defaults;
mod grid_line;
mod x_axis;
mod y_axis;

pub use axis::TickPosition;
pub use chart::{Chart, ChartLayout, ChartRanges};
pub use grid_line::{GridLine, generate_grid_lines};
pub use x_axis::XAxis;
pub use y_axis::YAxis;
