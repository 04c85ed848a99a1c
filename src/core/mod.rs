pub mod math;
pub mod range;
pub mod series;
pub mod tick;
pub mod types;
pub mod value_formatter;

pub use range::{AxisRange, ContinuousRange, ExplicitTicksRange, Range, TicksProvider};
pub use series::{ContinuousSeries, Series, TimeSeries, YAxisType, time_to_f64};
pub use tick::{Tick, Ticks, generate_continuous_ticks};
pub use types::{BoxCorners, ChartBox, Point, Viewport};
pub use value_formatter::ValueFormatter;
