//! chart-layout: axis range, tick layout and SVG serialization core for 2-D charts.
//!
//! Series values are mapped onto pixel ranges, ticks are spaced by measured
//! label size, axes reserve room around the canvas, and every primitive is
//! serialized through a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, GridLine, TickPosition, XAxis, YAxis};
pub use core::{ContinuousRange, ContinuousSeries, Series, Tick, TimeSeries, YAxisType};
pub use error::{ChartError, ChartResult};
pub use render::{Color, Font, Renderer, Style, SvgRenderer};
