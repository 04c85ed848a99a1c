use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::value_formatter::{ValueFormatter, float_value_formatter, time_value_formatter};
use crate::error::{ChartError, ChartResult};
use crate::render::Style;

/// Which vertical axis a series is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxisType {
    #[default]
    Primary,
    Secondary,
}

/// Indexed `(x, y)` values plus the metadata the chart needs to lay them out.
pub trait Series: fmt::Debug {
    fn name(&self) -> &str;
    fn style(&self) -> &Style;
    fn y_axis(&self) -> YAxisType;
    fn len(&self) -> usize;
    fn values(&self, index: usize) -> (f64, f64);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Default `(x, y)` label formatters for axes this series drives.
    fn value_formatters(&self) -> (ValueFormatter, ValueFormatter) {
        (float_value_formatter(), float_value_formatter())
    }

    fn validate(&self) -> ChartResult<()>;
}

fn validate_lengths(kind: &str, name: &str, x_len: usize, y_len: usize) -> ChartResult<()> {
    let reason = if x_len == 0 {
        format!("{kind} series must have x values set")
    } else if y_len == 0 {
        format!("{kind} series must have y values set")
    } else if x_len != y_len {
        format!("{kind} series must have the same number of x values ({x_len}) as y values ({y_len})")
    } else {
        return Ok(());
    };
    Err(ChartError::InvalidSeries {
        name: name.to_owned(),
        reason,
    })
}

/// Plain numeric `(x, y)` series.
#[derive(Debug, Clone, Default)]
pub struct ContinuousSeries {
    pub name: String,
    pub style: Style,
    pub y_axis: YAxisType,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl ContinuousSeries {
    #[must_use]
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self {
            x_values,
            y_values,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxisType) -> Self {
        self.y_axis = y_axis;
        self
    }
}

impl Series for ContinuousSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn y_axis(&self) -> YAxisType {
        self.y_axis
    }

    fn len(&self) -> usize {
        self.x_values.len().min(self.y_values.len())
    }

    fn values(&self, index: usize) -> (f64, f64) {
        (self.x_values[index], self.y_values[index])
    }

    fn validate(&self) -> ChartResult<()> {
        validate_lengths(
            "continuous",
            &self.name,
            self.x_values.len(),
            self.y_values.len(),
        )
    }
}

/// Series keyed by UTC timestamps; x values are exposed as Unix nanoseconds.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    pub name: String,
    pub style: Style,
    pub y_axis: YAxisType,
    pub x_values: Vec<DateTime<Utc>>,
    pub y_values: Vec<f64>,
}

impl TimeSeries {
    #[must_use]
    pub fn new(x_values: Vec<DateTime<Utc>>, y_values: Vec<f64>) -> Self {
        Self {
            x_values,
            y_values,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Unix nanoseconds as `f64`; saturates outside the `i64` nanosecond window.
#[must_use]
pub fn time_to_f64(time: DateTime<Utc>) -> f64 {
    match time.timestamp_nanos_opt() {
        Some(nanos) => nanos as f64,
        None if time.timestamp() < 0 => i64::MIN as f64,
        None => i64::MAX as f64,
    }
}

impl Series for TimeSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn y_axis(&self) -> YAxisType {
        self.y_axis
    }

    fn len(&self) -> usize {
        self.x_values.len().min(self.y_values.len())
    }

    fn values(&self, index: usize) -> (f64, f64) {
        (time_to_f64(self.x_values[index]), self.y_values[index])
    }

    fn value_formatters(&self) -> (ValueFormatter, ValueFormatter) {
        (time_value_formatter(), float_value_formatter())
    }

    fn validate(&self) -> ChartResult<()> {
        validate_lengths("time", &self.name, self.x_values.len(), self.y_values.len())
    }
}

/// `start..=end` in unit steps.
#[must_use]
pub fn linear_range(start: f64, end: f64) -> Vec<f64> {
    linear_range_with_step(start, end, 1.0)
}

/// `start..=end` stepping by `step`; descends when `end < start`.
#[must_use]
pub fn linear_range_with_step(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let count = ((end - start).abs() / step).floor() as usize + 1;
    let direction = if end < start { -1.0 } else { 1.0 };
    (0..count)
        .map(|index| start + direction * step * index as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ContinuousSeries, Series, linear_range, linear_range_with_step};

    #[test]
    fn mismatched_lengths_fail_validation() {
        let series = ContinuousSeries::new(linear_range(1.0, 10.0), vec![1.0]);
        let err = series.validate().expect_err("length mismatch");
        assert!(err.to_string().contains("same number of x values"));
        assert!(ContinuousSeries::new(linear_range(1.0, 10.0), Vec::new())
            .validate()
            .is_err());
    }

    #[test]
    fn linear_ranges_include_both_ends() {
        assert_eq!(linear_range(1.0, 4.0), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(linear_range_with_step(4.0, 0.0, 2.0), vec![4.0, 2.0, 0.0]);
    }
}
