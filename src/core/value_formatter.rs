//! Value → label formatters used for tick labels.

use std::sync::Arc;

use chrono::DateTime;

use crate::render::RenderCache;

/// Formats one axis value into its tick label.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATE_HOUR_FORMAT: &str = "%m-%d %-I%p";
pub const DEFAULT_DATE_MINUTE_FORMAT: &str = "%m-%d %-I:%M%p";

/// Two-decimal float labels, e.g. `1234.00`.
#[must_use]
pub fn float_value_formatter() -> ValueFormatter {
    Arc::new(|value| RenderCache::global().ftoa2(value))
}

/// Truncates toward zero, e.g. `12.9` → `12`.
#[must_use]
pub fn int_value_formatter() -> ValueFormatter {
    Arc::new(|value| RenderCache::global().itoa(value as i64))
}

/// Normalized percent labels: `0.25` → `25.00%`.
#[must_use]
pub fn percent_value_formatter() -> ValueFormatter {
    Arc::new(|value| format!("{:.2}%", value * 100.0))
}

#[must_use]
pub fn float_value_formatter_with_precision(precision: usize) -> ValueFormatter {
    Arc::new(move |value| format!("{value:.precision$}"))
}

/// Prefixes another formatter's label with a `kσ` marker.
#[must_use]
pub fn k_value_formatter(k: f64, inner: ValueFormatter) -> ValueFormatter {
    Arc::new(move |value| format!("{k:.0}σ {}", inner(value)))
}

/// Date labels for Unix-nanosecond values, cached per second.
#[must_use]
pub fn time_value_formatter() -> ValueFormatter {
    cached_time_formatter(DEFAULT_DATE_FORMAT)
}

#[must_use]
pub fn time_hour_value_formatter() -> ValueFormatter {
    cached_time_formatter(DEFAULT_DATE_HOUR_FORMAT)
}

#[must_use]
pub fn time_minute_value_formatter() -> ValueFormatter {
    cached_time_formatter(DEFAULT_DATE_MINUTE_FORMAT)
}

/// Uncached time labels with a caller-supplied `chrono` format string.
#[must_use]
pub fn time_value_formatter_with_format(format: impl Into<String>) -> ValueFormatter {
    let format = format.into();
    Arc::new(move |value| format_unix_nanos(value, &format))
}

fn cached_time_formatter(format: &'static str) -> ValueFormatter {
    Arc::new(move |value| {
        let nanos = value as i64;
        RenderCache::global().time_label(format, nanos.div_euclid(1_000_000_000), || {
            format_unix_nanos(value, format)
        })
    })
}

/// Formats Unix nanoseconds in UTC.
#[must_use]
pub fn format_unix_nanos(value: f64, format: &str) -> String {
    DateTime::from_timestamp_nanos(value as i64)
        .format(format)
        .to_string()
}
