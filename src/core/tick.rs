use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::math::{round_to_for_delta, round_up};
use crate::core::range::Range;
use crate::core::value_formatter::{ValueFormatter, float_value_formatter};
use crate::render::{Renderer, Style};

/// Minimum horizontal gap added to each measured x-axis label.
pub const MINIMUM_TICK_HORIZONTAL_SPACING: i32 = 20;
/// Minimum vertical gap added to each measured y-axis label.
pub const MINIMUM_TICK_VERTICAL_SPACING: i32 = 20;
/// Hard cap on generated intermediate ticks.
pub const TICK_COUNT_SANITY_CHECK: i32 = 1 << 10;

/// A labelled reference value on an axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Ordered tick list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticks(pub Vec<Tick>);

impl Ticks {
    /// Orders ticks by ascending value for lookup.
    pub fn sort_by_value(&mut self) {
        self.0.sort_by(|left, right| left.value.total_cmp(&right.value));
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|tick| tick.value).collect()
    }
}

impl From<Vec<Tick>> for Ticks {
    fn from(ticks: Vec<Tick>) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tick) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "[{index}: {}]", tick.label)?;
        }
        Ok(())
    }
}

/// Generates evenly spaced, non-overlapping ticks for a continuous range.
///
/// The footprint of one tick is the measured size of the minimum label plus a
/// fixed gap; as many intermediate ticks as fit between the two endpoint
/// ticks are placed on multiples of a rounding unit derived from the span.
pub fn generate_continuous_ticks(
    renderer: &mut dyn Renderer,
    range: &dyn Range,
    is_vertical: bool,
    style: &Style,
    formatter: Option<&ValueFormatter>,
) -> Vec<Tick> {
    let fallback;
    let formatter = match formatter {
        Some(formatter) => formatter,
        None => {
            fallback = float_value_formatter();
            &fallback
        }
    };

    let (min, max) = (range.min(), range.max());
    if min == max {
        return vec![Tick::new(min, formatter(min))];
    }
    let is_descending = range.is_descending();

    let min_label = formatter(min);
    style.text_options().write_to_renderer(renderer);
    let label_box = renderer.measure_text(&min_label);

    let tick_size = if is_vertical {
        f64::from(label_box.height() + MINIMUM_TICK_VERTICAL_SPACING)
    } else {
        f64::from(label_box.width() + MINIMUM_TICK_HORIZONTAL_SPACING)
    };

    let domain = f64::from(range.domain());
    let domain_remainder = domain - tick_size * 2.0;
    let intermediate_count = ((domain_remainder / tick_size).floor() as i32)
        .clamp(0, TICK_COUNT_SANITY_CHECK);

    let range_delta = (max - min).abs();
    let round_to = round_to_for_delta(range_delta) / 10.0;
    debug!(
        tick_size,
        intermediate_count, range_delta, round_to, "generating continuous ticks"
    );

    let mut ticks = Vec::with_capacity(2 + intermediate_count.max(1) as usize - 1);
    let (first, last) = if is_descending { (max, min) } else { (min, max) };
    ticks.push(Tick::new(first, formatter(first)));

    if intermediate_count > 0 {
        let tick_step = range_delta / f64::from(intermediate_count);
        for index in 1..intermediate_count {
            let offset = round_up(tick_step * f64::from(index), round_to);
            let value = if is_descending {
                max - offset
            } else {
                min + offset
            };
            ticks.push(Tick::new(value, formatter(value)));
        }
    }

    ticks.push(Tick::new(last, formatter(last)));
    ticks
}
