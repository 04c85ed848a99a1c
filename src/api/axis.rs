use tracing::debug;

use crate::core::range::Range;
use crate::core::tick::{Tick, Ticks, generate_continuous_ticks};
use crate::core::value_formatter::{ValueFormatter, float_value_formatter};
use crate::render::{Renderer, Style};

/// Where tick labels sit relative to their tick marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPosition {
    /// Resolves to [`TickPosition::UnderTick`].
    #[default]
    Unset,
    UnderTick,
    /// Label `i` is centered between ticks `i - 1` and `i`; the first tick
    /// gets no label.
    BetweenTicks,
}

impl TickPosition {
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            Self::Unset => Self::UnderTick,
            other => other,
        }
    }
}

/// Tick coalescing shared by both axis kinds.
///
/// Priority: ticks configured on the axis, then ticks supplied by the range,
/// then generated continuous ticks sized with `axis_style` over `defaults`.
pub(crate) fn resolve_ticks(
    explicit: &[Tick],
    renderer: &mut dyn Renderer,
    range: &dyn Range,
    is_vertical: bool,
    axis_style: &Style,
    defaults: &Style,
    formatter: Option<&ValueFormatter>,
) -> Vec<Tick> {
    if !explicit.is_empty() {
        debug!(count = explicit.len(), "using axis ticks");
        return explicit.to_vec();
    }
    if let Some(provider) = range.ticks_provider() {
        let formatter = formatter.cloned().unwrap_or_else(float_value_formatter);
        let ticks = provider.ticks(renderer, defaults, &formatter);
        debug!(count = ticks.len(), "using range-provided ticks");
        return ticks;
    }
    let tick_style = axis_style.inherit_from(defaults);
    generate_continuous_ticks(renderer, range, is_vertical, &tick_style, formatter)
}

/// Copy of `ticks` in ascending value order.
pub(crate) fn sorted_ticks(ticks: &[Tick]) -> Vec<Tick> {
    let mut sorted = Ticks(ticks.to_vec());
    sorted.sort_by_value();
    sorted.0
}
