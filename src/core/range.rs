use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::tick::Tick;
use crate::core::value_formatter::ValueFormatter;
use crate::render::{Renderer, Style};

/// Numeric interval projected onto a pixel domain for one axis.
///
/// `max >= min` is not required: descending ranges flip translation.
pub trait Range: fmt::Debug {
    fn min(&self) -> f64;
    fn max(&self) -> f64;

    /// Pixel span the range is projected onto.
    fn domain(&self) -> i32;

    fn is_descending(&self) -> bool;

    fn delta(&self) -> f64 {
        self.max() - self.min()
    }

    /// Maps `value` to a pixel offset in `0..=domain`.
    ///
    /// Out-of-range values are not clamped.
    fn translate(&self, value: f64) -> i32;

    /// `true` when neither bounds nor domain have been set.
    fn is_zero(&self) -> bool;

    /// Ranges that carry their own tick set expose it here, bypassing generation.
    fn ticks_provider(&self) -> Option<&dyn TicksProvider> {
        None
    }
}

/// Capability of a range (or axis) to supply a fixed tick set.
pub trait TicksProvider {
    fn ticks(
        &self,
        renderer: &mut dyn Renderer,
        defaults: &Style,
        formatter: &ValueFormatter,
    ) -> Vec<Tick>;
}

/// Linear range over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContinuousRange {
    pub min: f64,
    pub max: f64,
    pub domain: i32,
    #[serde(default)]
    pub descending: bool,
}

impl ContinuousRange {
    #[must_use]
    pub const fn new(min: f64, max: f64, domain: i32) -> Self {
        Self {
            min,
            max,
            domain,
            descending: false,
        }
    }

    #[must_use]
    pub const fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    pub fn set_domain(&mut self, domain: i32) {
        self.domain = domain;
    }
}

fn unset(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

impl Range for ContinuousRange {
    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn domain(&self) -> i32 {
        self.domain
    }

    fn is_descending(&self) -> bool {
        self.descending
    }

    fn translate(&self, value: f64) -> i32 {
        let ratio = (value - self.min) / self.delta();
        let offset = (ratio * f64::from(self.domain)).ceil() as i32;
        if self.descending {
            self.domain - offset
        } else {
            offset
        }
    }

    fn is_zero(&self) -> bool {
        unset(self.min) && unset(self.max) && self.domain == 0
    }
}

impl fmt::Display for ContinuousRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ContinuousRange [{:.2},{:.2}] => {}",
            self.min, self.max, self.domain
        )
    }
}

/// Continuous range whose ticks are hand-specified instead of generated.
///
/// Ticks with an empty label are labelled with the axis formatter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplicitTicksRange {
    pub range: ContinuousRange,
    pub ticks: Vec<Tick>,
}

impl ExplicitTicksRange {
    #[must_use]
    pub fn new(range: ContinuousRange, ticks: Vec<Tick>) -> Self {
        Self { range, ticks }
    }
}

impl Range for ExplicitTicksRange {
    fn min(&self) -> f64 {
        self.range.min
    }

    fn max(&self) -> f64 {
        self.range.max
    }

    fn domain(&self) -> i32 {
        self.range.domain
    }

    fn is_descending(&self) -> bool {
        self.range.descending
    }

    fn translate(&self, value: f64) -> i32 {
        self.range.translate(value)
    }

    fn is_zero(&self) -> bool {
        self.range.is_zero()
    }

    fn ticks_provider(&self) -> Option<&dyn TicksProvider> {
        Some(self)
    }
}

impl TicksProvider for ExplicitTicksRange {
    fn ticks(
        &self,
        _renderer: &mut dyn Renderer,
        _defaults: &Style,
        formatter: &ValueFormatter,
    ) -> Vec<Tick> {
        self.ticks
            .iter()
            .map(|tick| {
                if tick.label.is_empty() {
                    Tick::new(tick.value, formatter(tick.value))
                } else {
                    tick.clone()
                }
            })
            .collect()
    }
}

/// Closed set of range variants an axis can be configured with.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisRange {
    Continuous(ContinuousRange),
    ExplicitTicks(ExplicitTicksRange),
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::Continuous(ContinuousRange::default())
    }
}

impl From<ContinuousRange> for AxisRange {
    fn from(range: ContinuousRange) -> Self {
        Self::Continuous(range)
    }
}

impl From<ExplicitTicksRange> for AxisRange {
    fn from(range: ExplicitTicksRange) -> Self {
        Self::ExplicitTicks(range)
    }
}

impl AxisRange {
    fn continuous_mut(&mut self) -> &mut ContinuousRange {
        match self {
            Self::Continuous(range) => range,
            Self::ExplicitTicks(explicit) => &mut explicit.range,
        }
    }

    fn as_range(&self) -> &dyn Range {
        match self {
            Self::Continuous(range) => range,
            Self::ExplicitTicks(explicit) => explicit,
        }
    }

    pub fn set_min(&mut self, min: f64) {
        self.continuous_mut().set_min(min);
    }

    pub fn set_max(&mut self, max: f64) {
        self.continuous_mut().set_max(max);
    }

    pub fn set_domain(&mut self, domain: i32) {
        self.continuous_mut().set_domain(domain);
    }
}

impl Range for AxisRange {
    fn min(&self) -> f64 {
        self.as_range().min()
    }

    fn max(&self) -> f64 {
        self.as_range().max()
    }

    fn domain(&self) -> i32 {
        self.as_range().domain()
    }

    fn is_descending(&self) -> bool {
        self.as_range().is_descending()
    }

    fn translate(&self, value: f64) -> i32 {
        self.as_range().translate(value)
    }

    fn is_zero(&self) -> bool {
        self.as_range().is_zero()
    }

    fn ticks_provider(&self) -> Option<&dyn TicksProvider> {
        match self {
            Self::Continuous(_) => None,
            Self::ExplicitTicks(explicit) => Some(explicit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisRange, ContinuousRange, Range};

    #[test]
    fn translate_maps_endpoints_to_domain_edges() {
        let r = ContinuousRange::new(10.0, 100.0, 1024);
        assert_eq!(r.translate(10.0), 0);
        assert_eq!(r.translate(100.0), 1024);
        assert_eq!(r.translate(55.0), 512);
    }

    #[test]
    fn descending_translation_is_mirrored() {
        let r = ContinuousRange::new(10.0, 100.0, 1024).with_descending(true);
        assert_eq!(r.translate(10.0), 1024);
        assert_eq!(r.translate(100.0), 0);
    }

    #[test]
    fn translate_does_not_clamp() {
        let r = ContinuousRange::new(0.0, 10.0, 100);
        assert_eq!(r.translate(20.0), 200);
        assert_eq!(r.translate(-5.0), -50);
    }

    #[test]
    fn zero_detection_treats_nan_as_unset() {
        assert!(ContinuousRange::default().is_zero());
        assert!(ContinuousRange::new(f64::NAN, 0.0, 0).is_zero());
        assert!(!ContinuousRange::new(0.0, 1.0, 0).is_zero());
    }

    #[test]
    fn axis_range_setters_reach_the_inner_range() {
        let mut r = AxisRange::default();
        r.set_min(1.0);
        r.set_max(3.0);
        r.set_domain(200);
        assert_eq!(r.translate(2.0), 100);
        assert!(r.ticks_provider().is_none());
    }
}
