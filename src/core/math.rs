//! Numeric helpers shared by range, tick and renderer code.

use std::f64::consts::PI;

use crate::core::types::Point;

/// Coarse rounding unit for a value span.
///
/// Walks powers of ten down from `1e10` and returns one tenth of the first
/// power strictly below `delta`. A zero or negative delta yields `0.0`.
#[must_use]
pub fn round_to_for_delta(delta: f64) -> f64 {
    let mut cursor = 10f64.powf(10.0);
    while cursor > 0.0 {
        if delta > cursor {
            return cursor / 10.0;
        }
        cursor /= 10.0;
    }
    0.0
}

/// Rounds `value` up to the next multiple of `round_to`.
#[must_use]
pub fn round_up(value: f64, round_to: f64) -> f64 {
    if round_to < 0.000_000_000_000_001 {
        return value;
    }
    (value / round_to).ceil() * round_to
}

/// Rounds `value` down to the previous multiple of `round_to`.
#[must_use]
pub fn round_down(value: f64, round_to: f64) -> f64 {
    if round_to < 0.000_000_000_000_001 {
        return value;
    }
    (value / round_to).floor() * round_to
}

#[must_use]
pub fn points_to_pixels(dpi: f64, points: f64) -> f64 {
    (points * dpi) / 72.0
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Rotates `point` around `center`; results truncate toward zero like the
/// integer pixel grid used everywhere else.
#[must_use]
pub fn rotate_coordinate(center: Point, point: Point, theta_radians: f64) -> Point {
    let dx = f64::from(point.x - center.x);
    let dy = f64::from(point.y - center.y);
    let (sin, cos) = theta_radians.sin_cos();
    let rx = dx * cos - dy * sin;
    let ry = dx * sin + dy * cos;
    Point::new(rx as i32 + center.x, ry as i32 + center.y)
}
