use serde::{Deserialize, Serialize};

use crate::core::math::{degrees_to_radians, rotate_coordinate};

/// Output surface size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Integer pixel point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in pixel space described by its four edges.
///
/// Used both for reserving canvas space around axes and for bounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartBox {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ChartBox {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.top == 0 && self.left == 0 && self.right == 0 && self.bottom == 0
    }

    #[must_use]
    pub fn width(self) -> i32 {
        (self.right - self.left).abs()
    }

    #[must_use]
    pub fn height(self) -> i32 {
        (self.bottom - self.top).abs()
    }

    /// Center point, rounding toward the top-left.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            self.left + (self.width() >> 1),
            self.top + (self.height() >> 1),
        )
    }

    #[must_use]
    pub fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.top + dy,
            self.left + dx,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn grow(self, other: Self) -> Self {
        Self::new(
            self.top.min(other.top),
            self.left.min(other.left),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Shrinks `self` by however far `other` overflows `bounds` on each edge.
    #[must_use]
    pub fn outer_constrain(self, bounds: Self, other: Self) -> Self {
        let mut constrained = self;
        if other.top < bounds.top {
            constrained.top = self.top + (bounds.top - other.top);
        }
        if other.left < bounds.left {
            constrained.left = self.left + (bounds.left - other.left);
        }
        if other.right > bounds.right {
            constrained.right = self.right - (other.right - bounds.right);
        }
        if other.bottom > bounds.bottom {
            constrained.bottom = self.bottom - (other.bottom - bounds.bottom);
        }
        constrained
    }

    #[must_use]
    pub fn corners(self) -> BoxCorners {
        BoxCorners {
            top_left: Point::new(self.left, self.top),
            top_right: Point::new(self.right, self.top),
            bottom_right: Point::new(self.right, self.bottom),
            bottom_left: Point::new(self.left, self.bottom),
        }
    }
}

/// The four corners of a box, which may no longer be axis aligned after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl BoxCorners {
    /// Axis-aligned box spanning the corners.
    #[must_use]
    pub fn to_box(self) -> ChartBox {
        let xs = [
            self.top_left.x,
            self.top_right.x,
            self.bottom_right.x,
            self.bottom_left.x,
        ];
        let ys = [
            self.top_left.y,
            self.top_right.y,
            self.bottom_right.y,
            self.bottom_left.y,
        ];
        ChartBox::new(
            ys.iter().copied().min().unwrap_or_default(),
            xs.iter().copied().min().unwrap_or_default(),
            xs.iter().copied().max().unwrap_or_default(),
            ys.iter().copied().max().unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn center(self) -> Point {
        let left = mean(self.top_left.x, self.bottom_left.x);
        let right = mean(self.top_right.x, self.bottom_right.x);
        let top = mean(self.top_left.y, self.top_right.y);
        let bottom = mean(self.bottom_left.y, self.bottom_right.y);
        Point::new(((right - left) >> 1) + left, ((bottom - top) >> 1) + top)
    }

    /// Rotates every corner around the center by `theta_degrees`.
    #[must_use]
    pub fn rotate(self, theta_degrees: f64) -> Self {
        let center = self.center();
        let theta = degrees_to_radians(theta_degrees);
        let turn = |p: Point| rotate_coordinate(center, p, theta);
        Self {
            top_left: turn(self.top_left),
            top_right: turn(self.top_right),
            bottom_right: turn(self.bottom_right),
            bottom_left: turn(self.bottom_left),
        }
    }
}

fn mean(a: i32, b: i32) -> i32 {
    (a + b) / 2
}
