use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::cache::RenderCache;

/// 8-bit RGBA color.
///
/// All-zero channels double as "unset" in renderer state; style fields use
/// `Option<Color>` so an explicit transparent black stays distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parses `rgb`/`rrggbb` hex (leading `#` optional); alpha is always opaque.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim_start_matches('#');
        let channel = |text: &str| {
            u8::from_str_radix(text, 16)
                .map_err(|_| ChartError::InvalidData(format!("invalid hex color `{hex}`")))
        };
        match digits.len() {
            3 if digits.is_ascii() => Ok(Self::rgb(
                channel(&digits[0..1])? * 0x11,
                channel(&digits[1..2])? * 0x11,
                channel(&digits[2..3])? * 0x11,
            )),
            6 if digits.is_ascii() => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(ChartError::InvalidData(format!(
                "hex color `{hex}` must have 3 or 6 digits"
            ))),
        }
    }

    /// Rebuilds a color from 16-bit pre-multiplied channels.
    #[must_use]
    pub fn from_alpha_mixed_rgba(r: u32, g: u32, b: u32, a: u32) -> Self {
        let alpha = ((a >> 8) & 0xff) as u8;
        if alpha == 0 {
            return Self::TRANSPARENT;
        }
        let fa = f64::from(alpha) / 255.0;
        let unmix = |channel: u32| (f64::from((channel >> 8) & 0xff) / fa).round().min(255.0) as u8;
        Self::new(unmix(r), unmix(g), unmix(b), alpha)
    }

    /// Pre-multiplied 16-bit channels, widened by bit replication (`v | v << 8`).
    #[must_use]
    pub fn rgba(self) -> (u32, u32, u32, u32) {
        let fa = f64::from(self.a) / 255.0;
        let mix = |channel: u8| {
            let mixed = (f64::from(channel) * fa) as u32;
            mixed | (mixed << 8)
        };
        let a = u32::from(self.a);
        (mix(self.r), mix(self.g), mix(self.b), a | (a << 8))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::TRANSPARENT
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[must_use]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise mean with `other`, keeping this color's alpha.
    #[must_use]
    pub fn average_with(self, other: Self) -> Self {
        let avg = |x: u8, y: u8| ((u16::from(x) + u16::from(y)) >> 1) as u8;
        Self::new(
            avg(self.r, other.r),
            avg(self.g, other.g),
            avg(self.b, other.b),
            self.a,
        )
    }

    /// Memoized CSS text, e.g. `rgba(255,0,0,1)`.
    #[must_use]
    pub fn css_string(self) -> String {
        RenderCache::global().color_string(self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_string())
    }
}

pub(crate) fn css_rgba(color: Color) -> String {
    format!(
        "rgba({},{},{},{})",
        color.r,
        color.g,
        color.b,
        alpha_bucket(f64::from(color.a) / 255.0)
    )
}

/// Quantizes an alpha fraction to one of twelve textual buckets.
#[must_use]
pub fn alpha_bucket(fraction: f64) -> &'static str {
    if fraction > 0.95 {
        "1"
    } else if fraction < 0.05 {
        "0"
    } else if fraction >= 0.85 {
        "0.9"
    } else if fraction >= 0.75 {
        "0.8"
    } else if fraction >= 0.65 {
        "0.7"
    } else if fraction >= 0.55 {
        "0.6"
    } else if fraction >= 0.45 {
        "0.5"
    } else if fraction >= 0.35 {
        "0.4"
    } else if fraction >= 0.25 {
        "0.3"
    } else if fraction >= 0.15 {
        "0.2"
    } else {
        "0.1"
    }
}

/// Series palette cycled by [`default_color`].
pub const DEFAULT_COLORS: [Color; 7] = [
    Color::rgb(0, 116, 217),
    Color::rgb(0, 217, 101),
    Color::rgb(217, 0, 116),
    Color::rgb(0, 217, 210),
    Color::rgb(217, 101, 0),
    Color::rgb(217, 210, 0),
    Color::rgb(51, 51, 51),
];

#[must_use]
pub fn default_color(index: usize) -> Color {
    DEFAULT_COLORS[index % DEFAULT_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::{Color, alpha_bucket};

    #[test]
    fn short_and_long_hex_agree() {
        let short = Color::from_hex("fff").expect("short hex");
        let long = Color::from_hex("#ffffff").expect("long hex");
        assert_eq!(short, long);
        assert_eq!(short, Color::WHITE);
        assert_eq!(Color::from_hex("0a1").expect("hex"), Color::rgb(0, 0xaa, 0x11));
        assert!(Color::from_hex("ff").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
    }

    #[test]
    fn alpha_buckets_cover_edges() {
        assert_eq!(alpha_bucket(0.97), "1");
        assert_eq!(alpha_bucket(0.5), "0.5");
        assert_eq!(alpha_bucket(0.03), "0");
        assert_eq!(alpha_bucket(0.95), "0.9");
        assert_eq!(alpha_bucket(0.1), "0.1");
    }

    #[test]
    fn zero_and_transparent_are_distinct_checks() {
        assert!(Color::TRANSPARENT.is_zero());
        assert!(Color::WHITE.with_alpha(0).is_transparent());
        assert!(!Color::WHITE.with_alpha(0).is_zero());
    }

    #[test]
    fn average_keeps_own_alpha() {
        let mixed = Color::new(200, 100, 0, 10).average_with(Color::new(100, 200, 255, 255));
        assert_eq!(mixed, Color::new(150, 150, 127, 10));
    }
}
