use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use ordered_float::OrderedFloat;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace, name_id};
use tracing::warn;

use crate::core::math::{points_to_pixels, radians_to_degrees};
use crate::core::types::ChartBox;
use crate::error::{ChartError, ChartResult};
use crate::render::Style;
use crate::render::cache::{FaceKey, RenderCache};

/// Glyph metrics in font units.
pub trait FontFace: fmt::Debug + Send + Sync {
    fn family(&self) -> &str;

    fn units_per_em(&self) -> f64;

    /// Horizontal advance of `ch`, or `None` when the face has no glyph for it.
    fn glyph_advance(&self, ch: char) -> Option<f64>;

    fn kerning(&self, _left: char, _right: char) -> f64 {
        0.0
    }
}

/// Built-in fixed-pitch face: every printable character advances 0.6 em.
///
/// Needs no font file, so layout stays deterministic in headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceFace;

impl MonospaceFace {
    pub const UNITS_PER_EM: f64 = 1000.0;
    pub const ADVANCE: f64 = 600.0;
}

impl FontFace for MonospaceFace {
    fn family(&self) -> &str {
        "monospace"
    }

    fn units_per_em(&self) -> f64 {
        Self::UNITS_PER_EM
    }

    fn glyph_advance(&self, ch: char) -> Option<f64> {
        (!ch.is_control()).then_some(Self::ADVANCE)
    }
}

/// TrueType/OpenType face parsed with `ttf-parser`.
pub struct TrueTypeFace {
    family: String,
    face: OwnedFace,
}

impl TrueTypeFace {
    /// Parses the first face in `data`; the family comes from the name table.
    pub fn from_bytes(data: Vec<u8>) -> ChartResult<Self> {
        let face = OwnedFace::from_vec(data, 0)
            .map_err(|err| ChartError::Font(format!("failed to parse font face: {err}")))?;
        let family = face
            .as_face_ref()
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::FAMILY)
            .find_map(|name| name.to_string())
            .unwrap_or_default();
        Ok(Self { family, face })
    }

    pub fn from_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Overrides the family name read from the font.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    fn glyph(&self, ch: char) -> Option<GlyphId> {
        self.face.as_face_ref().glyph_index(ch)
    }
}

impl fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("family", &self.family)
            .field("units_per_em", &self.units_per_em())
            .finish_non_exhaustive()
    }
}

impl FontFace for TrueTypeFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn units_per_em(&self) -> f64 {
        f64::from(self.face.as_face_ref().units_per_em())
    }

    fn glyph_advance(&self, ch: char) -> Option<f64> {
        let glyph = self.glyph(ch)?;
        self.face
            .as_face_ref()
            .glyph_hor_advance(glyph)
            .map(f64::from)
    }

    fn kerning(&self, left: char, right: char) -> f64 {
        let (Some(left), Some(right)) = (self.glyph(left), self.glyph(right)) else {
            return 0.0;
        };
        let Some(kern) = self.face.as_face_ref().tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| subtable.glyphs_kerning(left, right))
            .map_or(0.0, f64::from)
    }
}

/// Shared handle to a font face; equality is identity.
#[derive(Clone)]
pub struct Font(Arc<dyn FontFace>);

impl Font {
    pub fn new(face: impl FontFace + 'static) -> Self {
        Self(Arc::new(face))
    }

    /// Process-wide [`MonospaceFace`] handle.
    #[must_use]
    pub fn monospace() -> Self {
        static MONOSPACE: OnceLock<Font> = OnceLock::new();
        MONOSPACE.get_or_init(|| Self::new(MonospaceFace)).clone()
    }

    pub fn from_ttf_bytes(data: Vec<u8>) -> ChartResult<Self> {
        Ok(Self::new(TrueTypeFace::from_bytes(data)?))
    }

    #[must_use]
    pub fn family(&self) -> &str {
        self.0.family()
    }

    #[must_use]
    pub fn face(&self) -> &dyn FontFace {
        self.0.as_ref()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Font").field(&self.family()).finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Pixel advance of `text` at `size` points, kerning included.
///
/// Characters the face cannot measure are skipped and do not take part in
/// kerning with their neighbours.
pub(crate) fn measure_string(
    cache: &RenderCache,
    font: &Font,
    dpi: f64,
    size: f64,
    text: &str,
) -> f64 {
    let face = font.face();
    let scale = points_to_pixels(dpi, size) / face.units_per_em();
    let key = FaceKey {
        family: font.family().to_owned(),
        dpi: OrderedFloat(dpi),
        size: OrderedFloat(size),
    };

    cache.with_face_metrics(key, |metrics| {
        let mut advance = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            if let Some(prev) = previous {
                advance += *metrics
                    .kerning
                    .entry((prev, ch))
                    .or_insert_with(|| face.kerning(prev, ch) * scale);
            }
            let glyph_advance = match metrics.advances.get(&ch) {
                Some(cached) => *cached,
                None => match face.glyph_advance(ch) {
                    Some(units) => *metrics.advances.entry(ch).or_insert(units * scale),
                    None => {
                        warn!(family = font.family(), ?ch, "no glyph advance, skipping");
                        continue;
                    }
                },
            };
            advance += glyph_advance;
            previous = Some(ch);
        }
        advance
    })
}

/// Text box for `body` in the text state `style` at rotation `text_theta`.
///
/// Width is the ceiling of the pixel advance; height is the font size in
/// pixels. Without a font there is nothing to measure and the box is zero.
pub(crate) fn measure_text_box(
    cache: &RenderCache,
    style: &Style,
    dpi: f64,
    text_theta: f64,
    body: &str,
) -> ChartBox {
    let Some(font) = style.font() else {
        return ChartBox::ZERO;
    };
    let size = style.font_size();
    let width = measure_string(cache, font, dpi, size, body).ceil() as i32;
    let height = points_to_pixels(dpi, size) as i32;
    let measured = ChartBox::new(0, 0, width, height);
    if text_theta == 0.0 {
        return measured;
    }
    measured
        .corners()
        .rotate(radians_to_degrees(text_theta))
        .to_box()
}
