use crate::error::{Error, Result};

use super::Fixed;

/// Font-wide vertical metrics in 26.6 fixed point.
///
/// Offsets are measured from the baseline in image space (+Y down):
/// - `ascent` is the top of the line box and is normally negative
/// - `descent` is the bottom of the line box and is normally positive
/// - `line_gap` is the extra spacing the font recommends between lines
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: Fixed,
    pub descent: Fixed,
    pub line_gap: Fixed,
}

/// Integer pixel rectangle, half-open, in image space (+Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

/// Exact glyph ink bounds relative to the pen, in 26.6 fixed point (+Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FixedBounds {
    pub min_x: Fixed,
    pub min_y: Fixed,
    pub max_x: Fixed,
    pub max_y: Fixed,
}

/// 8-bit coverage mask, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl AlphaMask {
    /// Coverage at `(x, y)`; 0 outside the mask.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// One rasterized glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Pixel box covered by the glyph, relative to the pen position.
    pub bounds: PixelRect,
    pub mask: AlphaMask,
    /// Mask pixel that lands on `bounds`' top-left corner.
    pub mask_origin: (u32, u32),
    pub advance: Fixed,
    /// Sub-pixel ink bounds used for the glyph's bearing.
    pub bearing: FixedBounds,
}

/// Source of glyph bitmaps and metrics for atlas baking.
///
/// Implementations return `None` for code points the font cannot render.
pub trait Rasterizer {
    fn metrics(&self) -> FontMetrics;

    fn glyph(&self, ch: char) -> Option<RasterGlyph>;

    /// Advance width without rasterizing.
    fn advance(&self, ch: char) -> Option<Fixed>;
}

// ── fontdue backend ───────────────────────────────────────────────────────

/// [`Rasterizer`] backed by a `fontdue::Font` at a fixed pixel size.
pub struct FontdueRasterizer {
    font: fontdue::Font,
    px: f32,
    metrics: FontMetrics,
}

impl FontdueRasterizer {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| Error::FontLoad(e.to_string()))?;
        Self::new(font, px)
    }

    pub fn new(font: fontdue::Font, px: f32) -> Result<Self> {
        if !(px > 0.0 && px.is_finite()) {
            return Err(Error::FontLoad(format!("invalid pixel size {px}")));
        }
        let lines = font
            .horizontal_line_metrics(px)
            .ok_or_else(|| Error::FontLoad("font has no horizontal line metrics".into()))?;

        // fontdue is +Y up with a negative descent; flip both into image space.
        let metrics = FontMetrics {
            ascent: Fixed::from_f32(-lines.ascent),
            descent: Fixed::from_f32(-lines.descent),
            line_gap: Fixed::from_f32(lines.line_gap),
        };

        log::debug!(
            "fontdue rasterizer at {px}px: ascent {:.2}, descent {:.2}, line gap {:.2}",
            lines.ascent,
            lines.descent,
            lines.line_gap
        );

        Ok(Self { font, px, metrics })
    }

    #[inline]
    pub fn px(&self) -> f32 {
        self.px
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }
}

impl Rasterizer for FontdueRasterizer {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph(&self, ch: char) -> Option<RasterGlyph> {
        if !self.has_glyph(ch) {
            return None;
        }

        let (m, bitmap) = self.font.rasterize(ch, self.px);

        // fontdue's ymin is the bitmap's bottom edge relative to the baseline, +Y up.
        let top = -(m.ymin + m.height as i32);
        let bounds = PixelRect::new(m.xmin, top, m.xmin + m.width as i32, -m.ymin);

        let ink = m.bounds;
        let bearing = FixedBounds {
            min_x: Fixed::from_f32(ink.xmin),
            min_y: Fixed::from_f32(-(ink.ymin + ink.height)),
            max_x: Fixed::from_f32(ink.xmin + ink.width),
            max_y: Fixed::from_f32(-ink.ymin),
        };

        Some(RasterGlyph {
            bounds,
            mask: AlphaMask {
                width: m.width as u32,
                height: m.height as u32,
                data: bitmap,
            },
            mask_origin: (0, 0),
            advance: Fixed::from_f32(m.advance_width),
            bearing,
        })
    }

    fn advance(&self, ch: char) -> Option<Fixed> {
        if !self.has_glyph(ch) {
            return None;
        }
        Some(Fixed::from_f32(self.font.metrics(ch, self.px).advance_width))
    }
}
