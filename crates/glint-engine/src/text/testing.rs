//! Test fixtures: a deterministic block rasterizer and bundled DejaVu fonts.

use super::raster::{AlphaMask, FixedBounds, FontMetrics, PixelRect, RasterGlyph, Rasterizer};
use super::Fixed;

pub(crate) const DEJAVU_SANS: &[u8] = include_bytes!("../../tests/fonts/DejaVuSans.ttf");
pub(crate) const DEJAVU_SANS_CONDENSED_OBLIQUE: &[u8] =
    include_bytes!("../../tests/fonts/DejaVuSansCondensed-Oblique.ttf");

/// At `px` pixels: ascent `-3px/4`, descent `px/4`, no line gap. Every glyph
/// advances `px/2`. Ink is a full-coverage box from x = 1 to `px/2 - 1`,
/// `5px/8` tall above the baseline; `g j p q y` also hang `px/8` below it.
/// Space has no ink. A few glyphs overhang their cell like real fonts do:
/// `J` starts `px/8` left of the pen, `f` runs `px/8` past its advance and
/// `Å` rises `px/4` above the ascent while hanging `px/8` below the baseline.
pub(crate) struct BlockRasterizer {
    px: i32,
    missing: Vec<char>,
}

impl BlockRasterizer {
    pub(crate) fn new(px: i32) -> Self {
        Self { px, missing: Vec::new() }
    }

    /// Reports every char in `chars` as missing.
    pub(crate) fn without(mut self, chars: &str) -> Self {
        self.missing.extend(chars.chars());
        self
    }

    fn ink(&self, ch: char) -> PixelRect {
        if ch == ' ' {
            return PixelRect::default();
        }
        let px = self.px;
        let bottom = if "gjpqy".contains(ch) { px / 8 } else { 0 };
        match ch {
            'J' => PixelRect::new(-(px / 8), -(px * 5 / 8), px / 2 - 1, bottom),
            'f' => PixelRect::new(1, -(px * 5 / 8), px / 2 + px / 8, bottom),
            'Å' => PixelRect::new(1, -px, px / 2 - 1, px / 8),
            _ => PixelRect::new(1, -(px * 5 / 8), px / 2 - 1, bottom),
        }
    }
}

impl Rasterizer for BlockRasterizer {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: Fixed::from_int(-(self.px * 3 / 4)),
            descent: Fixed::from_int(self.px / 4),
            line_gap: Fixed::ZERO,
        }
    }

    fn glyph(&self, ch: char) -> Option<RasterGlyph> {
        let advance = self.advance(ch)?;
        let bounds = self.ink(ch);
        let (w, h) = (bounds.width() as u32, bounds.height() as u32);

        Some(RasterGlyph {
            bounds,
            mask: AlphaMask { width: w, height: h, data: vec![255; (w * h) as usize] },
            mask_origin: (0, 0),
            advance,
            bearing: FixedBounds {
                min_x: Fixed::from_int(bounds.x0),
                min_y: Fixed::from_int(bounds.y0),
                max_x: Fixed::from_int(bounds.x1),
                max_y: Fixed::from_int(bounds.y1),
            },
        })
    }

    fn advance(&self, ch: char) -> Option<Fixed> {
        if self.missing.contains(&ch) {
            return None;
        }
        Some(Fixed::from_int(self.px / 2))
    }
}
