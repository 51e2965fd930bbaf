use std::collections::{HashMap, HashSet};

use crate::coords::{Rect, Vec2};
use crate::error::{Error, Result};
use crate::image::{Image, Sampling};
use crate::render::TextureId;

use super::raster::{FontMetrics, PixelRect, RasterGlyph, Rasterizer};
use super::Fixed;

// ── config ────────────────────────────────────────────────────────────────

pub const DEFAULT_ATLAS_SIZE: u32 = 1024;
pub const DEFAULT_GLYPH_PADDING: u32 = 2;

/// Atlas baking parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Edge length of the square bitmap in pixels.
    pub size: u32,
    /// Pixels left between neighbouring glyphs and around the border.
    pub padding: u32,
    pub sampling: Sampling,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_ATLAS_SIZE,
            padding: DEFAULT_GLYPH_PADDING,
            sampling: Sampling::Linear,
        }
    }
}

// ── glyph ─────────────────────────────────────────────────────────────────

/// Per-glyph layout metrics, normalized by the atlas size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    /// Offset from the pen to the glyph quad's bottom-left corner (+Y up).
    pub bearing: Vec2,
    /// Region of the atlas bitmap in [0,1]², image space (`min.y` is the top row).
    pub uv: Rect,
}

// ── atlas ─────────────────────────────────────────────────────────────────

/// A baked glyph atlas: one RGBA bitmap plus per-glyph metrics.
///
/// The bitmap holds premultiplied white coverage, so tinting a glyph quad
/// with a vertex color gives colored text.
#[derive(Debug, Clone)]
pub struct Atlas {
    image: Image,
    glyphs: HashMap<char, Glyph>,
    metrics: FontMetrics,
    sampling: Sampling,
    texture: Option<TextureId>,
}

impl Atlas {
    /// Rasterizes `chars` and shelf-packs them into a `config.size` square bitmap.
    ///
    /// Repeated code points are baked once. Fails with [`Error::MissingGlyph`]
    /// if the rasterizer cannot produce one of them, or
    /// [`Error::AtlasOverflow`] once a glyph would land outside the bitmap.
    pub fn new<R>(rasterizer: &R, chars: impl IntoIterator<Item = char>, config: &AtlasConfig) -> Result<Self>
    where
        R: Rasterizer + ?Sized,
    {
        let mut seen = HashSet::new();
        let chars: Vec<char> = chars.into_iter().filter(|c| seen.insert(*c)).collect();

        let metrics = rasterizer.metrics();
        let size = config.size;
        let limit = Fixed::from_int(size as i32);
        let padding = Fixed::from_int(config.padding as i32);
        let line_box = metrics.descent - metrics.ascent;

        let start_x = padding;
        let mut pen_x = start_x;
        let mut pen_y = Fixed::from_int((padding - metrics.ascent).ceil());
        let mut shelf = Shelf::new(pen_y, metrics.ascent);
        let mut rows = 1u32;

        let mut image = Image::transparent(size, size);
        let mut glyphs = HashMap::with_capacity(chars.len());

        for (i, &ch) in chars.iter().enumerate() {
            let raster = rasterizer.glyph(ch).ok_or(Error::MissingGlyph { ch })?;

            let mut dst = shelf.place(raster.bounds, pen_x, pen_y);
            if dst.x1 > size as i32 && pen_x != start_x {
                // Ink overhangs the advance the lookahead checked.
                pen_y = shelf.next_row(pen_y, line_box + padding, padding, metrics.ascent);
                pen_x = start_x;
                rows += 1;
                dst = shelf.place(raster.bounds, pen_x, pen_y);
            }
            if dst.x0 < 0 || dst.y0 < 0 || dst.x1 > size as i32 || dst.y1 > size as i32 {
                return Err(Error::AtlasOverflow { ch, size });
            }
            blit(&mut image, &raster, dst);
            glyphs.insert(ch, glyph_metrics(&raster, dst, size));
            shelf.bottom = shelf.bottom.max(dst.y1);

            let shift = Fixed::from_int(dst.x0 - raster.bounds.x0 - pen_x.floor());
            pen_x = (pen_x + shift + raster.advance).max(Fixed::from_int(dst.x1)) + padding;

            let Some(&next) = chars.get(i + 1) else { break };
            let next_advance = rasterizer.advance(next).ok_or(Error::MissingGlyph { ch: next })?;
            if pen_x + next_advance >= limit {
                pen_y = shelf.next_row(pen_y, line_box + padding, padding, metrics.ascent);
                pen_x = start_x;
                rows += 1;
            }
        }

        log::debug!("baked {} glyphs into a {size}x{size} atlas ({rows} rows)", glyphs.len());

        Ok(Self {
            image,
            glyphs,
            metrics,
            sampling: config.sampling,
            texture: None,
        })
    }

    /// Bakes the printable ASCII range, `' '` through `'~'`.
    pub fn ascii<R>(rasterizer: &R, config: &AtlasConfig) -> Result<Self>
    where
        R: Rasterizer + ?Sized,
    {
        Self::new(rasterizer, (32u8..=126).map(char::from), config)
    }

    #[inline]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Bitmap edge length in pixels.
    #[inline]
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Texture the bitmap was registered as, if any.
    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub(crate) fn set_texture(&mut self, id: TextureId) {
        self.texture = Some(id);
    }

    /// Top of the line box relative to the baseline, in pixels (+Y down, so <= 0).
    #[inline]
    pub fn ascent(&self) -> f32 {
        self.metrics.ascent.to_f32()
    }

    /// Bottom of the line box relative to the baseline, in pixels (>= 0).
    #[inline]
    pub fn descent(&self) -> f32 {
        self.metrics.descent.to_f32()
    }

    #[inline]
    pub fn line_gap(&self) -> f32 {
        self.metrics.line_gap.to_f32()
    }

    /// Baseline-to-baseline distance in pixels.
    pub fn line_height(&self) -> f32 {
        2.0 * (self.descent() - self.ascent() - self.line_gap())
    }
}

/// Vertical extent of the shelf row being filled, in atlas pixels.
struct Shelf {
    top: i32,
    bottom: i32,
}

impl Shelf {
    fn new(pen_y: Fixed, ascent: Fixed) -> Self {
        let top = (pen_y + ascent).floor();
        Self { top, bottom: top }
    }

    /// Destination of a glyph box drawn at the pen, pushed right and down so
    /// ink left of the pen or above the row top stays inside the row.
    fn place(&self, bounds: PixelRect, pen_x: Fixed, pen_y: Fixed) -> PixelRect {
        let dx = pen_x.floor() - bounds.x0.min(0);
        let dy = pen_y.floor().max(self.top - bounds.y0);
        bounds.translated(dx, dy)
    }

    /// Baseline of the next row: one row step down, and never above the
    /// lowest ink of this row plus padding.
    fn next_row(&mut self, pen_y: Fixed, step: Fixed, padding: Fixed, ascent: Fixed) -> Fixed {
        let mut next = pen_y + step;
        let min_top = self.bottom + padding.ceil();
        if (next + ascent).floor() < min_top {
            next = Fixed::from_int(min_top) - ascent;
        }
        *self = Self::new(next, ascent);
        next
    }
}

fn glyph_metrics(raster: &RasterGlyph, dst: PixelRect, size: u32) -> Glyph {
    let s = size as f32;
    Glyph {
        advance: raster.advance.floor() as f32 / s,
        bearing: Vec2::new(raster.bearing.min_x.to_f32() / s, -raster.bearing.max_y.to_f32() / s),
        uv: Rect::new(dst.x0 as f32 / s, dst.y0 as f32 / s, dst.x1 as f32 / s, dst.y1 as f32 / s),
    }
}

/// Copies the glyph mask into `dst` as premultiplied white.
fn blit(image: &mut Image, raster: &RasterGlyph, dst: PixelRect) {
    let (ox, oy) = raster.mask_origin;
    let (w, h) = (dst.width().max(0) as u32, dst.height().max(0) as u32);

    for row in 0..h {
        for col in 0..w {
            let a = raster.mask.get(ox + col, oy + row);
            if a != 0 {
                image.put_pixel(dst.x0 as u32 + col, dst.y0 as u32 + row, [a, a, a, a]);
            }
        }
    }
}
