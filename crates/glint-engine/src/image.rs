//! CPU-side RGBA8 images.
//!
//! An [`Image`] is the texture resource glyph atlases bake into and the unit
//! [`GpuTexture`](crate::render::GpuTexture) uploads. Row 0 is the top row.

use crate::coords::Rect;
use crate::error::{Error, Result};

/// Texture filtering hint carried alongside an image.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// Bilinear filtering; smooth when scaled.
    #[default]
    Linear,
    /// Nearest-texel filtering; crisp pixel art.
    Nearest,
}

/// Tightly packed RGBA8 pixel buffer, `width * height * 4` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wraps an existing pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self { width, height, pixels })
    }

    /// Fully transparent image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self { width, height, pixels }
    }

    /// Opaque white image, used as the texture for untextured geometry.
    pub fn white(width: u32, height: u32) -> Self {
        Self::filled(width, height, [255; 4])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// `(0, 0)` to `(width, height)` as a float rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Writes one pixel. Coordinates outside the image are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Replaces the `w` x `h` region at `(x, y)` with `pixels`.
    pub fn set_pixels(&mut self, x: u32, y: u32, w: u32, h: u32, pixels: &[u8]) -> Result<()> {
        check_len(w, h, pixels.len())?;
        check_region(x, y, w, h, self.width, self.height)?;
        if w == 0 || h == 0 {
            return Ok(());
        }

        let row_bytes = w as usize * 4;
        for (row, src) in pixels.chunks_exact(row_bytes).enumerate() {
            let start = self.offset(x, y + row as u32);
            self.pixels[start..start + row_bytes].copy_from_slice(src);
        }
        Ok(())
    }

    /// Replaces the whole image. `other` must have the same dimensions.
    pub fn set_image(&mut self, other: &Image) -> Result<()> {
        if other.width != self.width || other.height != self.height {
            return Err(Error::RegionOutOfBounds {
                x: 0,
                y: 0,
                width: other.width,
                height: other.height,
                image_width: self.width,
                image_height: self.height,
            });
        }
        self.pixels.copy_from_slice(&other.pixels);
        Ok(())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Fails unless `len == w * h * 4`.
pub(crate) fn check_len(w: u32, h: u32, len: usize) -> Result<()> {
    let expected = w as usize * h as usize * 4;
    if len != expected {
        return Err(Error::PixelBufferSize { expected, actual: len });
    }
    Ok(())
}

/// Fails unless the region lies entirely inside a `width` x `height` image.
pub(crate) fn check_region(x: u32, y: u32, w: u32, h: u32, width: u32, height: u32) -> Result<()> {
    let fits_x = x.checked_add(w).is_some_and(|r| r <= width);
    let fits_y = y.checked_add(h).is_some_and(|b| b <= height);
    if !(fits_x && fits_y) {
        return Err(Error::RegionOutOfBounds {
            x,
            y,
            width: w,
            height: h,
            image_width: width,
            image_height: height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = Image::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err, Error::PixelBufferSize { expected: 16, actual: 15 });
        assert!(Image::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn set_pixels_writes_region() {
        let mut img = Image::transparent(4, 3);
        let red = [255, 0, 0, 255];
        let patch: Vec<u8> = red.iter().copied().cycle().take(2 * 2 * 4).collect();

        img.set_pixels(1, 1, 2, 2, &patch).unwrap();

        assert_eq!(img.pixel(1, 1), Some(red));
        assert_eq!(img.pixel(2, 2), Some(red));
        assert_eq!(img.pixel(0, 1), Some([0; 4]));
        assert_eq!(img.pixel(3, 2), Some([0; 4]));
        assert_eq!(img.pixel(1, 0), Some([0; 4]));
    }

    #[test]
    fn set_pixels_rejects_bad_length_and_region() {
        let mut img = Image::transparent(4, 4);

        let err = img.set_pixels(0, 0, 2, 2, &[0; 12]).unwrap_err();
        assert_eq!(err, Error::PixelBufferSize { expected: 16, actual: 12 });

        let err = img.set_pixels(3, 0, 2, 1, &[0; 8]).unwrap_err();
        assert!(matches!(err, Error::RegionOutOfBounds { x: 3, width: 2, .. }));

        let err = img.set_pixels(0, u32::MAX, 1, 2, &[0; 8]).unwrap_err();
        assert!(matches!(err, Error::RegionOutOfBounds { .. }));
    }

    #[test]
    fn empty_region_is_a_no_op() {
        let mut img = Image::filled(4, 4, [9; 4]);

        img.set_pixels(0, 0, 0, 3, &[]).unwrap();
        img.set_pixels(1, 1, 2, 0, &[]).unwrap();

        assert!(img.pixels().iter().all(|&b| b == 9));
    }

    #[test]
    fn set_image_requires_matching_size() {
        let mut img = Image::transparent(2, 2);
        assert!(img.set_image(&Image::white(3, 2)).is_err());

        img.set_image(&Image::white(2, 2)).unwrap();
        assert!(img.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn bounds_match_dimensions() {
        assert_eq!(Image::white(8, 4).bounds(), Rect::new(0.0, 0.0, 8.0, 4.0));
    }
}
