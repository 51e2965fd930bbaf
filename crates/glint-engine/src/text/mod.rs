//! Glyph atlases and text layout.
//!
//! A [`Rasterizer`] supplies glyph bitmaps and metrics; [`Atlas`] bakes a set
//! of code points into one RGBA bitmap; [`Atlas::layout`] and [`Text`] turn
//! strings into glyph-quad meshes.

mod atlas;
mod fixed;
mod layout;
mod raster;

#[cfg(test)]
pub(crate) mod testing;

pub use atlas::{Atlas, AtlasConfig, Glyph, DEFAULT_ATLAS_SIZE, DEFAULT_GLYPH_PADDING};
pub use fixed::Fixed;
pub use layout::{Text, FALLBACK_GLYPH};
pub use raster::{AlphaMask, FixedBounds, FontMetrics, FontdueRasterizer, PixelRect, RasterGlyph, Rasterizer};
