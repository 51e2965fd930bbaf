//! Engine error type.
//!
//! Every error here is a programmer or configuration error: none of them are
//! transient, so callers should surface them rather than retry.

/// Errors produced by mesh construction, geometry generation, atlas baking,
/// text layout and texture uploads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    // ── configuration ─────────────────────────────────────────────────────
    /// A code point requested for the atlas could not be rasterized.
    #[error("missing glyph for {ch:?} in the rasterizer")]
    MissingGlyph { ch: char },

    /// The atlas bitmap is too small for the requested code points.
    #[error("glyph {ch:?} does not fit in the {size}x{size} atlas")]
    AtlasOverflow { ch: char, size: u32 },

    #[error("font load error: {0}")]
    FontLoad(String),

    // ── unsupported ───────────────────────────────────────────────────────
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    // ── invariant violations ──────────────────────────────────────────────
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, actual: usize },

    #[error("region {x},{y} {width}x{height} lies outside the {image_width}x{image_height} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("vertex attribute lengths differ: {positions} positions, {colors} colors, {tex_coords} tex coords")]
    AttributeLengthMismatch {
        positions: usize,
        colors: usize,
        tex_coords: usize,
    },

    #[error("index count {count} is not a multiple of 3")]
    IndexCountNotTriangles { count: usize },

    // ── layout ────────────────────────────────────────────────────────────
    /// Neither the requested glyph nor its fallback exists in the atlas.
    #[error("missing glyph {ch:?} and fallback {fallback:?} in the atlas")]
    MissingFallback { ch: char, fallback: char },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
