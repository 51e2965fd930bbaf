//! Coordinate and geometry types shared by the mesh generators, text layout
//! and the UI layer.
//!
//! Canonical CPU space:
//! - layout units (pixels when text is laid out at scale 1)
//! - +X right, +Y up
//!
//! Atlas bitmaps are the exception: they use image space (origin top-left,
//! +Y down) and only surface as normalized UV rectangles.

mod color;
mod rect;
mod transform;
mod vec2;
mod vec3;

pub use color::ColorRgba;
pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use vec3::Vec3;
