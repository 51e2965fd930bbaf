//! Mesh container and the stroke/fill generator.

mod draw;
mod mesh;

pub use draw::{ellipse_points, GeomDraw, DEFAULT_DIVISIONS};
pub use mesh::{Mesh, MeshVertex};
