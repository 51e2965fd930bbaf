use crate::coords::{ColorRgba, Transform};
use crate::geom::Mesh;

/// Opaque handle to a shader program owned by the render backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub u32);

impl ShaderId {
    /// Textured, vertex-colored quads. Used for sprites, text and solid geometry.
    pub const SPRITE: ShaderId = ShaderId(0);
}

/// Handle to a texture registered in a [`ResourceRegistry`](crate::resources::ResourceRegistry).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TextureId(pub(crate) u32);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shader plus the textures it samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material {
    pub shader: ShaderId,
    pub textures: Vec<TextureId>,
}

impl Material {
    /// Sprite shader sampling `texture`.
    pub fn sprite(texture: TextureId) -> Self {
        Self { shader: ShaderId::SPRITE, textures: vec![texture] }
    }

    /// Sprite shader over the shared white texture, so vertex colors show as-is.
    pub fn solid(white: TextureId) -> Self {
        Self::sprite(white)
    }
}

/// Sink for finished meshes.
///
/// The render backend owns batching and draw calls; producers only hand over
/// a mesh with its placement, tint and material.
pub trait RenderSurface {
    fn add(&mut self, mesh: &Mesh, transform: Transform, tint: ColorRgba, material: &Material);
}
