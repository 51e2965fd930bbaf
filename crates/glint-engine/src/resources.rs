//! Application-owned registry of textures and atlases.

use crate::image::{Image, Sampling};
use crate::render::{Material, TextureId};
use crate::text::Atlas;

/// Edge length of the shared white texture.
pub const WHITE_TEXTURE_SIZE: u32 = 128;

/// Opaque handle to an atlas stored in a [`ResourceRegistry`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AtlasId(usize);

#[derive(Debug, Clone)]
struct TextureEntry {
    image: Image,
    sampling: Sampling,
}

/// Owns the CPU copies of every texture and atlas a frame may reference.
///
/// Created once by the application and passed to whatever needs it. The
/// shared white texture is registered at construction and is always valid.
/// Handles are never invalidated; resources live as long as the registry.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    textures: Vec<TextureEntry>,
    atlases: Vec<Atlas>,
    default_atlas: Option<AtlasId>,
    white: TextureId,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            textures: Vec::new(),
            atlases: Vec::new(),
            default_atlas: None,
            white: TextureId(0),
        };
        registry.white = registry.add_texture(Image::white(WHITE_TEXTURE_SIZE, WHITE_TEXTURE_SIZE), Sampling::Nearest);
        registry
    }

    // ── textures ──────────────────────────────────────────────────────────

    pub fn add_texture(&mut self, image: Image, sampling: Sampling) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(TextureEntry { image, sampling });
        id
    }

    pub fn texture(&self, id: TextureId) -> Option<&Image> {
        self.textures.get(id.index()).map(|t| &t.image)
    }

    /// Mutable access for pixel updates.
    pub fn texture_mut(&mut self, id: TextureId) -> Option<&mut Image> {
        self.textures.get_mut(id.index()).map(|t| &mut t.image)
    }

    pub fn sampling(&self, id: TextureId) -> Option<Sampling> {
        self.textures.get(id.index()).map(|t| t.sampling)
    }

    /// All textures in registration order, for uploading.
    pub fn textures(&self) -> impl Iterator<Item = (TextureId, &Image, Sampling)> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (TextureId(i as u32), &t.image, t.sampling))
    }

    #[inline]
    pub fn white_texture(&self) -> TextureId {
        self.white
    }

    /// Material for untextured, vertex-colored geometry.
    pub fn solid_material(&self) -> Material {
        Material::solid(self.white)
    }

    // ── atlases ───────────────────────────────────────────────────────────

    /// Stores `atlas` and registers its bitmap as a texture.
    ///
    /// The first atlas added becomes the default.
    pub fn add_atlas(&mut self, mut atlas: Atlas) -> AtlasId {
        let texture = self.add_texture(atlas.image().clone(), atlas.sampling());
        atlas.set_texture(texture);

        let id = AtlasId(self.atlases.len());
        self.atlases.push(atlas);
        if self.default_atlas.is_none() {
            self.default_atlas = Some(id);
        }

        log::debug!("registered atlas {id:?} as texture {texture:?}");
        id
    }

    pub fn atlas(&self, id: AtlasId) -> Option<&Atlas> {
        self.atlases.get(id.0)
    }

    pub fn set_default_atlas(&mut self, id: AtlasId) {
        self.default_atlas = Some(id);
    }

    pub fn default_atlas(&self) -> Option<&Atlas> {
        self.default_atlas.and_then(|id| self.atlas(id))
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
