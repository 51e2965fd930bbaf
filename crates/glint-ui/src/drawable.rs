use glint_engine::coords::{ColorRgba, Rect, Transform, Vec2};
use glint_engine::geom::Mesh;
use glint_engine::render::{Material, RenderSurface, TextureId};
use glint_engine::text::Text;

/// Anything the UI can stretch onto a rect: panel backgrounds, icons, text.
pub trait Drawable {
    /// Natural bounds in the drawable's own space.
    fn bounds(&self) -> Rect;

    fn rect_draw(&self, surface: &mut dyn RenderSurface, rect: Rect) {
        self.rect_draw_color_mask(surface, rect, ColorRgba::white());
    }

    /// Draws with `bounds()` mapped onto `rect`, tinted by `tint`.
    fn rect_draw_color_mask(&self, surface: &mut dyn RenderSurface, rect: Rect, tint: ColorRgba);
}

impl Drawable for Text<'_> {
    fn bounds(&self) -> Rect {
        Text::bounds(self)
    }

    fn rect_draw_color_mask(&self, surface: &mut dyn RenderSurface, rect: Rect, tint: ColorRgba) {
        Text::rect_draw_color_mask(self, surface, rect, tint);
    }
}

/// A textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    mesh: Mesh,
    bounds: Rect,
    material: Material,
}

impl Sprite {
    /// Quad of `size` pixels sampling `uv` (image space) from `texture`.
    pub fn new(texture: TextureId, size: Vec2, uv: Rect) -> Self {
        let bounds = Rect::from_origin_size(Vec2::zero(), size);
        Self {
            mesh: Mesh::quad(bounds, uv, ColorRgba::white()),
            bounds,
            material: Material::sprite(texture),
        }
    }

    /// Untextured unit quad over the white texture; its tint is its color.
    pub fn solid(white: TextureId) -> Self {
        Self::new(white, Vec2::splat(1.0), Rect::new(0.0, 0.0, 1.0, 1.0))
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Drawable for Sprite {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn rect_draw_color_mask(&self, surface: &mut dyn RenderSurface, rect: Rect, tint: ColorRgba) {
        surface.add(&self.mesh, Transform::rect_to_rect(self.bounds, rect), tint, &self.material);
    }
}

#[cfg(test)]
mod tests {
    use glint_engine::render::DrawList;
    use glint_engine::resources::ResourceRegistry;

    use super::*;

    #[test]
    fn sprite_is_stretched_onto_rect() {
        let reg = ResourceRegistry::new();
        let sprite = Sprite::new(reg.white_texture(), Vec2::new(4.0, 2.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        let mut list = DrawList::new();

        sprite.rect_draw(&mut list, Rect::new(10.0, 10.0, 18.0, 20.0));

        let item = &list.items()[0];
        assert_eq!(item.bounds(), Rect::new(10.0, 10.0, 18.0, 20.0));
        assert_eq!(item.tint, ColorRgba::white());
        assert_eq!(item.material, Material::sprite(reg.white_texture()));
    }
}
