use glint_engine::coords::{ColorRgba, Rect, Transform, Vec2};
use glint_engine::geom::GeomDraw;
use glint_engine::render::{DrawList, Material, RenderSurface, ZIndex};
use glint_engine::text::{Atlas, Text};
use glint_engine::Result;

use crate::drawable::Drawable;

/// Layer for backgrounds added by [`Group::panelize_bounds`]; below everything else.
pub const PANEL_LAYER: ZIndex = ZIndex(-128);
/// Layer for debug outlines; above everything else.
pub const DEBUG_LAYER: ZIndex = ZIndex(128);

pub const DEBUG_LINE_WIDTH: f32 = 2.0;

/// Immediate-mode UI group.
///
/// Each frame: [`clear`](Group::clear), issue element calls, then
/// [`draw`](Group::draw). Every element records its screen rect so the group
/// can answer whether a point lies over the UI.
pub struct Group<'a> {
    atlas: &'a Atlas,
    list: DrawList,
    union_bounds: Option<Rect>,
    all_bounds: Vec<Rect>,
    color: ColorRgba,
    geom: GeomDraw,
    solid: Material,
    pointer_caught: bool,

    /// Outline every element (and the union) on [`DEBUG_LAYER`].
    pub debug: bool,
    /// Hit-test against the union rect only; cheaper when elements are packed tightly.
    pub only_check_union: bool,
}

impl<'a> Group<'a> {
    /// `solid` is used for debug outlines and should sample a white texture.
    pub fn new(atlas: &'a Atlas, solid: Material) -> Self {
        let mut geom = GeomDraw::new();
        geom.set_color(ColorRgba::red());

        Self {
            atlas,
            list: DrawList::new(),
            union_bounds: None,
            all_bounds: Vec::new(),
            color: ColorRgba::white(),
            geom,
            solid,
            pointer_caught: false,
            debug: false,
            only_check_union: true,
        }
    }

    /// Forgets last frame's elements.
    pub fn clear(&mut self) {
        self.list.clear();
        self.union_bounds = None;
        self.all_bounds.clear();
        self.pointer_caught = false;
    }

    /// Tint for subsequent elements.
    pub fn set_color(&mut self, color: ColorRgba) {
        self.color = color;
    }

    /// Union of every element rect this frame, if any.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.union_bounds
    }

    #[inline]
    pub fn element_bounds(&self) -> &[Rect] {
        &self.all_bounds
    }

    /// Items recorded this frame.
    #[inline]
    pub fn draw_list(&mut self) -> &mut DrawList {
        &mut self.list
    }

    /// Whether `point` is over the UI.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.only_check_union {
            return self.union_bounds.is_some_and(|r| r.contains(point));
        }
        self.all_bounds.iter().any(|r| r.contains(point))
    }

    // ── elements ──────────────────────────────────────────────────────────

    /// Stretches `sprite` over `rect`.
    pub fn panel(&mut self, sprite: &dyn Drawable, rect: Rect) {
        sprite.rect_draw_color_mask(&mut self.list, rect, self.color);
        self.append_bounds(rect);
        self.debug_rect(rect);
    }

    /// Puts `sprite` behind everything drawn so far, covering the union
    /// bounds grown by `padding`. Does nothing for an empty group.
    pub fn panelize_bounds(&mut self, sprite: &dyn Drawable, padding: Rect) {
        let Some(union) = self.union_bounds else {
            log::debug!("panelize_bounds on an empty group; skipped");
            return;
        };
        self.with_layer(PANEL_LAYER, |g| g.panel(sprite, union.pad(padding)));
    }

    /// Text scaled to fit `rect`, placed at `anchor`. Returns the rect it covers.
    pub fn text(&mut self, text: &str, rect: Rect, anchor: Vec2) -> Result<Rect> {
        let t = Text::new(self.atlas, text)?;
        let r = rect.anchor(t.bounds().scaled_to_fit(rect), anchor);
        self.place_text(&t, r);
        Ok(r)
    }

    /// Text at a fixed `scale` of its natural size, placed at `anchor`.
    pub fn fixed_text(&mut self, text: &str, rect: Rect, anchor: Vec2, scale: f32) -> Result<Rect> {
        let t = Text::new(self.atlas, text)?;
        let r = rect.anchor(t.bounds().scaled(scale), anchor);
        self.place_text(&t, r);
        Ok(r)
    }

    /// Like [`fixed_text`](Group::fixed_text), but aligns the text's
    /// `text_anchor` point with `rect`'s `anchor` point, so it may overhang.
    pub fn full_fixed_text(
        &mut self,
        text: &str,
        rect: Rect,
        anchor: Vec2,
        text_anchor: Vec2,
        scale: f32,
    ) -> Result<Rect> {
        let t = Text::new(self.atlas, text)?;
        let r = rect.full_anchor(t.bounds().scaled(scale), anchor, text_anchor);
        self.place_text(&t, r);
        Ok(r)
    }

    /// Shows `tip` on `panel` when `pointer` is over `rect`.
    ///
    /// Only the first tooltip under the pointer each frame is shown. Returns
    /// whether this one was.
    pub fn tooltip(&mut self, panel: &dyn Drawable, tip: &str, rect: Rect, anchor: Vec2, pointer: Vec2) -> Result<bool> {
        if self.pointer_caught || !rect.contains(pointer) {
            return Ok(false);
        }
        self.pointer_caught = true;

        let t = Text::new(self.atlas, tip)?;
        let tip_rect = rect.anchor(t.bounds(), anchor);

        self.panel(panel, tip_rect);
        t.rect_draw_color_mask(&mut self.list, tip_rect, self.color);
        Ok(true)
    }

    /// Outlines `rect` in red on the debug layer. No-op unless `debug` is set.
    pub fn debug_rect(&mut self, rect: Rect) {
        if !self.debug {
            return;
        }
        let mesh = self.geom.rectangle(rect, DEBUG_LINE_WIDTH);
        let solid = self.solid.clone();
        self.with_layer(DEBUG_LAYER, |g| {
            g.list.add(&mesh, Transform::IDENTITY, ColorRgba::white(), &solid);
        });
    }

    /// Hands everything recorded this frame to `surface` in paint order,
    /// followed by the union outline when debugging.
    pub fn draw(&mut self, surface: &mut dyn RenderSurface) {
        for item in self.list.iter_in_paint_order() {
            surface.add(&item.mesh, item.transform, item.tint, &item.material);
        }
        let Some(union) = self.union_bounds.filter(|_| self.debug) else { return };
        let mesh = self.geom.rectangle(union, DEBUG_LINE_WIDTH);
        surface.add(&mesh, Transform::IDENTITY, ColorRgba::white(), &self.solid);
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn place_text(&mut self, text: &Text<'_>, rect: Rect) {
        text.rect_draw_color_mask(&mut self.list, rect, self.color);
        self.append_bounds(rect);
        self.debug_rect(rect);
    }

    fn append_bounds(&mut self, rect: Rect) {
        self.all_bounds.push(rect);
        self.union_bounds = Some(match self.union_bounds {
            Some(u) => u.union(rect),
            None => rect,
        });
    }

    fn with_layer(&mut self, layer: ZIndex, f: impl FnOnce(&mut Self)) {
        let previous = self.list.layer();
        self.list.set_layer(layer);
        f(self);
        self.list.set_layer(previous);
    }
}

#[cfg(test)]
mod tests {
    use glint_engine::render::DrawItem;
    use glint_engine::resources::ResourceRegistry;
    use glint_engine::text::{
        AlphaMask, AtlasConfig, Fixed, FixedBounds, FontMetrics, PixelRect, RasterGlyph, Rasterizer,
    };

    use super::*;
    use crate::drawable::Sprite;

    /// 16px font: every glyph is an 8x10 block advancing 8px.
    struct Blocks;

    impl Rasterizer for Blocks {
        fn metrics(&self) -> FontMetrics {
            FontMetrics { ascent: Fixed::from_int(-12), descent: Fixed::from_int(4), line_gap: Fixed::ZERO }
        }

        fn glyph(&self, _ch: char) -> Option<RasterGlyph> {
            let bounds = PixelRect::new(0, -10, 8, 0);
            Some(RasterGlyph {
                bounds,
                mask: AlphaMask { width: 8, height: 10, data: vec![255; 80] },
                mask_origin: (0, 0),
                advance: Fixed::from_int(8),
                bearing: FixedBounds {
                    min_x: Fixed::ZERO,
                    min_y: Fixed::from_int(-10),
                    max_x: Fixed::from_int(8),
                    max_y: Fixed::ZERO,
                },
            })
        }

        fn advance(&self, _ch: char) -> Option<Fixed> {
            Some(Fixed::from_int(8))
        }
    }

    fn setup() -> (Atlas, ResourceRegistry) {
        let config = AtlasConfig { size: 256, ..AtlasConfig::default() };
        (Atlas::ascii(&Blocks, &config).unwrap(), ResourceRegistry::new())
    }

    fn layers(list: &mut DrawList) -> Vec<ZIndex> {
        list.iter_in_paint_order().map(|i: &DrawItem| i.layer).collect()
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn union_bounds_cover_all_panels() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        let sprite = Sprite::solid(reg.white_texture());

        assert!(!g.contains(Vec2::zero()));

        g.panel(&sprite, Rect::new(0.0, 0.0, 10.0, 10.0));
        g.panel(&sprite, Rect::new(20.0, 0.0, 30.0, 10.0));

        assert_eq!(g.bounds(), Some(Rect::new(0.0, 0.0, 30.0, 10.0)));
        assert_eq!(g.element_bounds().len(), 2);

        // The gap between panels counts only when checking the union.
        let gap = Vec2::new(15.0, 5.0);
        assert!(g.contains(gap));
        g.only_check_union = false;
        assert!(!g.contains(gap));
        assert!(g.contains(Vec2::new(25.0, 5.0)));
    }

    #[test]
    fn clear_forgets_everything() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        g.panel(&Sprite::solid(reg.white_texture()), Rect::new(0.0, 0.0, 1.0, 1.0));

        g.clear();

        assert_eq!(g.bounds(), None);
        assert!(g.element_bounds().is_empty());
        let mut out = DrawList::new();
        g.draw(&mut out);
        assert!(out.is_empty());
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_is_scaled_to_fit_and_anchored() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());

        // "ab" is 16 wide and 16 tall (ascent 12 + descent 4).
        let r = g.text("ab", Rect::new(0.0, 0.0, 100.0, 32.0), Vec2::new(0.5, 0.5)).unwrap();

        assert_close(r.width(), 32.0);
        assert_close(r.height(), 32.0);
        assert_close(r.center().x, 50.0);
        assert_eq!(g.bounds(), Some(r));
    }

    #[test]
    fn fixed_text_keeps_requested_scale() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());

        let r = g.fixed_text("abc", Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::zero(), 0.5).unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 12.0, 8.0));

        let r = g
            .full_fixed_text("abc", Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::new(1.0, 1.0), Vec2::zero(), 1.0)
            .unwrap();
        assert_eq!(r.min, Vec2::new(100.0, 100.0));
        assert_eq!(r.size(), Vec2::new(24.0, 16.0));
    }

    #[test]
    fn text_mesh_lands_on_returned_rect() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        let r = g.fixed_text("ab", Rect::new(10.0, 10.0, 50.0, 50.0), Vec2::zero(), 1.0).unwrap();

        let mut out = DrawList::new();
        g.draw(&mut out);
        let drawn = out.items()[0].bounds();
        assert!(r.contains_rect(drawn), "{drawn:?} outside {r:?}");
    }

    // ── tooltip ───────────────────────────────────────────────────────────

    #[test]
    fn tooltip_only_shows_under_pointer_once_per_frame() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        let panel = Sprite::solid(reg.white_texture());
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);

        assert!(!g.tooltip(&panel, "tip", rect, Vec2::zero(), Vec2::new(60.0, 5.0)).unwrap());
        assert!(g.bounds().is_none());

        assert!(g.tooltip(&panel, "tip", rect, Vec2::zero(), Vec2::new(5.0, 5.0)).unwrap());
        assert!(!g.tooltip(&panel, "other", rect, Vec2::zero(), Vec2::new(5.0, 5.0)).unwrap());

        g.clear();
        assert!(g.tooltip(&panel, "tip", rect, Vec2::zero(), Vec2::new(5.0, 5.0)).unwrap());
    }

    // ── layers ────────────────────────────────────────────────────────────

    #[test]
    fn panelized_background_paints_first() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        let sprite = Sprite::solid(reg.white_texture());

        g.panelize_bounds(&sprite, Rect::ZERO);
        assert!(g.bounds().is_none());

        g.panel(&sprite, Rect::new(0.0, 0.0, 10.0, 10.0));
        g.panelize_bounds(&sprite, Rect::new(2.0, 2.0, 2.0, 2.0));

        assert_eq!(g.bounds(), Some(Rect::new(-2.0, -2.0, 12.0, 12.0)));
        assert_eq!(layers(g.draw_list()), vec![PANEL_LAYER, ZIndex::DEFAULT]);

        let mut out = DrawList::new();
        g.draw(&mut out);
        assert_eq!(out.items()[0].bounds(), Rect::new(-2.0, -2.0, 12.0, 12.0));
    }

    #[test]
    fn debug_outlines_paint_last() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        g.debug = true;
        g.panel(&Sprite::solid(reg.white_texture()), Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut out = DrawList::new();
        g.draw(&mut out);

        // panel, its outline, and the union outline
        assert_eq!(out.len(), 3);
        assert_eq!(layers(g.draw_list()), vec![ZIndex::DEFAULT, DEBUG_LAYER]);
        let outline = &out.items()[1];
        assert_eq!(outline.material, reg.solid_material());
        assert!(outline.mesh.colors().iter().all(|&c| c == ColorRgba::red()));
        assert_eq!(out.items()[2].bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn drawing_twice_does_not_duplicate_the_union_outline() {
        let (atlas, reg) = setup();
        let mut g = Group::new(&atlas, reg.solid_material());
        g.debug = true;
        g.panel(&Sprite::solid(reg.white_texture()), Rect::new(0.0, 0.0, 10.0, 10.0));

        let mut first = DrawList::new();
        g.draw(&mut first);
        let mut second = DrawList::new();
        g.draw(&mut second);

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
        assert_eq!(g.draw_list().len(), 2);
    }
}
