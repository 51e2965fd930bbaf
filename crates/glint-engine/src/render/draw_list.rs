use core::cmp::Ordering;

use crate::coords::{ColorRgba, Rect, Transform};
use crate::geom::Mesh;

use super::{Material, RenderSurface};

/// Paint layer. Higher layers are painted on top of lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const DEFAULT: ZIndex = ZIndex(0);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Paint order: layer ascending, then insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct SortKey {
    z: ZIndex,
    order: u32,
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One recorded [`RenderSurface::add`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: ZIndex,
    pub mesh: Mesh,
    pub transform: Transform,
    pub tint: ColorRgba,
    pub material: Material,
}

impl DrawItem {
    /// Bounds of the mesh after `transform`.
    pub fn bounds(&self) -> Rect {
        let b = self.mesh.bounds();
        Rect::from_corners(self.transform.apply_point(b.min), self.transform.apply_point(b.max))
    }
}

/// Recording [`RenderSurface`].
///
/// Items are tagged with the layer current at the time of the `add` call and
/// iterated back-to-front by (layer, insertion order).
///
/// - `add()` is O(mesh size) (the mesh is cloned)
/// - paint-order iteration reuses an internal index buffer
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    keys: Vec<SortKey>,
    next_order: u32,
    layer: ZIndex,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and resets the layer. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
        self.next_order = 0;
        self.layer = ZIndex::DEFAULT;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    /// Layer applied to subsequent `add` calls.
    #[inline]
    pub fn set_layer(&mut self, layer: ZIndex) {
        self.layer = layer;
    }

    #[inline]
    pub fn layer(&self) -> ZIndex {
        self.layer
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        let keys = &self.keys;
        self.sorted_indices.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        self.sorted_dirty = false;
    }
}

impl RenderSurface for DrawList {
    fn add(&mut self, mesh: &Mesh, transform: Transform, tint: ColorRgba, material: &Material) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.keys.push(SortKey { z: self.layer, order });
        self.items.push(DrawItem {
            layer: self.layer,
            mesh: mesh.clone(),
            transform,
            tint,
            material: material.clone(),
        });
        self.sorted_dirty = true;
    }
}
