use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Rect, Vec2, Vec3};
use crate::error::{Error, Result};

/// Triangle mesh with per-vertex position, color and texture coordinate.
///
/// Attributes are stored as parallel sequences; index `i` in each describes
/// one vertex.
///
/// Invariants:
/// - `positions.len() == colors.len() == tex_coords.len()`
/// - `indices.len() % 3 == 0`
/// - every index `< vertex_count()`
///
/// All constructors in this crate uphold them; [`Mesh::from_parts`] checks
/// them for caller-built buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub(super) positions: Vec<Vec3>,
    pub(super) colors: Vec<ColorRgba>,
    pub(super) tex_coords: Vec<Vec2>,
    pub(super) indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from raw buffers, rejecting any that break the invariants.
    pub fn from_parts(
        positions: Vec<Vec3>,
        colors: Vec<ColorRgba>,
        tex_coords: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<Self> {
        let mesh = Self { positions, colors, tex_coords, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Textured quad covering `rect` at z = 0.
    ///
    /// `uv` is sampled in image space: `uv.min.y` is the top row of the
    /// bitmap and maps onto the quad's top edge (`rect.max.y`).
    pub fn quad(rect: Rect, uv: Rect, color: ColorRgba) -> Self {
        Self {
            positions: vec![
                Vec3::new(rect.min.x, rect.min.y, 0.0),
                Vec3::new(rect.max.x, rect.min.y, 0.0),
                Vec3::new(rect.max.x, rect.max.y, 0.0),
                Vec3::new(rect.min.x, rect.max.y, 0.0),
            ],
            colors: vec![color; 4],
            tex_coords: vec![
                Vec2::new(uv.min.x, uv.max.y),
                Vec2::new(uv.max.x, uv.max.y),
                Vec2::new(uv.max.x, uv.min.y),
                Vec2::new(uv.min.x, uv.min.y),
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    /// Checks the structural invariants.
    pub fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.colors.len() != n || self.tex_coords.len() != n {
            return Err(Error::AttributeLengthMismatch {
                positions: n,
                colors: self.colors.len(),
                tex_coords: self.tex_coords.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::IndexCountNotTriangles { count: self.indices.len() });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(Error::IndexOutOfRange { index, vertex_count: n });
        }
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[ColorRgba] {
        &self.colors
    }

    #[inline]
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Removes all vertices and indices. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.tex_coords.clear();
        self.indices.clear();
    }

    /// Copies `other` onto the end of `self`.
    ///
    /// `other`'s indices are offset by `self`'s vertex count before the append
    /// so they keep addressing `other`'s own vertices.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
        self.tex_coords.extend_from_slice(&other.tex_coords);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Overwrites every vertex color.
    pub fn set_color(&mut self, color: ColorRgba) {
        self.colors.fill(color);
    }

    /// Axis-aligned bounds of all positions (xy). Returns [`Rect::ZERO`] for an
    /// empty mesh.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.positions.first() else {
            return Rect::ZERO;
        };

        let init = Rect::new(first.x, first.y, first.x, first.y);
        self.positions.iter().fold(init, |r, p| {
            Rect::new(r.min.x.min(p.x), r.min.y.min(p.y), r.max.x.max(p.x), r.max.y.max(p.y))
        })
    }

    /// Interleaved vertices ready for a GPU vertex buffer.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.tex_coords)
            .map(|((p, c), uv)| MeshVertex {
                position: [p.x, p.y, p.z],
                color: c.to_array(),
                uv: [uv.x, uv.y],
            })
            .collect()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Interleaved vertex layout (36 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  color     [f32; 4]   loc 1
///  offset 28  uv        [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(offset: f32) -> Mesh {
        Mesh::from_parts(
            vec![
                Vec3::new(offset, 0.0, 0.0),
                Vec3::new(offset + 1.0, 0.0, 0.0),
                Vec3::new(offset, 1.0, 0.0),
            ],
            vec![ColorRgba::white(); 3],
            vec![Vec2::zero(); 3],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    // ── append ────────────────────────────────────────────────────────────

    #[test]
    fn append_rebases_indices() {
        let mut a = tri(0.0);
        let b = Mesh::quad(Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0), ColorRgba::black());
        let before = a.vertex_count() as u32;

        a.append(&b);

        assert_eq!(a.indices().len(), 3 + b.indices().len());
        for (got, want) in a.indices()[3..].iter().zip(b.indices()) {
            assert_eq!(*got, want + before);
        }
        assert_eq!(a.vertex_count(), 7);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn append_into_empty_copies() {
        let mut a = Mesh::new();
        let b = tri(2.0);
        a.append(&b);
        assert_eq!(a, b);
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn bounds_of_empty_is_zero() {
        assert_eq!(Mesh::new().bounds(), Rect::ZERO);
    }

    #[test]
    fn bounds_span_all_positions() {
        let mut m = tri(0.0);
        m.append(&tri(-3.0));
        assert_eq!(m.bounds(), Rect::new(-3.0, 0.0, 1.0, 1.0));
    }

    // ── set_color ─────────────────────────────────────────────────────────

    #[test]
    fn set_color_overwrites_every_vertex() {
        let mut m = tri(0.0);
        m.append(&tri(1.0));
        let c = ColorRgba::new(0.1, 0.2, 0.3, 0.4);
        m.set_color(c);
        assert!(m.colors().iter().all(|&v| v == c));
        assert_eq!(m.colors().len(), m.vertex_count());
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn from_parts_rejects_out_of_range_index() {
        let err = Mesh::from_parts(
            vec![Vec3::zero(); 3],
            vec![ColorRgba::white(); 3],
            vec![Vec2::zero(); 3],
            vec![0, 1, 3],
        )
        .unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 3, vertex_count: 3 });
    }

    #[test]
    fn from_parts_rejects_ragged_attributes() {
        let err = Mesh::from_parts(
            vec![Vec3::zero(); 3],
            vec![ColorRgba::white(); 2],
            vec![Vec2::zero(); 3],
            vec![0, 1, 2],
        )
        .unwrap_err();
        assert!(matches!(err, Error::AttributeLengthMismatch { .. }));
    }

    #[test]
    fn from_parts_rejects_partial_triangle() {
        let err = Mesh::from_parts(
            vec![Vec3::zero(); 3],
            vec![ColorRgba::white(); 3],
            vec![Vec2::zero(); 3],
            vec![0, 1],
        )
        .unwrap_err();
        assert_eq!(err, Error::IndexCountNotTriangles { count: 2 });
    }

    // ── quad / vertices ───────────────────────────────────────────────────

    #[test]
    fn quad_maps_top_row_to_top_edge() {
        let m = Mesh::quad(Rect::new(0.0, 0.0, 2.0, 3.0), Rect::new(0.25, 0.5, 0.75, 1.0), ColorRgba::white());
        // Vertex 3 is the top-left corner.
        assert_eq!(m.positions()[3], Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(m.tex_coords()[3], Vec2::new(0.25, 0.5));
        assert_eq!(m.bounds(), Rect::new(0.0, 0.0, 2.0, 3.0));
    }

    #[test]
    fn vertices_interleave_attributes() {
        let m = tri(0.0);
        let v = m.vertices();
        assert_eq!(v.len(), 3);
        assert_eq!(v[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(v[1].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(bytemuck::cast_slice::<MeshVertex, u8>(&v).len(), 3 * 36);
    }
}
