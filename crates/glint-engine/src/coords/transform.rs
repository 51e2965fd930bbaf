use core::ops::Mul;

use super::{Rect, Vec2, Vec3};

/// 2D affine transform applied to mesh positions by a render surface.
///
/// Stored column-major as `[a, b, c, d, tx, ty]`:
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// ```
///
/// z passes through unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub [f32; 6]);

impl Transform {
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Transform([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Transform([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Maps `from` onto `to`, scaling each axis independently.
    ///
    /// A degenerate `from` axis maps with scale 1.
    pub fn rect_to_rect(from: Rect, to: Rect) -> Self {
        let sx = if from.width() != 0.0 { to.width() / from.width() } else { 1.0 };
        let sy = if from.height() != 0.0 { to.height() / from.height() } else { 1.0 };
        Transform::translate(to.min.x - from.min.x * sx, to.min.y - from.min.y * sy)
            * Transform::scale(sx, sy)
    }

    #[inline]
    pub fn apply(self, p: Vec3) -> Vec3 {
        let [a, b, c, d, tx, ty] = self.0;
        Vec3::new(a * p.x + c * p.y + tx, b * p.x + d * p.y + ty, p.z)
    }

    #[inline]
    pub fn apply_point(self, p: Vec2) -> Vec2 {
        self.apply(p.extend(0.0)).truncate()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Transform) -> Transform {
        let [a0, b0, c0, d0, x0, y0] = self.0;
        let [a1, b1, c1, d1, x1, y1] = rhs.0;
        Transform([
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * x1 + c0 * y1 + x0,
            b0 * x1 + d0 * y1 + y0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_after_scale() {
        let t = Transform::translate(10.0, 5.0) * Transform::scale(2.0, 3.0);
        assert_eq!(t.apply_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 8.0));
    }

    #[test]
    fn rect_to_rect_maps_corners() {
        let from = Rect::new(-1.0, -2.0, 3.0, 2.0);
        let to = Rect::new(10.0, 10.0, 18.0, 12.0);
        let t = Transform::rect_to_rect(from, to);
        assert_eq!(t.apply_point(from.min), to.min);
        assert_eq!(t.apply_point(from.max), to.max);
    }

    #[test]
    fn identity_keeps_z() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }
}
