use super::Vec2;

/// Axis-aligned rectangle stored as min/max corners (+Y up).
///
/// "Top" is the `max.y` edge and "bottom" the `min.y` edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Zero-area rect at the origin. Used as the empty sentinel.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Rect spanning two arbitrary corners.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Rect::new(a.x, a.y, b.x, b.y).normalized()
    }

    #[inline]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Rect::from_corners(origin, origin + size)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Swaps corners so that `min <= max` on both axes.
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            max: Vec2::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        }
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.min.x && p.y >= r.min.y && p.x < r.max.x && p.y < r.max.y
    }

    /// Returns true if `other` lies entirely inside `self` (edges inclusive).
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.min.x >= a.min.x && b.min.y >= a.min.y && b.max.x <= a.max.x && b.max.y <= a.max.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let r = Rect::new(
            a.min.x.max(b.min.x),
            a.min.y.max(b.min.y),
            a.max.x.min(b.max.x),
            a.max.y.min(b.max.y),
        );

        if r.is_empty() { None } else { Some(r) }
    }

    /// Smallest rect containing both inputs.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        Rect::new(
            a.min.x.min(b.min.x),
            a.min.y.min(b.min.y),
            a.max.x.max(b.max.x),
            a.max.y.max(b.max.y),
        )
    }

    /// Grows the rect per side. `padding.min` holds the left/bottom amounts and
    /// `padding.max` the right/top amounts. Negative values shrink.
    #[inline]
    pub fn pad(self, padding: Rect) -> Rect {
        Rect {
            min: self.min - padding.min,
            max: self.max + padding.max,
        }
    }

    /// Scales the size around `min`.
    #[inline]
    pub fn scaled(self, scale: f32) -> Rect {
        Rect::from_origin_size(self.min, self.size() * scale)
    }

    /// Uniformly scales the size around `min` so the rect fits inside `target`
    /// while keeping its aspect ratio.
    pub fn scaled_to_fit(self, target: Rect) -> Rect {
        let (w, h) = (self.width(), self.height());
        if w <= 0.0 || h <= 0.0 {
            return self;
        }
        let s = (target.width() / w).min(target.height() / h);
        self.scaled(s)
    }

    /// Places a rect the size of `inner` inside `self`.
    ///
    /// `anchor` is a fraction in [0,1]²: (0,0) aligns bottom-left corners,
    /// (1,1) top-right corners and (0.5,0.5) centers.
    pub fn anchor(self, inner: Rect, anchor: Vec2) -> Rect {
        let slack = self.size() - inner.size();
        Rect::from_origin_size(self.min + slack.mul_elem(anchor), inner.size())
    }

    /// Places a rect the size of `inner` so that its `inner_anchor` point lands
    /// on `self`'s `anchor` point.
    pub fn full_anchor(self, inner: Rect, anchor: Vec2, inner_anchor: Vec2) -> Rect {
        let target = self.min + self.size().mul_elem(anchor);
        let origin = target - inner.size().mul_elem(inner_anchor);
        Rect::from_origin_size(origin, inner.size())
    }

    // ── cutting ───────────────────────────────────────────────────────────
    //
    // Each cut removes a strip from one edge of `self` and returns it. The
    // amount is clamped to the available extent so the remainder never
    // inverts.

    pub fn cut_top(&mut self, amount: f32) -> Rect {
        let amount = amount.clamp(0.0, self.height().max(0.0));
        let strip = Rect::new(self.min.x, self.max.y - amount, self.max.x, self.max.y);
        self.max.y -= amount;
        strip
    }

    pub fn cut_bottom(&mut self, amount: f32) -> Rect {
        let amount = amount.clamp(0.0, self.height().max(0.0));
        let strip = Rect::new(self.min.x, self.min.y, self.max.x, self.min.y + amount);
        self.min.y += amount;
        strip
    }

    pub fn cut_left(&mut self, amount: f32) -> Rect {
        let amount = amount.clamp(0.0, self.width().max(0.0));
        let strip = Rect::new(self.min.x, self.min.y, self.min.x + amount, self.max.y);
        self.min.x += amount;
        strip
    }

    pub fn cut_right(&mut self, amount: f32) -> Rect {
        let amount = amount.clamp(0.0, self.width().max(0.0));
        let strip = Rect::new(self.max.x - amount, self.min.y, self.max.x, self.max.y);
        self.max.x -= amount;
        strip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect { Rect::new(x0, y0, x1, y1) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_ordered_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_swaps_inverted_corners() {
        let n = r(10.0, 5.0, 6.0, 0.0).normalized();
        assert_eq!(n, r(6.0, 0.0, 10.0, 5.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_min_inclusive_max_exclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 11.0)));
    }

    // ── intersect / union ─────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 15.0, 15.0)).unwrap();
        assert_eq!(i, r(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 20.0, 10.0)).is_none());
    }

    #[test]
    fn union_spans_both() {
        let u = r(0.0, 0.0, 1.0, 1.0).union(r(5.0, -2.0, 6.0, 0.5));
        assert_eq!(u, r(0.0, -2.0, 6.0, 1.0));
    }

    // ── cutting ───────────────────────────────────────────────────────────

    #[test]
    fn cut_top_returns_strip_and_shrinks() {
        let mut rect = r(0.0, 0.0, 10.0, 20.0);
        let strip = rect.cut_top(4.0);
        assert_eq!(strip, r(0.0, 16.0, 10.0, 20.0));
        assert_eq!(rect, r(0.0, 0.0, 10.0, 16.0));
    }

    #[test]
    fn cut_each_edge() {
        let mut rect = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.cut_bottom(1.0), r(0.0, 0.0, 10.0, 1.0));
        assert_eq!(rect.cut_left(2.0), r(0.0, 1.0, 2.0, 10.0));
        assert_eq!(rect.cut_right(3.0), r(7.0, 1.0, 10.0, 10.0));
        assert_eq!(rect, r(2.0, 1.0, 7.0, 10.0));
    }

    #[test]
    fn cut_clamps_to_available_extent() {
        let mut rect = r(0.0, 0.0, 10.0, 4.0);
        let strip = rect.cut_top(100.0);
        assert_eq!(strip, r(0.0, 0.0, 10.0, 4.0));
        assert_eq!(rect.height(), 0.0);
        assert_eq!(rect.cut_bottom(1.0).height(), 0.0);
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn anchor_centers_inner() {
        let outer = r(0.0, 0.0, 100.0, 50.0);
        let placed = outer.anchor(r(0.0, 0.0, 20.0, 10.0), Vec2::new(0.5, 0.5));
        assert_eq!(placed, r(40.0, 20.0, 60.0, 30.0));
    }

    #[test]
    fn anchor_top_right() {
        let outer = r(0.0, 0.0, 100.0, 50.0);
        let placed = outer.anchor(r(3.0, 3.0, 23.0, 13.0), Vec2::new(1.0, 1.0));
        assert_eq!(placed, r(80.0, 40.0, 100.0, 50.0));
    }

    #[test]
    fn full_anchor_aligns_points() {
        let outer = r(0.0, 0.0, 100.0, 50.0);
        // Inner's right-middle on outer's bottom-left.
        let placed = outer.full_anchor(r(0.0, 0.0, 10.0, 4.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.5));
        assert_eq!(placed, r(-10.0, -2.0, 0.0, 2.0));
    }

    #[test]
    fn scaled_to_fit_keeps_aspect() {
        let fitted = r(0.0, 0.0, 20.0, 10.0).scaled_to_fit(r(0.0, 0.0, 100.0, 100.0));
        assert_eq!(fitted.size(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn pad_grows_per_side() {
        let padded = r(0.0, 0.0, 10.0, 10.0).pad(r(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded, r(-1.0, -2.0, 13.0, 14.0));
    }
}
