use core::f32::consts::FRAC_PI_2;
use core::f64::consts::TAU;

use crate::coords::{ColorRgba, Rect, Vec2, Vec3};
use crate::error::{Error, Result};

use super::Mesh;

/// Default number of segments used to tessellate circles and ellipses.
pub const DEFAULT_DIVISIONS: usize = 100;

/// UV corners shared by every generated quad. Stroke quads carry them as
/// placeholders so a textured material still samples inside [0,1]².
const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, 0.0),
];

/// Stroke and fill mesh generator.
///
/// State is limited to the current stroke color and `divisions`, the number of
/// segments used for circles and ellipses. Every call returns a fresh [`Mesh`];
/// nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct GeomDraw {
    color: ColorRgba,
    pub divisions: usize,
}

impl Default for GeomDraw {
    fn default() -> Self {
        Self {
            color: ColorRgba::white(),
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

impl GeomDraw {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn color(&self) -> ColorRgba {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: ColorRgba) {
        self.color = color;
    }

    /// One quad covering `rect`, wound counter-clockwise.
    pub fn fill_rect(&self, rect: Rect) -> Mesh {
        let positions = vec![
            Vec3::new(rect.min.x, rect.max.y, 0.0),
            Vec3::new(rect.min.x, rect.min.y, 0.0),
            Vec3::new(rect.max.x, rect.min.y, 0.0),
            Vec3::new(rect.max.x, rect.max.y, 0.0),
        ];
        self.solid_quad(positions, vec![0, 1, 3, 1, 2, 3])
    }

    /// Rectangle outline of `width`, or a filled rectangle when `width <= 0`.
    ///
    /// The border is four strips cut in order top, bottom, left, right. Each
    /// cut shrinks the working rect, so the side strips only span what the top
    /// and bottom strips left over and no pixel is covered twice.
    pub fn rectangle(&self, rect: Rect, width: f32) -> Mesh {
        if width <= 0.0 {
            return self.fill_rect(rect);
        }

        let mut rest = rect.normalized();
        let strips = [
            rest.cut_top(width),
            rest.cut_bottom(width),
            rest.cut_left(width),
            rest.cut_right(width),
        ];

        let mut mesh = Mesh::new();
        for strip in strips {
            mesh.append(&self.fill_rect(strip));
        }
        mesh
    }

    /// Circle outline. See [`GeomDraw::ellipse`].
    pub fn circle(&self, center: Vec3, radius: f32, width: f32) -> Result<Mesh> {
        self.ellipse(center, Vec2::new(radius, radius), 0.0, width)
    }

    /// Ellipse outline with semi-axes `size`, rotated by `rotation` radians.
    ///
    /// Filled ellipses (`width <= 0`) are not supported.
    pub fn ellipse(&self, center: Vec3, size: Vec2, rotation: f32, width: f32) -> Result<Mesh> {
        if width <= 0.0 {
            return Err(Error::Unsupported("filled ellipse (width <= 0)"));
        }
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(Error::Unsupported("ellipse with non-positive semi-axes"));
        }
        let divisions = self.divisions.max(1);

        let sampler = EllipseSampler::new(size, rotation);
        let step = TAU / divisions as f64;
        let points: Vec<Vec3> = (0..=divisions)
            .map(|i| center + sampler.point(step * i as f64))
            .collect();

        Ok(self.line_strip(&points, width))
    }

    /// Open polyline; each consecutive pair is stroked independently with no
    /// join treatment.
    pub fn line_strip(&self, points: &[Vec3], width: f32) -> Mesh {
        let mut mesh = Mesh::new();
        if points.len() < 2 {
            log::warn!("line strip needs at least 2 points, got {}", points.len());
            return mesh;
        }
        for pair in points.windows(2) {
            mesh.append(&self.line(pair[0], pair[1], 0.0, 0.0, width));
        }
        mesh
    }

    /// Closed polygon outline with mitered joins.
    ///
    /// Each edge `b -> c` receives half of the turn at `b` as its leading join
    /// angle and half of the turn at `c` as its trailing one, so neighbouring
    /// quads meet on the bisector of every corner.
    pub fn polygon(&self, points: &[Vec3], width: f32) -> Mesh {
        let n = points.len();
        let mut mesh = Mesh::new();
        if n < 2 {
            log::warn!("polygon needs at least 2 points, got {n}");
            return mesh;
        }

        for i in 0..n {
            let a = points[(i + n - 1) % n];
            let b = points[i];
            let c = points[(i + 1) % n];
            let d = points[(i + 2) % n];

            let v0 = b - a;
            let v1 = c - b;
            let v2 = d - c;

            mesh.append(&self.line(b, c, v0.angle(v1) / 2.0, v1.angle(v2) / 2.0, width));
        }
        mesh
    }

    /// Single stroked segment from `a` to `b`.
    ///
    /// `last_angle` tilts the edge at `a` and `next_angle` the edge at `b`,
    /// both in radians away from the segment's perpendicular.
    ///
    /// At each endpoint the offset point farther from the coordinate origin is
    /// taken as the outer corner. This keeps winding consistent for shapes
    /// drawn around the origin but is not a true inner/outer classification.
    pub fn line(&self, a: Vec3, b: Vec3, last_angle: f32, next_angle: f32, width: f32) -> Mesh {
        let segment_angle = (b - a).theta();
        let normal = segment_angle - FRAC_PI_2;
        let half = width / 2.0;

        let up_a = Vec3::new(1.0, 0.0, 0.0).rotate_2d(normal - last_angle) * half;
        let (a_outer, a_inner) = outer_first(a + up_a, a - up_a);

        let up_b = Vec3::new(1.0, 0.0, 0.0).rotate_2d(normal + next_angle) * half;
        let (b_outer, b_inner) = outer_first(b + up_b, b - up_b);

        self.solid_quad(vec![b_outer, b_inner, a_inner, a_outer], vec![0, 1, 2, 2, 3, 0])
    }

    fn solid_quad(&self, positions: Vec<Vec3>, indices: Vec<u32>) -> Mesh {
        Mesh {
            colors: vec![self.color; positions.len()],
            tex_coords: QUAD_UVS.to_vec(),
            positions,
            indices,
        }
    }
}

/// Orders two candidate corners so the one farther from the origin comes first.
#[inline]
fn outer_first(p: Vec3, q: Vec3) -> (Vec3, Vec3) {
    if p.len() < q.len() { (q, p) } else { (p, q) }
}

// ── ellipse sampling ──────────────────────────────────────────────────────

/// Polar sampling of an ellipse around the origin using its eccentricity.
///
/// `r(θ) = b / sqrt(1 - (e·cos θ)²)`, with the major axis along θ = 0 whichever
/// of the two sizes is larger. The angular step is uniform, so points sit
/// closer together near the minor axis.
struct EllipseSampler {
    semi_minor: f64,
    eccentricity: f64,
    rotation: f64,
}

impl EllipseSampler {
    fn new(size: Vec2, rotation: f32) -> Self {
        let a = f64::from(size.x.max(size.y));
        let b = f64::from(size.x.min(size.y));
        Self {
            semi_minor: b,
            eccentricity: (1.0 - (b * b) / (a * a)).sqrt(),
            rotation: f64::from(rotation),
        }
    }

    #[inline]
    fn radius(&self, theta: f64) -> f64 {
        let e_cos = self.eccentricity * theta.cos();
        self.semi_minor / (1.0 - e_cos * e_cos).sqrt()
    }

    #[inline]
    fn point(&self, theta: f64) -> Vec3 {
        let r = self.radius(theta);
        let phi = theta - self.rotation;
        Vec3::new((r * phi.cos()) as f32, (r * phi.sin()) as f32, 0.0)
    }
}

/// `divisions` boundary points of an ellipse centered on the origin, without
/// repeating the first point. Suitable for [`GeomDraw::polygon`].
///
/// Returns an empty list for non-positive semi-axes or zero divisions.
pub fn ellipse_points(size: Vec2, rotation: f32, divisions: usize) -> Vec<Vec3> {
    if divisions == 0 || !(size.x > 0.0 && size.y > 0.0) {
        return Vec::new();
    }
    let sampler = EllipseSampler::new(size, rotation);
    let step = TAU / divisions as f64;
    (0..divisions).map(|i| sampler.point(step * i as f64)).collect()
}
