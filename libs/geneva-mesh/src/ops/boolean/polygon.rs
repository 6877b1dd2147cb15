//! # Polygon for BSP Operations
//!
//! Convex polygon with plane and splitting support.

use glam::DVec3;

use super::plane::{Classification, Plane};
use super::CsgMode;

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with associated plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
}

/// Output buckets for [`Polygon::split`].
#[derive(Debug, Default)]
pub struct SplitBuckets {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl SplitBuckets {
    /// Total number of polygons across the buckets.
    pub(super) fn len(&self) -> usize {
        self.coplanar_front.len() + self.coplanar_back.len() + self.front.len() + self.back.len()
    }
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns None if the vertices do not span a plane.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        let plane = Plane::from_loop(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Fragment of a split polygon; shares the parent's plane.
    fn fragment(vertices: Vec<DVec3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Get polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Get polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Axis-aligned bounds of the vertices as `(min, max)`.
    pub fn bounds(&self) -> (DVec3, DVec3) {
        self.vertices.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), v| (min.min(*v), max.max(*v)),
        )
    }

    /// Part of the polygon inside the box `min..max`, keeping this plane.
    ///
    /// Returns None when less than a triangle's worth of outline is left.
    pub fn clipped_to_box(&self, min: DVec3, max: DVec3) -> Option<Self> {
        let mut points = self.vertices.clone();
        for axis in 0..3 {
            points = clip_to_bound(&points, axis, min[axis], true);
            points = clip_to_bound(&points, axis, max[axis], false);
            if points.len() < 3 {
                return None;
            }
        }
        Some(Self::fragment(points, self.plane))
    }

    /// Flip the polygon (reverse winding order and plane).
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Split polygon by a plane into the four buckets.
    ///
    /// Coplanar polygons go to `coplanar_front` when they face the same way
    /// as the plane, otherwise to `coplanar_back`.
    pub fn split(self, plane: &Plane, mode: CsgMode, out: &mut SplitBuckets) {
        // Fragments of the splitter itself stay on its node
        if self.plane == *plane {
            out.coplanar_front.push(self);
            return;
        }

        let types: Vec<Classification> = self
            .vertices
            .iter()
            .map(|v| plane.classify_point(*v, mode))
            .collect();

        let has_front = types.contains(&Classification::Front);
        let has_back = types.contains(&Classification::Back);

        match (has_front, has_back) {
            (false, false) => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            (true, false) => out.front.push(self),
            (false, true) => out.back.push(self),
            (true, true) => {
                let n = self.vertices.len();
                let mut front_verts = Vec::with_capacity(n + 1);
                let mut back_verts = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let vi = self.vertices[i];
                    let vj = self.vertices[j];
                    let ti = types[i];
                    let tj = types[j];

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let p = edge_intersection(vi, vj, plane, mode);
                        front_verts.push(p);
                        back_verts.push(p);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(Self::fragment(front_verts, self.plane));
                }
                if back_verts.len() >= 3 {
                    out.back.push(Self::fragment(back_verts, self.plane));
                }
            }
        }
    }
}

/// Point where segment `a-b` crosses the plane.
///
/// Evaluated from the lexicographically smaller endpoint so that the two
/// polygons sharing an edge produce the identical point.
fn edge_intersection(a: DVec3, b: DVec3, plane: &Plane, mode: CsgMode) -> DVec3 {
    let (from, to) = if lex_less(a, b) { (a, b) } else { (b, a) };
    let d_from = plane.signed_distance(from, mode);
    let d_to = plane.signed_distance(to, mode);
    let t = d_from / (d_from - d_to);
    from + (to - from) * t
}

/// One Sutherland-Hodgman pass against an axis-aligned bound.
///
/// `keep_above` keeps the side with `p[axis] >= bound`. Crossing points are
/// placed exactly on the bound.
fn clip_to_bound(points: &[DVec3], axis: usize, bound: f64, keep_above: bool) -> Vec<DVec3> {
    let inside = |p: DVec3| {
        if keep_above {
            p[axis] >= bound
        } else {
            p[axis] <= bound
        }
    };

    let n = points.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if inside(a) {
            push_distinct(&mut out, a);
        }
        if inside(a) != inside(b) {
            let t = (bound - a[axis]) / (b[axis] - a[axis]);
            let mut p = a + (b - a) * t;
            p[axis] = bound;
            push_distinct(&mut out, p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

fn push_distinct(points: &mut Vec<DVec3>, p: DVec3) {
    if points.last() != Some(&p) {
        points.push(p);
    }
}

fn lex_less(a: DVec3, b: DVec3) -> bool {
    a.x.total_cmp(&b.x)
        .then(a.y.total_cmp(&b.y))
        .then(a.z.total_cmp(&b.z))
        .is_lt()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.5, 1.0, z),
        ])
        .unwrap()
    }

    fn xy_plane() -> Plane {
        Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap()
    }

    #[test]
    fn test_polygon_flip() {
        let poly = triangle_at(0.0);
        let mut flipped = poly.clone();
        flipped.flip();

        assert_eq!(flipped.vertices()[0], poly.vertices()[2]);
        assert_eq!(flipped.vertices()[2], poly.vertices()[0]);
        assert!(flipped.plane().normal().z < 0.0);
    }

    #[test]
    fn test_polygon_split_one_sided() {
        let plane = xy_plane();
        let mut out = SplitBuckets::default();
        triangle_at(1.0).split(&plane, CsgMode::Fast, &mut out);
        triangle_at(-1.0).split(&plane, CsgMode::Exact, &mut out);

        assert_eq!(out.front.len(), 1);
        assert_eq!(out.back.len(), 1);
        assert!(out.coplanar_front.is_empty());
    }

    #[test]
    fn test_polygon_split_coplanar_by_facing() {
        let plane = xy_plane();
        let mut out = SplitBuckets::default();
        triangle_at(0.0).split(&plane, CsgMode::Exact, &mut out);
        let mut flipped = triangle_at(0.0);
        flipped.flip();
        flipped.split(&plane, CsgMode::Exact, &mut out);

        assert_eq!(out.coplanar_front.len(), 1);
        assert_eq!(out.coplanar_back.len(), 1);
    }

    #[test]
    fn test_polygon_split_spanning() {
        let poly = Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.5, 0.0, 1.0),
        ])
        .unwrap();

        let mut out = SplitBuckets::default();
        poly.split(&xy_plane(), CsgMode::Fast, &mut out);

        assert_eq!(out.front.len(), 1);
        assert_eq!(out.back.len(), 1);
        assert_eq!(out.front[0].vertices().len(), 3);
        assert_eq!(out.back[0].vertices().len(), 4);
        for v in out.front[0].vertices() {
            assert!(v.z >= -1e-12);
        }
    }

    #[test]
    fn test_shared_edge_splits_identically() {
        let a = DVec3::new(0.1, 0.2, -0.7);
        let b = DVec3::new(0.9, -0.3, 0.6);
        let plane = xy_plane();
        for mode in [CsgMode::Fast, CsgMode::Exact] {
            assert_eq!(
                edge_intersection(a, b, &plane, mode),
                edge_intersection(b, a, &plane, mode)
            );
        }
    }

    #[test]
    fn test_splitter_fragments_stay_coplanar() {
        let poly = triangle_at(0.3);
        let plane = *poly.plane();
        let mut out = SplitBuckets::default();
        poly.split(&plane, CsgMode::Exact, &mut out);
        assert_eq!(out.coplanar_front.len(), 1);
        assert!(out.front.is_empty() && out.back.is_empty());
    }

    #[test]
    fn test_clipped_to_box() {
        let poly = triangle_at(0.0);
        let clipped = poly
            .clipped_to_box(DVec3::new(0.25, -1.0, -1.0), DVec3::new(2.0, 0.5, 1.0))
            .unwrap();

        let (min, max) = clipped.bounds();
        assert_eq!(min.x, 0.25);
        assert_eq!(max.y, 0.5);
        assert!(max.x <= 1.0);
        assert_eq!(clipped.plane(), poly.plane());
    }

    #[test]
    fn test_clipped_outside_box_is_none() {
        let poly = triangle_at(0.0);
        assert!(poly
            .clipped_to_box(DVec3::splat(2.0), DVec3::splat(3.0))
            .is_none());
        // Touching along one edge leaves no area
        assert!(poly
            .clipped_to_box(DVec3::new(-1.0, -1.0, 0.0), DVec3::new(2.0, 0.0, 1.0))
            .is_none());
    }
}
