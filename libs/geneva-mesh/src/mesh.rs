//! # Mesh Data Structure
//!
//! Core mesh representation: shared vertex positions and convex polygonal
//! faces wound counter-clockwise when seen from outside the solid.

use std::collections::HashMap;

use config::constants::{approx_zero, CONTAINMENT_RAY_COUNT, DEGENERATE_AREA_EPSILON, EPSILON};
use glam::{DAffine3, DVec3};

/// Ray directions for containment queries.
///
/// Deliberately skewed off the coordinate axes so rays do not run along the
/// axis-aligned faces and edges that primitives produce.
const CONTAINMENT_RAYS: [[f64; 3]; CONTAINMENT_RAY_COUNT] = [
    [1.0, 0.1234, 0.0567],
    [-0.2139, 1.0, 0.0911],
    [0.0731, -0.1573, 1.0],
    [-1.0, -0.0831, 0.1377],
    [0.1107, -1.0, -0.0613],
];

/// A polygon mesh with vertices and face index loops.
///
/// All geometry calculations use f64. Export to f32 only happens in
/// [`crate::export::MeshBuffers`].
///
/// # Example
///
/// ```rust
/// use geneva_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![a, b, c]);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Convex faces as vertex index loops
    faces: Vec<Vec<u32>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles a fan triangulation would produce.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, face: Vec<u32>) {
        self.faces.push(face);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Iterates over the positions of one face.
    pub fn face_positions(&self, face: usize) -> impl Iterator<Item = DVec3> + '_ {
        self.faces[face].iter().map(|&i| self.vertices[i as usize])
    }

    /// Fan-triangulates every face.
    ///
    /// Faces are convex, so a fan from the first vertex is valid.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut result = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                result.push([face[0], face[i], face[i + 1]]);
            }
        }
        result
    }

    /// Newell normal of a face (unit length, or zero when degenerate).
    pub fn face_normal(&self, face: usize) -> DVec3 {
        let loop_ = &self.faces[face];
        let mut normal = DVec3::ZERO;
        for (i, &a) in loop_.iter().enumerate() {
            let p = self.vertices[a as usize];
            let q = self.vertices[loop_[(i + 1) % loop_.len()] as usize];
            normal += DVec3::new(
                (p.y - q.y) * (p.z + q.z),
                (p.z - q.z) * (p.x + q.x),
                (p.x - q.x) * (p.y + q.y),
            );
        }
        normal.normalize_or_zero()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Transforms all vertices by an affine transform.
    pub fn transform(&mut self, transform: &DAffine3) {
        for v in &mut self.vertices {
            *v = transform.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push(face.iter().map(|i| i + offset).collect());
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - Every face has at least 3 distinct vertices
    /// - No face has zero area
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 || face.iter().any(|&i| i >= vertex_count) {
                return false;
            }

            for (i, &a) in face.iter().enumerate() {
                if a == face[(i + 1) % face.len()] {
                    return false;
                }
            }

            let area = self.face_area_vector(index).length();
            if area < DEGENERATE_AREA_EPSILON {
                return false;
            }
        }

        true
    }

    /// Counts directed edges that are not matched by a reverse edge.
    ///
    /// A closed, consistently oriented mesh returns zero.
    pub fn open_edge_count(&self) -> usize {
        let mut counts: HashMap<(u32, u32), i64> = HashMap::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                if a < b {
                    *counts.entry((a, b)).or_insert(0) += 1;
                } else {
                    *counts.entry((b, a)).or_insert(0) -= 1;
                }
            }
        }
        counts.values().map(|c| c.unsigned_abs() as usize).sum()
    }

    /// Returns true when every directed edge is matched by its reverse.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.open_edge_count() == 0
    }

    /// Signed enclosed volume (positive for outward-facing faces).
    pub fn signed_volume(&self) -> f64 {
        self.triangulate()
            .iter()
            .map(|t| {
                let a = self.vertices[t[0] as usize];
                let b = self.vertices[t[1] as usize];
                let c = self.vertices[t[2] as usize];
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Tests whether a point lies inside the closed mesh.
    ///
    /// Casts several skewed rays and takes a majority vote of the crossing
    /// parities, so a ray grazing an edge cannot flip the answer alone.
    pub fn contains_point(&self, point: DVec3) -> bool {
        let (min, max) = self.bounding_box();
        if self.is_empty() || point.cmplt(min).any() || point.cmpgt(max).any() {
            return false;
        }

        let triangles = self.triangulate();
        let inside_votes = CONTAINMENT_RAYS
            .iter()
            .filter(|dir| {
                let dir = DVec3::from_array(**dir).normalize();
                let crossings = triangles
                    .iter()
                    .filter(|t| {
                        ray_hits_triangle(
                            point,
                            dir,
                            self.vertices[t[0] as usize],
                            self.vertices[t[1] as usize],
                            self.vertices[t[2] as usize],
                        )
                    })
                    .count();
                crossings % 2 == 1
            })
            .count();

        inside_votes * 2 > CONTAINMENT_RAYS.len()
    }

    /// Vertex positions sorted lexicographically.
    ///
    /// Two meshes describing the same surface with the same vertex set
    /// compare equal here regardless of vertex order.
    pub fn canonical_vertices(&self) -> Vec<DVec3> {
        let mut sorted = self.vertices.clone();
        sorted.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then(a.y.total_cmp(&b.y))
                .then(a.z.total_cmp(&b.z))
        });
        sorted
    }

    /// Unnormalized area vector of a face. Its length is twice the face area.
    pub(crate) fn face_area_vector(&self, face: usize) -> DVec3 {
        let loop_ = &self.faces[face];
        let origin = self.vertices[loop_[0] as usize];
        let mut sum = DVec3::ZERO;
        for i in 1..loop_.len() - 1 {
            let b = self.vertices[loop_[i] as usize];
            let c = self.vertices[loop_[i + 1] as usize];
            sum += (b - origin).cross(c - origin);
        }
        sum
    }

    /// Builds a mesh from raw parts.
    pub(crate) fn from_parts(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Consumes the mesh, returning its vertices and faces.
    pub(crate) fn into_parts(self) -> (Vec<DVec3>, Vec<Vec<u32>>) {
        (self.vertices, self.faces)
    }
}

/// Möller–Trumbore ray-triangle intersection in the positive ray direction.
fn ray_hits_triangle(origin: DVec3, dir: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray parallel to triangle
    if approx_zero(a) {
        return false;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    f * edge2.dot(q) > EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(vec![0, 1, 2]);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_triangulates_quads() {
        let mut mesh = Mesh::new();
        for p in [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y] {
            mesh.add_vertex(p);
        }
        mesh.add_face(vec![0, 1, 2, 3]);
        assert_eq!(mesh.triangulate(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.face_normal(0), DVec3::Z);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_validate_valid() {
        assert!(unit_triangle().validate());
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_face(vec![0, 1, 2]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_repeated_vertex() {
        let mut mesh = unit_triangle();
        mesh.add_face(vec![0, 0, 1]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_single_triangle_is_open() {
        let mesh = unit_triangle();
        assert_eq!(mesh.open_edge_count(), 3);
        assert!(!mesh.is_closed());
    }

    #[test]
    fn test_cube_is_closed_with_volume() {
        let mesh = create_cube(DVec3::new(1.0, 2.0, 3.0), false).unwrap();
        assert!(mesh.is_closed());
        assert_relative_eq!(mesh.signed_volume(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contains_point() {
        let mesh = create_cube(DVec3::splat(2.0), true).unwrap();
        assert!(mesh.contains_point(DVec3::ZERO));
        assert!(mesh.contains_point(DVec3::new(0.9, -0.9, 0.5)));
        assert!(!mesh.contains_point(DVec3::new(1.1, 0.0, 0.0)));
        assert!(!mesh.contains_point(DVec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_mesh_merge() {
        let mut mesh1 = unit_triangle();
        let mut mesh2 = unit_triangle();
        mesh2.translate(DVec3::Z);

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.faces()[1], vec![3, 4, 5]);
    }

    #[test]
    fn test_canonical_vertices_ignore_order() {
        let mut a = Mesh::new();
        a.add_vertex(DVec3::X);
        a.add_vertex(DVec3::ZERO);
        let mut b = Mesh::new();
        b.add_vertex(DVec3::ZERO);
        b.add_vertex(DVec3::X);
        assert_eq!(a.canonical_vertices(), b.canonical_vertices());
    }
}
