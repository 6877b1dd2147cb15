//! # Mesh Export
//!
//! Flat GPU-style buffers plus ASCII STL and Wavefront OBJ writers. The
//! writers stream onto any [`std::io::Write`]; opening files is left to
//! the caller.

use std::io::{self, Write};

use glam::DVec3;

use crate::mesh::Mesh;

/// Mesh buffers suitable for rendering.
///
/// Positions are flattened `[x, y, z, ...]` in `f32`; faces are
/// fan-triangulated into `[i0, i1, i2, ...]`.
///
/// # Examples
///
/// ```
/// use geneva_mesh::export::MeshBuffers;
/// use geneva_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let cube = create_cube(DVec3::ONE, false).unwrap();
/// let buffers = MeshBuffers::from_mesh(&cube);
///
/// assert_eq!(buffers.vertices.len(), 8 * 3);
/// assert_eq!(buffers.indices.len(), 12 * 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions as flat array [x, y, z, x, y, z, ...].
    pub vertices: Vec<f32>,

    /// Triangle indices as flat array [i0, i1, i2, i0, i1, i2, ...].
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Converts a mesh, narrowing positions to `f32`.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let vertices = mesh
            .vertices()
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect();
        let indices = mesh.triangulate().into_iter().flatten().collect();
        Self { vertices, indices }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Writes the mesh as an ASCII STL solid.
pub fn write_ascii_stl<W: Write>(mesh: &Mesh, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "solid {name}")?;

    for [i0, i1, i2] in mesh.triangulate() {
        let a = mesh.vertex(i0);
        let b = mesh.vertex(i1);
        let c = mesh.vertex(i2);
        let n = triangle_normal(a, b, c);

        writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for v in [a, b, c] {
            writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }

    writeln!(out, "endsolid {name}")
}

/// Writes the mesh as a Wavefront OBJ object with polygonal faces.
pub fn write_obj<W: Write>(mesh: &Mesh, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "o {name}")?;
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        write!(out, "f")?;
        for i in face {
            write!(out, " {}", i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;

    fn unit_cube() -> Mesh {
        create_cube(DVec3::ONE, false).unwrap()
    }

    #[test]
    fn test_mesh_buffers_counts() {
        let buffers = MeshBuffers::from_mesh(&unit_cube());
        assert_eq!(buffers.vertex_count(), 8);
        assert_eq!(buffers.triangle_count(), 12);
        assert_eq!(MeshBuffers::default().vertex_count(), 0);
    }

    #[test]
    fn test_ascii_stl_contains_required_tokens() {
        let mut out = Vec::new();
        write_ascii_stl(&unit_cube(), "wheel-body", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("solid wheel-body\n"));
        assert!(text.trim_end().ends_with("endsolid wheel-body"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex ").count(), 36);
    }

    #[test]
    fn test_obj_keeps_polygons() {
        let mut out = Vec::new();
        write_obj(&unit_cube(), "crank", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("o crank\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces.len(), 6);
        assert_eq!(faces[0], "f 1 4 3 2");
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_ascii_stl(&unit_cube(), "x", &mut a).unwrap();
        write_ascii_stl(&unit_cube(), "x", &mut b).unwrap();
        assert_eq!(a, b);
    }
}
