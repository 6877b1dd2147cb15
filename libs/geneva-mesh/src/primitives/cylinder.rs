//! # Cylinder Primitive
//!
//! Generates a prism with a regular N-gon cross-section.

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_TESSELLATION_VERTICES;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder mesh centered at the origin.
///
/// The cross-section is a regular polygon inscribed in the circle of
/// `radius`, first vertex on +X. The depth runs from `-depth/2` to
/// `depth/2` along Z.
///
/// Faces: one quad per side plus two N-gon caps.
///
/// # Example
///
/// ```rust
/// use geneva_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(1.0, 2.0, 32).unwrap();
/// assert_eq!(mesh.vertex_count(), 64);
/// assert_eq!(mesh.face_count(), 34);
/// ```
pub fn create_cylinder(radius: f64, depth: f64, segments: u32) -> Result<Mesh, MeshError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::primitive(format!(
            "Cylinder radius must be positive: {}",
            radius
        )));
    }

    if !depth.is_finite() || depth <= 0.0 {
        return Err(MeshError::primitive(format!(
            "Cylinder depth must be positive: {}",
            depth
        )));
    }

    if segments < MIN_TESSELLATION_VERTICES {
        return Err(MeshError::primitive(format!(
            "Cylinder needs at least {} vertices: {}",
            MIN_TESSELLATION_VERTICES, segments
        )));
    }

    let n = segments as usize;
    let mut mesh = Mesh::with_capacity(2 * n, n + 2);
    let half = depth / 2.0;

    let ring: Vec<(f64, f64)> = (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect();

    let bottom: Vec<u32> = ring
        .iter()
        .map(|&(x, y)| mesh.add_vertex(DVec3::new(x, y, -half)))
        .collect();
    let top: Vec<u32> = ring
        .iter()
        .map(|&(x, y)| mesh.add_vertex(DVec3::new(x, y, half)))
        .collect();

    // Sides
    for j in 0..n {
        let next = (j + 1) % n;
        mesh.add_face(vec![bottom[j], bottom[next], top[next], top[j]]);
    }

    // Bottom cap faces -Z, top cap faces +Z
    mesh.add_face(bottom.iter().rev().copied().collect());
    mesh.add_face(top);

    Ok(mesh)
}
