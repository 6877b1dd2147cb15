//! # Cube Primitive
//!
//! Generates a rectangular box as six quads.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a rectangular box mesh.
///
/// # Arguments
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Example
///
/// ```rust
/// use geneva_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// ```
pub fn create_cube(size: DVec3, center: bool) -> Result<Mesh, MeshError> {
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(MeshError::primitive(format!(
            "Cube size must be positive: {:?}",
            size
        )));
    }

    let mut mesh = Mesh::with_capacity(8, 6);

    let (min, max) = if center {
        let half = size / 2.0;
        (-half, half)
    } else {
        (DVec3::ZERO, size)
    };

    // Bottom ring then top ring, counter-clockwise seen from +Z
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    mesh.add_face(vec![v0, v3, v2, v1]); // -Z
    mesh.add_face(vec![v4, v5, v6, v7]); // +Z
    mesh.add_face(vec![v0, v1, v5, v4]); // -Y
    mesh.add_face(vec![v2, v3, v7, v6]); // +Y
    mesh.add_face(vec![v3, v0, v4, v7]); // -X
    mesh.add_face(vec![v1, v2, v6, v5]); // +X

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_counts() {
        let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_cube_not_centered() {
        let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::splat(10.0));
    }

    #[test]
    fn test_cube_centered() {
        let mesh = create_cube(DVec3::new(2.0, 4.0, 6.0), true).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let mesh = create_cube(DVec3::splat(2.0), true).unwrap();
        let expected = [
            -DVec3::Z,
            DVec3::Z,
            -DVec3::Y,
            DVec3::Y,
            -DVec3::X,
            DVec3::X,
        ];
        for (face, normal) in expected.iter().enumerate() {
            assert_eq!(mesh.face_normal(face), *normal);
        }
        assert!(mesh.is_closed());
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cube_validates() {
        let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
        assert!(mesh.validate());
    }

    #[test]
    fn test_cube_invalid_size() {
        assert!(create_cube(DVec3::new(0.0, 10.0, 10.0), false).is_err());
        assert!(create_cube(DVec3::new(-5.0, 10.0, 10.0), false).is_err());
        assert!(create_cube(DVec3::new(1.0, f64::INFINITY, 1.0), true).is_err());
    }
}
