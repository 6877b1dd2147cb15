//! # Primitives
//!
//! Base shapes for the mechanism: N-gon cylinders and boxes, built in a
//! local frame centered on the origin and placed by a [`Pose`].

pub mod cube;
pub mod cylinder;

pub use cube::create_cube;
pub use cylinder::create_cylinder;

use glam::DVec3;

use crate::{error::MeshResult, pose::Pose, solid::Solid};

/// Builds a cylinder solid with its depth centered on the pose origin.
pub fn make_cylinder(radius: f64, depth: f64, vertices: u32, pose: Pose) -> MeshResult<Solid> {
    let mesh = create_cylinder(radius, depth, vertices)?;
    tracing::trace!(radius, depth, vertices, "cylinder built");
    Ok(Solid::new(mesh, pose))
}

/// Builds a box solid centered on the pose origin.
pub fn make_cube(size: DVec3, pose: Pose) -> MeshResult<Solid> {
    let mesh = create_cube(size, true)?;
    tracing::trace!(?size, "cube built");
    Ok(Solid::new(mesh, pose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_make_cylinder_at_pose() {
        let solid = make_cylinder(0.5, 0.4, 32, Pose::at(DVec3::new(3.0, 0.0, -0.2))).unwrap();
        let (min, max) = solid.bounding_box();
        assert_relative_eq!(min.z, -0.4, epsilon = 1e-12);
        assert_relative_eq!(max.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max.x, 3.5, epsilon = 1e-12);
        assert!(solid.world_mesh().is_closed());
    }

    #[test]
    fn test_make_cube_at_pose() {
        let solid = make_cube(DVec3::new(2.0, 1.0, 1.0), Pose::at(DVec3::X * 4.0)).unwrap();
        assert!(solid.contains_point(DVec3::new(4.9, 0.0, 0.0)));
        assert!(!solid.contains_point(DVec3::new(2.9, 0.0, 0.0)));
    }

    #[test]
    fn test_make_primitive_rejects_degenerate() {
        assert!(make_cylinder(0.0, 1.0, 32, Pose::IDENTITY).is_err());
        assert!(make_cube(DVec3::ZERO, Pose::IDENTITY).is_err());
    }
}
