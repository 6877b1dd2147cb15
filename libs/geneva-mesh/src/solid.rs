//! # Solid
//!
//! A closed mesh in its own local frame together with the pose that places
//! it in the world.

use glam::DVec3;

use crate::{mesh::Mesh, pose::Pose};

/// A closed triangulable surface bounding a volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    mesh: Mesh,
    pose: Pose,
}

impl Solid {
    /// Wraps a local-frame mesh with a pose.
    pub fn new(mesh: Mesh, pose: Pose) -> Self {
        Self { mesh, pose }
    }

    /// Wraps a mesh that is already in world coordinates.
    pub fn from_world_mesh(mesh: Mesh) -> Self {
        Self::new(mesh, Pose::IDENTITY)
    }

    /// Local-frame geometry.
    pub fn local_mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Applies `outer` after the current pose.
    pub fn transformed(mut self, outer: &Pose) -> Self {
        self.pose = self.pose.then(outer);
        self
    }

    /// Rotates the solid about the world Z axis.
    pub fn rotated_z(self, angle: f64) -> Self {
        self.transformed(&Pose::rotation_z(angle))
    }

    /// Geometry with the pose baked in.
    pub fn world_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.clone();
        if !self.pose.is_identity() {
            mesh.transform(&self.pose.to_affine());
        }
        mesh
    }

    /// Consumes the solid, returning world-space geometry.
    pub fn into_world_mesh(self) -> Mesh {
        let Solid { mut mesh, pose } = self;
        if !pose.is_identity() {
            mesh.transform(&pose.to_affine());
        }
        mesh
    }

    /// World-space bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.world_mesh().bounding_box()
    }

    /// Enclosed volume (pose-invariant).
    pub fn volume(&self) -> f64 {
        self.mesh.volume()
    }

    /// Whether the world-space point lies inside the solid.
    pub fn contains_point(&self, point: DVec3) -> bool {
        let local = self.pose.rotation.inverse() * (point - self.pose.translation);
        self.mesh.contains_point(local)
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_world_mesh_applies_pose() {
        let cube = create_cube(DVec3::ONE, true).unwrap();
        let solid = Solid::new(cube, Pose::at(DVec3::new(5.0, 0.0, 0.0)));
        let (min, max) = solid.bounding_box();
        assert_relative_eq!(min.x, 4.5, epsilon = 1e-12);
        assert_relative_eq!(max.x, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_keeps_local_geometry() {
        let cube = create_cube(DVec3::ONE, true).unwrap();
        let solid = Solid::new(cube.clone(), Pose::at(DVec3::X)).rotated_z(FRAC_PI_2);
        assert_eq!(solid.local_mesh(), &cube);
        assert!(solid.contains_point(DVec3::new(0.0, 1.2, 0.0)));
        assert!(!solid.contains_point(DVec3::new(1.2, 0.0, 0.0)));
        assert_relative_eq!(solid.volume(), 1.0, epsilon = 1e-12);
    }
}
