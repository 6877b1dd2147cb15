//! # Pose
//!
//! Rigid placement of a solid: a rotation applied first, then a translation.

use glam::{DAffine3, DQuat, DVec3};

/// Translation plus rotation.
///
/// A point `p` in local coordinates maps to `rotation * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: DVec3,
    pub rotation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// No rotation, no translation.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// Identity pose.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Pose at a position with no rotation.
    pub fn at(translation: DVec3) -> Self {
        Self {
            translation,
            rotation: DQuat::IDENTITY,
        }
    }

    /// Pose rotated about the world Z axis through the origin.
    pub fn rotation_z(angle: f64) -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DQuat::from_rotation_z(angle),
        }
    }

    /// Applies `self` first, then `outer`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geneva_mesh::Pose;
    /// use glam::DVec3;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let pose = Pose::at(DVec3::X).then(&Pose::rotation_z(FRAC_PI_2));
    /// let p = pose.transform_point(DVec3::ZERO);
    /// assert!((p - DVec3::Y).length() < 1e-12);
    /// ```
    pub fn then(&self, outer: &Pose) -> Pose {
        Pose {
            translation: outer.rotation * self.translation + outer.translation,
            rotation: (outer.rotation * self.rotation).normalize(),
        }
    }

    /// This pose followed by a rotation about the world Z axis.
    pub fn rotated_z(&self, angle: f64) -> Pose {
        self.then(&Pose::rotation_z(angle))
    }

    /// Maps a local point into world coordinates.
    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// Equivalent affine transform.
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.rotation, self.translation)
    }

    /// True when the pose leaves every point where it is.
    pub fn is_identity(&self) -> bool {
        self.translation == DVec3::ZERO && self.rotation == DQuat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity_keeps_points() {
        let p = DVec3::new(1.0, -2.0, 3.0);
        assert_eq!(Pose::identity().transform_point(p), p);
        assert!(Pose::default().is_identity());
    }

    #[test]
    fn test_rotation_about_origin_moves_translation() {
        let pose = Pose::at(DVec3::new(2.0, 0.0, 0.5)).rotated_z(PI);
        let p = pose.transform_point(DVec3::ZERO);
        assert_relative_eq!(p.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_composition_matches_affine() {
        let a = Pose::at(DVec3::new(1.0, 2.0, 3.0)).rotated_z(0.3);
        let b = Pose::rotation_z(FRAC_PI_2).then(&Pose::at(DVec3::Z));
        let composed = a.then(&b);
        let affine = b.to_affine() * a.to_affine();

        let p = DVec3::new(0.4, -0.7, 1.1);
        let lhs = composed.transform_point(p);
        let rhs = affine.transform_point3(p);
        assert_relative_eq!(lhs.x, rhs.x, epsilon = 1e-12);
        assert_relative_eq!(lhs.y, rhs.y, epsilon = 1e-12);
        assert_relative_eq!(lhs.z, rhs.z, epsilon = 1e-12);
    }
}
