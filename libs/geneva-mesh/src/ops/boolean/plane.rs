//! # Plane for BSP Operations
//!
//! Plane representation with mode-aware point classification.
//!
//! Every plane keeps the three points it was built from. Fast mode
//! classifies with the floating-point distance `n·p - w`; exact mode takes
//! the sign from an adaptive-precision `orient3d` over the anchor points.

use glam::DVec3;
use robust::{orient3d, Coord3D};

use super::CsgMode;
use config::constants::DEGENERATE_AREA_EPSILON;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of plane (positive side).
    Front,
    /// Behind plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
}

// =============================================================================
// PLANE
// =============================================================================

/// An oriented plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    normal: DVec3,
    /// Distance from origin along normal.
    w: f64,
    /// Counter-clockwise points (seen from the front) spanning the plane.
    anchors: [DVec3; 3],
    /// `|(b - a) × (c - a)|` over the anchors.
    scale: f64,
}

impl Plane {
    /// Creates a plane through three counter-clockwise points.
    ///
    /// Returns None if the points are collinear.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        let scale = cross.length();

        if !scale.is_finite() || scale < DEGENERATE_AREA_EPSILON {
            return None;
        }

        let normal = cross / scale;
        Some(Self {
            normal,
            w: normal.dot(a),
            anchors: [a, b, c],
            scale,
        })
    }

    /// Picks a well-conditioned anchor triple from a convex loop.
    ///
    /// Uses the first vertex, the vertex farthest from it, and the vertex
    /// farthest from the line through both. The winding of the loop is
    /// preserved.
    pub fn from_loop(points: &[DVec3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let a = points[0];
        let (far, _) = points
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, p)| (i, p.distance_squared(a)))
            .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
        if far == 0 {
            return None;
        }

        let axis = points[far] - a;
        let (apex, area) = points
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 0 && *i != far)
            .map(|(i, p)| (i, axis.cross(*p - a).length()))
            .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
        if apex == 0 || area < DEGENERATE_AREA_EPSILON {
            return None;
        }

        // Keep loop order so the normal follows the loop's winding
        if apex < far {
            Self::from_points(a, points[apex], points[far])
        } else {
            Self::from_points(a, points[far], points[apex])
        }
    }

    /// Get the plane normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Flip the plane in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
        self.anchors.swap(1, 2);
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back.
    pub fn signed_distance(&self, point: DVec3, mode: CsgMode) -> f64 {
        match mode {
            CsgMode::Fast => self.normal.dot(point) - self.w,
            CsgMode::Exact => {
                let [a, b, c] = self.anchors;
                // orient3d is positive below a counter-clockwise plane
                -orient3d(coord(a), coord(b), coord(c), coord(point)) / self.scale
            }
        }
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: DVec3, mode: CsgMode) -> Classification {
        let dist = self.signed_distance(point, mode);
        let band = mode.plane_epsilon();
        if dist > band {
            Classification::Front
        } else if dist < -band {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

#[inline]
fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

// =============================================================================
// TESTS
// =============================================================================
