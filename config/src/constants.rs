//! # Configuration Constants
//!
//! Centralized constants for the Geneva pipeline. CSG tolerances,
//! tessellation bounds and the default mechanism parameters live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **CSG**: Plane classification bands for the two boolean modes
//! - **Tessellation**: Bounds on the cylinder vertex count
//! - **Mechanism Defaults**: Default parameter set for a six-slot wheel

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used by ray casts to reject near-parallel hits and self-hits.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance under which two mesh vertices are welded into one.
///
/// Boolean operations compute the same intersection point from different
/// polygons, and the results differ in the last few bits. Welding collapses
/// those copies so that shared edges pair up again.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_WELD_EPSILON;
///
/// fn vertices_should_merge(v1: [f64; 3], v2: [f64; 3]) -> bool {
///     let dx = v1[0] - v2[0];
///     let dy = v1[1] - v2[1];
///     let dz = v1[2] - v2[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() < VERTEX_WELD_EPSILON
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [1e-9, 0.0, 0.0]));
/// ```
pub const VERTEX_WELD_EPSILON: f64 = 1e-7;

/// Distance under which a vertex is considered to lie on a face edge when
/// repairing T-junctions.
pub const EDGE_SNAP_EPSILON: f64 = 1e-6;

/// Cross-product length (twice the triangle area) below which a face
/// counts as degenerate.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-14;

// =============================================================================
// CSG CONSTANTS
// =============================================================================

/// Coplanarity band used by the fast boolean mode.
///
/// Vertices closer than this to a splitting plane are treated as lying on
/// it. The band must not exceed [`EDGE_SNAP_EPSILON`]: a vertex absorbed
/// into a plane leaves a neighbouring crossing point at most about this far
/// away, and T-junction repair only closes gaps up to the snap distance.
///
/// # Example
///
/// ```rust
/// use config::constants::{EDGE_SNAP_EPSILON, EXACT_PLANE_EPSILON, FAST_PLANE_EPSILON};
///
/// assert!(FAST_PLANE_EPSILON > EXACT_PLANE_EPSILON);
/// assert!(FAST_PLANE_EPSILON <= EDGE_SNAP_EPSILON);
/// ```
pub const FAST_PLANE_EPSILON: f64 = 1e-7;

/// Coplanarity band used by the exact boolean mode.
///
/// Signs come from an adaptive-precision orientation predicate, so this band
/// only has to absorb rounding in vertices created by earlier splits.
pub const EXACT_PLANE_EPSILON: f64 = 1e-9;

/// Distance under which two adjacent result faces count as one plane and
/// may be merged back into a single convex face.
///
/// Kept well inside [`EXACT_PLANE_EPSILON`] so a merged face never spans
/// its own plane.
pub const COPLANAR_MERGE_EPSILON: f64 = 1e-10;

/// Margin added around an operand's bounding box when selecting the other
/// operand's polygons that can touch it.
pub const OVERLAP_MARGIN: f64 = 1e-5;

/// Upper bound on polygon fragments alive during one boolean operation.
///
/// Exceeding it fails the operation instead of exhausting memory.
pub const MAX_BSP_POLYGONS: usize = 500_000;

/// Number of rays cast by point containment queries.
///
/// Odd so that a majority vote never ties.
pub const CONTAINMENT_RAY_COUNT: usize = 5;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum vertex count of a cylinder cross-section.
///
/// A polygon needs at least 3 vertices.
pub const MIN_TESSELLATION_VERTICES: u32 = 3;

/// Maximum vertex count of a cylinder cross-section.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_TESSELLATION_VERTICES, MIN_TESSELLATION_VERTICES};
///
/// let requested = 600;
/// assert!(!(MIN_TESSELLATION_VERTICES..=MAX_TESSELLATION_VERTICES).contains(&requested));
/// ```
pub const MAX_TESSELLATION_VERTICES: u32 = 512;

/// Minimum number of slots on a Geneva wheel.
pub const MIN_SLOT_QUANTITY: u32 = 3;

// =============================================================================
// MECHANISM DEFAULTS
// =============================================================================

/// Default total height of the mechanism.
pub const DEFAULT_HEIGHT: f64 = 0.4;

/// Default Geneva wheel radius.
pub const DEFAULT_WHEEL_RADIUS: f64 = 3.0;

/// Default number of wheel slots.
pub const DEFAULT_SLOT_QUANTITY: u32 = 6;

/// Default crank pin radius.
pub const DEFAULT_PIN_RADIUS: f64 = 0.125;

/// Default clearance between the pin and the slot walls.
pub const DEFAULT_CLEARANCE: f64 = 0.05;

/// Default radial tolerance on every mating part.
///
/// Shared by the pin, stop disc, stop cutout and base tolerances.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Default mounting hole radius (wheel and crank).
pub const DEFAULT_HOLE_RADIUS: f64 = 0.25;

/// Default tolerance applied to the relief holes.
pub const DEFAULT_HOLE_TOLERANCE: f64 = 0.05;

/// Default cylinder vertex count.
pub const DEFAULT_VERTICES: u32 = 128;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
