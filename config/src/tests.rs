//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_weld_covers_exact_band() {
    assert!(
        VERTEX_WELD_EPSILON > EXACT_PLANE_EPSILON,
        "slivers thinner than the exact band must collapse when welded"
    );
}

#[test]
fn test_edge_snap_covers_fast_band() {
    assert!(
        EDGE_SNAP_EPSILON >= FAST_PLANE_EPSILON,
        "gaps left by the fast band must be within T-junction reach"
    );
}

#[test]
fn test_merge_band_inside_exact_band() {
    assert!(COPLANAR_MERGE_EPSILON < EXACT_PLANE_EPSILON);
}

#[test]
fn test_overlap_margin_clears_weld() {
    assert!(OVERLAP_MARGIN > VERTEX_WELD_EPSILON);
}

#[test]
fn test_edge_snap_not_tighter_than_weld() {
    assert!(EDGE_SNAP_EPSILON >= VERTEX_WELD_EPSILON);
}

#[test]
fn test_fast_band_wider_than_exact() {
    assert!(FAST_PLANE_EPSILON > EXACT_PLANE_EPSILON);
}

#[test]
fn test_containment_ray_count_is_odd() {
    assert_eq!(CONTAINMENT_RAY_COUNT % 2, 1);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_tessellation_bounds() {
    assert_eq!(MIN_TESSELLATION_VERTICES, 3);
    assert_eq!(MAX_TESSELLATION_VERTICES, 512);
    assert!((MIN_TESSELLATION_VERTICES..=MAX_TESSELLATION_VERTICES).contains(&DEFAULT_VERTICES));
}

#[test]
fn test_default_slots_valid() {
    assert!(DEFAULT_SLOT_QUANTITY >= MIN_SLOT_QUANTITY);
}

// =============================================================================
// DEFAULT PARAMETER TESTS
// =============================================================================

#[test]
fn test_default_pin_wider_than_tolerance() {
    assert!(DEFAULT_PIN_RADIUS > DEFAULT_TOLERANCE);
}

#[test]
fn test_default_hole_wider_than_tolerance() {
    assert!(DEFAULT_HOLE_RADIUS > DEFAULT_HOLE_TOLERANCE);
}

// =============================================================================
// APPROX TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(-1.0));
}
