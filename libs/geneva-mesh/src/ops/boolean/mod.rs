//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A);
//!   B.invert(); combine; result.invert()
//!
//! Clipping only reads a tree's planes, so each operand's original polygons
//! are clipped against the other operand's tree and the trees' own
//! construction fragments never reach the output.
//!
//! ## Overlap Partition
//!
//! A polygon whose bounds stay clear of the other operand's box cannot meet
//! that operand and passes straight through (or is dropped, for the
//! subtrahend of a difference). The trees are built from the near polygons
//! clipped to the other operand's box, which classifies everything inside
//! that box exactly as the whole solid would.
//!
//! Both operations consume their operands. The polygon soup is then welded,
//! repaired, checked for closure and re-merged into convex faces (see
//! `cleanup`).
//!
//! ## Modes
//!
//! [`CsgMode::Fast`] classifies vertices by floating-point plane distance
//! with a band as wide as the weld distance. [`CsgMode::Exact`] takes signs
//! from an adaptive-precision orientation predicate and uses a narrower
//! band, for operands that touch, share faces, or are concentric.
//!
//! ## Example
//!
//! ```rust
//! use geneva_mesh::ops::boolean::{difference, CsgMode};
//! use geneva_mesh::primitives::{make_cube, make_cylinder};
//! use geneva_mesh::Pose;
//! use glam::DVec3;
//!
//! let plate = make_cube(DVec3::new(4.0, 4.0, 1.0), Pose::identity()).unwrap();
//! let drill = make_cylinder(0.5, 2.0, 32, Pose::identity()).unwrap();
//! let drilled = difference(plate, drill, CsgMode::Exact).unwrap();
//! assert!(!drilled.contains_point(DVec3::ZERO));
//! ```

mod bsp;
mod cleanup;
mod plane;
mod polygon;


use bsp::{BspTree, BudgetExceeded};
use config::constants::{
    EXACT_PLANE_EPSILON, FAST_PLANE_EPSILON, MAX_BSP_POLYGONS, OVERLAP_MARGIN,
    VERTEX_WELD_EPSILON,
};
use glam::DVec3;
use polygon::Polygon;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::primitives::create_cube;
use crate::solid::Solid;

// =============================================================================
// MODE
// =============================================================================

/// Robustness strategy for a boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsgMode {
    /// Floating-point plane tests, weld-sized coplanarity band.
    Fast,
    /// Adaptive-precision plane tests, narrow coplanarity band.
    #[default]
    Exact,
}

impl CsgMode {
    /// Distance under which a vertex counts as lying on a plane.
    pub fn plane_epsilon(self) -> f64 {
        match self {
            CsgMode::Fast => FAST_PLANE_EPSILON,
            CsgMode::Exact => EXACT_PLANE_EPSILON,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CsgMode::Fast => "fast",
            CsgMode::Exact => "exact",
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two solids.
///
/// Returns a solid covering every point inside either operand. The result
/// is in world coordinates with an identity pose.
pub fn union(a: Solid, b: Solid, mode: CsgMode) -> MeshResult<Solid> {
    const OP: &str = "union";

    let a = a.into_world_mesh();
    let b = b.into_world_mesh();
    check_operands(OP, &a, &b)?;

    if !bounding_boxes_overlap(&a, &b) {
        tracing::trace!(operation = OP, "disjoint operands, concatenating");
        let mut merged = a;
        merged.merge(&b);
        return Ok(Solid::from_world_mesh(merged));
    }

    let Operands {
        a_near,
        a_far,
        b_near,
        b_far,
        tree_a,
        tree_b,
    } = Operands::prepare(&a, &b, mode, OP)?;
    let clip = |tree: &BspTree, polygons| tree.clip_polygons(polygons).map_err(over_budget(OP));

    let a_kept = clip(&tree_b, a_near)?;
    let b_kept = clip(&tree_a, b_near)?;
    let b_kept = flipped(clip(&tree_a, flipped(b_kept))?);

    let mut polygons = a_far;
    polygons.extend(a_kept);
    polygons.extend(b_kept);
    polygons.extend(b_far);
    tracing::trace!(
        operation = OP,
        mode = mode.name(),
        polygons = polygons.len(),
        "bsp clip done"
    );

    cleanup::finish(polygons, OP).map(Solid::from_world_mesh)
}

/// Compute difference of two solids (A - B).
///
/// Returns a solid covering the points of A that are not inside B. The
/// result is in world coordinates with an identity pose.
pub fn difference(a: Solid, b: Solid, mode: CsgMode) -> MeshResult<Solid> {
    const OP: &str = "difference";

    let a = a.into_world_mesh();
    let b = b.into_world_mesh();
    check_operands(OP, &a, &b)?;

    if !bounding_boxes_overlap(&a, &b) {
        tracing::trace!(operation = OP, "disjoint operands, keeping minuend");
        return Ok(Solid::from_world_mesh(a));
    }

    let Operands {
        a_near,
        a_far,
        b_near,
        b_far: _,
        mut tree_a,
        tree_b,
    } = Operands::prepare(&a, &b, mode, OP)?;
    let clip = |tree: &BspTree, polygons| tree.clip_polygons(polygons).map_err(over_budget(OP));

    // A - B = ~(~A | B); B's far side lies outside A and drops out
    tree_a.invert();
    let a_kept = clip(&tree_b, flipped(a_near))?;
    let b_kept = clip(&tree_a, b_near)?;
    let b_kept = flipped(clip(&tree_a, flipped(b_kept))?);

    let mut polygons = a_far;
    polygons.extend(flipped(a_kept));
    polygons.extend(flipped(b_kept));
    tracing::trace!(
        operation = OP,
        mode = mode.name(),
        polygons = polygons.len(),
        "bsp clip done"
    );

    cleanup::finish(polygons, OP).map(Solid::from_world_mesh)
}

// =============================================================================
// OVERLAP PARTITION
// =============================================================================

/// Operand polygons split by reach, plus the trees that classify them.
struct Operands {
    /// Polygons of A that may touch B.
    a_near: Vec<Polygon>,
    /// Polygons of A clear of B's box.
    a_far: Vec<Polygon>,
    b_near: Vec<Polygon>,
    b_far: Vec<Polygon>,
    /// Classifies points inside B's box against A.
    tree_a: BspTree,
    /// Classifies points inside A's box against B.
    tree_b: BspTree,
}

impl Operands {
    fn prepare(a: &Mesh, b: &Mesh, mode: CsgMode, operation: &'static str) -> MeshResult<Self> {
        let a_box = expanded_box(a);
        let b_box = expanded_box(b);

        let (a_near, a_far) = partition(mesh_to_polygons(a), b_box);
        let (b_near, b_far) = partition(mesh_to_polygons(b), a_box);
        let tree_a = classifier(a, &a_near, b_box, mode, operation)?;
        let tree_b = classifier(b, &b_near, a_box, mode, operation)?;

        tracing::trace!(
            operation,
            a_near = a_near.len(),
            a_far = a_far.len(),
            b_near = b_near.len(),
            b_far = b_far.len(),
            "operands partitioned"
        );

        Ok(Self {
            a_near,
            a_far,
            b_near,
            b_far,
            tree_a,
            tree_b,
        })
    }
}

type Bounds = (DVec3, DVec3);

fn expanded_box(mesh: &Mesh) -> Bounds {
    let (min, max) = mesh.bounding_box();
    let margin = DVec3::splat(OVERLAP_MARGIN);
    (min - margin, max + margin)
}

fn boxes_overlap((a_min, a_max): Bounds, (b_min, b_max): Bounds) -> bool {
    a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
}

/// Splits polygons into those whose bounds meet `region` and the rest.
fn partition(polygons: Vec<Polygon>, region: Bounds) -> (Vec<Polygon>, Vec<Polygon>) {
    polygons
        .into_iter()
        .partition(|poly| boxes_overlap(poly.bounds(), region))
}

/// Tree that classifies points inside `region` against `mesh`.
///
/// Every face of `mesh` that reaches into `region` is in `near`, so their
/// parts inside the region bound the solid there. With no such part the
/// region is wholly inside or wholly outside, and the region's own box
/// stands in for the solid in the first case.
fn classifier(
    mesh: &Mesh,
    near: &[Polygon],
    (min, max): Bounds,
    mode: CsgMode,
    operation: &'static str,
) -> MeshResult<BspTree> {
    let mut polygons: Vec<Polygon> = near
        .iter()
        .filter_map(|poly| poly.clipped_to_box(min, max))
        .collect();

    if polygons.is_empty() && mesh.contains_point((min + max) / 2.0) {
        let mut cell = create_cube(max - min, false)?;
        cell.translate(min);
        polygons = mesh_to_polygons(&cell);
    }

    BspTree::new(polygons, mode, MAX_BSP_POLYGONS).map_err(over_budget(operation))
}

fn over_budget(operation: &'static str) -> impl Fn(BudgetExceeded) -> MeshError {
    move |BudgetExceeded { limit }| {
        MeshError::boolean_failed(operation, format!("more than {limit} polygon fragments"))
    }
}

fn flipped(mut polygons: Vec<Polygon>) -> Vec<Polygon> {
    for poly in &mut polygons {
        poly.flip();
    }
    polygons
}

// =============================================================================
// HELPERS
// =============================================================================

fn check_operands(operation: &'static str, a: &Mesh, b: &Mesh) -> MeshResult<()> {
    if a.is_empty() || b.is_empty() {
        return Err(MeshError::EmptyOperand { operation });
    }
    Ok(())
}

/// True unless the boxes are separated by more than the weld distance.
///
/// Boxes that merely touch still go through the BSP path so shared faces
/// are resolved.
fn bounding_boxes_overlap(a: &Mesh, b: &Mesh) -> bool {
    let (a_min, a_max) = a.bounding_box();
    let (b_min, b_max) = b.bounding_box();
    let gap = DVec3::splat(VERTEX_WELD_EPSILON);
    (a_min - gap).cmple(b_max).all() && (b_min - gap).cmple(a_max).all()
}

/// Convert mesh faces to BSP polygons, skipping faces without area.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    (0..mesh.face_count())
        .filter_map(|f| Polygon::from_vertices(mesh.face_positions(f).collect()))
        .collect()
}
