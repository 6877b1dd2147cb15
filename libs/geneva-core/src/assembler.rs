//! # Mechanism Assembler
//!
//! Builds the wheel body and the crank assembly from validated parameters
//! as a fixed sequence of primitive and boolean steps.
//!
//! ## Pipeline
//!
//! ```text
//! wheel disc ─ stop arcs (Fast) ─ half-slot turn ─ slot blades (Exact)
//!            ─ spoke hub ─ hole
//! base hub ∪ crank pin ∪ stop disc (Exact) ─ hole
//! relief cutters (kept or subtracted)
//! ```
//!
//! Every rotation is a pose computed from the step index. Any failure
//! aborts the run; partial solids are dropped with the stack frame.

use geneva_mesh::{difference, make_cube, make_cylinder, union, CsgMode, MeshResult, Pose, Solid};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::derived::DerivedDimensions;
use crate::error::{GenevaError, GenevaResult};
use crate::params::Parameters;
use crate::result::{NamedSolid, ResultSet, Role};

// =============================================================================
// OPTIONS
// =============================================================================

/// What to do with the two secondary relief-hole cutters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefHoles {
    /// Return the cutters as standalone solids next to the bodies.
    #[default]
    Keep,
    /// Subtract each cutter from its body and return only the bodies.
    Subtract,
}

/// Knobs that change the assembled output without changing dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub relief_holes: ReliefHoles,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Validates `params` and assembles a complete result set.
///
/// Nothing is built when validation fails.
pub fn assemble(params: &Parameters, options: &AssemblyOptions) -> GenevaResult<ResultSet> {
    let derived = DerivedDimensions::compute(params)?;
    let builder = Builder {
        params,
        derived: &derived,
    };

    let wheel = builder.wheel_body()?;
    let crank = builder.crank_assembly()?;
    let (crank_relief, wheel_relief) = builder.relief_cutters()?;

    let solids = match options.relief_holes {
        ReliefHoles::Keep => {
            tracing::warn!("relief cutters returned unapplied");
            vec![
                NamedSolid {
                    role: Role::WheelBody,
                    solid: wheel,
                },
                NamedSolid {
                    role: Role::CrankAssembly,
                    solid: crank,
                },
                NamedSolid {
                    role: Role::CrankReliefCutter,
                    solid: crank_relief,
                },
                NamedSolid {
                    role: Role::WheelReliefCutter,
                    solid: wheel_relief,
                },
            ]
        }
        ReliefHoles::Subtract => {
            let wheel = at_step(
                "wheel relief hole",
                difference(wheel, wheel_relief, CsgMode::Exact),
            )?;
            let crank = at_step(
                "crank relief hole",
                difference(crank, crank_relief, CsgMode::Exact),
            )?;
            vec![
                NamedSolid {
                    role: Role::WheelBody,
                    solid: wheel,
                },
                NamedSolid {
                    role: Role::CrankAssembly,
                    solid: crank,
                },
            ]
        }
    };

    let summary: Vec<String> = solids
        .iter()
        .map(|s| format!("{}: {} faces", s.name(), s.solid.face_count()))
        .collect();
    tracing::info!(
        slot_quantity = params.slot_quantity,
        vertices = params.vertices,
        solids = ?summary,
        "mechanism assembled"
    );
    Ok(ResultSet::new(*params, derived, solids))
}

/// Attributes a mesh failure to a named step.
fn at_step<T>(step: &'static str, result: MeshResult<T>) -> GenevaResult<T> {
    result.map_err(|source| GenevaError::at_step(step, source))
}

struct Builder<'a> {
    params: &'a Parameters,
    derived: &'a DerivedDimensions,
}

impl Builder<'_> {
    fn cylinder(
        &self,
        step: &'static str,
        radius: f64,
        depth: f64,
        at: DVec3,
    ) -> GenevaResult<Solid> {
        at_step(
            step,
            make_cylinder(radius, depth, self.params.vertices, Pose::at(at)),
        )
    }

    fn crank_axis(&self) -> DVec3 {
        DVec3::new(self.derived.center_distance, 0.0, 0.0)
    }

    // =========================================================================
    // WHEEL
    // =========================================================================

    fn wheel_body(&self) -> GenevaResult<Solid> {
        let p = self.params;
        let d = self.derived;
        let h = p.height;

        let mut wheel = self.cylinder("wheel body", p.wheel_radius, h / 2.0, DVec3::ZERO)?;
        let stop_cutter =
            self.cylinder("stop arc cutter", d.stop_disc_radius, h, self.crank_axis())?;

        for k in 0..p.slot_quantity {
            let cutter = stop_cutter.clone().rotated_z(k as f64 * d.slot_angle);
            wheel = at_step("stop arc cut", difference(wheel, cutter, CsgMode::Fast))?;
        }
        tracing::debug!(cuts = p.slot_quantity, "stop arcs carved");

        let mut wheel = wheel.rotated_z(d.slot_angle / 2.0);
        let blade = self.slot_blade()?;

        for k in 0..=p.slot_quantity {
            let pass = blade.clone().rotated_z(k as f64 * d.slot_angle);
            wheel = at_step("slot etch", difference(wheel, pass, CsgMode::Exact))?;
        }
        tracing::debug!(passes = p.slot_quantity + 1, "slots etched");

        let spoke_hub = self.cylinder(
            "spoke hub",
            d.spoky_base_radius,
            h / 2.0,
            DVec3::new(0.0, 0.0, -h / 2.0),
        )?;
        let wheel = at_step("spoke hub merge", union(wheel, spoke_hub, CsgMode::Exact))?;

        let hole = self.cylinder("wheel hole", p.wheel_hole_radius, 2.0 * h, DVec3::ZERO)?;
        let wheel = at_step("wheel hole", difference(wheel, hole, CsgMode::Exact))?;

        tracing::debug!(faces = wheel.face_count(), "wheel body finished");
        Ok(wheel)
    }

    /// Pin-ended bar covering the pin's reach through one slot.
    fn slot_blade(&self) -> GenevaResult<Solid> {
        let p = self.params;
        let d = self.derived;
        let c = d.center_distance;

        let pin = self.cylinder(
            "slot pin cutter",
            d.slot_width / 2.0,
            p.height,
            DVec3::new(d.slot_pos, 0.0, 0.0),
        )?;
        let bar = at_step(
            "slot box",
            make_cube(
                DVec3::new(2.0 * c, d.slot_width, p.height),
                Pose::at(DVec3::new(d.slot_pos + c, 0.0, 0.0)),
            ),
        )?;
        at_step("slot blade", union(pin, bar, CsgMode::Exact))
    }

    // =========================================================================
    // CRANK
    // =========================================================================

    fn crank_assembly(&self) -> GenevaResult<Solid> {
        let p = self.params;
        let d = self.derived;
        let h = p.height;
        let axis = self.crank_axis();

        let pin = self.cylinder(
            "crank pin",
            p.pin_radius - p.pin_tolerance,
            h / 2.0,
            DVec3::new(d.slot_pos, 0.0, 0.0),
        )?;

        let disc = self.cylinder(
            "stop disc",
            d.stop_disc_radius - p.stop_disc_tolerance,
            h / 2.0,
            axis,
        )?;
        let cutout = self.cylinder(
            "stop disc cutout",
            p.wheel_radius + p.stop_cutout_tolerance,
            h,
            DVec3::ZERO,
        )?;
        let stop_disc = at_step("stop disc relief", difference(disc, cutout, CsgMode::Exact))?;

        let hub = self.cylinder(
            "base hub",
            d.slotty_base_radius,
            h / 2.0,
            DVec3::new(axis.x, 0.0, -h / 2.0),
        )?;
        let crank = at_step("crank pin merge", union(hub, pin, CsgMode::Exact))?;
        let crank = at_step("stop disc merge", union(crank, stop_disc, CsgMode::Exact))?;

        let hole = self.cylinder("crank hole", p.crank_hole_radius, 2.0 * h, axis)?;
        let crank = at_step("crank hole", difference(crank, hole, CsgMode::Exact))?;

        tracing::debug!(faces = crank.face_count(), "crank assembly finished");
        Ok(crank)
    }

    // =========================================================================
    // RELIEF CUTTERS
    // =========================================================================

    /// Offset relief cutters as `(crank, wheel)`.
    fn relief_cutters(&self) -> GenevaResult<(Solid, Solid)> {
        let p = self.params;
        let h = p.height;
        let axis = self.crank_axis();

        let crank = self.cylinder(
            "crank relief cutter",
            p.crank_hole_radius - p.hole_tolerance,
            2.0 * h,
            DVec3::new(axis.x, 0.0, -h / 4.0),
        )?;
        let wheel = self.cylinder(
            "wheel relief cutter",
            p.wheel_hole_radius - p.hole_tolerance,
            2.0 * h,
            DVec3::new(0.0, 0.0, -h / 4.0),
        )?;
        Ok((crank, wheel))
    }
}
