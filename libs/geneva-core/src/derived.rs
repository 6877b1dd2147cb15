//! # Derived Dimensions
//!
//! Every length the assembler needs, computed once from validated
//! [`Parameters`].
//!
//! ```text
//! centerDistance   = wheelRadius / cos(π / slotQuantity)
//! crankRadius      = sqrt(centerDistance² − wheelRadius²)
//! slotWidth        = 2·pinRadius + clearance
//! stopArcRadius    = crankRadius − 3·pinRadius
//! stopDiscRadius   = stopArcRadius − clearance
//! slotPos          = centerDistance − crankRadius
//! slottyBaseRadius = (centerDistance − slotPos) + pinRadius − pinTolerance
//! spokyBaseRadius  = centerDistance − slottyBaseRadius − baseTolerance
//! ```

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{GenevaError, GenevaResult};
use crate::params::Parameters;

/// Lengths derived from [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedDimensions {
    /// Distance between the wheel axis and the crank axis.
    pub center_distance: f64,
    /// Distance from the crank axis to the pin.
    pub crank_radius: f64,
    /// Radial length of a slot measured from the wheel rim.
    pub slot_center_length: f64,
    pub slot_width: f64,
    /// Radius of the arcs that lock the wheel between engagements.
    pub stop_arc_radius: f64,
    pub stop_disc_radius: f64,
    /// Rim arc the stop disc clears, scaled onto the wheel.
    pub clearance_arc: f64,
    /// X position of the crank pin when it enters a slot.
    pub slot_pos: f64,
    /// Crank base hub radius.
    pub slotty_base_radius: f64,
    /// Wheel spoke hub radius.
    pub spoky_base_radius: f64,
    /// Angle between neighbouring slots.
    pub slot_angle: f64,
}

impl DerivedDimensions {
    /// Validates `params` and derives the mechanism dimensions.
    ///
    /// Fails with `InvalidParameter` when the raw record is invalid or a
    /// radius handed to the primitive factory would not be positive.
    pub fn compute(params: &Parameters) -> GenevaResult<Self> {
        params.validate()?;

        let n = params.slot_quantity as f64;
        let wheel_radius = params.wheel_radius;

        let center_distance = wheel_radius / (PI / n).cos();
        if !center_distance.is_finite() || center_distance <= wheel_radius {
            return Err(GenevaError::invalid(
                "slot_quantity",
                format!(
                    "center distance {center_distance} does not exceed wheel radius {wheel_radius}"
                ),
            ));
        }

        let crank_radius = (center_distance * center_distance - wheel_radius * wheel_radius).sqrt();
        let slot_width = 2.0 * params.pin_radius + params.clearance;
        let stop_arc_radius = crank_radius - 3.0 * params.pin_radius;
        let stop_disc_radius = stop_arc_radius - params.clearance;
        let slot_pos = center_distance - crank_radius;
        let slotty_base_radius =
            (center_distance - slot_pos) + params.pin_radius - params.pin_tolerance;
        let spoky_base_radius = center_distance - slotty_base_radius - params.base_tolerance;

        let derived = Self {
            center_distance,
            crank_radius,
            slot_center_length: crank_radius + wheel_radius - center_distance,
            slot_width,
            stop_arc_radius,
            stop_disc_radius,
            clearance_arc: wheel_radius * stop_disc_radius / crank_radius,
            slot_pos,
            slotty_base_radius,
            spoky_base_radius,
            slot_angle: 2.0 * PI / n,
        };
        derived.check_factory_radii(params)?;

        tracing::debug!(
            center_distance,
            crank_radius,
            slot_pos,
            stop_disc_radius,
            "derived dimensions"
        );
        Ok(derived)
    }

    /// Every radius the assembler builds a cylinder from must be positive.
    fn check_factory_radii(&self, params: &Parameters) -> GenevaResult<()> {
        let radii = [
            ("pin_tolerance", params.pin_radius - params.pin_tolerance),
            ("pin_radius", self.stop_disc_radius),
            (
                "stop_disc_tolerance",
                self.stop_disc_radius - params.stop_disc_tolerance,
            ),
            ("base_tolerance", self.spoky_base_radius),
            (
                "hole_tolerance",
                params.wheel_hole_radius - params.hole_tolerance,
            ),
            (
                "hole_tolerance",
                params.crank_hole_radius - params.hole_tolerance,
            ),
        ];

        for (parameter, radius) in radii {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(GenevaError::invalid(
                    parameter,
                    format!("leaves a non-positive derived radius ({radius})"),
                ));
            }
        }
        Ok(())
    }
}
