//! # Parameter Model
//!
//! The input record for a generation run and its validation.

use config::constants::{
    DEFAULT_CLEARANCE, DEFAULT_HEIGHT, DEFAULT_HOLE_RADIUS, DEFAULT_HOLE_TOLERANCE,
    DEFAULT_PIN_RADIUS, DEFAULT_SLOT_QUANTITY, DEFAULT_TOLERANCE, DEFAULT_VERTICES,
    DEFAULT_WHEEL_RADIUS, MAX_TESSELLATION_VERTICES, MIN_SLOT_QUANTITY,
    MIN_TESSELLATION_VERTICES,
};
use serde::{Deserialize, Serialize};

use crate::error::{GenevaError, GenevaResult};

/// Dimensions of a Geneva drive.
///
/// Missing fields take their defaults when deserialized, so a host can
/// supply a partial record.
///
/// # Example
///
/// ```rust
/// use geneva_core::Parameters;
///
/// let params: Parameters = serde_json::from_str(r#"{ "slot_quantity": 8 }"#).unwrap();
/// assert_eq!(params.slot_quantity, 8);
/// assert_eq!(params.wheel_radius, 3.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Total height of the mechanism.
    pub height: f64,
    /// Geneva wheel radius.
    pub wheel_radius: f64,
    /// Number of wheel slots.
    pub slot_quantity: u32,
    /// Crank pin radius.
    pub pin_radius: f64,
    /// Gap between the pin and the slot walls.
    pub clearance: f64,
    pub pin_tolerance: f64,
    pub stop_disc_tolerance: f64,
    pub stop_cutout_tolerance: f64,
    pub base_tolerance: f64,
    /// Radius of the wheel's mounting hole.
    pub wheel_hole_radius: f64,
    /// Radius of the crank's mounting hole.
    pub crank_hole_radius: f64,
    /// Shrink applied to the relief hole cutters.
    pub hole_tolerance: f64,
    /// Polygon vertex count for every circular cross-section.
    pub vertices: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            wheel_radius: DEFAULT_WHEEL_RADIUS,
            slot_quantity: DEFAULT_SLOT_QUANTITY,
            pin_radius: DEFAULT_PIN_RADIUS,
            clearance: DEFAULT_CLEARANCE,
            pin_tolerance: DEFAULT_TOLERANCE,
            stop_disc_tolerance: DEFAULT_TOLERANCE,
            stop_cutout_tolerance: DEFAULT_TOLERANCE,
            base_tolerance: DEFAULT_TOLERANCE,
            wheel_hole_radius: DEFAULT_HOLE_RADIUS,
            crank_hole_radius: DEFAULT_HOLE_RADIUS,
            hole_tolerance: DEFAULT_HOLE_TOLERANCE,
            vertices: DEFAULT_VERTICES,
        }
    }
}

impl Parameters {
    /// Real-valued fields with their names, in declaration order.
    fn real_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("height", self.height),
            ("wheel_radius", self.wheel_radius),
            ("pin_radius", self.pin_radius),
            ("clearance", self.clearance),
            ("pin_tolerance", self.pin_tolerance),
            ("stop_disc_tolerance", self.stop_disc_tolerance),
            ("stop_cutout_tolerance", self.stop_cutout_tolerance),
            ("base_tolerance", self.base_tolerance),
            ("wheel_hole_radius", self.wheel_hole_radius),
            ("crank_hole_radius", self.crank_hole_radius),
            ("hole_tolerance", self.hole_tolerance),
        ]
    }

    /// Checks the raw record.
    ///
    /// Integer bounds first, then every real field must be finite and
    /// strictly positive. Checks on derived dimensions live in
    /// [`crate::DerivedDimensions::compute`].
    pub fn validate(&self) -> GenevaResult<()> {
        if self.slot_quantity < MIN_SLOT_QUANTITY {
            return Err(GenevaError::invalid(
                "slot_quantity",
                format!(
                    "must be at least {}, got {}",
                    MIN_SLOT_QUANTITY, self.slot_quantity
                ),
            ));
        }

        if !(MIN_TESSELLATION_VERTICES..=MAX_TESSELLATION_VERTICES).contains(&self.vertices) {
            return Err(GenevaError::invalid(
                "vertices",
                format!(
                    "must be within [{}, {}], got {}",
                    MIN_TESSELLATION_VERTICES, MAX_TESSELLATION_VERTICES, self.vertices
                ),
            ));
        }

        for (name, value) in self.real_fields() {
            if !value.is_finite() {
                return Err(GenevaError::invalid(name, format!("must be finite, got {value}")));
            }
            if value <= 0.0 {
                return Err(GenevaError::invalid(name, format!("must be positive, got {value}")));
            }
        }

        Ok(())
    }
}
