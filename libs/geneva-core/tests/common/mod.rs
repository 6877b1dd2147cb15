#![allow(dead_code)]

use std::f64::consts::TAU;

use geneva_core::{DerivedDimensions, Parameters};
use geneva_mesh::Solid;
use glam::DVec3;

pub const SAMPLES: usize = 360;

/// Default dimensions on a coarse tessellation.
pub fn coarse(slot_quantity: u32) -> Parameters {
    Parameters {
        slot_quantity,
        vertices: 32,
        ..Default::default()
    }
}

/// Radius inside the slot channels and clear of the stop arcs.
pub fn slot_sample_radius(derived: &DerivedDimensions) -> f64 {
    let inner = derived.slot_pos;
    let stop_arc = derived.center_distance - derived.stop_disc_radius;
    (inner + stop_arc) / 2.0
}

/// Lengths of the runs of empty samples on a circle at `z = 0`.
pub fn gap_runs(wheel: &Solid, radius: f64) -> Vec<usize> {
    let inside: Vec<bool> = (0..SAMPLES)
        .map(|i| {
            let angle = TAU * i as f64 / SAMPLES as f64;
            wheel.contains_point(DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0))
        })
        .collect();

    let Some(start) = inside.iter().position(|&v| v) else {
        return vec![SAMPLES];
    };

    let mut runs = Vec::new();
    let mut current = 0;
    for step in 1..=SAMPLES {
        if inside[(start + step) % SAMPLES] {
            if current > 0 {
                runs.push(current);
                current = 0;
            }
        } else {
            current += 1;
        }
    }
    runs
}
