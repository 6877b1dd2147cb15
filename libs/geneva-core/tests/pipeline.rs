mod common;

use common::{coarse, gap_runs, slot_sample_radius, SAMPLES};
use geneva_core::{assemble, AssemblyOptions, Parameters, ReliefHoles, Role};
use glam::DVec3;

#[test]
fn wheel_has_one_slot_per_quantity() {
    for slot_quantity in [3, 6, 8] {
        let params = coarse(slot_quantity);
        let set = assemble(&params, &AssemblyOptions::default()).unwrap();
        let wheel = set.get(Role::WheelBody).unwrap();
        let radius = slot_sample_radius(set.derived());

        let runs = gap_runs(wheel, radius);
        assert_eq!(runs.len(), slot_quantity as usize, "slot quantity {slot_quantity}");

        let expected = 2.0 * (set.derived().slot_width / 2.0 / radius).asin();
        let expected_samples = expected / std::f64::consts::TAU * SAMPLES as f64;
        for run in runs {
            assert!(
                (run as f64 - expected_samples).abs() <= 1.5,
                "slot spans {run} samples, expected about {expected_samples:.1}"
            );
        }
    }
}

#[test]
fn slots_sit_on_the_pin_path() {
    let set = assemble(&coarse(6), &AssemblyOptions::default()).unwrap();
    let wheel = set.get(Role::WheelBody).unwrap();
    let d = set.derived();
    let radius = slot_sample_radius(d);

    for k in 0..6 {
        let angle = k as f64 * d.slot_angle;
        let in_slot = DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        assert!(!wheel.contains_point(in_slot), "slot {k} is filled");

        let between = angle + d.slot_angle / 2.0;
        let land = DVec3::new(radius * between.cos(), radius * between.sin(), 0.0);
        assert!(wheel.contains_point(land), "land after slot {k} is missing");
    }
}

#[test]
fn wheel_has_central_hole() {
    let set = assemble(&coarse(6), &AssemblyOptions::default()).unwrap();
    let wheel = set.get(Role::WheelBody).unwrap();

    assert!(!wheel.contains_point(DVec3::new(0.24, 0.0, 0.0)));
    assert!(wheel.contains_point(DVec3::new(0.26, 0.0, 0.0)));
    // the hole runs through the spoke hub as well
    assert!(!wheel.contains_point(DVec3::new(0.0, 0.0, -0.2)));
    assert!(wheel.contains_point(DVec3::new(0.0, 0.5, -0.2)));
}

#[test]
fn crank_assembly_geometry() {
    let set = assemble(&coarse(6), &AssemblyOptions::default()).unwrap();
    let crank = set.get(Role::CrankAssembly).unwrap();
    let d = set.derived();
    let c = d.center_distance;

    // pin
    assert!(crank.contains_point(DVec3::new(d.slot_pos, 0.0, 0.0)));
    assert!(!crank.contains_point(DVec3::new(d.slot_pos, 0.0, 0.15)));
    // base hub and its hole
    assert!(crank.contains_point(DVec3::new(c + 1.0, 0.0, -0.2)));
    assert!(crank.contains_point(DVec3::new(c + 0.3, 0.0, -0.2)));
    assert!(!crank.contains_point(DVec3::new(c, 0.0, -0.2)));
    // stop disc, relieved on the wheel side
    assert!(crank.contains_point(DVec3::new(c + 1.0, 0.0, 0.0)));
    assert!(!crank.contains_point(DVec3::new(c - 1.0, 0.0, 0.0)));
}

#[test]
fn every_solid_is_closed() {
    let set = assemble(&coarse(6), &AssemblyOptions::default()).unwrap();
    assert_eq!(set.len(), 4);
    for named in &set {
        let mesh = named.mesh();
        assert!(mesh.is_closed(), "{} has open edges", named.name());
        assert!(mesh.volume() > 0.0, "{} has no volume", named.name());
    }
}

#[test]
fn subtracted_relief_holes_leave_bodies_closed() {
    let options = AssemblyOptions {
        relief_holes: ReliefHoles::Subtract,
    };
    let set = assemble(&coarse(6), &options).unwrap();
    assert!(set.get(Role::CrankReliefCutter).is_none());
    assert!(set.get(Role::WheelReliefCutter).is_none());
    for named in &set {
        assert!(named.mesh().is_closed());
    }
}

#[test]
fn concrete_scenario() {
    let params = Parameters {
        height: 0.4,
        wheel_radius: 3.0,
        slot_quantity: 6,
        pin_radius: 0.125,
        clearance: 0.05,
        pin_tolerance: 0.05,
        stop_disc_tolerance: 0.05,
        stop_cutout_tolerance: 0.05,
        base_tolerance: 0.05,
        wheel_hole_radius: 0.25,
        crank_hole_radius: 0.25,
        hole_tolerance: 0.05,
        vertices: 128,
    };
    let set = assemble(&params, &AssemblyOptions::default()).unwrap();
    let d = set.derived();
    assert!((d.center_distance - 3.4641).abs() < 1e-4);
    assert!((d.crank_radius - 1.7321).abs() < 1e-4);

    let wheel = set.get(Role::WheelBody).unwrap();
    assert_eq!(gap_runs(wheel, slot_sample_radius(d)).len(), 6);
    assert!(!wheel.contains_point(DVec3::new(0.24, 0.0, 0.0)));
    assert!(wheel.contains_point(DVec3::new(0.26, 0.0, 0.0)));
    assert!(wheel.world_mesh().is_closed());
}

#[test]
fn every_slot_quantity_assembles_at_default_tessellation() {
    for slot_quantity in 3..=12 {
        let params = Parameters {
            slot_quantity,
            ..Default::default()
        };
        let set = assemble(&params, &AssemblyOptions::default())
            .unwrap_or_else(|err| panic!("{slot_quantity} slots: {err}"));
        for named in &set {
            assert!(
                named.mesh().is_closed(),
                "{} has open edges with {slot_quantity} slots",
                named.name()
            );
        }
    }
}

#[test]
fn finest_tessellation_assembles() {
    let params = Parameters {
        vertices: 512,
        ..Default::default()
    };
    let set = assemble(&params, &AssemblyOptions::default()).unwrap();
    assert_eq!(set.len(), 4);
    for named in &set {
        assert!(named.mesh().is_closed(), "{} has open edges", named.name());
    }
}
