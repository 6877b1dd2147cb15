mod common;

use common::{coarse, gap_runs, slot_sample_radius};
use geneva_core::{assemble, AssemblyOptions, GenevaError, Parameters, ResultContainer, Role};

#[test]
fn identical_parameters_give_identical_results() {
    let params = coarse(6);
    let options = AssemblyOptions::default();
    let first = assemble(&params, &options).unwrap();
    let second = assemble(&params, &options).unwrap();

    assert_eq!(first.names(), second.names());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.mesh().canonical_vertices(), b.mesh().canonical_vertices());
        assert_eq!(a.mesh(), b.mesh());
    }
    assert_eq!(first, second);
}

#[test]
fn regeneration_replaces_previous_set() {
    let options = AssemblyOptions::default();
    let p1 = coarse(6);
    let p2 = Parameters {
        wheel_radius: 4.0,
        ..coarse(8)
    };

    let mut container = ResultContainer::new();
    container.regenerate(&p1, &options).unwrap();
    let set = container.regenerate(&p2, &options).unwrap();
    assert_eq!(set.params(), &p2);

    let set = container.current().unwrap();
    assert_eq!(container.generation(), 2);
    assert_eq!(set.len(), 4);

    let wheel = set.get(Role::WheelBody).unwrap();
    assert_eq!(gap_runs(wheel, slot_sample_radius(set.derived())).len(), 8);
    let (min, max) = wheel.bounding_box();
    assert!(max.x > 3.5 || -min.x > 3.5, "wheel still has the old radius");
}

#[test]
fn failed_run_keeps_previous_set() {
    let options = AssemblyOptions::default();
    let valid = coarse(6);

    let mut container = ResultContainer::new();
    container.regenerate(&valid, &options).unwrap();
    let before = container.current().cloned().unwrap();

    let invalid = Parameters {
        slot_quantity: 2,
        ..valid
    };
    let err = container.regenerate(&invalid, &options).unwrap_err();
    assert!(matches!(err, GenevaError::InvalidParameter { parameter: "slot_quantity", .. }));

    assert_eq!(container.generation(), 1);
    assert_eq!(container.current(), Some(&before));
}

#[test]
fn empty_container_before_first_run() {
    let mut container = ResultContainer::new();
    assert!(container.current().is_none());
    assert_eq!(container.generation(), 0);

    let err = container
        .regenerate(
            &Parameters {
                vertices: 600,
                ..Default::default()
            },
            &AssemblyOptions::default(),
        )
        .unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(container.current().is_none());
}

#[test]
fn take_hands_over_ownership() {
    let mut container = ResultContainer::new();
    container
        .regenerate(&coarse(4), &AssemblyOptions::default())
        .unwrap();
    let set = container.take().unwrap();
    assert_eq!(set.into_solids().len(), 4);
    assert!(container.current().is_none());
    assert_eq!(container.generation(), 1);
}
