//! Tests for the exact predicates.

use super::*;

#[test]
fn axis_aligned_run_is_collinear() {
    let a = Vec3::new(0.0, 2.0, 0.0);
    let b = Vec3::new(1.0, 2.0, 0.0);
    let c = Vec3::new(2.0, 2.0, 0.0);
    assert!(collinear(a, b, c));
}

#[test]
fn tiny_kink_is_not_collinear() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(1.0, 1e-12, 0.0);
    let c = Vec3::new(2.0, 0.0, 0.0);
    assert!(!collinear(a, b, c));
}

#[test]
fn antiparallel_directions_are_parallel() {
    assert!(parallel(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -0.5)));
    assert!(!parallel(Vec3::X, Vec3::new(1.0, 0.0, 1.0)));
}

#[test]
fn coincident_points_are_collinear() {
    let p = Vec3::new(3.0, -1.0, 4.0);
    assert!(collinear(p, p, Vec3::ZERO));
}
