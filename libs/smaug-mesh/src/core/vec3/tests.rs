//! Tests for the Vec3 helpers.

use super::*;

#[test]
fn close_to_is_symmetric() {
    assert!(close_to(1.0, 1.00001, 1e-4));
    assert!(close_to(1.00001, 1.0, 1e-4));
    assert!(!close_to(1.0, 1.001, 1e-4));
}

#[test]
fn centroid_of_square_is_center() {
    let square = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    ];
    assert_eq!(centroid(square), Some(Vec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn centroid_of_nothing_is_none() {
    assert_eq!(centroid(std::iter::empty()), None);
}
