//! Tests for point classification.

use super::*;

fn square(min: f64, max: f64, normal: Vec3) -> ConvexLoop {
    let ccw = vec![
        Vec3::new(min, min, 0.0),
        Vec3::new(max, min, 0.0),
        Vec3::new(max, max, 0.0),
        Vec3::new(min, max, 0.0),
    ];
    if normal.z > 0.0 {
        ConvexLoop::closed(ccw, normal)
    } else {
        ConvexLoop::closed(ccw.into_iter().rev().collect(), normal)
    }
}

#[test]
fn winding_follows_the_normal() {
    let up = square(0.0, 2.0, Vec3::Z);
    let down = square(0.0, 2.0, Vec3::NEG_Z);
    let p = Vec3::new(0.5, 1.5, 0.0);
    assert_eq!(classify_point(&up, p, 1e-3), PointClass::Inside);
    assert_eq!(classify_point(&down, p, 1e-3), PointClass::Inside);
}

#[test]
fn corners_are_on_edge() {
    let s = square(0.0, 2.0, Vec3::Z);
    for p in &s.points {
        assert_eq!(classify_point(&s, *p, 1e-3), PointClass::OnEdge);
    }
}

#[test]
fn diagonal_edges_do_not_count_as_boundary() {
    // Lower-right triangle of the square; its hypotenuse is an inner diagonal
    let tri = ConvexLoop {
        points: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ],
        outer: vec![true, true, false],
        normal: Vec3::Z,
    };
    assert_eq!(
        classify_point(&tri, Vec3::new(1.0, 1.0, 0.0), 1e-3),
        PointClass::Inside
    );
}

#[test]
fn strict_inside_rejects_boundary() {
    let s = square(0.0, 2.0, Vec3::Z);
    assert!(point_strictly_inside(&s.points, s.normal, Vec3::new(1.0, 1.0, 0.0), 1e-3));
    assert!(!point_strictly_inside(&s.points, s.normal, Vec3::new(0.0, 1.0, 0.0), 1e-3));
    assert!(!point_strictly_inside(&s.points, s.normal, Vec3::new(-1.0, 1.0, 0.0), 1e-3));
}

#[test]
fn tally_counts_every_point_once() {
    let loops = vec![square(0.0, 2.0, Vec3::Z)];
    let points = [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::new(3.0, 3.0, 0.0),
        Vec3::new(3.0, 1.0, 0.0),
    ];
    let tally = tally_points(&points, &loops, 1e-3);
    assert_eq!(
        tally,
        Containment {
            inside: 1,
            on_edge: 1,
            outside: 2
        }
    );
    assert_eq!(tally.total(), 4);
}

#[test]
fn empty_loop_set_tallies_nothing() {
    let tally = tally_points(&[Vec3::ZERO], &[], 1e-3);
    assert_eq!(tally, Containment::default());
}
