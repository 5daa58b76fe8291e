//! Property-based tests for face construction and decomposition.
//!
//! Run with: cargo test -p smaug-mesh --test properties

use std::f64::consts::TAU;

use config::Tolerances;
use proptest::prelude::*;
use smaug_mesh::tessellate::{convexify, triangulate};
use smaug_mesh::{FaceKey, PointPool, Topology, Vec3};

// =============================================================================
// Strategies
// =============================================================================

/// A star-shaped polygon around the origin in the xy plane.
fn arb_star(min: usize, max: usize) -> impl Strategy<Value = Vec<Vec3>> {
    (min..=max).prop_flat_map(|n| {
        prop::collection::vec((0.5..2.0f64, -0.3..0.3f64), n).prop_map(move |samples| {
            samples
                .into_iter()
                .enumerate()
                .map(|(i, (radius, jitter))| {
                    let angle = TAU * (i as f64 + jitter) / n as f64;
                    Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
                })
                .collect()
        })
    })
}

/// A regular polygon with random size and rotation.
fn arb_convex() -> impl Strategy<Value = Vec<Vec3>> {
    (3usize..24, 0.1..50.0f64, 0.0..TAU).prop_map(|(n, radius, phase)| {
        (0..n)
            .map(|i| {
                let angle = phase + TAU * i as f64 / n as f64;
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect()
    })
}

/// A rectilinear comb: a base strip with teeth of random width, gap and
/// height standing on it. Every gap is a pair of concave corners, so deep
/// notches leave no point that sees the whole loop.
fn arb_comb() -> impl Strategy<Value = Vec<Vec3>> {
    (1usize..7, 0.2..2.0f64).prop_flat_map(|(teeth, base)| {
        prop::collection::vec((0.1..2.0f64, 0.1..2.0f64, 0.2..3.0f64), teeth).prop_map(
            move |spans| {
                let mut x = 0.0;
                let mut columns = Vec::with_capacity(spans.len());
                for &(width, gap, height) in &spans {
                    columns.push((x, x + width, base + height));
                    x += width + gap;
                }
                let right = columns.last().map_or(0.0, |c| c.1);

                let mut loop_points = vec![Vec3::ZERO, Vec3::new(right, 0.0, 0.0)];
                for (i, &(left, right, top)) in columns.iter().enumerate().rev() {
                    loop_points.push(Vec3::new(right, top, 0.0));
                    loop_points.push(Vec3::new(left, top, 0.0));
                    if i > 0 {
                        loop_points.push(Vec3::new(left, base, 0.0));
                        loop_points.push(Vec3::new(columns[i - 1].1, base, 0.0));
                    }
                }
                loop_points
            },
        )
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn build(positions: &[Vec3]) -> (Topology, PointPool, FaceKey) {
    let mut points = PointPool::default();
    let keys: Vec<_> = positions.iter().map(|&p| points.insert(p)).collect();
    let mut topology = Topology::new();
    let face = topology.new_face(&keys).unwrap();
    (topology, points, face)
}

fn area(positions: &[Vec3]) -> f64 {
    let n = positions.len();
    (0..n)
        .map(|i| positions[i].cross(positions[(i + 1) % n]).z)
        .sum::<f64>()
        / 2.0
}

fn is_convex(positions: &[Vec3]) -> bool {
    let n = positions.len();
    (0..n).all(|i| {
        let (a, b, c) = (positions[i], positions[(i + 1) % n], positions[(i + 2) % n]);
        (a - b).cross(b - c).z >= -1e-9
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn new_face_round_trips_its_loop(positions in arb_star(3, 32)) {
        let (topology, points, face) = build(&positions);
        prop_assert_eq!(topology.loop_positions(&points, face).unwrap(), positions);
        prop_assert!(topology.validate_face(face).is_ok());
    }

    #[test]
    fn clone_is_independent_of_source(positions in arb_star(3, 32)) {
        let (mut topology, points, face) = build(&positions);
        let clone = topology.clone_face(face).unwrap();
        topology.discard_face(face).unwrap();
        prop_assert_eq!(topology.loop_positions(&points, clone).unwrap(), positions);
        prop_assert_eq!(topology.vertex_count(), topology.face(clone).unwrap().verts.len());
    }

    #[test]
    fn convex_polygon_triangulates_to_n_minus_two(positions in arb_convex()) {
        let n = positions.len();
        let (mut topology, points, face) = build(&positions);
        let mut faces = vec![face];
        triangulate(&mut topology, &mut faces).unwrap();

        prop_assert_eq!(faces.len(), n - 2);
        let mut total = 0.0;
        for &tri in &faces {
            let corners = topology.loop_positions(&points, tri).unwrap();
            prop_assert_eq!(corners.len(), 3);
            let a = area(&corners);
            prop_assert!(a > 0.0);
            total += a;
        }
        prop_assert!((total - area(&positions)).abs() < 1e-9 * area(&positions).max(1.0));
    }

    #[test]
    fn star_polygon_decomposes_into_convex_pieces(positions in arb_star(4, 16)) {
        let (mut topology, points, face) = build(&positions);
        let mut faces = vec![face];
        convexify(&mut topology, &points, &mut faces, Vec3::Z, 1e-9).unwrap();

        let mut total = 0.0;
        for &piece in &faces {
            let corners = topology.loop_positions(&points, piece).unwrap();
            prop_assert!(is_convex(&corners));
            total += area(&corners);
        }
        prop_assert!((total - area(&positions)).abs() < 1e-9);
    }

    #[test]
    fn comb_decomposes_into_convex_pieces_at_default_tolerance(positions in arb_comb()) {
        let near = Tolerances::default().near();
        let (mut topology, points, face) = build(&positions);
        let mut faces = vec![face];
        convexify(&mut topology, &points, &mut faces, Vec3::Z, near).unwrap();

        let mut total = 0.0;
        for &piece in &faces {
            prop_assert!(topology.validate_face(piece).is_ok());
            let corners = topology.loop_positions(&points, piece).unwrap();
            prop_assert!(corners.len() >= 3);
            prop_assert!(is_convex(&corners));
            let a = area(&corners);
            prop_assert!(a > 0.0);
            total += a;
        }
        let expected = area(&positions);
        prop_assert!((total - expected).abs() < 1e-9 * expected.max(1.0));
    }
}
