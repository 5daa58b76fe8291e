use approx::assert_relative_eq;

use super::*;
use crate::halfedge::PointKey;

const EPS: f64 = 1e-4;

fn loop_face(topology: &mut Topology, points: &mut PointPool, xy: &[(f64, f64)]) -> FaceKey {
    let keys: Vec<PointKey> = xy
        .iter()
        .map(|&(x, y)| points.insert(Vec3::new(x, y, 0.0)))
        .collect();
    topology.new_face(&keys).unwrap()
}

fn area(topology: &Topology, points: &PointPool, face: FaceKey) -> f64 {
    let p = topology.loop_positions(points, face).unwrap();
    let n = p.len();
    (0..n).map(|i| p[i].cross(p[(i + 1) % n]).z).sum::<f64>() / 2.0
}

fn is_convex(topology: &Topology, points: &PointPool, face: FaceKey) -> bool {
    let p = topology.loop_positions(points, face).unwrap();
    let n = p.len();
    (0..n).all(|i| {
        let (a, b, c) = (p[i], p[(i + 1) % n], p[(i + 2) % n]);
        (a - b).cross(b - c).z >= 0.0
    })
}

#[test]
fn triangulate_hexagon_yields_four_triangles() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let hexagon: Vec<(f64, f64)> = (0..6)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / 6.0;
            (a.cos(), a.sin())
        })
        .collect();
    let face = loop_face(&mut topology, &mut points, &hexagon);
    let total = area(&topology, &points, face);

    let mut faces = vec![face];
    triangulate(&mut topology, &mut faces).unwrap();

    assert_eq!(faces.len(), 4);
    let mut sum = 0.0;
    for &tri in &faces {
        assert_eq!(topology.face(tri).unwrap().verts.len(), 3);
        let a = area(&topology, &points, tri);
        assert!(a > 0.0);
        sum += a;
    }
    assert_relative_eq!(sum, total, epsilon = 1e-12);
}

#[test]
fn triangulate_leaves_triangles_alone() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(&mut topology, &mut points, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let mut faces = vec![face];
    triangulate(&mut topology, &mut faces).unwrap();
    assert_eq!(faces, vec![face]);
}

#[test]
fn convexify_keeps_convex_quad_whole() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(
        &mut topology,
        &mut points,
        &[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)],
    );
    let mut faces = vec![face];
    convexify(&mut topology, &points, &mut faces, Vec3::Z, EPS).unwrap();
    assert_eq!(faces, vec![face]);
    assert!(topology.face(face).unwrap().flags.contains(FaceFlags::CONVEX));
}

#[test]
fn convexify_splits_l_shape_in_two() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(
        &mut topology,
        &mut points,
        &[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)],
    );
    let mut faces = vec![face];
    convexify(&mut topology, &points, &mut faces, Vec3::Z, EPS).unwrap();

    assert_eq!(faces.len(), 2);
    let total: f64 = faces.iter().map(|&f| area(&topology, &points, f)).sum();
    assert_relative_eq!(total, 3.0);
    for &f in &faces {
        assert!(is_convex(&topology, &points, f));
        assert!(topology.face(f).unwrap().flags.contains(FaceFlags::CONVEX));
        topology.validate_face(f).unwrap();
    }
}

#[test]
fn convexify_handles_two_concave_corners() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(
        &mut topology,
        &mut points,
        &[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 2.0),
            (2.0, 2.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ],
    );
    let mut faces = vec![face];
    convexify(&mut topology, &points, &mut faces, Vec3::Z, EPS).unwrap();

    assert!(faces.len() >= 3);
    let total: f64 = faces.iter().map(|&f| area(&topology, &points, f)).sum();
    assert_relative_eq!(total, 5.0, epsilon = 1e-12);
    for &f in &faces {
        assert!(is_convex(&topology, &points, f));
    }
}

#[test]
fn convexify_fuses_folded_spike() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    // The run (2,0) -> (3,0) -> (2,0) folds back on itself.
    let face = loop_face(
        &mut topology,
        &mut points,
        &[(0.0, 0.0), (2.0, 0.0), (3.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)],
    );
    let mut faces = vec![face];
    convexify(&mut topology, &points, &mut faces, Vec3::Z, EPS).unwrap();

    let total: f64 = faces.iter().map(|&f| area(&topology, &points, f)).sum();
    assert_relative_eq!(total, 4.0);
    for &f in &faces {
        assert!(is_convex(&topology, &points, f));
    }
}

#[test]
fn convexify_diverges_against_reversed_normal() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    // Seen from -z every corner of this square turns the wrong way.
    let face = loop_face(
        &mut topology,
        &mut points,
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
    );
    let mut faces = vec![face];
    let err = convexify(&mut topology, &points, &mut faces, Vec3::NEG_Z, EPS).unwrap_err();
    assert_eq!(err, MeshError::ConvexifyDiverged { face, vertices: 4 });
    assert_eq!(faces, vec![face]);
}

#[test]
fn optimize_fuses_collinear_midpoint() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(
        &mut topology,
        &mut points,
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)],
    );
    let mut faces = vec![face];
    optimize_parallel_edges(&mut topology, &points, &mut faces, EPS).unwrap();

    assert_eq!(topology.face(face).unwrap().verts.len(), 4);
    assert_relative_eq!(area(&topology, &points, face), 4.0);
}

#[test]
fn optimize_drops_flat_faces() {
    let mut topology = Topology::new();
    let mut points = PointPool::with_key();
    let face = loop_face(&mut topology, &mut points, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    let mut faces = vec![face];
    optimize_parallel_edges(&mut topology, &points, &mut faces, EPS).unwrap();

    assert!(faces.is_empty());
    assert!(!topology.contains_face(face));
}

#[test]
fn part_pipeline_produces_collision_and_tris() {
    let mut mesh = Mesh::default();
    let part = mesh
        .part_from_positions(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
    let tolerances = Tolerances::default();
    mesh.fit_collision(&tolerances).unwrap();
    mesh.tessellate(&tolerances).unwrap();

    let part = mesh.part(part).unwrap();
    assert_eq!(part.collision.len(), 2);
    assert_eq!(part.tris.len(), 4);
    let total: f64 = part
        .tris
        .iter()
        .map(|&f| area(part.topology(), mesh.points(), f))
        .sum();
    assert_relative_eq!(total, 3.0);
}
