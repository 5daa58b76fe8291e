//! Tests for standalone node behavior.

use super::*;
use smaug_mesh::primitives::cube::{cube_room, TOP};

fn room_at(origin: Vec3) -> Node {
    let mut mesh = cube_room(1.0).unwrap();
    mesh.origin = origin;
    Node::new(mesh, &Tolerances::default()).unwrap()
}

#[test]
fn test_new_node_renders_uncut() {
    let node = room_at(Vec3::ZERO);
    assert_eq!(node.id(), NodeId::INVALID);
    assert_eq!(node.buffers().vertex_count(), 8);
    assert_eq!(node.buffers().triangle_count(), 12);
    assert!(node.cutting().is_empty());
    assert!(node.cut_by().is_empty());
}

#[test]
fn test_rebuild_against_neighbour() {
    let tolerances = Tolerances::default();
    let mut lower = room_at(Vec3::ZERO);
    let upper = room_at(Vec3::new(0.0, 2.0, 0.0));
    let snapshot = CutterSnapshot::capture(upper.mesh()).unwrap();

    lower.rebuild(&[snapshot], &tolerances).unwrap();

    assert!(lower.mesh().part(TOP).unwrap().is_fully_cut_away());
    assert_eq!(lower.buffers().triangle_count(), 10);
}

#[test]
fn test_rebuild_without_cutters_restores_part() {
    let tolerances = Tolerances::default();
    let mut lower = room_at(Vec3::ZERO);
    let upper = room_at(Vec3::new(0.0, 2.0, 0.0));
    lower
        .rebuild(&[CutterSnapshot::capture(upper.mesh()).unwrap()], &tolerances)
        .unwrap();

    lower.rebuild(&[], &tolerances).unwrap();

    assert!(lower.mesh().part(TOP).unwrap().sliced.is_none());
    assert_eq!(lower.buffers().triangle_count(), 12);
    assert!(lower.mesh().cut_points().is_empty());
}

#[test]
fn test_world_aabb_follows_origin() {
    let node = room_at(Vec3::new(4.0, 0.0, 0.0));
    let bounds = node.world_aabb().unwrap();
    assert_eq!(bounds.min, Vec3::new(3.0, -1.0, -1.0));
    assert_eq!(bounds.max, Vec3::new(5.0, 1.0, 1.0));
}

#[test]
fn test_node_id_display_and_validity() {
    assert_eq!(NodeId(12).to_string(), "12");
    assert!(NodeId(1).is_valid());
    assert!(!NodeId::INVALID.is_valid());
}
