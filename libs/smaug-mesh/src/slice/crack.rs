//! Opening a hole in a face with a slicer lying wholly inside it.

use tracing::{debug, warn};

use super::seam::SEAM;
use crate::core::vec3::Vec3;
use crate::error::MeshResult;
use crate::halfedge::{EdgeFlags, FaceKey, HalfEdge, PointKey, PointPool, Topology};

/// Cracks `face` open along the slicer loop `cutter` (world space).
///
/// The face vertex nearest to any slicer point is joined to that point by a
/// paired slit, and the slicer loop is spliced in between the two slit
/// halves. The face becomes a single keyhole loop with `m + 2` more
/// vertices, `m` being the slicer's point count. New positions are added to
/// `points` and recorded in `cut_points`.
pub(crate) fn crack(
    topology: &mut Topology,
    points: &mut PointPool,
    face: FaceKey,
    cutter: &[Vec3],
    origin: Vec3,
    cut_points: &mut Vec<PointKey>,
) -> MeshResult<()> {
    let m = cutter.len();
    let mut nearest = None;
    let mut best = f64::INFINITY;
    for &v in &topology.face(face)?.verts {
        if topology.edge(topology.out_edge(v)?)?.pair.is_some() {
            continue;
        }
        let p = topology.position(points, v)? + origin;
        for (k, &c) in cutter.iter().enumerate() {
            let d = p.distance_squared(c);
            if d < best {
                best = d;
                nearest = Some((v, k));
            }
        }
    }
    let Some((v1, k)) = nearest else {
        warn!(?face, "no free vertex to crack from, slicer ignored");
        return Ok(());
    };

    let keys: Vec<PointKey> = cutter.iter().map(|&c| points.insert(c - origin)).collect();
    cut_points.extend_from_slice(&keys);

    let pre = topology.edge_into(v1)?;
    let old_out = topology.out_edge(v1)?;
    let v1_point = topology.point(v1)?;

    // v1 -> c_k, around the slicer back to c_k, then c_k -> v1.
    let crack_in = topology.add_edge(Topology::detached_edge(face, SEAM))?;
    let mut chain = Vec::with_capacity(m);
    for _ in 0..m {
        chain.push(topology.add_edge(Topology::detached_edge(face, EdgeFlags::OUTER))?);
    }
    let crack_out = topology.add_edge(Topology::detached_edge(face, SEAM))?;

    let mut ring = Vec::with_capacity(m + 1);
    for i in 0..=m {
        let point = keys[(k + i) % m];
        let edge = if i < m { chain[i] } else { crack_out };
        ring.push(topology.add_vertex(face, point, edge)?);
    }
    let v1_out = topology.add_vertex(face, v1_point, old_out)?;

    *topology.edge_mut(crack_in)? = HalfEdge {
        head: ring[0],
        next: chain[0],
        pair: Some(crack_out),
        face,
        flags: SEAM,
    };
    for i in 0..m {
        let next = if i + 1 < m { chain[i + 1] } else { crack_out };
        let e = topology.edge_mut(chain[i])?;
        e.head = ring[i + 1];
        e.next = next;
    }
    *topology.edge_mut(crack_out)? = HalfEdge {
        head: v1_out,
        next: old_out,
        pair: Some(crack_in),
        face,
        flags: SEAM,
    };
    topology.edge_mut(pre)?.next = crack_in;
    topology.vertex_mut(v1)?.edge = crack_in;

    debug!(?face, slicer_points = m, "cracked face open");
    topology.validate_face(face)
}
