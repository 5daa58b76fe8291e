//! Carving a face along a slicer loop that crosses its boundary.

use config::Tolerances;
use tracing::{debug, trace};

use super::seam::EdgeSplit;
use crate::core::predicates::parallel;
use crate::core::segment::{intersect_segments, Segment};
use crate::core::vec3::Vec3;
use crate::error::{MeshError, MeshResult};
use crate::halfedge::{EdgeFlags, EdgeKey, FaceKey, PointKey, PointPool, Topology};

/// Frame shared by every step of one cut.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CutFrame<'a> {
    /// Unit normal of the part being cut.
    pub normal: Vec3,
    /// World origin of the mesh being cut.
    pub origin: Vec3,
    pub tolerances: &'a Tolerances,
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    /// Parameter along the slicer edge.
    t: f64,
    edge: EdgeKey,
    /// World position on the part edge.
    point: Vec3,
    entering: bool,
}

/// Part edges lying along a slicer edge, as world endpoints.
type SharedLines = Vec<(Vec3, Vec3)>;

/// Cuts `face` along the slicer loop `cutter` (world space).
///
/// Walks the slicer edges, splitting the face boundary where the slicer
/// enters and leaves it and dragging a seam through the interior in between.
/// Every closed seam splits off the loop lying inside the slicer; those
/// loops are culled at the end. Returns the surviving faces, `face` first
/// when it survives.
pub(crate) fn snip(
    topology: &mut Topology,
    points: &mut PointPool,
    face: FaceKey,
    cutter: &[Vec3],
    frame: &CutFrame<'_>,
    cut_points: &mut Vec<PointKey>,
) -> MeshResult<Vec<FaceKey>> {
    let m = cutter.len();
    let step_limit = m * (m + 2);
    let mut faces = vec![face];
    let mut seams: Vec<EdgeKey> = Vec::new();
    let mut seam_points: Vec<Vec3> = Vec::new();
    let mut drag: Option<EdgeSplit> = None;
    let mut cv = 0;
    let mut cv_start = 0;
    let mut rollovers = 0;
    let mut steps = 0;
    let mut dragged = 0;

    let mut new_point = |points: &mut PointPool, world: Vec3| {
        let key = points.insert(world - frame.origin);
        cut_points.push(key);
        key
    };

    loop {
        steps += 1;
        if steps > step_limit {
            return Err(MeshError::SliceDiverged {
                rollovers,
                limit: step_limit,
            });
        }
        let edge = Segment::new(cutter[cv], cutter[(cv + 1) % m]);
        let (hits, shared) = gather_hits(topology, points, &faces, &edge, frame)?;

        let mut invalidate = false;
        let mut rolled = false;
        for hit in hits {
            let tol = frame.tolerances;
            if seam_points.iter().any(|p| p.distance(hit.point) < tol.endpoint()) {
                continue;
            }
            let on_shared_end = shared.iter().any(|&(a, b)| {
                a.distance(hit.point) < tol.endpoint() || b.distance(hit.point) < tol.endpoint()
            });
            if on_shared_end {
                invalidate = hit.entering;
                continue;
            }

            match (hit.entering, drag) {
                (true, Some(_)) => {
                    trace!(t = hit.t, "re-entry while cutting ignored");
                }
                (true, None) => {
                    let key = new_point(points, hit.point);
                    drag = Some(topology.split_edge(hit.edge, key)?);
                    seam_points.push(hit.point);
                    dragged = 0;
                }
                (false, Some(from)) => {
                    let key = new_point(points, hit.point);
                    let target = topology.split_edge(hit.edge, key)?;
                    let (to_tip, to_target) = topology.drag_edge_into(from, target)?;
                    seams.extend([to_tip, to_target]);
                    seam_points.push(hit.point);
                    drag = None;
                    faces.push(close_seam(topology, target)?);
                }
                (false, None) => {
                    if !invalidate {
                        rolled = true;
                        break;
                    }
                    invalidate = false;
                }
            }
        }

        if rolled {
            rollovers += 1;
            if rollovers > m {
                return Err(MeshError::SliceDiverged {
                    rollovers,
                    limit: m,
                });
            }
            cv = (cv + 1) % m;
            cv_start = cv;
            trace!(cv, "slicer walk started inside the face, rolling over");
            continue;
        }

        if let Some(from) = drag {
            // An exit lies at most one full lap of the slicer past the entry.
            dragged += 1;
            if dragged > m {
                return Err(MeshError::SeamLeftOpen);
            }
            let key = new_point(points, edge.end());
            let tip = topology.drag_edge(from, key)?;
            seams.extend([tip.into, tip.out_of]);
            drag = Some(tip);
        }

        cv = (cv + 1) % m;
        if cv == cv_start && drag.is_none() {
            break;
        }
    }

    let mut survivors = Vec::with_capacity(faces.len());
    if faces.len() > 1 {
        for &f in &faces {
            topology.validate_face(f)?;
        }
        for &f in &faces {
            if topology.face(f)?.cull_depth < 0 {
                topology.unlink_pairs(f)?;
                topology.discard_face(f)?;
            } else {
                survivors.push(f);
            }
        }
        topology.clear_dangling_pairs(&survivors)?;
        debug!(?face, pieces = faces.len(), kept = survivors.len(), "snipped face");
    } else {
        survivors.push(face);
    }

    for e in seams {
        if topology.contains_edge(e) {
            topology.edge_mut(e)?.flags.remove(EdgeFlags::SLICED);
        }
    }
    Ok(survivors)
}

/// Moves the loop through `target.into` into a new face marked for culling.
fn close_seam(topology: &mut Topology, target: EdgeSplit) -> MeshResult<FaceKey> {
    let owner = topology.edge(target.out_of)?.face;
    let flags = topology.face(owner)?.flags;
    topology.face_mut(owner)?.cull_depth = 0;
    let piece = topology.insert_face(flags);
    topology.face_mut(piece)?.cull_depth = -1;

    let mut e = target.into;
    loop {
        let edge = topology.edge_mut(e)?;
        edge.face = piece;
        e = edge.next;
        if e == target.into {
            break;
        }
    }
    topology.settle_edge_custody(owner, piece)?;
    topology.settle_vert_custody(owner, piece)?;
    Ok(piece)
}

/// Crossings of one slicer edge with the unsliced boundary edges of
/// `faces`, sorted along the slicer edge.
fn gather_hits(
    topology: &Topology,
    points: &PointPool,
    faces: &[FaceKey],
    cutter: &Segment,
    frame: &CutFrame<'_>,
) -> MeshResult<(Vec<Hit>, SharedLines)> {
    let tol = frame.tolerances;
    let mut hits = Vec::new();
    let mut shared = SharedLines::new();

    for &face in faces {
        for v in topology.loop_verts(face)? {
            let e = topology.out_edge(v)?;
            if topology.edge(e)?.is_sliced() {
                continue;
            }
            let a = topology.position(points, v)? + frame.origin;
            let b = topology.position(points, topology.successor(v)?)? + frame.origin;
            let part = Segment::new(a, b);

            if parallel(part.delta, cutter.delta) {
                let length = cutter.delta.length();
                let offset = cutter.delta.cross(part.stem - cutter.stem).length();
                if length > 0.0 && offset < tol.shared_line() * length {
                    let span = part.delta.length_squared();
                    if span > 0.0 {
                        let s0 = (cutter.stem - part.stem).dot(part.delta) / span;
                        let s1 = (cutter.end() - part.stem).dot(part.delta) / span;
                        if s0.max(s1) > 0.0 && s0.min(s1) < 1.0 {
                            shared.push((a, b));
                        }
                    }
                }
                continue;
            }

            let Some(hit) = intersect_segments(cutter, &part, tol.line()) else {
                continue;
            };
            let entering = part.delta.cross(cutter.delta).dot(frame.normal) >= 0.0;
            if entering && hit.t_first > 1.0 - tol.near() {
                continue;
            }
            if !entering && hit.t_first < tol.near() {
                continue;
            }
            // A crossing through a part vertex belongs to the edge leaving it.
            if hit.t_second > 1.0 - tol.near() {
                continue;
            }
            hits.push(Hit {
                t: hit.t_first,
                edge: e,
                point: part.at(hit.t_second),
                entering,
            });
        }
    }
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    Ok((hits, shared))
}
