//! Cutting coincident, opposite-facing parts of different meshes.
//!
//! Two rooms pushed against each other share a wall: one part of each lies
//! in the same plane, facing the other. Each such part of a neighbouring
//! mesh acts as a *slicer* on the local part and carves its footprint out.
//!
//! ## Classification
//!
//! Every face left to cut is tallied against each slicer:
//!
//! - **engulfed**: no face point lies outside the slicer, the face is dropped
//! - **disjoint**: neither polygon reaches into the other and their
//!   boundaries never meet, nothing happens
//! - **enclosed**: the slicer lies wholly inside the face and no face point
//!   reaches into it, it is deferred and, once only enclosed slicers remain,
//!   cracked in as a hole
//! - **overlapping**: anything else, the face is snipped along the slicer
//!
//! Slicer data is captured up front into a [`CutterSnapshot`] so the cut
//! never reads another mesh while mutating this one.

mod crack;
mod seam;
mod snip;

use config::Tolerances;
use tracing::{debug, trace};

use crate::core::aabb::Aabb;
use crate::core::containment::{tally_points, ConvexLoop};
use crate::core::segment::{intersect_segments, Segment};
use crate::core::vec3::Vec3;
use crate::error::MeshResult;
use crate::halfedge::{position, EdgeFlags, FaceFlags, FaceKey, PointKey, PointPool, Topology};
use crate::mesh::{CuttableMesh, Mesh, MeshPart, SlicedFaces};
use crate::tessellate::convexify;

use crack::crack;
use snip::{snip, CutFrame};

/// World-space copy of one part of a cutting mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicerPart {
    /// Unit normal of the part.
    pub normal: Vec3,
    /// Outer loop positions.
    pub points: Vec<Vec3>,
    /// Convex decomposition of the outer loop.
    pub collision: Vec<ConvexLoop>,
}

impl SlicerPart {
    /// Captures a part whose collision faces are up to date.
    pub fn capture(part: &MeshPart, points: &PointPool, origin: Vec3) -> MeshResult<Self> {
        let topology = part.topology();
        let loop_points = topology
            .loop_positions(points, part.face())?
            .into_iter()
            .map(|p| p + origin)
            .collect();
        let collision = part
            .collision
            .iter()
            .map(|&face| convex_loop(topology, points, face, part.normal, origin))
            .collect::<MeshResult<_>>()?;
        Ok(Self {
            normal: part.normal,
            points: loop_points,
            collision,
        })
    }
}

/// World-space copy of a whole cutting mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CutterSnapshot {
    /// Origin of the captured mesh.
    pub origin: Vec3,
    /// World bounds of the captured mesh.
    pub bounds: Option<Aabb>,
    /// One entry per part.
    pub parts: Vec<SlicerPart>,
}

impl CutterSnapshot {
    /// Captures every part of `mesh`.
    ///
    /// # Examples
    /// ```
    /// use config::Tolerances;
    /// use smaug_mesh::{cube_room, CutterSnapshot};
    /// let mut room = cube_room(1.0).unwrap();
    /// room.fit_collision(&Tolerances::default()).unwrap();
    /// let snapshot = CutterSnapshot::capture(&room).unwrap();
    /// assert_eq!(snapshot.parts.len(), 6);
    /// ```
    pub fn capture(mesh: &Mesh) -> MeshResult<Self> {
        let parts = mesh
            .parts()
            .iter()
            .map(|part| SlicerPart::capture(part, mesh.points(), mesh.origin))
            .collect::<MeshResult<_>>()?;
        Ok(Self {
            origin: mesh.origin,
            bounds: mesh.world_aabb(),
            parts,
        })
    }
}

fn convex_loop(
    topology: &Topology,
    points: &PointPool,
    face: FaceKey,
    normal: Vec3,
    origin: Vec3,
) -> MeshResult<ConvexLoop> {
    let verts = topology.loop_verts(face)?;
    let mut loop_points = Vec::with_capacity(verts.len());
    let mut outer = Vec::with_capacity(verts.len());
    for v in verts {
        loop_points.push(topology.position(points, v)? + origin);
        outer.push(
            topology
                .edge(topology.out_edge(v)?)?
                .flags
                .contains(EdgeFlags::OUTER),
        );
    }
    Ok(ConvexLoop {
        points: loop_points,
        outer,
        normal,
    })
}

/// Convex pieces of a (possibly concave) face, as world-space loops.
fn face_loops(
    topology: &mut Topology,
    points: &PointPool,
    face: FaceKey,
    frame: &CutFrame<'_>,
) -> MeshResult<Vec<ConvexLoop>> {
    let mut pieces = vec![topology.clone_face(face)?];
    convexify(
        topology,
        points,
        &mut pieces,
        frame.normal,
        frame.tolerances.near(),
    )?;
    let loops = pieces
        .iter()
        .map(|&piece| convex_loop(topology, points, piece, frame.normal, frame.origin))
        .collect::<MeshResult<Vec<_>>>();
    topology.discard_faces(&mut pieces)?;
    loops
}

fn loop_edges(points: &[Vec3]) -> impl Iterator<Item = Segment> + '_ {
    let n = points.len();
    (0..n).map(move |i| Segment::new(points[i], points[(i + 1) % n]))
}

/// Whether any edge of loop `a` touches any edge of loop `b`.
fn boundaries_cross(a: &[Vec3], b: &[Vec3], epsilon: f64) -> bool {
    loop_edges(a).any(|ea| loop_edges(b).any(|eb| intersect_segments(&ea, &eb, epsilon).is_some()))
}

/// Recomputes the cuts of every part of `mesh` against `cutters`.
///
/// Cut positions from the previous pass are released first. A part gets a
/// sliced bundle only when some slicer actually changed it; a part cut away
/// entirely gets an empty one.
pub fn apply_cuts(
    mesh: &mut CuttableMesh,
    cutters: &[CutterSnapshot],
    tolerances: &Tolerances,
) -> MeshResult<()> {
    mesh.release_cut_points();
    let origin = mesh.origin;
    let mut adopted = Vec::new();
    {
        let (points, parts) = mesh.pool_and_parts();
        for (index, part) in parts.iter_mut().enumerate() {
            part.discard_sliced()?;
            let slicers = candidates(part, points, origin, cutters, tolerances)?;
            if slicers.is_empty() {
                continue;
            }
            trace!(part = index, slicers = slicers.len(), "cutting part");
            let frame = CutFrame {
                normal: part.normal,
                origin,
                tolerances,
            };
            if let Some(sliced) = cut_part(part, points, &slicers, &frame)? {
                debug!(part = index, faces = sliced.faces.len(), "part cut");
                adopted.extend_from_slice(&sliced.cut_points);
                part.sliced = Some(sliced);
            }
        }
    }
    mesh.adopt_cut_points(&adopted);
    Ok(())
}

/// Slicer parts coplanar with `part` and facing it.
fn candidates<'a>(
    part: &MeshPart,
    points: &PointPool,
    origin: Vec3,
    cutters: &'a [CutterSnapshot],
    tolerances: &Tolerances,
) -> MeshResult<Vec<&'a SlicerPart>> {
    if part.normal == Vec3::ZERO {
        return Ok(Vec::new());
    }
    let Some(first) = part.loop_points()?.into_iter().next() else {
        return Ok(Vec::new());
    };
    let anchor = position(points, first)? + origin;
    Ok(cutters
        .iter()
        .flat_map(|cutter| cutter.parts.iter())
        .filter(|slicer| slicer.points.len() >= 3 && !slicer.collision.is_empty())
        .filter(|slicer| part.normal.dot(slicer.normal) < -1.0 + tolerances.near())
        .filter(|slicer| (anchor - slicer.points[0]).dot(part.normal).abs() < tolerances.coplanar())
        .collect())
}

fn cut_part(
    part: &mut MeshPart,
    points: &mut PointPool,
    slicers: &[&SlicerPart],
    frame: &CutFrame<'_>,
) -> MeshResult<Option<SlicedFaces>> {
    let eps = frame.tolerances.on_edge();
    let outer = part.face();
    let topology = &mut part.topology;
    let start = topology.clone_face(outer)?;
    topology.unmark_face(start, FaceFlags::MESH_PART)?;

    let mut cut_points: Vec<PointKey> = Vec::new();
    let mut touched = false;
    let mut done = Vec::new();
    let mut queue = vec![(start, (0..slicers.len()).collect::<Vec<usize>>())];

    'faces: while let Some((face, mut pending)) = queue.pop() {
        let mut stale = true;
        let mut loops = Vec::new();
        while !pending.is_empty() {
            if stale {
                loops = face_loops(topology, points, face, frame)?;
                stale = false;
            }
            let face_points: Vec<Vec3> = topology
                .loop_positions(points, face)?
                .into_iter()
                .map(|p| p + frame.origin)
                .collect();
            let n = face_points.len();

            let mut deferred = Vec::new();
            let mut snipped = false;
            let mut i = 0;
            while i < pending.len() {
                let slicer = slicers[pending[i]];
                let m = slicer.points.len();
                let face_in_slicer = tally_points(&face_points, &slicer.collision, eps);
                let slicer_in_face = tally_points(&slicer.points, &loops, eps);

                if face_in_slicer.outside == 0 && face_in_slicer.inside + face_in_slicer.on_edge == n {
                    trace!(?face, "face engulfed by slicer");
                    topology.discard_face(face)?;
                    touched = true;
                    continue 'faces;
                }
                if face_in_slicer.outside == n
                    && slicer_in_face.outside == m
                    && !boundaries_cross(&face_points, &slicer.points, frame.tolerances.line())
                {
                    i += 1;
                    continue;
                }
                let enclosed = slicer_in_face.inside == m
                    && face_in_slicer.inside == 0
                    && face_in_slicer.on_edge == 0;
                if enclosed {
                    deferred.push(pending[i]);
                    i += 1;
                    continue;
                }

                let before = cut_points.len();
                let pieces = snip(topology, points, face, &slicer.points, frame, &mut cut_points)?;
                touched |= cut_points.len() > before;
                let rest: Vec<usize> = deferred.iter().chain(&pending[i + 1..]).copied().collect();
                for &piece in pieces.iter().filter(|&&p| p != face) {
                    queue.push((piece, rest.clone()));
                }
                if !pieces.contains(&face) {
                    continue 'faces;
                }
                pending = rest;
                stale = true;
                snipped = true;
                break;
            }
            if snipped {
                continue;
            }

            pending = deferred;
            if let Some(last) = pending.pop() {
                let before = cut_points.len();
                crack(
                    topology,
                    points,
                    face,
                    &slicers[last].points,
                    frame.origin,
                    &mut cut_points,
                )?;
                touched |= cut_points.len() > before;
                stale = true;
            }
        }
        done.push(face);
    }

    if !touched {
        topology.discard_faces(&mut done)?;
        return Ok(None);
    }

    for &face in &done {
        topology.mark_face(face, FaceFlags::CUT)?;
        let edges = topology.face(face)?.edges.clone();
        for e in edges {
            topology.edge_mut(e)?.flags.remove(EdgeFlags::SLICED);
        }
    }
    topology.clear_dangling_pairs(&done)?;
    Ok(Some(SlicedFaces {
        faces: done,
        collision: Vec::new(),
        cut_points,
    }))
}
