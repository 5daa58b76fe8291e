//! Convex decomposition and triangulation of face loops.
//!
//! Every pass works on a `Vec<FaceKey>` owned by the caller: faces split off
//! during a pass are appended to it, faces that collapse are removed from it.
//!
//! ## Pipeline per part
//!
//! ```text
//! outer loop → clone → convexify → optimize  (collision)
//! sliced faces → optimize → clone → convexify → optimize  (sliced collision)
//! collision → clone → triangulate  (tris)
//! ```

use config::Tolerances;
use tracing::{trace, warn};

use crate::core::containment::point_strictly_inside;
use crate::core::predicates::collinear;
use crate::core::vec3::Vec3;
use crate::error::{MeshError, MeshResult};
use crate::halfedge::{FaceFlags, FaceKey, PointPool, Topology, VertKey};
use crate::mesh::{Mesh, MeshPart};

/// Cuts every convex face in `faces` into triangles.
///
/// Ears are taken alternately from the last and second-to-last vertex of the
/// remaining loop so the result is not a single fan. A face of `n` vertices
/// becomes `n - 2` triangles; the new ones are appended to `faces`.
pub fn triangulate(topology: &mut Topology, faces: &mut Vec<FaceKey>) -> MeshResult<()> {
    let initial = faces.len();
    for i in 0..initial {
        let face = faces[i];
        let mut alternate = 0usize;
        loop {
            let verts = topology.loop_verts(face)?;
            if verts.len() <= 3 {
                break;
            }
            let end = verts[verts.len() - 1 - alternate % 2];
            let start = topology.successor(topology.successor(end)?)?;
            let ear = topology.split_face(face, start, end)?;
            let vertices = topology.face(ear)?.verts.len();
            if vertices != 3 {
                return Err(MeshError::BadEar {
                    face: ear,
                    vertices,
                });
            }
            faces.push(ear);
            alternate += 1;
        }
    }
    Ok(())
}

enum Walk {
    Convex,
    Split(FaceKey),
    Fused,
}

/// Decomposes every face in `faces` into convex faces.
///
/// Faces split off are appended and decomposed in turn. Every surviving face
/// is flagged [`FaceFlags::CONVEX`]; faces that collapse below three vertices
/// while repairing spikes are discarded.
pub fn convexify(
    topology: &mut Topology,
    points: &PointPool,
    faces: &mut Vec<FaceKey>,
    normal: Vec3,
    epsilon: f64,
) -> MeshResult<()> {
    let mut i = 0;
    while i < faces.len() {
        let face = faces[i];
        if topology.face(face)?.verts.len() < 3 {
            warn!(?face, "dropping face collapsed during convex decomposition");
            topology.discard_face(face)?;
            faces.remove(i);
            continue;
        }
        match walk_face(topology, points, face, normal, epsilon)? {
            Walk::Convex => {
                topology.mark_face(face, FaceFlags::CONVEX)?;
                i += 1;
            }
            Walk::Split(piece) => {
                trace!(?face, ?piece, "split off convex piece");
                faces.push(piece);
            }
            Walk::Fused => {}
        }
    }
    Ok(())
}

/// One convexity walk around `face`, with a relaxed retry that starts a
/// pending run at the first vertex.
fn walk_face(
    topology: &mut Topology,
    points: &PointPool,
    face: FaceKey,
    normal: Vec3,
    epsilon: f64,
) -> MeshResult<Walk> {
    let verts = topology.loop_verts(face)?;
    let n = verts.len();
    if n < 4 {
        return Ok(Walk::Convex);
    }

    for forget in [false, true] {
        let mut cut_start = verts[0];
        let mut slicing = forget;
        let mut vert = verts[0];
        let mut sanity = 0usize;

        loop {
            let between = topology.successor(vert)?;
            let end = topology.successor(between)?;
            let pv = topology.position(points, vert)?;
            let pb = topology.position(points, between)?;
            let pe = topology.position(points, end)?;
            let e1 = pv - pb;
            let e2 = pb - pe;

            if collinear(pv, pb, pe) && e1.dot(e2) < 0.0 {
                topology.fuse_edges(points, face, vert, epsilon)?;
                return Ok(Walk::Fused);
            }

            let mut concave = e1.cross(e2).dot(normal) < 0.0;
            if slicing && !concave {
                concave = !bridge_is_convex(topology, points, cut_start, end, normal, epsilon)?;
            }

            if concave {
                if slicing && cut_start != vert {
                    let piece = topology.split_face(face, between, cut_start)?;
                    return Ok(Walk::Split(piece));
                }
                slicing = true;
                cut_start = between;
                sanity += 1;
            }

            vert = between;
            let next = if slicing {
                topology.successor(vert)?
            } else {
                vert
            };
            if next == cut_start || sanity > n {
                break;
            }
        }

        if sanity <= n {
            return Ok(Walk::Convex);
        }
        if !forget {
            trace!(?face, "retrying convex walk from a pending run");
        }
    }
    Err(MeshError::ConvexifyDiverged { face, vertices: n })
}

/// Whether closing the run `start ..= end` with the diagonal `end`-`start`
/// gives a convex piece holding no other vertex of the loop.
fn bridge_is_convex(
    topology: &Topology,
    points: &PointPool,
    start: VertKey,
    end: VertKey,
    normal: Vec3,
    epsilon: f64,
) -> MeshResult<bool> {
    let mut piece = Vec::new();
    let mut v = start;
    loop {
        piece.push(topology.position(points, v)?);
        if v == end {
            break;
        }
        v = topology.successor(v)?;
    }
    let count = piece.len();
    if count < 3 {
        return Ok(true);
    }

    let ps = piece[0];
    let pss = piece[1];
    let pb = piece[count - 2];
    let pe = piece[count - 1];
    if (pe - ps).cross(ps - pss).dot(normal) < 0.0 {
        return Ok(false);
    }
    if (pb - pe).cross(pe - ps).dot(normal) < 0.0 {
        return Ok(false);
    }

    let mut v = topology.successor(end)?;
    while v != start {
        let p = topology.position(points, v)?;
        if point_strictly_inside(&piece, normal, p, epsilon) {
            return Ok(false);
        }
        v = topology.successor(v)?;
    }
    Ok(true)
}

/// Fuses away every exactly collinear vertex of the faces in `faces`.
///
/// Faces left with fewer than three vertices are discarded and removed.
pub fn optimize_parallel_edges(
    topology: &mut Topology,
    points: &PointPool,
    faces: &mut Vec<FaceKey>,
    epsilon: f64,
) -> MeshResult<()> {
    let mut i = 0;
    while i < faces.len() {
        let face = faces[i];
        if topology.face(face)?.verts.len() < 3 {
            warn!(?face, "dropping face collapsed by edge fusing");
            topology.discard_face(face)?;
            faces.remove(i);
            continue;
        }
        match find_straight_turn(topology, points, face)? {
            Some(stem) => topology.fuse_edges(points, face, stem, epsilon)?,
            None => i += 1,
        }
    }
    Ok(())
}

fn find_straight_turn(
    topology: &Topology,
    points: &PointPool,
    face: FaceKey,
) -> MeshResult<Option<VertKey>> {
    for vert in topology.loop_verts(face)? {
        let between = topology.successor(vert)?;
        let end = topology.successor(between)?;
        if collinear(
            topology.position(points, vert)?,
            topology.position(points, between)?,
            topology.position(points, end)?,
        ) {
            return Ok(Some(vert));
        }
    }
    Ok(None)
}

impl MeshPart {
    /// Rebuilds the part's convex collision faces from its outer loop.
    pub fn fit_collision(&mut self, points: &PointPool, tolerances: &Tolerances) -> MeshResult<()> {
        self.define_faces(points)?;
        convexify(
            &mut self.topology,
            points,
            &mut self.collision,
            self.normal,
            tolerances.near(),
        )?;
        optimize_parallel_edges(&mut self.topology, points, &mut self.collision, tolerances.near())
    }

    /// Rebuilds the part's triangles.
    ///
    /// A cut part first decomposes its sliced faces into convex pieces; the
    /// triangles are then taken from those pieces instead of the collision
    /// faces.
    pub fn tessellate(&mut self, points: &PointPool, tolerances: &Tolerances) -> MeshResult<()> {
        self.topology.discard_faces(&mut self.tris)?;

        if let Some(sliced) = self.sliced.as_mut() {
            self.topology.discard_faces(&mut sliced.collision)?;
            let near = tolerances.near();
            optimize_parallel_edges(&mut self.topology, points, &mut sliced.faces, near)?;
            for &face in &sliced.faces {
                let clone = self.topology.clone_face(face)?;
                sliced.collision.push(clone);
            }
            convexify(
                &mut self.topology,
                points,
                &mut sliced.collision,
                self.normal,
                tolerances.near(),
            )?;
            optimize_parallel_edges(
                &mut self.topology,
                points,
                &mut sliced.collision,
                tolerances.near(),
            )?;
        }

        let source = match &self.sliced {
            Some(sliced) => &sliced.collision,
            None => &self.collision,
        };
        let mut tris = Vec::with_capacity(source.len());
        for &face in source {
            tris.push(self.topology.clone_face(face)?);
        }
        triangulate(&mut self.topology, &mut tris)?;
        self.tris = tris;
        Ok(())
    }
}

impl Mesh {
    /// Runs [`MeshPart::fit_collision`] on every part.
    pub fn fit_collision(&mut self, tolerances: &Tolerances) -> MeshResult<()> {
        let (points, parts) = self.pool_and_parts();
        for part in parts.iter_mut() {
            part.fit_collision(points, tolerances)?;
        }
        Ok(())
    }

    /// Runs [`MeshPart::tessellate`] on every part.
    pub fn tessellate(&mut self, tolerances: &Tolerances) -> MeshResult<()> {
        let (points, parts) = self.pool_and_parts();
        for part in parts.iter_mut() {
            part.tessellate(points, tolerances)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
