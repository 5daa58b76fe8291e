//! Editing helpers that grow a mesh part by part.

use std::f64::consts::TAU;

use super::Mesh;
use crate::core::vec3::Vec3;
use crate::error::{MeshError, MeshResult};
use crate::halfedge::{PointKey, VertKey};

/// A boundary edge of a part, named by the vertex it leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stem {
    /// Index of the owning part.
    pub part: usize,
    /// Vertex the edge leaves.
    pub vert: VertKey,
}

impl Mesh {
    /// Adds a part from fresh positions.
    pub fn part_from_positions(&mut self, positions: &[Vec3]) -> MeshResult<usize> {
        let keys = self.add_points(positions);
        self.add_part(&keys)
    }

    /// Adds a regular polygon lying in the local xz plane, centred on `offset`.
    pub fn part_from_polygon(&mut self, sides: usize, offset: Vec3) -> MeshResult<usize> {
        if sides < 3 {
            return Err(MeshError::DegenerateLoop { points: sides });
        }
        let positions: Vec<Vec3> = (0..sides)
            .map(|i| {
                let angle = TAU * i as f64 / sides as f64;
                Vec3::new(-angle.cos(), 0.0, angle.sin()) + offset
            })
            .collect();
        self.part_from_positions(&positions)
    }

    /// Boundary edges of a part in winding order.
    pub fn stems(&self, part: usize) -> MeshResult<Vec<Stem>> {
        Ok(self
            .part(part)?
            .loop_verts()?
            .into_iter()
            .map(|vert| Stem { part, vert })
            .collect())
    }

    /// Start and end point handles of the edge a stem names.
    pub fn stem_points(&self, stem: Stem) -> MeshResult<(PointKey, PointKey)> {
        let topology = self.part(stem.part)?.topology();
        let start = topology.point(stem.vert)?;
        let end = topology.point(topology.successor(stem.vert)?)?;
        Ok((start, end))
    }

    /// Adds a quad spanning the stem's edge and a copy of it moved by `offset`.
    pub fn pull_quad_from_edge(&mut self, stem: Stem, offset: Vec3) -> MeshResult<usize> {
        let (a, b) = self.stem_points(stem)?;
        let moved = [self.position(a)? + offset, self.position(b)? + offset];
        let keys = self.add_points(&moved);
        self.add_part(&[keys[0], keys[1], b, a])
    }

    /// Extrudes a chain of stems by `offset`, one quad per stem.
    ///
    /// Consecutive quads share their moved positions. Returns the stems of
    /// the moved edges, ready for a further extrusion or an end cap.
    pub fn extrude_edges(&mut self, stems: &[Stem], offset: Vec3) -> MeshResult<Vec<Stem>> {
        if stems.is_empty() {
            return Ok(Vec::new());
        }
        let mut chain = Vec::with_capacity(stems.len() + 1);
        for &stem in stems {
            chain.push(self.stem_points(stem)?);
        }
        let moved: Vec<Vec3> = chain
            .iter()
            .map(|&(start, _)| self.position(start).map(|p| p + offset))
            .chain(std::iter::once(
                self.position(chain[chain.len() - 1].1).map(|p| p + offset),
            ))
            .collect::<MeshResult<_>>()?;
        let keys = self.add_points(&moved);

        let mut extruded = Vec::with_capacity(stems.len());
        for (i, &(start, end)) in chain.iter().enumerate() {
            let part = self.add_part(&[keys[i], keys[i + 1], end, start])?;
            let verts = self.part(part)?.loop_verts()?;
            extruded.push(Stem {
                part,
                vert: verts[0],
            });
        }
        Ok(extruded)
    }

    /// Closes a chain of stems with a part wound against them.
    pub fn endcap_edges(&mut self, stems: &[Stem]) -> MeshResult<usize> {
        let mut points = Vec::with_capacity(stems.len());
        for &stem in stems.iter().rev() {
            points.push(self.stem_points(stem)?.0);
        }
        self.add_part(&points)
    }

    /// Reverses the winding of a part's loop in place.
    ///
    /// Vertex and half-edge handles survive; each half-edge is re-aimed at
    /// the vertex it used to leave.
    pub fn invert_part_normal(&mut self, part: usize) -> MeshResult<()> {
        let part = self.part_mut(part)?;
        let face = part.face();
        let topology = part.topology_mut();
        let verts = topology.loop_verts(face)?;
        let edges = verts
            .iter()
            .map(|&v| topology.out_edge(v))
            .collect::<MeshResult<Vec<_>>>()?;
        let n = verts.len();
        for i in 0..n {
            let edge = topology.edge_mut(edges[i])?;
            edge.head = verts[i];
            edge.next = edges[(i + n - 1) % n];
            topology.vertex_mut(verts[(i + 1) % n])?.edge = edges[i];
        }
        part.normal = -part.normal;
        Ok(())
    }

    /// Point handles of a part's loop.
    pub fn part_points(&self, part: usize) -> MeshResult<Vec<PointKey>> {
        self.part(part)?.loop_points()
    }
}
