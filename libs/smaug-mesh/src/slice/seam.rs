//! Half-edge surgery for carving seams through a face.
//!
//! A seam is built from an entry point on the loop, a chain of dragged
//! points inside the face, and an exit point back on the loop. Until the
//! exit is joined the chain is a zero-width slit: every dragged point has a
//! twin vertex on the way back out.

use crate::error::{MeshError, MeshResult};
use crate::halfedge::{EdgeFlags, EdgeKey, PointKey, Topology, VertKey};

/// A vertex on a loop together with the half-edges around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeSplit {
    /// Half-edge arriving at `vert`.
    pub into: EdgeKey,
    /// The vertex.
    pub vert: VertKey,
    /// Half-edge leaving `vert`.
    pub out_of: EdgeKey,
}

pub(crate) const SEAM: EdgeFlags = EdgeFlags::OUTER.union(EdgeFlags::SLICED);

impl Topology {
    /// Inserts a vertex at `point` part-way along `edge`.
    ///
    /// The second half copies the flags, pair and forward link of `edge`.
    pub(crate) fn split_edge(&mut self, edge: EdgeKey, point: PointKey) -> MeshResult<EdgeSplit> {
        let old = *self.edge(edge)?;
        let out_of = self.add_edge(old)?;
        let vert = self.add_vertex(old.face, point, out_of)?;
        let e = self.edge_mut(edge)?;
        e.head = vert;
        e.next = out_of;
        Ok(EdgeSplit {
            into: edge,
            vert,
            out_of,
        })
    }

    /// Extends a slit from `drag.vert` to a new vertex at `point`.
    ///
    /// Returns the new slit tip.
    pub(crate) fn drag_edge(&mut self, drag: EdgeSplit, point: PointKey) -> MeshResult<EdgeSplit> {
        let face = self.edge(drag.into)?.face;
        let twin_point = self.point(drag.vert)?;

        let out = self.add_edge(Topology::detached_edge(face, SEAM))?;
        let back = self.add_edge(Topology::detached_edge(face, SEAM))?;
        let tip = self.add_vertex(face, point, back)?;
        let twin = self.add_vertex(face, twin_point, drag.out_of)?;

        let e = self.edge_mut(out)?;
        e.head = tip;
        e.next = back;
        e.pair = Some(back);
        let e = self.edge_mut(back)?;
        e.head = twin;
        e.next = drag.out_of;
        e.pair = Some(out);

        self.vertex_mut(drag.vert)?.edge = out;
        self.edge_mut(drag.into)?.next = out;
        Ok(EdgeSplit {
            into: out,
            vert: tip,
            out_of: back,
        })
    }

    /// Joins the slit tip `drag` to the loop vertex `target`, closing the
    /// seam and leaving two loops in the face.
    ///
    /// The loop through `target.into` runs back along the seam; the loop
    /// through `target.out_of` runs forward along it. Returns the seam
    /// half-edges `(target -> tip, tip -> target)`.
    pub(crate) fn drag_edge_into(
        &mut self,
        drag: EdgeSplit,
        target: EdgeSplit,
    ) -> MeshResult<(EdgeKey, EdgeKey)> {
        let face = self.edge(drag.into)?.face;
        let target_point = self.point(target.vert)?;
        let tip_point = self.point(drag.vert)?;

        let to_tip = self.add_edge(Topology::detached_edge(face, SEAM))?;
        let to_target = self.add_edge(Topology::detached_edge(face, SEAM))?;
        let target_twin = self.add_vertex(face, target_point, target.out_of)?;
        let tip_twin = self.add_vertex(face, tip_point, to_target)?;

        let e = self.edge_mut(to_tip)?;
        e.head = drag.vert;
        e.next = drag.out_of;
        e.pair = Some(to_target);
        let e = self.edge_mut(to_target)?;
        e.head = target_twin;
        e.next = target.out_of;
        e.pair = Some(to_tip);

        self.edge_mut(target.into)?.next = to_tip;
        self.vertex_mut(target.vert)?.edge = to_tip;
        let e = self.edge_mut(drag.into)?;
        e.next = to_target;
        e.head = tip_twin;
        Ok((to_tip, to_target))
    }

    /// Half-edge whose head is `vert`.
    pub(crate) fn edge_into(&self, vert: VertKey) -> MeshResult<EdgeKey> {
        let face = self.edge(self.out_edge(vert)?)?.face;
        for &e in &self.face(face)?.edges {
            if self.edge(e)?.head == vert {
                return Ok(e);
            }
        }
        Err(MeshError::InvalidVertex(vert))
    }
}
