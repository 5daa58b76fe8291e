//! In-place loop surgery: custody settling, face splits and edge fusing.

use tracing::debug;

use super::{EdgeFlags, EdgeKey, FaceKey, HalfEdge, PointPool, Topology, VertKey};
use crate::error::{MeshError, MeshResult};

impl Topology {
    /// Moves every half-edge of `face` whose `face` field names `new_face`
    /// over to `new_face`, with swap-to-back removal.
    pub fn settle_edge_custody(&mut self, face: FaceKey, new_face: FaceKey) -> MeshResult<()> {
        let mut i = 0;
        while i < self.face(face)?.edges.len() {
            let e = self.face(face)?.edges[i];
            let owner = self.edge(e)?.face;
            if owner == new_face {
                self.face_mut(face)?.edges.swap_remove(i);
                self.face_mut(new_face)?.edges.push(e);
            } else if owner == face {
                i += 1;
            } else {
                return Err(MeshError::CustodyViolation { face });
            }
        }
        Ok(())
    }

    /// Moves every vertex of `face` whose out-edge belongs to `new_face`
    /// over to `new_face`, with swap-to-back removal.
    pub fn settle_vert_custody(&mut self, face: FaceKey, new_face: FaceKey) -> MeshResult<()> {
        let mut i = 0;
        while i < self.face(face)?.verts.len() {
            let v = self.face(face)?.verts[i];
            let owner = self.edge(self.out_edge(v)?)?.face;
            if owner == new_face {
                self.face_mut(face)?.verts.swap_remove(i);
                self.face_mut(new_face)?.verts.push(v);
            } else if owner == face {
                i += 1;
            } else {
                return Err(MeshError::CustodyViolation { face });
            }
        }
        Ok(())
    }

    /// Splits `face` along the diagonal `start`-`end`.
    ///
    /// The returned face holds the loop `end .. start`; `face` keeps
    /// `start .. end`. Both diagonal half-edges are paired to each other and
    /// carry no flags, while the boundary edges they replace keep theirs.
    pub fn split_face(&mut self, face: FaceKey, start: VertKey, end: VertKey) -> MeshResult<FaceKey> {
        let vertices = self.face(face)?.verts.len();
        let mut arc = 1;
        let mut v = end;
        while v != start {
            v = self.successor(v)?;
            arc += 1;
            if arc > vertices {
                return Err(MeshError::LoopMismatch {
                    face,
                    walked: arc,
                    owned: vertices,
                });
            }
        }
        if arc < 3 || vertices + 2 - arc < 3 {
            return Err(MeshError::DegenerateSplit {
                face,
                arc,
                vertices,
            });
        }

        let new_face = self.insert_face(self.face(face)?.flags);
        let he_start = self.out_edge(start)?;
        let he_end = self.out_edge(end)?;

        let mut he = he_end;
        while he != he_start {
            he = self.next(he)?;
            self.edge_mut(he)?.face = new_face;
        }
        self.settle_edge_custody(face, new_face)?;
        self.settle_vert_custody(face, new_face)?;

        let old_end = *self.edge(he_end)?;
        let old_start = *self.edge(he_start)?;
        let end_point = self.point(end)?;
        let start_point = self.point(start)?;

        let new_he_end = self.add_edge(HalfEdge {
            face: new_face,
            ..old_end
        })?;
        let new_he_start = self.add_edge(HalfEdge {
            face,
            ..old_start
        })?;
        for (partner, replacement) in [(old_end.pair, new_he_end), (old_start.pair, new_he_start)] {
            if let Some(p) = partner {
                self.edge_mut(p)?.pair = Some(replacement);
            }
        }

        let new_end = self.add_vertex(new_face, end_point, new_he_end)?;
        let new_start = self.add_vertex(face, start_point, new_he_start)?;

        let diagonal = self.edge_mut(he_start)?;
        diagonal.head = new_end;
        diagonal.next = new_he_end;
        diagonal.pair = Some(he_end);
        diagonal.flags = EdgeFlags::empty();

        let diagonal = self.edge_mut(he_end)?;
        diagonal.head = new_start;
        diagonal.next = new_he_start;
        diagonal.pair = Some(he_start);
        diagonal.flags = EdgeFlags::empty();

        Ok(new_face)
    }

    /// Collapses the vertex after `stem` out of the loop of `face`.
    ///
    /// When the vertex after that one sits on `stem` (a spike folding back
    /// onto itself) it is collapsed as well. The caller decides what to do
    /// with a face that drops below three vertices.
    pub fn fuse_edges(
        &mut self,
        points: &PointPool,
        face: FaceKey,
        stem: VertKey,
        epsilon: f64,
    ) -> MeshResult<()> {
        let count = self.face(face)?.edges.len();
        if count < 3 {
            return Err(MeshError::DegenerateLoop { points: count });
        }

        let replacer = self.out_edge(stem)?;
        let before = self.next(replacer)?;
        let post = self.next(before)?;
        let doomed = self.head(replacer)?;
        let before_head = self.head(before)?;
        let coincident =
            self.position(points, before_head)?.distance(self.position(points, stem)?) < epsilon;

        self.remove_vertex(face, doomed)?;
        if coincident {
            let post_edge = *self.edge(post)?;
            let r = self.edge_mut(replacer)?;
            r.head = post_edge.head;
            r.next = post_edge.next;
            self.remove_edge(face, post)?;
            self.remove_vertex(face, before_head)?;
            debug!(?face, "fused a folded spike");
        } else {
            let r = self.edge_mut(replacer)?;
            r.head = before_head;
            r.next = post;
        }
        self.remove_edge(face, before)
    }

    fn remove_vertex(&mut self, face: FaceKey, v: VertKey) -> MeshResult<()> {
        let f = self.face_mut(face)?;
        let Some(i) = f.verts.iter().position(|&x| x == v) else {
            return Err(MeshError::CustodyViolation { face });
        };
        f.verts.swap_remove(i);
        self.verts.remove(v);
        Ok(())
    }

    fn remove_edge(&mut self, face: FaceKey, e: EdgeKey) -> MeshResult<()> {
        let f = self.face_mut(face)?;
        let Some(i) = f.edges.iter().position(|&x| x == e) else {
            return Err(MeshError::CustodyViolation { face });
        };
        f.edges.swap_remove(i);
        if let Some(p) = self.edges.remove(e).and_then(|removed| removed.pair) {
            if let Some(partner) = self.edges.get_mut(p) {
                if partner.pair == Some(e) {
                    partner.pair = None;
                }
            }
        }
        Ok(())
    }

    /// Clears `pair` on every half-edge of `faces` whose partner no longer
    /// exists.
    pub fn clear_dangling_pairs(&mut self, faces: &[FaceKey]) -> MeshResult<()> {
        for &face in faces {
            let edges = self.face(face)?.edges.clone();
            for e in edges {
                if let Some(p) = self.edge(e)?.pair {
                    if !self.edges.contains_key(p) {
                        self.edge_mut(e)?.pair = None;
                    }
                }
            }
        }
        Ok(())
    }

    /// Unlinks the partners of every paired half-edge of `face`.
    pub fn unlink_pairs(&mut self, face: FaceKey) -> MeshResult<()> {
        let edges = self.face(face)?.edges.clone();
        for e in edges {
            if let Some(p) = self.edge(e)?.pair {
                if let Some(partner) = self.edges.get_mut(p) {
                    if partner.pair == Some(e) {
                        partner.pair = None;
                    }
                }
                self.edge_mut(e)?.pair = None;
            }
        }
        Ok(())
    }
}
