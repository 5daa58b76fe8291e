//! Face construction, cloning, disposal and normals.

use super::{EdgeFlags, EdgeKey, FaceFlags, FaceKey, HalfEdge, PointKey, PointPool, Topology, VertKey, Vertex};
use crate::core::vec3::{centroid, Vec3};
use crate::error::{MeshError, MeshResult};

impl Topology {
    /// Builds a new face from an ordered point loop.
    ///
    /// Every edge is marked [`EdgeFlags::OUTER`].
    ///
    /// # Examples
    /// ```
    /// use smaug_mesh::{PointPool, Topology, Vec3};
    /// let mut points = PointPool::default();
    /// let keys: Vec<_> = [Vec3::ZERO, Vec3::X, Vec3::Y]
    ///     .into_iter()
    ///     .map(|p| points.insert(p))
    ///     .collect();
    /// let mut topology = Topology::new();
    /// let face = topology.new_face(&keys).unwrap();
    /// assert_eq!(topology.loop_points(face).unwrap(), keys);
    /// ```
    pub fn new_face(&mut self, points: &[PointKey]) -> MeshResult<FaceKey> {
        if points.len() < 3 {
            return Err(MeshError::DegenerateLoop {
                points: points.len(),
            });
        }
        let face = self.insert_face(FaceFlags::empty());
        self.link_loop(face, points, &vec![EdgeFlags::OUTER; points.len()]);
        Ok(face)
    }

    /// Replaces the loop of an existing face, keeping its key and flags.
    pub fn define_face(&mut self, face: FaceKey, points: &[PointKey]) -> MeshResult<()> {
        if points.len() < 3 {
            return Err(MeshError::DegenerateLoop {
                points: points.len(),
            });
        }
        self.clear_face(face)?;
        self.link_loop(face, points, &vec![EdgeFlags::OUTER; points.len()]);
        Ok(())
    }

    /// Copies `src` into a new face with the same positions, winding, edge
    /// flags and face flags. Pairs are not copied.
    pub fn clone_face(&mut self, src: FaceKey) -> MeshResult<FaceKey> {
        let order = self.loop_verts(src)?;
        let mut points = Vec::with_capacity(order.len());
        let mut flags = Vec::with_capacity(order.len());
        for &v in &order {
            let vertex = self.vertex(v)?;
            points.push(vertex.point);
            flags.push(self.edge(vertex.edge)?.flags);
        }
        let face_flags = self.face(src)?.flags;
        let dst = self.insert_face(face_flags);
        self.link_loop(dst, &points, &flags);
        Ok(dst)
    }

    fn link_loop(&mut self, face: FaceKey, points: &[PointKey], flags: &[EdgeFlags]) {
        let n = points.len();
        let edges: Vec<EdgeKey> = flags
            .iter()
            .map(|&f| self.edges.insert(Self::detached_edge(face, f)))
            .collect();
        let verts: Vec<VertKey> = points
            .iter()
            .zip(&edges)
            .map(|(&point, &edge)| self.verts.insert(Vertex { point, edge }))
            .collect();
        for i in 0..n {
            if let Some(e) = self.edges.get_mut(edges[i]) {
                e.head = verts[(i + 1) % n];
                e.next = edges[(i + 1) % n];
            }
        }
        if let Some(f) = self.faces.get_mut(face) {
            f.edges = edges;
            f.verts = verts;
        }
    }

    fn clear_face(&mut self, face: FaceKey) -> MeshResult<()> {
        let f = self.face_mut(face)?;
        let edges = std::mem::take(&mut f.edges);
        let verts = std::mem::take(&mut f.verts);
        for e in edges {
            self.edges.remove(e);
        }
        for v in verts {
            self.verts.remove(v);
        }
        Ok(())
    }

    /// Removes `face` with every vertex and half-edge it owns.
    pub fn discard_face(&mut self, face: FaceKey) -> MeshResult<()> {
        self.clear_face(face)?;
        self.faces.remove(face);
        Ok(())
    }

    /// Discards every face in `faces`, leaving the vector empty.
    pub fn discard_faces(&mut self, faces: &mut Vec<FaceKey>) -> MeshResult<()> {
        for face in faces.drain(..) {
            self.discard_face(face)?;
        }
        Ok(())
    }

    /// Sets `flags` on every half-edge of `face`.
    pub fn mark_edges(&mut self, face: FaceKey, flags: EdgeFlags) -> MeshResult<()> {
        let edges = self.face(face)?.edges.clone();
        for e in edges {
            self.edge_mut(e)?.flags.insert(flags);
        }
        Ok(())
    }

    /// Adds `flags` to the face markers.
    pub fn mark_face(&mut self, face: FaceKey, flags: FaceFlags) -> MeshResult<()> {
        self.face_mut(face)?.flags.insert(flags);
        Ok(())
    }

    /// Removes `flags` from the face markers.
    pub fn unmark_face(&mut self, face: FaceKey, flags: FaceFlags) -> MeshResult<()> {
        self.face_mut(face)?.flags.remove(flags);
        Ok(())
    }

    /// Centroid of the loop positions.
    pub fn face_center(&self, points: &PointPool, face: FaceKey) -> MeshResult<Vec3> {
        let f = self.face(face)?;
        let mut positions = Vec::with_capacity(f.verts.len());
        for &v in &f.verts {
            positions.push(self.position(points, v)?);
        }
        centroid(positions).ok_or(MeshError::DegenerateLoop { points: 0 })
    }

    /// Unnormalized face normal; only its direction is meaningful.
    ///
    /// Convex faces use the turn at their first vertex. Anything else sums
    /// the cross products of each edge about the centroid.
    pub fn face_normal(&self, points: &PointPool, face: FaceKey) -> MeshResult<Vec3> {
        let f = self.face(face)?;
        if f.flags.contains(FaceFlags::CONVEX) {
            let Some(&v) = f.verts.first() else {
                return Err(MeshError::DegenerateLoop { points: 0 });
            };
            let between = self.successor(v)?;
            let end = self.successor(between)?;
            let p = self.position(points, v)?;
            let b = self.position(points, between)?;
            let e = self.position(points, end)?;
            return Ok((p - b).cross(b - e));
        }

        let center = self.face_center(points, face)?;
        let mut normal = Vec3::ZERO;
        for last in self.loop_verts(face)? {
            let l = self.position(points, last)?;
            let v = self.position(points, self.successor(last)?)?;
            normal += (center - v).cross(l - center);
        }
        Ok(normal)
    }
}

impl HalfEdge {
    /// Whether the half-edge is a seam or slit of the running cut pass.
    pub fn is_sliced(&self) -> bool {
        self.flags.contains(EdgeFlags::SLICED)
    }
}
