//! Index-based half-edge topology.
//!
//! A [`Topology`] is an arena of vertices, half-edges and faces addressed by
//! generation-checked `slotmap` keys. Every face exclusively owns the
//! vertices and half-edges of its loop; positions live outside the arena in a
//! [`PointPool`] and are shared between loops by [`PointKey`].
//!
//! ## Conventions
//!
//! - `vertex.edge` is the half-edge leaving the vertex
//! - `edge.head` is the vertex the half-edge points at, i.e. the origin of `edge.next`
//! - a vertex (and a half-edge) belongs to the face its out-edge names
//! - loops wind counter-clockwise around their normal

mod construct;
mod surgery;

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use crate::core::vec3::Vec3;
use crate::error::{MeshError, MeshResult};

new_key_type! {
    /// Handle to a position in a mesh's point pool.
    pub struct PointKey;
    /// Handle to a vertex in a topology arena.
    pub struct VertKey;
    /// Handle to a half-edge in a topology arena.
    pub struct EdgeKey;
    /// Handle to a face in a topology arena.
    pub struct FaceKey;
}

/// Positions shared by the loops of one mesh.
pub type PointPool = SlotMap<PointKey, Vec3>;

/// Resolves a point handle.
pub fn position(points: &PointPool, key: PointKey) -> MeshResult<Vec3> {
    points.get(key).copied().ok_or(MeshError::InvalidPoint(key))
}

bitflags! {
    /// Half-edge markers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EdgeFlags: u8 {
        /// Lies on the outer boundary of its face (not a decomposition diagonal).
        const OUTER = 0b0000_0001;
        /// Belongs to a part's collision clone.
        const PART_EDGE = 0b0000_0010;
        /// Seam or slit created by the current cut pass.
        const SLICED = 0b0000_0100;
    }
}

bitflags! {
    /// Face markers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceFlags: u8 {
        /// Produced by the slicing engine.
        const CUT = 0b0000_0001;
        /// Known to be convex.
        const CONVEX = 0b0000_0010;
        /// The outer loop of a mesh part.
        const MESH_PART = 0b0000_0100;
    }
}

/// A slot in a face loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    /// Shared position.
    pub point: PointKey,
    /// Half-edge leaving this vertex.
    pub edge: EdgeKey,
}

/// One directed step of a face loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Vertex this half-edge points at.
    pub head: VertKey,
    /// Successor in the loop.
    pub next: EdgeKey,
    /// Mirror half-edge on a neighbouring face, only tracked around cuts.
    pub pair: Option<EdgeKey>,
    /// Owning face.
    pub face: FaceKey,
    /// Markers.
    pub flags: EdgeFlags,
}

/// A polygon loop and everything it owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Face {
    /// Owned half-edges, unordered.
    pub edges: Vec<EdgeKey>,
    /// Owned vertices, unordered; `verts[0]` is where loop walks start.
    pub verts: Vec<VertKey>,
    /// Markers.
    pub flags: FaceFlags,
    /// Negative when the slicing engine expects to discard the face.
    pub cull_depth: i32,
}

impl Face {
    fn with_flags(flags: FaceFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }
}

/// Arena of vertices, half-edges and faces.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    verts: SlotMap<VertKey, Vertex>,
    edges: SlotMap<EdgeKey, HalfEdge>,
    faces: SlotMap<FaceKey, Face>,
}

impl Topology {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Vertex by handle.
    pub fn vertex(&self, key: VertKey) -> MeshResult<&Vertex> {
        self.verts.get(key).ok_or(MeshError::InvalidVertex(key))
    }

    pub(crate) fn vertex_mut(&mut self, key: VertKey) -> MeshResult<&mut Vertex> {
        self.verts.get_mut(key).ok_or(MeshError::InvalidVertex(key))
    }

    /// Half-edge by handle.
    pub fn edge(&self, key: EdgeKey) -> MeshResult<&HalfEdge> {
        self.edges.get(key).ok_or(MeshError::InvalidHalfEdge(key))
    }

    pub(crate) fn edge_mut(&mut self, key: EdgeKey) -> MeshResult<&mut HalfEdge> {
        self.edges.get_mut(key).ok_or(MeshError::InvalidHalfEdge(key))
    }

    /// Face by handle.
    pub fn face(&self, key: FaceKey) -> MeshResult<&Face> {
        self.faces.get(key).ok_or(MeshError::InvalidFace(key))
    }

    pub(crate) fn face_mut(&mut self, key: FaceKey) -> MeshResult<&mut Face> {
        self.faces.get_mut(key).ok_or(MeshError::InvalidFace(key))
    }

    /// Whether the face handle is live.
    pub fn contains_face(&self, key: FaceKey) -> bool {
        self.faces.contains_key(key)
    }

    /// Whether the half-edge handle is live.
    pub fn contains_edge(&self, key: EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Live faces in the arena.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Live half-edges in the arena.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Live vertices in the arena.
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Half-edge leaving `v`.
    pub fn out_edge(&self, v: VertKey) -> MeshResult<EdgeKey> {
        Ok(self.vertex(v)?.edge)
    }

    /// Vertex `e` points at.
    pub fn head(&self, e: EdgeKey) -> MeshResult<VertKey> {
        Ok(self.edge(e)?.head)
    }

    /// Loop successor of `e`.
    pub fn next(&self, e: EdgeKey) -> MeshResult<EdgeKey> {
        Ok(self.edge(e)?.next)
    }

    /// The vertex after `v` in its loop.
    pub fn successor(&self, v: VertKey) -> MeshResult<VertKey> {
        self.head(self.out_edge(v)?)
    }

    /// Position handle of `v`.
    pub fn point(&self, v: VertKey) -> MeshResult<PointKey> {
        Ok(self.vertex(v)?.point)
    }

    /// Position of `v`.
    pub fn position(&self, points: &PointPool, v: VertKey) -> MeshResult<Vec3> {
        position(points, self.point(v)?)
    }

    // =========================================================================
    // LOOP WALKS
    // =========================================================================

    /// Walks the loop of `face` from `verts[0]`.
    ///
    /// Fails with [`MeshError::LoopMismatch`] unless the walk closes after
    /// exactly `|verts|` steps.
    pub fn loop_verts(&self, face: FaceKey) -> MeshResult<Vec<VertKey>> {
        let f = self.face(face)?;
        let owned = f.verts.len();
        let Some(&start) = f.verts.first() else {
            return Err(MeshError::LoopMismatch {
                face,
                walked: 0,
                owned,
            });
        };
        let mut order = Vec::with_capacity(owned);
        let mut v = start;
        loop {
            order.push(v);
            v = self.successor(v)?;
            if v == start {
                break;
            }
            if order.len() > owned {
                return Err(MeshError::LoopMismatch {
                    face,
                    walked: order.len(),
                    owned,
                });
            }
        }
        if order.len() != owned {
            return Err(MeshError::LoopMismatch {
                face,
                walked: order.len(),
                owned,
            });
        }
        Ok(order)
    }

    /// Point handles of the loop of `face`, in winding order.
    pub fn loop_points(&self, face: FaceKey) -> MeshResult<Vec<PointKey>> {
        self.loop_verts(face)?
            .into_iter()
            .map(|v| self.point(v))
            .collect()
    }

    /// Positions of the loop of `face`, in winding order.
    pub fn loop_positions(&self, points: &PointPool, face: FaceKey) -> MeshResult<Vec<Vec3>> {
        self.loop_verts(face)?
            .into_iter()
            .map(|v| self.position(points, v))
            .collect()
    }

    /// Checks every ownership and closure invariant of `face`.
    pub fn validate_face(&self, face: FaceKey) -> MeshResult<()> {
        let f = self.face(face)?;
        if f.verts.len() != f.edges.len() {
            return Err(MeshError::LoopMismatch {
                face,
                walked: f.edges.len(),
                owned: f.verts.len(),
            });
        }
        for &e in &f.edges {
            if self.edge(e)?.face != face {
                return Err(MeshError::CustodyViolation { face });
            }
        }
        for &v in &f.verts {
            if self.edge(self.out_edge(v)?)?.face != face {
                return Err(MeshError::CustodyViolation { face });
            }
        }
        self.loop_verts(face).map(|_| ())
    }

    // =========================================================================
    // RAW INSERTION
    // =========================================================================

    pub(crate) fn insert_face(&mut self, flags: FaceFlags) -> FaceKey {
        self.faces.insert(Face::with_flags(flags))
    }

    /// Inserts a half-edge and hands it to `edge.face`.
    pub(crate) fn add_edge(&mut self, edge: HalfEdge) -> MeshResult<EdgeKey> {
        let face = edge.face;
        self.face(face)?;
        let key = self.edges.insert(edge);
        self.face_mut(face)?.edges.push(key);
        Ok(key)
    }

    /// Inserts a vertex owned by `face`.
    pub(crate) fn add_vertex(
        &mut self,
        face: FaceKey,
        point: PointKey,
        edge: EdgeKey,
    ) -> MeshResult<VertKey> {
        self.face(face)?;
        let key = self.verts.insert(Vertex { point, edge });
        self.face_mut(face)?.verts.push(key);
        Ok(key)
    }

    /// A half-edge owned by `face` whose links are filled in later.
    pub(crate) fn detached_edge(face: FaceKey, flags: EdgeFlags) -> HalfEdge {
        HalfEdge {
            head: VertKey::default(),
            next: EdgeKey::default(),
            pair: None,
            face,
            flags,
        }
    }
}
